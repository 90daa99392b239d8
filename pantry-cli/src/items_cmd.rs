use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use pantry_advice::AdviceRequest;
use pantry_core::{
    FoodItem, NewFoodItem, POLICY_TABLE, TrackedItem, parse_instant, predict_expiry,
    to_rfc3339_utc,
};
use pantry_store::{ItemRepository, parse_items_csv};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::config::{API_KEY_ENV, load_config};
use crate::llm::AdviceClient;
use crate::state::open_store;

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// Track a new grocery item
    Add {
        #[arg(long)]
        name: String,

        /// dairy, vegetables, fruits, meat, packaged, spices, bakery, frozen (anything else counts as packaged)
        #[arg(long)]
        category: String,

        /// Purchase date, e.g. 2024-01-10 or 2024-01-10T18:30:00Z
        #[arg(long)]
        purchased: String,

        /// Manufacturing date if printed on the pack
        #[arg(long)]
        manufactured: Option<String>,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List tracked items, newest first, with predictions
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show one item with its prediction
    Show {
        id: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Stop tracking an item
    Remove { id: String },

    /// Bulk add items from CSV (name,category,purchase_date[,quantity,notes,manufactured_date])
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Ask the model for advice and recipe ideas for one item
    Advice { id: String },

    /// Ask the model for recipes combining several items
    Recipe {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

pub async fn run(cmd: ItemsCommand) -> Result<()> {
    match cmd {
        ItemsCommand::Add {
            name,
            category,
            purchased,
            manufactured,
            quantity,
            notes,
        } => {
            let mut item = NewFoodItem::new(name, category, purchased).with_quantity(quantity);
            item.manufactured_date = manufactured;
            item.notes = notes;
            add(item)
        }
        ItemsCommand::List { json } => list(json),
        ItemsCommand::Show { id, json } => show(&id, json),
        ItemsCommand::Remove { id } => remove(&id),
        ItemsCommand::Import { csv } => import(csv),
        ItemsCommand::Advice { id } => advice(&id).await,
        ItemsCommand::Recipe { ids } => recipe(&ids).await,
    }
}

fn add(item: NewFoodItem) -> Result<()> {
    let mut store = open_store()?;
    let stored = store.insert(item, Utc::now())?;
    let tracked = stored.track(Utc::now())?;
    println!("Added #{}", stored.id);
    print_row(&tracked);
    Ok(())
}

fn list(json: bool) -> Result<()> {
    let store = open_store()?;
    let now = Utc::now();
    let tracked: Vec<TrackedItem> = store
        .list()?
        .iter()
        .filter_map(|item| track_or_warn(item, now))
        .collect();

    if json {
        print_json(&tracked)?;
        return Ok(());
    }

    if tracked.is_empty() {
        println!("No items tracked. Add one: pantry items add --name Milk --category dairy --purchased 2024-01-10");
        return Ok(());
    }
    for t in &tracked {
        print_row(t);
    }
    Ok(())
}

fn show(id: &str, json: bool) -> Result<()> {
    let store = open_store()?;
    let item = find(&store, id)?;
    let tracked = item
        .track(Utc::now())
        .with_context(|| format!("predicting item #{id}"))?;

    if json {
        return print_json(&tracked);
    }

    let p = &tracked.prediction;
    println!("#{} {} (x{})", item.id, item.name, item.quantity);
    println!("  category:      {} (entered as '{}')", p.category, item.category);
    println!("  purchased:     {}", to_rfc3339_utc(p.purchase_timestamp));
    println!("  manufactured:  {}", to_rfc3339_utc(p.manufacturing_timestamp));
    println!("  expires:       {}", to_rfc3339_utc(p.predicted_expiry_timestamp));
    println!(
        "  safe until:    {} ({} day margin)",
        to_rfc3339_utc(p.safe_expiry_timestamp),
        p.safety_margin_days
    );
    println!("  days left:     {}", tracked.days_left);
    if let Some(notes) = &item.notes {
        println!("  notes:         {notes}");
    }
    Ok(())
}

fn remove(id: &str) -> Result<()> {
    let mut store = open_store()?;
    if !store.remove(id)? {
        bail!("item not found: {id}");
    }
    println!("Removed #{id}");
    Ok(())
}

fn import(csv: PathBuf) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let items = parse_items_csv(&csv).with_context(|| format!("parsing {}", csv.display()))?;
    let mut store = open_store()?;
    let stored = store.insert_many(items, Utc::now())?;
    println!("Imported {} items from {}", stored.len(), csv.display());
    Ok(())
}

async fn advice(id: &str) -> Result<()> {
    let cfg = load_config()?;
    let client = AdviceClient::from_config(&cfg.llm)
        .ok_or_else(|| anyhow!("no API key; set {API_KEY_ENV} or [llm].api_key in config.toml"))?;

    let store = open_store()?;
    let item = find(&store, id)?;
    let tracked = item.track(Utc::now())?;
    let req = AdviceRequest::from(&tracked);

    let text = client.advise(&req).await?;
    println!("{} ({} days left)\n", item.name, tracked.days_left);
    println!("{text}");
    Ok(())
}

async fn recipe(ids: &[String]) -> Result<()> {
    let cfg = load_config()?;
    let client = AdviceClient::from_config(&cfg.llm)
        .ok_or_else(|| anyhow!("no API key; set {API_KEY_ENV} or [llm].api_key in config.toml"))?;

    let store = open_store()?;
    let reqs = recipe_requests(&store, ids, Utc::now())?;
    for r in &reqs {
        println!("- {} ({} days left)", r.name, r.days_left);
    }
    println!();

    let text = client.recipes(&reqs).await?;
    println!("{text}");
    Ok(())
}

/// Resolve ids to advice requests, skipping unknown or unpredictable items.
fn recipe_requests(
    store: &impl ItemRepository,
    ids: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<AdviceRequest>> {
    let mut reqs = Vec::with_capacity(ids.len());
    for id in ids {
        match store.get(id)? {
            Some(item) => {
                if let Some(t) = track_or_warn(&item, now) {
                    reqs.push(AdviceRequest::from(&t));
                }
            }
            None => warn!(%id, "item not found, leaving it out"),
        }
    }
    if reqs.is_empty() {
        bail!("no valid items found among: {}", ids.join(", "));
    }
    Ok(reqs)
}

/// One-off prediction without touching the store.
pub fn predict(
    category: &str,
    purchased: &str,
    manufactured: Option<&str>,
    now: Option<&str>,
) -> Result<()> {
    let manufactured = manufactured.map(parse_instant).transpose()?;
    let now = match now {
        Some(s) => parse_instant(s)?,
        None => Utc::now(),
    };
    let prediction = predict_expiry(category, purchased, manufactured)?;

    #[derive(Serialize)]
    struct Out<'a> {
        prediction: &'a pantry_core::ExpiryPrediction,
        days_left: i64,
        now: DateTime<Utc>,
    }

    print_json(&Out {
        days_left: prediction.days_remaining(now),
        prediction: &prediction,
        now,
    })
}

pub fn categories() {
    println!(
        "{:<12} {:>11} {:>10} {:>8} {:>11}",
        "category", "store_delay", "shelf_life", "safety%", "margin_days"
    );
    for (category, policy) in POLICY_TABLE {
        println!(
            "{:<12} {:>11} {:>10} {:>8} {:>11}",
            category.as_str(),
            policy.store_delay_days,
            policy.shelf_life_days,
            policy.safety_percent,
            policy.safety_margin_days()
        );
    }
    println!("\nUnknown categories use the packaged policy.");
}

fn find(store: &impl ItemRepository, id: &str) -> Result<FoodItem> {
    store
        .get(id)?
        .ok_or_else(|| anyhow!("item not found: {id}"))
}

fn track_or_warn(item: &FoodItem, now: DateTime<Utc>) -> Option<TrackedItem> {
    match item.track(now) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(id = %item.id, name = %item.name, "skipping item: {e}");
            None
        }
    }
}

fn print_row(t: &TrackedItem) {
    println!(
        "{:>4}  {:<24} {:<10} safe until {}  {:>3} days left",
        format!("#{}", t.item.id),
        t.item.name,
        t.prediction.category.as_str(),
        t.prediction.safe_expiry_timestamp.format("%Y-%m-%d %H:%M"),
        t.days_left
    );
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pantry_store::MemoryItemStore;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_recipe_requests_skip_unknown_ids() {
        let mut store = MemoryItemStore::new();
        let milk = store
            .insert(NewFoodItem::new("Milk", "dairy", "2024-01-10T00:00:00Z"), now())
            .unwrap();
        let eggs = store
            .insert(NewFoodItem::new("Eggs", "meat", "2024-01-09T00:00:00Z"), now())
            .unwrap();

        let ids = vec![milk.id.clone(), "404".to_string(), eggs.id.clone()];
        let reqs = recipe_requests(&store, &ids, now()).unwrap();
        let names: Vec<_> = reqs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);
        assert_eq!(reqs[0].days_left, 3);
    }

    #[test]
    fn test_recipe_requests_fail_when_nothing_resolves() {
        let store = MemoryItemStore::new();
        let err = recipe_requests(&store, &["7".to_string(), "8".to_string()], now()).unwrap_err();
        assert_eq!(err.to_string(), "no valid items found among: 7, 8");
    }
}
