use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use pantry_advice::AdviceRequest;
use pantry_core::{SweepPolicy, SweepReport, next_sweep_at, sweep_items};
use pantry_store::ItemRepository;
use tracing::{info, warn};

use crate::config::load_config;
use crate::llm::{AdviceClient, advice_or_offline};
use crate::state::open_store;

const RULE: &str = "============================================================";

/// Daily expiry check: alert on items at or under the threshold, optionally
/// with model advice for each. `watch` keeps running at the configured local time.
pub async fn run(threshold: Option<i64>, with_advice: bool, watch: bool) -> Result<()> {
    let cfg = load_config()?;
    let mut policy = cfg.sweep.policy();
    if let Some(t) = threshold {
        policy.threshold_days = t;
    }

    let client = if with_advice {
        let c = AdviceClient::from_config(&cfg.llm);
        if c.is_none() {
            warn!("no API key configured; alerts will carry offline advice");
        }
        c
    } else {
        None
    };

    if !watch {
        return sweep_once(&policy, with_advice, client.as_ref()).await;
    }

    let tz = cfg.sweep.tz()?;
    loop {
        let now = Utc::now();
        let next = next_sweep_at(now, tz, &policy)
            .ok_or_else(|| anyhow!("invalid sweep time {:02}:{:02}", policy.hour, policy.minute))?;
        info!(at = %next.with_timezone(&tz), "next expiry sweep scheduled");

        let wait = (next - now).to_std().unwrap_or_default();
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("stopping sweep scheduler");
                return Ok(());
            }
        }

        // Keep the scheduler alive through a bad run; the next day may succeed.
        if let Err(e) = sweep_once(&policy, with_advice, client.as_ref()).await {
            warn!("expiry sweep failed: {e:#}");
        }
    }
}

async fn sweep_once(
    policy: &SweepPolicy,
    with_advice: bool,
    client: Option<&AdviceClient>,
) -> Result<()> {
    info!("running expiry sweep");
    let store = open_store().context("opening item store")?;
    let items = store.list()?;
    let report = sweep_items(&items, Utc::now(), policy);

    for s in &report.skipped {
        warn!(id = %s.item_id, name = %s.name, "sweep skipped item: {}", s.reason);
    }

    print_report(&report, policy);

    if with_advice {
        for alert in &report.alerts {
            let advice = advice_or_offline(client, &AdviceRequest::from(alert)).await;
            println!("\n{RULE}");
            println!("{}", alert.headline());
            println!("{RULE}");
            println!("{advice}");
            println!("{RULE}");
        }
    }

    info!(
        checked = report.checked,
        alerts = report.alerts.len(),
        skipped = report.skipped.len(),
        "expiry sweep complete"
    );
    Ok(())
}

fn print_report(report: &SweepReport, policy: &SweepPolicy) {
    if report.alerts.is_empty() {
        println!(
            "Checked {} items: nothing within {} days of safe expiry.",
            report.checked, policy.threshold_days
        );
        return;
    }

    println!(
        "Checked {} items: {} within {} days of safe expiry.\n",
        report.checked,
        report.alerts.len(),
        policy.threshold_days
    );
    for a in &report.alerts {
        println!(
            "- #{} {} [{}] {} days left (safe until {})",
            a.item_id,
            a.name,
            a.category,
            a.days_left,
            a.safe_expiry.format("%Y-%m-%d %H:%M")
        );
    }
}
