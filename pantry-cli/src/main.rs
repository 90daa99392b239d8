use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod items_cmd;
mod llm;
mod logging;
mod state;
mod sweep_cmd;

use items_cmd::ItemsCommand;

#[derive(Parser, Debug)]
#[command(name = "pantry", version, about = "Track groceries and predict when they stop being safe to eat")]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config.toml to the pantry home directory
    Init,

    /// Print the category shelf-life table
    Categories,

    /// Predict expiry for a one-off item without storing it
    Predict {
        #[arg(long)]
        category: String,

        /// Purchase date, e.g. 2024-01-10 or 2024-01-10T00:00:00Z
        #[arg(long)]
        purchased: String,

        /// Known manufacturing date; replaces the category's assumed store delay
        #[arg(long)]
        manufactured: Option<String>,

        /// Reference time for days left (default: now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Manage tracked items
    Items {
        #[command(subcommand)]
        command: ItemsCommand,
    },

    /// Run the daily expiry check
    Sweep {
        /// Alert when days left is at or below this (default from config, 3)
        #[arg(long)]
        threshold: Option<i64>,

        /// Attach model advice (or offline advice without an API key) to each alert
        #[arg(long, default_value_t = false)]
        advice: bool,

        /// Keep running and sweep every day at the configured local time
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Init => config::init_config()?,

        Command::Categories => items_cmd::categories(),

        Command::Predict {
            category,
            purchased,
            manufactured,
            now,
        } => items_cmd::predict(&category, &purchased, manufactured.as_deref(), now.as_deref())?,

        Command::Items { command } => items_cmd::run(command).await?,

        Command::Sweep {
            threshold,
            advice,
            watch,
        } => sweep_cmd::run(threshold, advice, watch).await?,
    }

    Ok(())
}
