use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use boostme_kpi::{Dashboard, FilterSelection};

#[derive(Parser)]
#[command(name = "boostme-kpi")]
#[command(about = "KPI cards and slicer options for a video metrics dataset")]
struct Args {
    /// Dataset to load (CSV or Parquet)
    dataset: PathBuf,

    /// Filter by publication year (repeatable)
    #[arg(long = "year")]
    years: Vec<i32>,

    /// Filter by category name (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Filter by channel (repeatable)
    #[arg(long = "channel")]
    channels: Vec<String>,

    /// Filter by weekday label, e.g. "Lundi" (repeatable)
    #[arg(long = "weekday")]
    weekdays: Vec<String>,

    /// Filter by publication hour 0-23 (repeatable)
    #[arg(long = "hour")]
    hours: Vec<i32>,

    /// Emit the full view as JSON instead of text cards
    #[arg(long)]
    json: bool,

    /// Print the first N filtered rows after the cards
    #[arg(long)]
    preview: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let selection = FilterSelection {
        years: args.years,
        categories: args.categories,
        channels: args.channels,
        weekdays: args.weekdays,
        hours: args.hours,
    };

    info!("Loading dataset {}", args.dataset.display());
    let dashboard = Dashboard::load(&args.dataset)?;
    let view = dashboard.view(&selection)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("=== Analyse des tendances ===");
        for card in &view.cards {
            println!("{}: {}", card.title, card.value);
        }
        println!(
            "\n{} / {} lignes après filtrage",
            view.summary.row_count, view.total_rows
        );
        if !view.slicers.years.is_empty() {
            println!("Années disponibles : {:?}", view.slicers.years);
        }
        if !view.slicers.channels.is_empty() {
            println!("Chaînes disponibles : {:?}", view.slicers.channels);
        }
    }

    if let Some(n) = args.preview {
        let preview = dashboard.preview(&selection, n)?;
        println!("\n{preview}");
    }

    Ok(())
}
