//! Compute a drone survey plan offline from an estate JSON file.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use survey_cli::EstateFile;
use survey_core::{bare_plot_distance, Budget, SurveyPlan};

/// Plan a serpentine drone survey without a server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Estate JSON file ({"width", "length", "trees": [{"x", "y", "height"}]})
    #[arg(long)]
    file: PathBuf,

    /// Maximum flight distance; zero or negative means unlimited
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    max_distance: i64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let estate = EstateFile::load(&args.file)?;
    let plan = estate.plan(Budget::new(args.max_distance))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "Estate {}x{} with {} trees",
        estate.width,
        estate.length,
        estate.trees.len()
    );
    if let Some(stats) = estate.stats() {
        println!(
            "  Heights: min {}, median {}, max {}",
            stats.min_height, stats.median_height, stats.max_height
        );
    }
    println!("  Tree-free baseline: {}", bare_plot_distance(estate.plot()));

    match plan {
        SurveyPlan::Full { total_distance } => {
            println!("Total distance: {}", total_distance);
        }
        SurveyPlan::Truncated { budget, stopped_at } => {
            println!(
                "Budget {} exhausted at ({}, {})",
                budget, stopped_at.x, stopped_at.y
            );
        }
    }
    Ok(())
}
