//! Upload an estate JSON file to a running survey server.
//!
//! Creates the estate, plants every tree, then fetches the server's plan
//! and checks it against a local computation.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use survey_cli::{EstateFile, SurveyClient};
use survey_core::Budget;

/// Seed a survey server with an estate and its trees
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Survey Server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Estate JSON file
    #[arg(long)]
    file: PathBuf,

    /// Maximum flight distance for the plan check
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    max_distance: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let estate = EstateFile::load(&args.file)?;
    let client = SurveyClient::new(&args.url);

    println!("Connecting to Survey Server at {}...", args.url);
    let estate_id = client.create_estate(estate.width, estate.length)?;
    println!("Created estate {}", estate_id);

    for (i, tree) in estate.trees.iter().enumerate() {
        client.add_tree(&estate_id, tree)?;
        println!(
            "[{:4}] Planted ({}, {}) height {}",
            i + 1,
            tree.x,
            tree.y,
            tree.height
        );
    }

    if !estate.trees.is_empty() {
        let stats = client.stats(&estate_id)?;
        println!(
            "Stats: {} trees, min {}, median {}, max {}",
            stats.tree_count, stats.min_height, stats.median_height, stats.max_height
        );
    }

    let budget = Budget::new(args.max_distance);
    let remote = client.drone_plan(&estate_id, budget)?;
    let local = estate.plan(budget)?;
    println!("Server plan: {}", serde_json::to_string(&remote)?);

    if remote != local {
        bail!(
            "Server plan {:?} differs from local plan {:?}",
            remote,
            local
        );
    }
    println!("Local plan matches.");
    Ok(())
}
