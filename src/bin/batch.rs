use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plate_planner_rs::catalog::{load_catalog, load_profiles};
use plate_planner_rs::config::PlannerConfig;
use plate_planner_rs::report::{
    evaluate_profiles, print_summary, write_best_json, write_csv, BatchConfig,
};

#[derive(Parser, Debug)]
#[command(name = "batch")]
#[command(about = "Plans a meal for every profile in a file and writes a report")]
struct Args {
    /// JSON array of profiles
    #[arg(long, default_value = "profiles.json")]
    profiles: PathBuf,

    /// Path to the catalog JSON file
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Planner config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed; profile i uses seed + i
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Reference date for ages (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output CSV file for all results
    #[arg(long, default_value = "batch_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the lowest-cost plan
    #[arg(long)]
    best_json: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let catalog = match load_catalog(&args.catalog) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };

    let profiles = match load_profiles(&args.profiles) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading profiles {:?}: {}", args.profiles, e);
            std::process::exit(1);
        }
    };

    let planner = match PlannerConfig::load_or_default(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} items and {} profiles",
        catalog.len(),
        profiles.len()
    );
    println!("Settings: {}", planner.display());

    let config = BatchConfig {
        seed: args.seed,
        today: args
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        planner,
    };

    let results = evaluate_profiles(&profiles, &catalog, &config);
    print_summary(&results);

    if let Err(e) = write_csv(&results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Some(path) = &args.best_json {
        match results.best() {
            Some(best) => {
                if let Err(e) = write_best_json(best, path) {
                    eprintln!("Error writing JSON: {}", e);
                } else {
                    println!("Wrote best plan to {:?}", path);
                }
            }
            None => println!("No profile could be planned; skipping {:?}", path),
        }
    }
}
