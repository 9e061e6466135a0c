use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use plate_planner_rs::catalog::{load_catalog, load_menus, load_profile, save_json, Catalog};
use plate_planner_rs::cli::{Cli, Command};
use plate_planner_rs::config::PlannerConfig;
use plate_planner_rs::error::{PlanError, Result};
use plate_planner_rs::interface::{
    display_meal_plan, display_nutrition, display_portions, display_requirements,
    display_selection, prompt_profile, prompt_yes_no,
};
use plate_planner_rs::models::{HealthGoal, Profile};
use plate_planner_rs::planner::{
    compute_requirements, optimize_portions, plan_meal_on, CategoryPools, ItemSelector,
    PlateItems,
};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or_default();

    match command {
        Command::Profile { out } => cmd_profile(&out),
        Command::Requirements => cmd_requirements(&cli),
        Command::Select => cmd_select(&cli),
        Command::Portion {
            large,
            small1,
            small2,
        } => cmd_portion(&cli, &large, &small1, &small2),
        Command::Plan => cmd_plan(&cli),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Catalog, narrowed to `--meal` when a menu is given.
fn load_inputs(cli: &Cli) -> Result<(Profile, Catalog)> {
    let profile = load_profile(&cli.profile)?;
    let catalog = load_catalog(&cli.catalog)?;
    let catalog = match (&cli.menu, &cli.meal) {
        (Some(menu_path), Some(meal)) => {
            let menus = load_menus(menu_path)?;
            catalog.for_meal(&menus, meal)?
        }
        _ => catalog,
    };
    if !cli.json {
        println!("Loaded {} candidate items", catalog.len());
    }
    Ok((profile, catalog))
}

fn goal_of(profile: &Profile) -> Result<HealthGoal> {
    profile
        .health_goal
        .ok_or(PlanError::MissingAttribute("health_goal"))
}

fn request_rng(config: &PlannerConfig) -> StdRng {
    config.portion_params().rng()
}

/// Build a profile interactively.
fn cmd_profile(out: &Path) -> Result<()> {
    let profile = prompt_profile()?;
    println!("{}", profile.debug_string());

    if out.exists() && !prompt_yes_no(&format!("Overwrite {}?", out.display()), false)? {
        println!("Profile not saved.");
        return Ok(());
    }
    save_json(out, &profile)?;
    println!("Profile saved to {}.", out.display());
    Ok(())
}

/// Print the per-meal requirement band.
fn cmd_requirements(cli: &Cli) -> Result<()> {
    let profile = load_profile(&cli.profile)?;
    let range = compute_requirements(&profile)?;
    if cli.json {
        return print_json(&range);
    }
    println!("{}", profile.debug_string());
    display_requirements(&range);
    Ok(())
}

/// Run item selection only.
fn cmd_select(cli: &Cli) -> Result<()> {
    let config = cli.overrides.resolve()?;
    let (profile, catalog) = load_inputs(cli)?;
    let range = compute_requirements(&profile)?;
    let mut rng = request_rng(&config);
    let pools = catalog.capped_pools(config.max_pool, &mut rng);

    let selection = ItemSelector::new(goal_of(&profile)?, range, &pools)
        .with_geometry(config.geometry())
        .with_params(config.selection_params())
        .with_items_per_section(config.items_per_section)
        .select(&mut rng)?;

    if cli.json {
        return print_json(&selection);
    }
    display_selection(&selection, &catalog);
    Ok(())
}

/// Optimize portions for items given on the command line.
fn cmd_portion(cli: &Cli, large: &[u64], small1: &[u64], small2: &[u64]) -> Result<()> {
    let config = cli.overrides.resolve()?;
    let (profile, catalog) = load_inputs(cli)?;
    let range = compute_requirements(&profile)?;

    let plate = PlateItems {
        large: catalog.resolve(large)?,
        small1: catalog.resolve(small1)?,
        small2: catalog.resolve(small2)?,
    };
    if plate.large.is_empty() && plate.small1.is_empty() && plate.small2.is_empty() {
        return Err(PlanError::InvalidInput(
            "give at least one item id with --large, --small1 or --small2".to_string(),
        ));
    }

    let mut rng = request_rng(&config);
    let (result, _) = optimize_portions(
        &range,
        &plate,
        &config.geometry(),
        &config.portion_params(),
        &mut rng,
    )?;

    if cli.json {
        return print_json(&result);
    }
    display_portions(&result, &catalog);
    display_nutrition(&result.nutrition, &range);
    Ok(())
}

/// Run the full pipeline.
fn cmd_plan(cli: &Cli) -> Result<()> {
    let config = cli.overrides.resolve()?;
    let (profile, catalog) = load_inputs(cli)?;
    if catalog.is_empty() {
        println!("Catalog is empty; nothing to plan.");
        return Ok(());
    }

    let mut rng = request_rng(&config);
    let pools: CategoryPools<'_> = catalog.capped_pools(config.max_pool, &mut rng);
    let today = chrono::Local::now().date_naive();
    let planned = plan_meal_on(&profile, &pools, &config, today, &mut rng)?;

    if cli.json {
        return print_json(&planned.plan);
    }
    println!("{}", profile.debug_string());
    println!("Settings: {}", config.display());
    display_meal_plan(&planned, &catalog);
    Ok(())
}
