use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Nutrient, SectionName};
use crate::report::evaluation::{BatchResults, ProfileResult};

/// Round a float to n decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn opt_label<T>(value: Option<T>, label: impl Fn(T) -> &'static str) -> String {
    value.map(label).unwrap_or("").to_string()
}

fn opt_number(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_default()
}

fn header() -> Vec<String> {
    let mut cols: Vec<String> = [
        "index",
        "seed",
        "status",
        "sex",
        "activity_level",
        "health_goal",
        "height",
        "weight",
        "large",
        "small1",
        "small2",
        "portions",
        "selection_cost",
        "portion_cost",
        "runtime",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    cols.extend(Nutrient::ALL.iter().map(|n| n.name().to_string()));
    cols
}

fn row(result: &ProfileResult) -> Vec<String> {
    let p = &result.profile;
    let mut cols = vec![result.index.to_string(), result.seed.to_string()];

    match &result.outcome {
        Ok(planned) => {
            let plan = &planned.plan;
            cols.push("ok".to_string());
            cols.extend([
                opt_label(p.sex, |s| s.label()),
                opt_label(p.activity_level, |a| a.label()),
                opt_label(p.health_goal, |g| g.label()),
                opt_number(p.height),
                opt_number(p.weight),
            ]);
            for name in SectionName::ALL {
                let ids: Vec<String> = plan
                    .selection
                    .section(name)
                    .items
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                cols.push(ids.join(";"));
            }
            let portions: Vec<String> = plan
                .portions
                .sections
                .iter()
                .map(|e| format!("{}:{:.1}", e.id, e.volume))
                .collect();
            cols.push(portions.join(";"));
            cols.push(format!("{:.4}", plan.selection.cost));
            cols.push(format!("{:.4}", plan.portions.cost));
            cols.push(format!("{:.3}", result.runtime()));
            cols.extend(
                Nutrient::ALL
                    .iter()
                    .map(|n| format!("{:.2}", plan.portions.nutrition.get(*n))),
            );
        }
        Err(message) => {
            cols.push(format!("error: {}", message));
            cols.extend([
                opt_label(p.sex, |s| s.label()),
                opt_label(p.activity_level, |a| a.label()),
                opt_label(p.health_goal, |g| g.label()),
                opt_number(p.height),
                opt_number(p.weight),
            ]);
            cols.resize(header().len(), String::new());
        }
    }
    cols
}

/// Write one row per profile to a CSV file.
pub fn write_csv(results: &BatchResults, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(header())?;
    for result in &results.results {
        wtr.write_record(row(result))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the best plan to a JSON file with rounded floats.
pub fn write_best_json(best: &ProfileResult, path: &Path) -> Result<()> {
    let Some(plan) = best.plan() else {
        return Ok(());
    };

    let json = serde_json::json!({
        "index": best.index,
        "seed": best.seed,
        "profile": best.profile,
        "selection": plan.selection,
        "portions": plan.portions.sections.iter().map(|e| {
            serde_json::json!({
                "id": e.id,
                "volume": round_to(e.volume, 2),
                "total_volume": round_to(e.total_volume, 2),
                "section": e.section,
            })
        }).collect::<Vec<_>>(),
        "cost": round_to(plan.portions.cost, 4),
        "runtime": round_to(best.runtime(), 3),
        "nutrition": plan.portions.nutrition,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print a short summary of the batch to stdout.
pub fn print_summary(results: &BatchResults) {
    println!("\n=== Batch Summary ===\n");
    println!(
        "Profiles: {} ({} failed)",
        results.results.len(),
        results.failure_count()
    );
    if let Some(mean) = results.mean_cost() {
        println!("Mean portion cost: {:.4}", mean);
    }
    if let Some(best) = results.best() {
        println!(
            "Best: profile #{} cost={:.4} runtime={:.2}s",
            best.index,
            best.cost().unwrap_or(0.0),
            best.runtime()
        );
    }
    println!();
}
