use crate::catalog::Catalog;
use crate::models::{
    Nutrient, NutrientVector, PortionResult, RequirementRange, SectionName, SelectionResult,
};
use crate::planner::constants::UNBOUNDED;
use crate::planner::PlannedMeal;

/// Sign-encoded amount as text: mL when non-negative, pieces otherwise.
pub fn format_amount(volume: f64) -> String {
    if volume < 0.0 {
        format!("{:.0} pc", -volume)
    } else {
        format!("{:.1} mL", volume)
    }
}

fn format_bound(value: f64) -> String {
    if value.abs() >= UNBOUNDED {
        "-".to_string()
    } else {
        format!("{:.1}", value)
    }
}

fn item_label(catalog: &Catalog, id: u64) -> String {
    catalog
        .get(id)
        .map(|i| i.label())
        .unwrap_or_else(|| format!("#{}", id))
}

/// Display the per-meal requirement band.
pub fn display_requirements(range: &RequirementRange) {
    println!();
    println!("=== Per-Meal Requirements ===");
    println!();
    for nutrient in Nutrient::ALL {
        println!(
            "  {:<14} {:>10} .. {:<10} {}",
            nutrient.name(),
            format_bound(range.lo.get(nutrient)),
            format_bound(range.hi.get(nutrient)),
            nutrient.unit()
        );
    }
    println!();
}

/// Display the chosen items per section.
pub fn display_selection(selection: &SelectionResult, catalog: &Catalog) {
    println!();
    println!("=== Selected Items ===");
    println!();
    for name in SectionName::ALL {
        let choice = selection.section(name);
        let labels: Vec<String> = choice.items.iter().map(|id| item_label(catalog, *id)).collect();
        let items = if labels.is_empty() {
            "(none)".to_string()
        } else {
            labels.join(", ")
        };
        println!("  {:<7} [{}] {}", name.as_str(), choice.category.name(), items);
    }
    println!();
    println!("Selection cost: {:.3} ({:.2}s)", selection.cost, selection.runtime);
    println!();
}

/// Display the final servings.
pub fn display_portions(result: &PortionResult, catalog: &Catalog) {
    println!();
    println!("=== Portions ===");
    println!();

    if result.sections.is_empty() {
        println!("No items to portion.");
        println!();
        return;
    }

    let labels: Vec<String> = result
        .sections
        .iter()
        .map(|entry| item_label(catalog, entry.id))
        .collect();
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(10);

    for (entry, label) in result.sections.iter().zip(&labels) {
        println!(
            "  {:<7} {:<width$}  {:>10} of {:>10}",
            entry.section.as_str(),
            label,
            format_amount(entry.volume),
            format_amount(entry.total_volume),
            width = width
        );
    }

    println!();
    println!("Portion cost: {:.4} ({:.2}s)", result.cost, result.runtime);
    println!();
}

/// Display combined nutrients against the requirement band.
pub fn display_nutrition(totals: &NutrientVector, range: &RequirementRange) {
    println!("--- Nutrition vs. Target ---");
    for nutrient in Nutrient::ALL {
        let value = totals.get(nutrient);
        let (lo, hi) = (range.lo.get(nutrient), range.hi.get(nutrient));
        let status = if value < lo {
            "low"
        } else if value > hi {
            "high"
        } else {
            "ok"
        };
        println!(
            "  {:<14} {:>10.1} {:<4}  [{} .. {}]  {}",
            nutrient.name(),
            value,
            nutrient.unit(),
            format_bound(lo),
            format_bound(hi),
            status
        );
    }
    println!();
}

/// Display a full plan with diagnostics.
pub fn display_meal_plan(planned: &PlannedMeal, catalog: &Catalog) {
    let plan = &planned.plan;
    display_selection(&plan.selection, catalog);
    display_portions(&plan.portions, catalog);
    display_nutrition(&plan.portions.nutrition, &plan.requirements);

    let stats = &planned.diagnostics.stats;
    println!("--- Search ---");
    println!(
        "Iterations: {} (accepted {}, rejected {})",
        stats.iterations, stats.accepted, stats.rejected
    );
    println!(
        "Calories at min/max fill: {:.0} / {:.0}",
        planned.diagnostics.min_nutrition.calories, planned.diagnostics.max_nutrition.calories
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150.0), "150.0 mL");
        assert_eq!(format_amount(0.0), "0.0 mL");
        assert_eq!(format_amount(-3.0), "3 pc");
    }

    #[test]
    fn test_format_bound_hides_sentinel() {
        assert_eq!(format_bound(UNBOUNDED), "-");
        assert_eq!(format_bound(-UNBOUNDED), "-");
        assert_eq!(format_bound(12.34), "12.3");
    }
}
