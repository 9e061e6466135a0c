use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::models::{CandidateItem, ItemId, MealPlan, Profile, SelectionResult};
use crate::planner::portion::{optimize_portions, PlateItems, PortionDiagnostics};
use crate::planner::requirements::compute_requirements_on;
use crate::planner::selection::{CategoryPools, ItemSelector};

/// A meal plan plus diagnostics of its final portion run.
#[derive(Debug, Clone)]
pub struct PlannedMeal {
    pub plan: MealPlan,
    pub diagnostics: PortionDiagnostics,
}

/// Looks up the chosen ids of every section.
pub fn resolve_selection<'a>(
    selection: &SelectionResult,
    pools: &CategoryPools<'a>,
) -> Result<PlateItems<'a>> {
    let by_id: HashMap<ItemId, &'a CandidateItem> = [&pools.protein, &pools.vegetable, &pools.grain]
        .into_iter()
        .flatten()
        .map(|item| (item.id, *item))
        .collect();
    let lookup = |ids: &[ItemId]| -> Result<Vec<&'a CandidateItem>> {
        ids.iter()
            .map(|id| by_id.get(id).copied().ok_or(PlanError::ItemNotFound(*id)))
            .collect()
    };

    Ok(PlateItems {
        large: lookup(&selection.large.items)?,
        small1: lookup(&selection.small1.items)?,
        small2: lookup(&selection.small2.items)?,
    })
}

/// Requirements, then item selection, then the final portion run.
///
/// Every random draw comes from `rng`.
pub fn plan_meal_on(
    profile: &Profile,
    pools: &CategoryPools<'_>,
    config: &PlannerConfig,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> Result<PlannedMeal> {
    config.validate()?;
    let requirements = compute_requirements_on(profile, today)?;
    let goal = profile
        .health_goal
        .ok_or(PlanError::MissingAttribute("health_goal"))?;
    info!(
        calories_lo = requirements.lo.calories,
        calories_hi = requirements.hi.calories,
        "computed meal requirements"
    );

    let selection = ItemSelector::new(goal, requirements, pools)
        .with_geometry(config.geometry())
        .with_params(config.selection_params())
        .with_items_per_section(config.items_per_section)
        .select(rng)?;
    info!(
        items = selection.item_count(),
        cost = selection.cost,
        runtime = selection.runtime,
        "selected items"
    );

    let plate = resolve_selection(&selection, pools)?;
    let (portions, diagnostics) = optimize_portions(
        &requirements,
        &plate,
        &config.geometry(),
        &config.portion_params(),
        rng,
    )?;
    info!(
        cost = portions.cost,
        runtime = portions.runtime,
        iterations = diagnostics.stats.iterations,
        "optimized portions"
    );

    Ok(PlannedMeal {
        plan: MealPlan {
            requirements,
            selection,
            portions,
        },
        diagnostics,
    })
}

/// [`plan_meal_on`] with age measured today and the generator implied by
/// the config seed.
pub fn plan_meal(
    profile: &Profile,
    pools: &CategoryPools<'_>,
    config: &PlannerConfig,
) -> Result<PlannedMeal> {
    let mut rng = config.portion_params().rng();
    plan_meal_on(
        profile,
        pools,
        config,
        chrono::Local::now().date_naive(),
        &mut rng,
    )
}
