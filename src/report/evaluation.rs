use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{MealPlan, Profile};
use crate::planner::pipeline::{plan_meal_on, PlannedMeal};

/// Settings for one batch evaluation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Profile `i` is planned with seed `seed + i`.
    pub seed: u64,
    /// Reference date ages are measured on.
    pub today: NaiveDate,
    pub planner: PlannerConfig,
}

/// Outcome of planning one profile.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub index: usize,
    pub seed: u64,
    pub profile: Profile,
    pub outcome: std::result::Result<PlannedMeal, String>,
}

impl ProfileResult {
    pub fn plan(&self) -> Option<&MealPlan> {
        self.outcome.as_ref().ok().map(|p| &p.plan)
    }

    /// Final portion cost, if planning succeeded.
    pub fn cost(&self) -> Option<f64> {
        self.plan().map(|p| p.portions.cost)
    }

    /// Total wall time of selection and portioning.
    pub fn runtime(&self) -> f64 {
        self.plan()
            .map(|p| p.selection.runtime + p.portions.runtime)
            .unwrap_or(0.0)
    }
}

/// All results of a batch plus aggregate figures.
#[derive(Debug, Clone)]
pub struct BatchResults {
    pub results: Vec<ProfileResult>,
}

impl BatchResults {
    pub fn succeeded(&self) -> impl Iterator<Item = &ProfileResult> {
        self.results.iter().filter(|r| r.outcome.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.succeeded().count()
    }

    /// Mean final cost over successful plans.
    pub fn mean_cost(&self) -> Option<f64> {
        let costs: Vec<f64> = self.succeeded().filter_map(|r| r.cost()).collect();
        if costs.is_empty() {
            None
        } else {
            Some(costs.iter().sum::<f64>() / costs.len() as f64)
        }
    }

    /// Successful result with the lowest final cost; first wins ties.
    pub fn best(&self) -> Option<&ProfileResult> {
        self.succeeded().fold(None, |best: Option<&ProfileResult>, r| match best {
            Some(b) if b.cost() <= r.cost() => Some(b),
            _ => Some(r),
        })
    }
}

/// Plans one profile with its own seeded generator.
///
/// Pool sampling and both annealing stages draw from the same generator.
pub fn evaluate_profile(
    index: usize,
    profile: &Profile,
    catalog: &Catalog,
    config: &BatchConfig,
) -> ProfileResult {
    let seed = config.seed.wrapping_add(index as u64);
    let outcome = plan_with_seed(profile, catalog, config, seed).map_err(|e| {
        warn!(index, error = %e, "profile could not be planned");
        e.to_string()
    });

    ProfileResult {
        index,
        seed,
        profile: profile.clone(),
        outcome,
    }
}

fn plan_with_seed(
    profile: &Profile,
    catalog: &Catalog,
    config: &BatchConfig,
    seed: u64,
) -> Result<PlannedMeal> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pools = catalog.capped_pools(config.planner.max_pool, &mut rng);
    plan_meal_on(profile, &pools, &config.planner, config.today, &mut rng)
}

/// Plans every profile in order.
pub fn evaluate_profiles(
    profiles: &[Profile],
    catalog: &Catalog,
    config: &BatchConfig,
) -> BatchResults {
    let results: Vec<ProfileResult> = profiles
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let result = evaluate_profile(i, p, catalog, config);
            if let Some(cost) = result.cost() {
                info!(index = i, cost, runtime = result.runtime(), "planned profile");
            }
            result
        })
        .collect();

    BatchResults { results }
}
