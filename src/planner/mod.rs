pub mod constants;
pub mod pipeline;
pub mod portion;
pub mod requirements;
pub mod selection;

pub use constants::*;
pub use pipeline::{plan_meal, plan_meal_on, resolve_selection, PlannedMeal};
pub use portion::{
    acceptance_probability, cost_scale, optimize_portions, plate_nutrition, AnnealingParams,
    AnnealingStats, CostWeights, PlateGeometry, PlateItems, PlateSection, PortionDiagnostics,
    SimulatedAnnealing,
};
pub use requirements::{compute_requirements, compute_requirements_on, daily_calories};
pub use selection::{combinations, section_categories, CategoryPools, ItemSelector};
