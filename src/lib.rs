pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod report;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use models::{CandidateItem, MealPlan, NutrientVector, Profile, RequirementRange};
