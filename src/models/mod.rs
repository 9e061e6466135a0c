pub mod item;
pub mod nutrition;
pub mod plan;
pub mod profile;

pub use item::{CandidateItem, Category, ItemId};
pub use nutrition::{distance_outside_range, Nutrient, NutrientVector, NUTRIENT_COUNT};
pub use plan::{
    MealPlan, PortionEntry, PortionResult, RequirementRange, SectionChoice, SectionName,
    SelectionResult,
};
pub use profile::{ActivityLevel, HealthGoal, Profile, Sex};
