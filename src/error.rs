use thiserror::Error;

use crate::models::ItemId;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Profile missing attribute {0}")]
    MissingAttribute(&'static str),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid item {id}: {reason}")]
    InvalidItem { id: ItemId, reason: String },

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Portion search produced a non-finite cost")]
    NonFiniteCost,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
