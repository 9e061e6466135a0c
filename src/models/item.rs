use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::NutrientVector;

/// Primary key of a candidate item in the catalog.
pub type ItemId = u64;

/// Food category a plate section is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Protein,
    Vegetable,
    Grain,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Protein, Category::Vegetable, Category::Grain];

    pub fn name(self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Vegetable => "vegetable",
            Category::Grain => "grain",
        }
    }
}

/// A dish that may be served in a plate section.
///
/// `portion_volume` is the reference unit the nutrients are given for.
/// Positive means millilitres of a continuous item; negative means the item
/// is discrete and the magnitude is the number of pieces per reference unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    pub portion_volume: f64,

    #[serde(default)]
    pub max_pieces: u32,

    #[serde(flatten)]
    pub nutrients: NutrientVector,
}

impl CandidateItem {
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.portion_volume < 0.0
    }

    /// Reject items the optimizer cannot scale.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| PlanError::InvalidItem {
            id: self.id,
            reason: reason.to_string(),
        };

        if !self.portion_volume.is_finite() {
            return Err(invalid("portion volume is not finite"));
        }
        if self.is_discrete() {
            if self.portion_volume.abs().round() < 1.0 {
                return Err(invalid("discrete portion must be at least one piece"));
            }
            if self.max_pieces == 0 {
                return Err(invalid("discrete item has no max piece count"));
            }
        } else if self.portion_volume == 0.0 {
            return Err(invalid("portion volume is zero"));
        }
        if !self.nutrients.is_finite() {
            return Err(invalid("nutrient values must be finite"));
        }
        Ok(())
    }

    /// Display label: the name if present, otherwise the id.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("#{}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, C:{} P:{} F:{} per {}",
            self.label(),
            self.category.name(),
            self.nutrients.calories,
            self.nutrients.carbohydrate,
            self.nutrients.protein,
            self.nutrients.total_fat,
            if self.is_discrete() {
                format!("{} pc", -self.portion_volume)
            } else {
                format!("{} mL", self.portion_volume)
            }
        )
    }
}

impl PartialEq for CandidateItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CandidateItem {}

impl std::hash::Hash for CandidateItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> CandidateItem {
        CandidateItem {
            id: 7,
            name: "Brown Rice".to_string(),
            category: Category::Grain,
            portion_volume: 150.0,
            max_pieces: 0,
            nutrients: NutrientVector {
                calories: 210.0,
                carbohydrate: 44.0,
                protein: 5.0,
                total_fat: 1.6,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_valid_item() {
        assert!(sample_item().validate().is_ok());
    }

    #[test]
    fn test_zero_portion_rejected() {
        let mut item = sample_item();
        item.portion_volume = 0.0;
        assert!(matches!(item.validate(), Err(PlanError::InvalidItem { id: 7, .. })));
    }

    #[test]
    fn test_discrete_needs_pieces() {
        let mut item = sample_item();
        item.portion_volume = -1.0;
        assert!(item.is_discrete());
        assert!(item.validate().is_err());

        item.max_pieces = 4;
        assert!(item.validate().is_ok());

        item.portion_volume = -0.2;
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_non_finite_nutrient_rejected() {
        let mut item = sample_item();
        item.nutrients.sodium = f64::INFINITY;
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_flattened_json() {
        let json = r#"{"id": 3, "name": "Chicken", "category": "protein",
            "portion_volume": -1, "max_pieces": 3, "calories": 180, "protein": 25}"#;
        let item: CandidateItem = serde_json::from_str(json).unwrap();
        assert!(item.is_discrete());
        assert_eq!(item.max_pieces, 3);
        assert_eq!(item.nutrients.protein, 25.0);
        assert_eq!(item.nutrients.fiber, 0.0);
    }

    #[test]
    fn test_equality_by_id() {
        let a = sample_item();
        let mut b = sample_item();
        b.name = "Other".to_string();
        assert_eq!(a, b);
    }
}
