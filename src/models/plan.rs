use serde::{Deserialize, Serialize};

use crate::models::{Category, ItemId, NutrientVector};

/// One of the three serving areas on a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Large,
    Small1,
    Small2,
}

impl SectionName {
    pub const ALL: [SectionName; 3] = [SectionName::Large, SectionName::Small1, SectionName::Small2];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Large => "large",
            SectionName::Small1 => "small1",
            SectionName::Small2 => "small2",
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceptable nutrient band for one meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementRange {
    pub lo: NutrientVector,
    pub hi: NutrientVector,
}

impl RequirementRange {
    pub fn new(lo: NutrientVector, hi: NutrientVector) -> Self {
        Self { lo, hi }
    }
}

/// Items chosen for one plate section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionChoice {
    pub items: Vec<ItemId>,
    pub category: Category,
}

/// Output of the item selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub large: SectionChoice,
    pub small1: SectionChoice,
    pub small2: SectionChoice,

    /// Summed memoized cost of the winning combination.
    pub cost: f64,

    /// Wall time in seconds.
    pub runtime: f64,
}

impl SelectionResult {
    pub fn section(&self, name: SectionName) -> &SectionChoice {
        match name {
            SectionName::Large => &self.large,
            SectionName::Small1 => &self.small1,
            SectionName::Small2 => &self.small2,
        }
    }

    /// Total number of chosen items over all sections.
    pub fn item_count(&self) -> usize {
        SectionName::ALL
            .iter()
            .map(|s| self.section(*s).items.len())
            .sum()
    }
}

/// Final serving for one item.
///
/// `volume` and `total_volume` are sign-encoded: non-negative means
/// millilitres, negative means a piece count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionEntry {
    pub id: ItemId,
    pub volume: f64,
    pub total_volume: f64,
    pub section: SectionName,
}

impl PortionEntry {
    pub fn is_discrete(&self) -> bool {
        self.total_volume < 0.0
    }
}

/// Output of the portion optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionResult {
    pub sections: Vec<PortionEntry>,
    pub cost: f64,

    /// Wall time in seconds.
    pub runtime: f64,

    /// Combined nutrients of the final servings.
    pub nutrition: NutrientVector,
}

/// Everything produced for one meal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub requirements: RequirementRange,
    pub selection: SelectionResult,
    pub portions: PortionResult,
}
