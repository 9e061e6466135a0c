use crate::models::{ActivityLevel, Category, HealthGoal, NutrientVector, Sex};

/// Stand-in for an open bound. Kept finite so ranges stay JSON-serializable.
pub const UNBOUNDED: f64 = 1e20;

/// Thermic effect of food applied on top of activity-scaled basal energy.
pub const THERMIC_EFFECT: f64 = 1.1;

/// Calorie band half-width as a fraction of the point estimate.
pub const CALORIE_LEEWAY: f64 = 0.15;

/// Daily calorie offsets for goals that shift intake.
pub const LOSE_WEIGHT_CALORIE_OFFSET: f64 = -250.0;
pub const BUILD_MUSCLE_CALORIE_OFFSET: f64 = 250.0;

/// Fat yields roughly 9 kcal per gram.
pub const CALORIES_PER_GRAM_FAT: f64 = 9.0;

/// Daily requirements are split evenly over this many meals.
pub const MEALS_PER_DAY: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// Plate geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Capacity of the large plate section, in mL.
pub const LARGE_PORTION_MAX: f64 = 610.0;

/// Capacity of each small plate section, in mL.
pub const SMALL_PORTION_MAX: f64 = 270.0;

/// Items kept per section by the selector.
pub const ITEMS_PER_SECTION: usize = 3;

/// Pool size the CLI samples each category down to before selection.
pub const DEFAULT_MAX_POOL: usize = 8;

/// Fraction of capacity a section must at least be filled to.
pub const MIN_FILL: f64 = 0.5;

/// Fraction of capacity the search starts from.
pub const INITIAL_FILL: f64 = 0.75;

// ─────────────────────────────────────────────────────────────────────────────
// Annealing schedule
// ─────────────────────────────────────────────────────────────────────────────

/// Starting temperature. Nudges are scaled by it, so the first steps move
/// up to half a section's capacity.
pub const INITIAL_TEMP: f64 = 0.5;

pub const DEFAULT_ALPHA: f64 = 0.999;
pub const DEFAULT_SMALLEST_TEMP: f64 = 5e-4;

/// Faster schedule used for the many small runs inside item selection.
pub const SELECTION_ALPHA: f64 = 0.99;
pub const SELECTION_SMALLEST_TEMP: f64 = 0.01;

/// Cost the worse of the all-min/all-max plates is normalized to.
pub const COST_SCALE_TARGET: f64 = 60.0;

// ─────────────────────────────────────────────────────────────────────────────
// Cost weights (roughly the calories per gram of each term, fats emphasized)
// ─────────────────────────────────────────────────────────────────────────────

pub const CALORIES_WEIGHT: f64 = 1.0;
pub const CARBOHYDRATE_WEIGHT: f64 = 8.0;
pub const TOTAL_FAT_WEIGHT: f64 = 50.0;
pub const SATURATED_FAT_WEIGHT: f64 = 1.5 * 50.0;
pub const TRANS_FAT_WEIGHT: f64 = 50.0;

// ─────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Coefficients of the sex-specific basal energy formula:
/// `base + weight * kg + height * cm - age * years`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexCoefficients {
    pub base: f64,
    pub weight: f64,
    pub height: f64,
    pub age: f64,
}

pub fn sex_coefficients(sex: Sex) -> SexCoefficients {
    match sex {
        Sex::Male => SexCoefficients {
            base: 88.362,
            weight: 13.397,
            height: 4.799,
            age: 5.677,
        },
        Sex::Female => SexCoefficients {
            base: 447.593,
            weight: 9.247,
            height: 3.098,
            age: 4.330,
        },
    }
}

pub fn activity_coefficient(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Mild => 1.3,
        ActivityLevel::Moderate => 1.5,
        ActivityLevel::Heavy => 1.7,
        ActivityLevel::Extreme => 1.9,
    }
}

pub fn goal_calorie_offset(goal: HealthGoal) -> f64 {
    match goal {
        HealthGoal::LoseWeight => LOSE_WEIGHT_CALORIE_OFFSET,
        HealthGoal::BuildMuscle => BUILD_MUSCLE_CALORIE_OFFSET,
        HealthGoal::AthleticPerformance | HealthGoal::ImproveTone | HealthGoal::ImproveHealth => 0.0,
    }
}

/// Macro coefficient ranges `(lo, hi)` for one goal.
///
/// Protein and carbohydrate are grams per kg of body weight; total and
/// saturated fat are fractions of daily calories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRanges {
    pub protein: (f64, f64),
    pub carbohydrate: (f64, f64),
    pub total_fat: (f64, f64),
    pub saturated_fat: (f64, f64),
}

pub fn macro_ranges(goal: HealthGoal) -> MacroRanges {
    match goal {
        HealthGoal::BuildMuscle => MacroRanges {
            protein: (1.5, 1.8),
            carbohydrate: (6.0, 6.6),
            total_fat: (0.3, 0.35),
            saturated_fat: (0.0, 0.1),
        },
        HealthGoal::AthleticPerformance => MacroRanges {
            protein: (0.9, 1.05),
            carbohydrate: (6.0, 6.6),
            total_fat: (0.3, 0.35),
            saturated_fat: (0.0, 0.1),
        },
        HealthGoal::LoseWeight => MacroRanges {
            protein: (1.1, 1.3),
            carbohydrate: (5.0, 5.5),
            total_fat: (0.2, 0.25),
            saturated_fat: (0.0, 0.1),
        },
        HealthGoal::ImproveTone => MacroRanges {
            protein: (0.8, 1.0),
            carbohydrate: (6.0, 6.3),
            total_fat: (0.25, 0.3),
            saturated_fat: (0.0, 0.1),
        },
        HealthGoal::ImproveHealth => MacroRanges {
            protein: (0.8, 1.0),
            carbohydrate: (5.0, 6.0),
            total_fat: (0.2, 0.25),
            saturated_fat: (0.0, 0.1),
        },
    }
}

/// Category that gets the large plate section for a goal.
pub fn large_section_category(goal: HealthGoal) -> Category {
    match goal {
        HealthGoal::BuildMuscle | HealthGoal::ImproveTone => Category::Protein,
        HealthGoal::AthleticPerformance => Category::Grain,
        HealthGoal::LoseWeight | HealthGoal::ImproveHealth => Category::Vegetable,
    }
}

/// Daily clinical lower bounds. Macro fields are filled per profile.
pub fn daily_micro_lo() -> NutrientVector {
    NutrientVector {
        trans_fat: 0.0,
        sugar: -UNBOUNDED,
        cholesterol: -UNBOUNDED,
        fiber: 30.0,
        sodium: 1500.0,
        potassium: 3000.0,
        calcium: 1000.0,
        iron: 8.0,
        vitamin_a: 3000.0,
        vitamin_c: 90.0,
        vitamin_d: 600.0,
        ..NutrientVector::zero()
    }
}

/// Daily clinical upper bounds. Macro fields are filled per profile.
pub fn daily_micro_hi() -> NutrientVector {
    NutrientVector {
        trans_fat: 0.0,
        sugar: 27.0,
        cholesterol: 300.0,
        fiber: UNBOUNDED,
        sodium: 4000.0,
        potassium: UNBOUNDED,
        calcium: 2500.0,
        iron: 45.0,
        vitamin_a: 10000.0,
        vitamin_c: 2000.0,
        vitamin_d: 4000.0,
        ..NutrientVector::zero()
    }
}
