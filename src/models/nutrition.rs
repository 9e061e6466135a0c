use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of tracked nutrients.
pub const NUTRIENT_COUNT: usize = 16;

/// Closed set of tracked nutrients, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Carbohydrate,
    Protein,
    TotalFat,
    SaturatedFat,
    TransFat,
    Sugar,
    Cholesterol,
    Fiber,
    Sodium,
    Potassium,
    Calcium,
    Iron,
    VitaminA,
    VitaminC,
    VitaminD,
}

impl Nutrient {
    pub const ALL: [Nutrient; NUTRIENT_COUNT] = [
        Nutrient::Calories,
        Nutrient::Carbohydrate,
        Nutrient::Protein,
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::TransFat,
        Nutrient::Sugar,
        Nutrient::Cholesterol,
        Nutrient::Fiber,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
    ];

    /// Field name as used in JSON and CSV headers.
    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Carbohydrate => "carbohydrate",
            Nutrient::Protein => "protein",
            Nutrient::TotalFat => "total_fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::TransFat => "trans_fat",
            Nutrient::Sugar => "sugar",
            Nutrient::Cholesterol => "cholesterol",
            Nutrient::Fiber => "fiber",
            Nutrient::Sodium => "sodium",
            Nutrient::Potassium => "potassium",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::VitaminA => "vitamin_a",
            Nutrient::VitaminC => "vitamin_c",
            Nutrient::VitaminD => "vitamin_d",
        }
    }

    /// Display unit.
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Carbohydrate
            | Nutrient::Protein
            | Nutrient::TotalFat
            | Nutrient::SaturatedFat
            | Nutrient::TransFat
            | Nutrient::Sugar
            | Nutrient::Fiber => "g",
            Nutrient::VitaminA | Nutrient::VitaminD => "IU",
            _ => "mg",
        }
    }
}

/// Nutrient content of a food amount, a plate, or one side of a target band.
///
/// Behaves as a 16-dimensional linear space: vectors add and subtract
/// elementwise and scale uniformly by a scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientVector {
    pub calories: f64,
    pub carbohydrate: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,

    pub sugar: f64,
    pub cholesterol: f64,
    pub fiber: f64,

    pub sodium: f64,
    pub potassium: f64,
    pub calcium: f64,
    pub iron: f64,

    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
}

impl NutrientVector {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Values in `Nutrient::ALL` order.
    pub fn to_array(&self) -> [f64; NUTRIENT_COUNT] {
        [
            self.calories,
            self.carbohydrate,
            self.protein,
            self.total_fat,
            self.saturated_fat,
            self.trans_fat,
            self.sugar,
            self.cholesterol,
            self.fiber,
            self.sodium,
            self.potassium,
            self.calcium,
            self.iron,
            self.vitamin_a,
            self.vitamin_c,
            self.vitamin_d,
        ]
    }

    pub fn from_array(values: [f64; NUTRIENT_COUNT]) -> Self {
        let [
            calories,
            carbohydrate,
            protein,
            total_fat,
            saturated_fat,
            trans_fat,
            sugar,
            cholesterol,
            fiber,
            sodium,
            potassium,
            calcium,
            iron,
            vitamin_a,
            vitamin_c,
            vitamin_d,
        ] = values;
        Self {
            calories,
            carbohydrate,
            protein,
            total_fat,
            saturated_fat,
            trans_fat,
            sugar,
            cholesterol,
            fiber,
            sodium,
            potassium,
            calcium,
            iron,
            vitamin_a,
            vitamin_c,
            vitamin_d,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Carbohydrate => self.carbohydrate,
            Nutrient::Protein => self.protein,
            Nutrient::TotalFat => self.total_fat,
            Nutrient::SaturatedFat => self.saturated_fat,
            Nutrient::TransFat => self.trans_fat,
            Nutrient::Sugar => self.sugar,
            Nutrient::Cholesterol => self.cholesterol,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sodium => self.sodium,
            Nutrient::Potassium => self.potassium,
            Nutrient::Calcium => self.calcium,
            Nutrient::Iron => self.iron,
            Nutrient::VitaminA => self.vitamin_a,
            Nutrient::VitaminC => self.vitamin_c,
            Nutrient::VitaminD => self.vitamin_d,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Carbohydrate => &mut self.carbohydrate,
            Nutrient::Protein => &mut self.protein,
            Nutrient::TotalFat => &mut self.total_fat,
            Nutrient::SaturatedFat => &mut self.saturated_fat,
            Nutrient::TransFat => &mut self.trans_fat,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Cholesterol => &mut self.cholesterol,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Potassium => &mut self.potassium,
            Nutrient::Calcium => &mut self.calcium,
            Nutrient::Iron => &mut self.iron,
            Nutrient::VitaminA => &mut self.vitamin_a,
            Nutrient::VitaminC => &mut self.vitamin_c,
            Nutrient::VitaminD => &mut self.vitamin_d,
        };
        *slot = value;
    }

    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let a = self.to_array();
        let b = other.to_array();
        Self::from_array(std::array::from_fn(|i| f(a[i], b[i])))
    }

    #[inline]
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.to_array().map(f))
    }
}

/// Squared distance from `value` to the closed range `[lo, hi]`.
///
/// Zero inside the range.
#[inline]
pub fn distance_outside_range(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        (lo - value) * (lo - value)
    } else if value > hi {
        (value - hi) * (value - hi)
    } else {
        0.0
    }
}

impl Add for NutrientVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for NutrientVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for NutrientVector {
    type Output = Self;

    fn mul(self, c: f64) -> Self {
        self.map(|v| v * c)
    }
}

impl Div<f64> for NutrientVector {
    type Output = Self;

    fn div(self, c: f64) -> Self {
        self.map(|v| v / c)
    }
}

impl AddAssign for NutrientVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for NutrientVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for NutrientVector {
    fn mul_assign(&mut self, c: f64) {
        *self = *self * c;
    }
}

impl Sum for NutrientVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
