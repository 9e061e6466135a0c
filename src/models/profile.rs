use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Mild,
    Moderate,
    Heavy,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    LoseWeight,
    BuildMuscle,
    AthleticPerformance,
    ImproveTone,
    ImproveHealth,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Mild,
        ActivityLevel::Moderate,
        ActivityLevel::Heavy,
        ActivityLevel::Extreme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Mild => "Mild Activity",
            ActivityLevel::Moderate => "Moderate Activity",
            ActivityLevel::Heavy => "Heavy or Labour Intensive Activity",
            ActivityLevel::Extreme => "Extreme Activity",
        }
    }
}

impl HealthGoal {
    pub const ALL: [HealthGoal; 5] = [
        HealthGoal::LoseWeight,
        HealthGoal::BuildMuscle,
        HealthGoal::AthleticPerformance,
        HealthGoal::ImproveTone,
        HealthGoal::ImproveHealth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthGoal::LoseWeight => "Lose Weight",
            HealthGoal::BuildMuscle => "Build Muscle",
            HealthGoal::AthleticPerformance => "Athletic Performance",
            HealthGoal::ImproveTone => "Improve Body Tone",
            HealthGoal::ImproveHealth => "Improve Health",
        }
    }
}

/// Biometric profile of the person being planned for.
///
/// Every field is optional so that incomplete records can be represented;
/// the requirements calculator rejects them with the missing field's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub sex: Option<Sex>,

    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,

    #[serde(default)]
    pub health_goal: Option<HealthGoal>,

    /// Height in centimetres.
    #[serde(default)]
    pub height: Option<f64>,

    /// Weight in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

impl Profile {
    /// Whole years between `birthdate` and `today`, or None if born after `today`.
    pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
        if birthdate > today {
            return None;
        }
        let mut years = today.year() - birthdate.year();
        if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Short one-line description for logs.
    pub fn debug_string(&self) -> String {
        format!(
            "sex={:?} activity={:?} goal={:?} height={:?} weight={:?} birthdate={:?}",
            self.sex, self.activity_level, self.health_goal, self.height, self.weight, self.birthdate
        )
    }
}
