use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{Profile, RequirementRange};
use crate::planner::constants::*;

/// Estimated daily calorie need for a profile, before the leeway band.
///
/// Basal energy from the sex-specific formula, scaled by activity and the
/// thermic effect, then shifted by the goal offset.
pub fn daily_calories(profile: &Profile, today: NaiveDate) -> Result<f64> {
    let activity = profile
        .activity_level
        .ok_or(PlanError::MissingAttribute("activity_level"))?;
    let sex = profile.sex.ok_or(PlanError::MissingAttribute("sex"))?;
    let weight = profile.weight.ok_or(PlanError::MissingAttribute("weight"))?;
    let height = profile.height.ok_or(PlanError::MissingAttribute("height"))?;
    let birthdate = profile
        .birthdate
        .ok_or(PlanError::MissingAttribute("birthdate"))?;
    let goal = profile
        .health_goal
        .ok_or(PlanError::MissingAttribute("health_goal"))?;

    if !(weight.is_finite() && weight > 0.0) {
        return Err(PlanError::InvalidProfile(format!(
            "weight must be positive, got {weight}"
        )));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(PlanError::InvalidProfile(format!(
            "height must be positive, got {height}"
        )));
    }
    let age = Profile::age_on(birthdate, today).ok_or_else(|| {
        PlanError::InvalidProfile(format!("birthdate {birthdate} is after {today}"))
    })?;

    let c = sex_coefficients(sex);
    let basal = c.base + c.weight * weight + c.height * height - c.age * f64::from(age);
    let calories =
        basal * activity_coefficient(activity) * THERMIC_EFFECT + goal_calorie_offset(goal);

    debug!(basal, calories, age, "estimated daily calories");
    Ok(calories)
}

/// Per-meal nutrient band for a profile, with age measured on `today`.
pub fn compute_requirements_on(profile: &Profile, today: NaiveDate) -> Result<RequirementRange> {
    let calories = daily_calories(profile, today)?;
    // daily_calories has already checked these
    let (Some(weight), Some(goal)) = (profile.weight, profile.health_goal) else {
        return Err(PlanError::MissingAttribute("weight"));
    };

    let mut lo = daily_micro_lo();
    let mut hi = daily_micro_hi();

    lo.calories = calories * (1.0 - CALORIE_LEEWAY);
    hi.calories = calories * (1.0 + CALORIE_LEEWAY);

    let macros = macro_ranges(goal);
    lo.protein = macros.protein.0 * weight;
    hi.protein = macros.protein.1 * weight;
    lo.carbohydrate = macros.carbohydrate.0 * weight;
    hi.carbohydrate = macros.carbohydrate.1 * weight;

    let fat_grams = calories / CALORIES_PER_GRAM_FAT;
    lo.total_fat = macros.total_fat.0 * fat_grams;
    hi.total_fat = macros.total_fat.1 * fat_grams;
    lo.saturated_fat = macros.saturated_fat.0 * fat_grams;
    hi.saturated_fat = macros.saturated_fat.1 * fat_grams;

    Ok(RequirementRange::new(lo / MEALS_PER_DAY, hi / MEALS_PER_DAY))
}

/// Per-meal nutrient band for a profile, with age measured today.
pub fn compute_requirements(profile: &Profile) -> Result<RequirementRange> {
    compute_requirements_on(profile, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, HealthGoal, Sex};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn sample_profile() -> Profile {
        Profile {
            sex: Some(Sex::Female),
            activity_level: Some(ActivityLevel::Mild),
            health_goal: Some(HealthGoal::LoseWeight),
            height: Some(165.0),
            weight: Some(60.0),
            birthdate: NaiveDate::from_ymd_opt(2004, 1, 1),
        }
    }

    #[test]
    fn test_missing_attributes_named_in_order() {
        let mut p = sample_profile();
        p.activity_level = None;
        p.sex = None;
        assert!(matches!(
            compute_requirements_on(&p, today()),
            Err(PlanError::MissingAttribute("activity_level"))
        ));

        let mut p = sample_profile();
        p.birthdate = None;
        assert!(matches!(
            compute_requirements_on(&p, today()),
            Err(PlanError::MissingAttribute("birthdate"))
        ));

        let mut p = sample_profile();
        p.health_goal = None;
        assert!(matches!(
            compute_requirements_on(&p, today()),
            Err(PlanError::MissingAttribute("health_goal"))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut p = sample_profile();
        p.weight = Some(0.0);
        assert!(matches!(
            compute_requirements_on(&p, today()),
            Err(PlanError::InvalidProfile(_))
        ));

        let mut p = sample_profile();
        p.birthdate = NaiveDate::from_ymd_opt(2030, 1, 1);
        assert!(matches!(
            compute_requirements_on(&p, today()),
            Err(PlanError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_lose_weight_offset() {
        let p = sample_profile();
        let mut q = sample_profile();
        q.health_goal = Some(HealthGoal::ImproveHealth);
        let lose = daily_calories(&p, today()).unwrap();
        let keep = daily_calories(&q, today()).unwrap();
        assert!((keep - lose - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_is_a_third_of_daily() {
        let p = sample_profile();
        let calories = daily_calories(&p, today()).unwrap();
        let range = compute_requirements_on(&p, today()).unwrap();
        assert!((range.lo.calories - calories * 0.85 / 3.0).abs() < 1e-9);
        assert!((range.hi.calories - calories * 1.15 / 3.0).abs() < 1e-9);
        assert!((range.lo.fiber - 10.0).abs() < 1e-9);
        assert!((range.hi.sugar - 9.0).abs() < 1e-9);
        assert_eq!(range.lo.trans_fat, 0.0);
        assert_eq!(range.hi.trans_fat, 0.0);
    }

    #[test]
    fn test_every_bound_finite_and_ordered() {
        for goal in HealthGoal::ALL {
            let mut p = sample_profile();
            p.health_goal = Some(goal);
            let range = compute_requirements_on(&p, today()).unwrap();
            assert!(range.lo.is_finite() && range.hi.is_finite());
            for (l, h) in range.lo.to_array().iter().zip(range.hi.to_array().iter()) {
                assert!(l <= h);
            }
        }
    }
}
