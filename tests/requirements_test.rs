use assert_float_eq::*;
use chrono::NaiveDate;

use plate_planner_rs::models::{ActivityLevel, HealthGoal, Profile, Sex};
use plate_planner_rs::planner::{compute_requirements_on, daily_calories, UNBOUNDED};
use plate_planner_rs::PlanError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn athlete() -> Profile {
    Profile {
        sex: Some(Sex::Male),
        activity_level: Some(ActivityLevel::Moderate),
        health_goal: Some(HealthGoal::AthleticPerformance),
        height: Some(178.0),
        weight: Some(80.0),
        birthdate: NaiveDate::from_ymd_opt(2008, 1, 1),
    }
}

#[test]
fn test_athlete_fixture() {
    let p = athlete();
    assert_float_absolute_eq!(daily_calories(&p, today()).unwrap(), 3155.0607, 1e-3);

    let range = compute_requirements_on(&p, today()).unwrap();
    assert_float_absolute_eq!(range.lo.calories, 893.9339, 1e-3);
    assert_float_absolute_eq!(range.hi.calories, 1209.4399, 1e-3);
    assert_float_absolute_eq!(range.lo.protein, 24.0, 1e-9);
    assert_float_absolute_eq!(range.hi.protein, 28.0, 1e-9);
    assert_float_absolute_eq!(range.lo.carbohydrate, 160.0, 1e-9);
    assert_float_absolute_eq!(range.hi.carbohydrate, 176.0, 1e-9);
    assert_float_absolute_eq!(range.lo.total_fat, 35.0562, 1e-3);
    assert_float_absolute_eq!(range.hi.total_fat, 40.8989, 1e-3);
    assert_float_absolute_eq!(range.lo.saturated_fat, 0.0, 1e-9);
    assert_float_absolute_eq!(range.hi.saturated_fat, 11.6854, 1e-3);
    assert_float_absolute_eq!(range.lo.sodium, 500.0, 1e-9);
    assert_float_absolute_eq!(range.hi.sodium, 4000.0 / 3.0, 1e-9);
    assert_float_absolute_eq!(range.hi.potassium, UNBOUNDED / 3.0, 1.0);
}

#[test]
fn test_protein_floor_grows_with_weight() {
    let mut previous = f64::NEG_INFINITY;
    for weight in [50.0, 65.0, 80.0, 95.0, 110.0] {
        let p = Profile {
            health_goal: Some(HealthGoal::BuildMuscle),
            weight: Some(weight),
            ..athlete()
        };
        let range = compute_requirements_on(&p, today()).unwrap();
        assert!(range.lo.protein > previous);
        previous = range.lo.protein;
    }
}

#[test]
fn test_calories_rise_with_activity() {
    let calories: Vec<f64> = ActivityLevel::ALL
        .iter()
        .map(|level| {
            let p = Profile {
                activity_level: Some(*level),
                ..athlete()
            };
            daily_calories(&p, today()).unwrap()
        })
        .collect();
    assert!(calories.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_age_uses_whole_years() {
    let p = athlete();
    // one day short of the 19th birthday
    let before = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let after = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
    let a = daily_calories(&p, before).unwrap();
    let b = daily_calories(&p, after).unwrap();
    assert_float_absolute_eq!(a, daily_calories(&p, today()).unwrap(), 1e-9);
    assert_float_absolute_eq!(a - b, 5.677 * 1.5 * 1.1, 1e-9);
}

#[test]
fn test_missing_weight_named() {
    let p = Profile {
        weight: None,
        height: None,
        ..athlete()
    };
    assert!(matches!(
        compute_requirements_on(&p, today()),
        Err(PlanError::MissingAttribute("weight"))
    ));
}
