use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, HealthGoal, Profile, Sex};

/// Parse a positive number typed at a prompt.
fn parse_positive(input: &str, what: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid {}: '{}'", what, input)))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(PlanError::InvalidInput(format!("{} must be positive", what)));
    }
    Ok(value)
}

fn parse_birthdate(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PlanError::InvalidInput(format!("Invalid birthdate '{}', expected YYYY-MM-DD", input))
    })
}

/// Pick one of `options` by label.
fn select_one<T: Copy>(prompt: &str, options: &[T], label: impl Fn(T) -> &'static str) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(|o| label(*o)).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[selection])
}

/// Build a profile interactively.
pub fn prompt_profile() -> Result<Profile> {
    let sex = select_one("Sex", &Sex::ALL, Sex::label)?;
    let activity_level = select_one("Activity level", &ActivityLevel::ALL, ActivityLevel::label)?;
    let health_goal = select_one("Health goal", &HealthGoal::ALL, HealthGoal::label)?;

    let height: String = Input::new()
        .with_prompt("Height (cm)")
        .interact_text()?;
    let weight: String = Input::new()
        .with_prompt("Weight (kg)")
        .interact_text()?;
    let birthdate: String = Input::new()
        .with_prompt("Birthdate (YYYY-MM-DD)")
        .interact_text()?;

    Ok(Profile {
        sex: Some(sex),
        activity_level: Some(activity_level),
        health_goal: Some(health_goal),
        height: Some(parse_positive(&height, "height")?),
        weight: Some(parse_positive(&weight, "weight")?),
        birthdate: Some(parse_birthdate(&birthdate)?),
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive(" 72.5 ", "weight").unwrap(), 72.5);
        assert!(parse_positive("-1", "weight").is_err());
        assert!(parse_positive("abc", "height").is_err());
    }

    #[test]
    fn test_parse_birthdate() {
        assert_eq!(
            parse_birthdate("2001-02-03").unwrap(),
            NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()
        );
        assert!(parse_birthdate("03/02/2001").is_err());
    }
}
