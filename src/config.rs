use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::planner::constants::*;
use crate::planner::{AnnealingParams, CostWeights, PlateGeometry};

/// Runtime-configurable planner settings.
///
/// Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Cooling factor of the final portion run.
    pub alpha: f64,
    pub smallest_temp: f64,
    pub initial_temp: f64,
    pub seed: Option<u64>,
    pub large_volume: f64,
    pub small_volume: f64,
    /// Items kept per section (`k`).
    pub items_per_section: usize,
    /// Cooling factor of the memo runs inside selection.
    pub selection_alpha: f64,
    pub selection_smallest_temp: f64,
    /// Per-category pool cap; 0 disables sampling.
    pub max_pool: usize,
    pub weights: CostWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            smallest_temp: DEFAULT_SMALLEST_TEMP,
            initial_temp: INITIAL_TEMP,
            seed: None,
            large_volume: LARGE_PORTION_MAX,
            small_volume: SMALL_PORTION_MAX,
            items_per_section: ITEMS_PER_SECTION,
            selection_alpha: SELECTION_ALPHA,
            selection_smallest_temp: SELECTION_SMALLEST_TEMP,
            max_pool: DEFAULT_MAX_POOL,
            weights: CostWeights::default(),
        }
    }
}

impl PlannerConfig {
    /// Load a config from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_json(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry().validate()?;
        if self.items_per_section == 0 {
            return Err(PlanError::InvalidInput(
                "items_per_section must be at least 1".to_string(),
            ));
        }
        if !(self.initial_temp > 0.0) {
            return Err(PlanError::InvalidInput(format!(
                "initial_temp must be positive, got {}",
                self.initial_temp
            )));
        }
        self.portion_params().validate()?;
        self.selection_params().validate()
    }

    pub fn geometry(&self) -> PlateGeometry {
        PlateGeometry {
            large_volume: self.large_volume,
            small_volume: self.small_volume,
        }
    }

    /// Schedule of the final portion run.
    pub fn portion_params(&self) -> AnnealingParams {
        AnnealingParams {
            alpha: self.alpha,
            smallest_temp: self.smallest_temp,
            initial_temp: self.initial_temp,
            seed: self.seed,
            weights: self.weights,
        }
    }

    /// Schedule of the selection memo runs.
    pub fn selection_params(&self) -> AnnealingParams {
        AnnealingParams {
            alpha: self.selection_alpha,
            smallest_temp: self.selection_smallest_temp,
            ..self.portion_params()
        }
    }

    /// Format the main settings as a compact string for display.
    pub fn display(&self) -> String {
        format!(
            "alpha={} T_min={} k={} large={}mL small={}mL pool={} seed={}",
            self.alpha,
            self.smallest_temp,
            self.items_per_section,
            self.large_volume,
            self.small_volume,
            self.max_pool,
            self.seed.map_or_else(|| "none".to_string(), |s| s.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.items_per_section, 3);
        assert_eq!(config.geometry(), PlateGeometry::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"alpha": 0.99, "seed": 4, "weights": {{"calories": 2.0}}}}"#).unwrap();
        let config = PlannerConfig::load_json(file.path()).unwrap();
        assert_eq!(config.alpha, 0.99);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.small_volume, SMALL_PORTION_MAX);
        assert_eq!(config.weights.calories, 2.0);
        assert_eq!(config.weights.total_fat, TOTAL_FAT_WEIGHT);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = PlannerConfig {
            alpha: 1.5,
            ..PlannerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::InvalidInput(_))));

        config.alpha = DEFAULT_ALPHA;
        config.items_per_section = 0;
        assert!(config.validate().is_err());

        config.items_per_section = 3;
        config.small_volume = 0.0;
        assert!(config.validate().is_err());

        config.small_volume = SMALL_PORTION_MAX;
        config.selection_smallest_temp = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_selection_params_share_seed_and_weights() {
        let config = PlannerConfig {
            seed: Some(9),
            ..PlannerConfig::default()
        };
        let p = config.selection_params();
        assert_eq!(p.seed, Some(9));
        assert_eq!(p.alpha, SELECTION_ALPHA);
        assert_eq!(p.weights, config.weights);
    }
}
