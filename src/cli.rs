use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::ItemId;

/// Plate planner: picks dishes and portion sizes for a meal that fit a
/// person's nutrient targets.
#[derive(Parser, Debug)]
#[command(name = "plate_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the profile JSON file.
    #[arg(short, long, global = true, default_value = "profile.json")]
    pub profile: PathBuf,

    /// Path to the catalog JSON file.
    #[arg(short, long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to a menu JSON file.
    #[arg(long, global = true)]
    pub menu: Option<PathBuf>,

    /// Restrict the catalog to the items of this menu.
    #[arg(long, global = true, requires = "menu")]
    pub meal: Option<String>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Command-line overrides applied on top of the config file.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Path to a planner config JSON file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible runs.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Cooling factor of the final portion search.
    #[arg(long, global = true)]
    pub alpha: Option<f64>,

    /// Temperature the final portion search stops at.
    #[arg(long, global = true)]
    pub smallest_temp: Option<f64>,

    /// Items kept per plate section.
    #[arg(long, global = true)]
    pub k: Option<usize>,

    /// Capacity of the large section in mL.
    #[arg(long, global = true)]
    pub large_volume: Option<f64>,

    /// Capacity of each small section in mL.
    #[arg(long, global = true)]
    pub small_volume: Option<f64>,

    /// Sample each category down to this many items (0 keeps all).
    #[arg(long, global = true)]
    pub max_pool: Option<usize>,
}

impl ConfigOverrides {
    /// Load the config file (or defaults) and apply the overrides.
    pub fn resolve(&self) -> Result<PlannerConfig> {
        let mut config = PlannerConfig::load_or_default(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut PlannerConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(t) = self.smallest_temp {
            config.smallest_temp = t;
        }
        if let Some(k) = self.k {
            config.items_per_section = k;
        }
        if let Some(v) = self.large_volume {
            config.large_volume = v;
        }
        if let Some(v) = self.small_volume {
            config.small_volume = v;
        }
        if let Some(cap) = self.max_pool {
            config.max_pool = cap;
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Select items and optimize their portions.
    Plan,

    /// Print the per-meal nutrient targets for the profile.
    Requirements,

    /// Select items for each plate section.
    Select,

    /// Optimize portions for fixed items.
    Portion {
        /// Item ids for the large section (comma-separated).
        #[arg(long, value_delimiter = ',')]
        large: Vec<ItemId>,

        /// Item ids for the first small section (comma-separated).
        #[arg(long, value_delimiter = ',')]
        small1: Vec<ItemId>,

        /// Item ids for the second small section (comma-separated).
        #[arg(long, value_delimiter = ',')]
        small2: Vec<ItemId>,
    },

    /// Build a profile interactively and save it.
    Profile {
        /// Where to write the profile.
        #[arg(long, default_value = "profile.json")]
        out: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}
