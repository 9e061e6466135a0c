pub mod evaluation;
pub mod output;

pub use evaluation::{evaluate_profile, evaluate_profiles, BatchConfig, BatchResults, ProfileResult};
pub use output::{print_summary, write_best_json, write_csv};
