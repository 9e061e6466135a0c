pub mod prompts;
pub mod render;

pub use prompts::{prompt_profile, prompt_yes_no};
pub use render::{
    display_meal_plan, display_nutrition, display_portions, display_requirements,
    display_selection, format_amount,
};
