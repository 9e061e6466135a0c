mod manager;
mod persistence;

pub use manager::{Catalog, Menu};
pub use persistence::{load_catalog, load_menus, load_profile, load_profiles, save_json};
