use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Menu};
use crate::error::Result;
use crate::models::{CandidateItem, Profile};

/// Load and validate a catalog from a JSON array of items.
///
/// Deduplicates by id (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path.as_ref())?;
    let items: Vec<CandidateItem> = serde_json::from_str(&content)?;
    let raw = items.len();
    let catalog = Catalog::new(items)?;
    debug!(path = %path.as_ref().display(), raw, kept = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Load a single profile.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a JSON array of profiles.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<Profile>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a JSON array of menus.
pub fn load_menus<P: AsRef<Path>>(path: P) -> Result<Vec<Menu>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write any serializable value as pretty JSON.
pub fn save_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
