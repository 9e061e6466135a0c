use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{CandidateItem, Category, ItemId};
use crate::planner::CategoryPools;

/// Item ids served at one named meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub items: Vec<ItemId>,
}

/// Validated candidate items keyed by id.
///
/// Iteration is in id order, so pools built from the same catalog are
/// identical between runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<ItemId, CandidateItem>,
}

impl Catalog {
    /// Build a catalog, validating every item. Later duplicates replace
    /// earlier ones.
    pub fn new(items: Vec<CandidateItem>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for item in items {
            item.validate()?;
            debug!(item = %item.debug_string(), "catalog item");
            if let Some(old) = map.insert(item.id, item) {
                debug!(id = old.id, "duplicate catalog id replaced");
            }
        }
        Ok(Self { items: map })
    }

    pub fn get(&self, id: ItemId) -> Option<&CandidateItem> {
        self.items.get(&id)
    }

    /// Get an item or fail with `ItemNotFound`.
    pub fn require(&self, id: ItemId) -> Result<&CandidateItem> {
        self.get(id).ok_or(PlanError::ItemNotFound(id))
    }

    /// Items listed by id, in the given order.
    pub fn resolve(&self, ids: &[ItemId]) -> Result<Vec<&CandidateItem>> {
        ids.iter().map(|id| self.require(*id)).collect()
    }

    pub fn items(&self) -> impl Iterator<Item = &CandidateItem> {
        self.items.values()
    }

    /// Every item grouped by category.
    pub fn pools(&self) -> CategoryPools<'_> {
        CategoryPools::from_items(self.items())
    }

    /// Pools with each category sampled down to at most `cap` items.
    ///
    /// A cap of 0 keeps every item. Sampled pools stay in id order.
    pub fn capped_pools(&self, cap: usize, rng: &mut impl Rng) -> CategoryPools<'_> {
        let mut pools = self.pools();
        if cap == 0 {
            return pools;
        }
        for category in Category::ALL {
            let pool = pools.get_mut(category);
            if pool.len() > cap {
                let mut sampled: Vec<&CandidateItem> =
                    pool.choose_multiple(rng, cap).copied().collect();
                sampled.sort_by_key(|i| i.id);
                debug!(
                    category = category.name(),
                    from = pool.len(),
                    to = cap,
                    "sampled candidate pool"
                );
                *pool = sampled;
            }
        }
        pools
    }

    /// The sub-catalog served at `menu`.
    pub fn for_menu(&self, menu: &Menu) -> Result<Catalog> {
        let items = self
            .resolve(&menu.items)?
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        Catalog::new(items)
    }

    /// The sub-catalog for the menu called `name`.
    pub fn for_meal(&self, menus: &[Menu], name: &str) -> Result<Catalog> {
        let menu = menus
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PlanError::MealNotFound(name.to_string()))?;
        self.for_menu(menu)
    }

    /// Convert to a list of items for JSON serialization.
    pub fn to_items(&self) -> Vec<CandidateItem> {
        self.items.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
