use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    CandidateItem, Category, HealthGoal, ItemId, RequirementRange, SectionChoice, SectionName,
    SelectionResult,
};
use crate::planner::constants::*;
use crate::planner::portion::{AnnealingParams, PlateGeometry, PlateItems, SimulatedAnnealing};

/// Candidate items grouped by category.
#[derive(Debug, Clone, Default)]
pub struct CategoryPools<'a> {
    pub protein: Vec<&'a CandidateItem>,
    pub vegetable: Vec<&'a CandidateItem>,
    pub grain: Vec<&'a CandidateItem>,
}

impl<'a> CategoryPools<'a> {
    /// Groups `items` by category, keeping their order.
    pub fn from_items(items: impl IntoIterator<Item = &'a CandidateItem>) -> Self {
        let mut pools = Self::default();
        for item in items {
            pools.get_mut(item.category).push(item);
        }
        pools
    }

    pub fn get(&self, category: Category) -> &[&'a CandidateItem] {
        match category {
            Category::Protein => &self.protein,
            Category::Vegetable => &self.vegetable,
            Category::Grain => &self.grain,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<&'a CandidateItem> {
        match category {
            Category::Protein => &mut self.protein,
            Category::Vegetable => &mut self.vegetable,
            Category::Grain => &mut self.grain,
        }
    }

    pub fn len(&self) -> usize {
        self.protein.len() + self.vegetable.len() + self.grain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Category assigned to each section, in `SectionName::ALL` order.
///
/// The goal's large category trades places with the small slot that
/// would otherwise hold it.
pub fn section_categories(goal: HealthGoal) -> [Category; 3] {
    let mut order = [Category::Protein, Category::Vegetable, Category::Grain];
    let large = large_section_category(goal);
    if let Some(pos) = order.iter().position(|c| *c == large) {
        order.swap(0, pos);
    }
    order
}

/// All size-`r` index combinations of `0..n` in lexicographic order.
///
/// `r == 0` yields the single empty combination.
pub fn combinations(n: usize, r: usize) -> Vec<Vec<usize>> {
    if r > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..r).collect();
    loop {
        out.push(idx.clone());
        // rightmost index that can still move
        let Some(i) = (0..r).rev().find(|&i| idx[i] != i + n - r) else {
            return out;
        };
        idx[i] += 1;
        for j in i + 1..r {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

type MemoKey = (Option<ItemId>, Option<ItemId>, Option<ItemId>);

/// Picks the items for each plate section.
pub struct ItemSelector<'a> {
    range: RequirementRange,
    geometry: PlateGeometry,
    params: AnnealingParams,
    items_per_section: usize,
    categories: [Category; 3],
    pools: [&'a [&'a CandidateItem]; 3],
}

impl<'a> ItemSelector<'a> {
    pub fn new(goal: HealthGoal, range: RequirementRange, pools: &'a CategoryPools<'a>) -> Self {
        let categories = section_categories(goal);
        Self {
            range,
            geometry: PlateGeometry::default(),
            params: AnnealingParams::for_selection(),
            items_per_section: ITEMS_PER_SECTION,
            categories,
            pools: categories.map(|c| pools.get(c)),
        }
    }

    pub fn with_geometry(mut self, geometry: PlateGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_params(mut self, params: AnnealingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_items_per_section(mut self, k: usize) -> Self {
        self.items_per_section = k;
        self
    }

    pub fn categories(&self) -> [Category; 3] {
        self.categories
    }

    /// Slots for one pool: every item, or a single empty slot.
    fn slots(pool: &[&'a CandidateItem]) -> Vec<Option<&'a CandidateItem>> {
        if pool.is_empty() {
            vec![None]
        } else {
            pool.iter().map(|item| Some(*item)).collect()
        }
    }

    /// Final cost of a single-item-per-section plate for every triple.
    fn build_memo(&self, rng: &mut impl Rng) -> Result<HashMap<MemoKey, f64>> {
        let [large, small1, small2] = self.pools.map(Self::slots);
        let mut memo = HashMap::with_capacity(large.len() * small1.len() * small2.len());

        for a in &large {
            for b in &small1 {
                for c in &small2 {
                    let plate = PlateItems {
                        large: a.iter().copied().collect(),
                        small1: b.iter().copied().collect(),
                        small2: c.iter().copied().collect(),
                    };
                    let mut sa = SimulatedAnnealing::new(
                        self.range,
                        plate.to_sections(&self.geometry)?,
                        self.params,
                    );
                    let result = sa.run_with(rng)?;
                    memo.insert((a.map(|i| i.id), b.map(|i| i.id), c.map(|i| i.id)), result.cost);
                }
            }
        }
        Ok(memo)
    }

    /// Combinations of item ids for one pool; `[None]` stands for an empty pool.
    fn id_combinations(&self, pool: &[&'a CandidateItem]) -> Vec<Vec<Option<ItemId>>> {
        if pool.is_empty() {
            return vec![vec![None]];
        }
        let r = self.items_per_section.min(pool.len());
        combinations(pool.len(), r)
            .into_iter()
            .map(|combo| combo.into_iter().map(|i| Some(pool[i].id)).collect())
            .collect()
    }

    /// Runs the search, drawing memo runs from `rng`.
    pub fn select(&self, rng: &mut impl Rng) -> Result<SelectionResult> {
        self.geometry.validate()?;
        let start = Instant::now();
        for (name, (pool, category)) in SectionName::ALL
            .iter()
            .zip(self.pools.iter().zip(self.categories))
        {
            if pool.is_empty() {
                warn!(section = %name, category = category.name(), "no candidates for section");
            }
        }

        let memo = self.build_memo(rng)?;
        let [large, small1, small2] = self.pools.map(|p| self.id_combinations(p));

        let mut best: Option<(f64, [&Vec<Option<ItemId>>; 3])> = None;
        for a in &large {
            for b in &small1 {
                for c in &small2 {
                    let mut cost = 0.0;
                    for x in a {
                        for y in b {
                            for z in c {
                                cost += memo.get(&(*x, *y, *z)).copied().unwrap_or(0.0);
                            }
                        }
                    }
                    if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                        best = Some((cost, [a, b, c]));
                    }
                }
            }
        }

        let runtime = start.elapsed().as_secs_f64();
        let (cost, chosen) = match best {
            Some((cost, combos)) => (
                cost,
                combos.map(|ids| ids.iter().flatten().copied().collect::<Vec<ItemId>>()),
            ),
            None => (0.0, [Vec::new(), Vec::new(), Vec::new()]),
        };
        let [large_ids, small1_ids, small2_ids] = chosen;

        debug!(memo_runs = memo.len(), cost, runtime, "item selection finished");

        Ok(SelectionResult {
            large: SectionChoice {
                items: large_ids,
                category: self.categories[0],
            },
            small1: SectionChoice {
                items: small1_ids,
                category: self.categories[1],
            },
            small2: SectionChoice {
                items: small2_ids,
                category: self.categories[2],
            },
            cost,
            runtime,
        })
    }
}
