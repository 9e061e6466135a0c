use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{
    distance_outside_range, CandidateItem, ItemId, NutrientVector, PortionEntry, PortionResult,
    RequirementRange, SectionName,
};
use crate::planner::constants::*;

/// Relative weights of the out-of-range terms in the portion cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub calories: f64,
    pub carbohydrate: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            calories: CALORIES_WEIGHT,
            carbohydrate: CARBOHYDRATE_WEIGHT,
            total_fat: TOTAL_FAT_WEIGHT,
            saturated_fat: SATURATED_FAT_WEIGHT,
            trans_fat: TRANS_FAT_WEIGHT,
        }
    }
}

impl CostWeights {
    /// Weighted squared distance of `totals` outside `range`.
    ///
    /// Only the nutrients with the largest caloric/health impact count.
    pub fn cost(&self, totals: &NutrientVector, range: &RequirementRange) -> f64 {
        let (lo, hi) = (&range.lo, &range.hi);
        self.calories * distance_outside_range(totals.calories, lo.calories, hi.calories)
            + self.carbohydrate
                * distance_outside_range(totals.carbohydrate, lo.carbohydrate, hi.carbohydrate)
            + self.total_fat * distance_outside_range(totals.total_fat, lo.total_fat, hi.total_fat)
            + self.saturated_fat
                * distance_outside_range(totals.saturated_fat, lo.saturated_fat, hi.saturated_fat)
            + self.trans_fat * distance_outside_range(totals.trans_fat, lo.trans_fat, hi.trans_fat)
    }

    pub fn validate(&self) -> Result<()> {
        let all = [
            self.calories,
            self.carbohydrate,
            self.total_fat,
            self.saturated_fat,
            self.trans_fat,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PlanError::InvalidInput(
                "cost weights must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Annealing schedule and cost settings for one optimizer run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingParams {
    /// Factor the temperature is multiplied by after every iteration.
    pub alpha: f64,
    /// The search stops once the temperature drops below this.
    pub smallest_temp: f64,
    pub initial_temp: f64,
    /// Fixed seed for reproducible runs; None draws from entropy.
    pub seed: Option<u64>,
    pub weights: CostWeights,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            smallest_temp: DEFAULT_SMALLEST_TEMP,
            initial_temp: INITIAL_TEMP,
            seed: None,
            weights: CostWeights::default(),
        }
    }
}

impl AnnealingParams {
    /// The faster schedule used for selection memo runs.
    pub fn for_selection() -> Self {
        Self {
            alpha: SELECTION_ALPHA,
            smallest_temp: SELECTION_SMALLEST_TEMP,
            ..Self::default()
        }
    }

    /// Reject schedules that would not terminate.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(PlanError::InvalidInput(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.smallest_temp.is_finite() && self.smallest_temp > 0.0) {
            return Err(PlanError::InvalidInput(format!(
                "smallest_temp must be positive, got {}",
                self.smallest_temp
            )));
        }
        if !self.initial_temp.is_finite() {
            return Err(PlanError::InvalidInput(
                "initial_temp must be finite".to_string(),
            ));
        }
        self.weights.validate()
    }

    /// Number of cooling steps the schedule performs.
    pub fn iteration_count(&self) -> usize {
        let mut temp = self.initial_temp;
        let mut n = 0;
        while temp >= self.smallest_temp {
            temp *= self.alpha;
            n += 1;
        }
        n
    }

    /// Generator for this run: seeded if a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Capacities of the plate sections, in mL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub large_volume: f64,
    pub small_volume: f64,
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self {
            large_volume: LARGE_PORTION_MAX,
            small_volume: SMALL_PORTION_MAX,
        }
    }
}

impl PlateGeometry {
    pub fn capacity(&self, section: SectionName) -> f64 {
        match section {
            SectionName::Large => self.large_volume,
            SectionName::Small1 | SectionName::Small2 => self.small_volume,
        }
    }

    /// Both capacities must be finite and positive.
    pub fn validate(&self) -> Result<()> {
        for (name, volume) in [
            ("large_volume", self.large_volume),
            ("small_volume", self.small_volume),
        ] {
            if !(volume.is_finite() && volume > 0.0) {
                return Err(PlanError::InvalidInput(format!(
                    "{name} must be positive, got {volume}"
                )));
            }
        }
        Ok(())
    }
}

#[inline]
fn ceil_div(a: u64, b: u64) -> u64 {
    a.div_ceil(b)
}

/// Optimizer state for one item on the plate.
///
/// Discrete amounts are whole piece counts stored as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateSection {
    pub item_id: ItemId,
    pub section: SectionName,
    /// Nutrients per `reference_size`.
    pub nutrients: NutrientVector,
    /// mL (continuous) or pieces (discrete) the nutrients are given for.
    pub reference_size: f64,
    pub discrete: bool,
    pub amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
}

impl PlateSection {
    /// Builds the state for `item` sharing a section of `capacity` mL with
    /// `items_in_section - 1` other items.
    ///
    /// Fails with `InvalidItem` when the item cannot be scaled or its
    /// amount bounds are empty.
    pub fn from_item(
        item: &CandidateItem,
        capacity: f64,
        items_in_section: usize,
        section: SectionName,
    ) -> Result<Self> {
        item.validate()?;
        let n = items_in_section.max(1);
        let (reference_size, max_amount, min_amount) = if item.is_discrete() {
            let pieces = item.portion_volume.abs().round() as u64;
            let reference = ceil_div(pieces, n as u64).max(1) as f64;
            let max = u64::from(item.max_pieces);
            let min = ceil_div(max, 2).max(1);
            (reference, max as f64, min as f64)
        } else {
            let max = capacity / n as f64;
            (item.portion_volume, max, max * MIN_FILL)
        };
        if !(min_amount.is_finite() && max_amount.is_finite() && min_amount <= max_amount) {
            return Err(PlanError::InvalidItem {
                id: item.id,
                reason: format!("empty amount range [{min_amount}, {max_amount}]"),
            });
        }

        let mut state = Self {
            item_id: item.id,
            section,
            nutrients: item.nutrients,
            reference_size,
            discrete: item.is_discrete(),
            amount: 0.0,
            min_amount,
            max_amount,
        };
        state.amount = state.initial_amount();
        Ok(state)
    }

    /// Sections for every item placed in one plate section.
    pub fn for_section(
        items: &[&CandidateItem],
        capacity: f64,
        section: SectionName,
    ) -> Result<Vec<PlateSection>> {
        items
            .iter()
            .map(|item| Self::from_item(item, capacity, items.len(), section))
            .collect()
    }

    /// Amount the search starts from.
    pub fn initial_amount(&self) -> f64 {
        if self.discrete {
            ceil_div(3 * self.max_amount as u64, 4) as f64
        } else {
            INITIAL_FILL * self.max_amount
        }
    }

    /// Nutrients of `amount` of this item.
    #[inline]
    pub fn nutrition_at(&self, amount: f64) -> NutrientVector {
        self.nutrients * (amount / self.reference_size)
    }

    #[inline]
    pub fn scaled_nutrition(&self) -> NutrientVector {
        self.nutrition_at(self.amount)
    }

    /// Moves the amount by `ratio` of the max amount, clamped to bounds.
    ///
    /// Discrete steps round up to whole pieces. Returns the previous amount.
    pub fn nudge(&mut self, ratio: f64) -> f64 {
        let old = self.amount;
        let step = if self.discrete {
            (ratio.abs() * self.max_amount).ceil() * sign_of(ratio)
        } else {
            ratio * self.max_amount
        };
        self.amount = (self.amount + step).clamp(self.min_amount, self.max_amount);
        old
    }

    /// Amount in the output encoding: negative for pieces.
    pub fn encoded_amount(&self) -> f64 {
        if self.discrete { -self.amount } else { self.amount }
    }

    /// Capacity in the output encoding: negative for pieces.
    pub fn encoded_capacity(&self) -> f64 {
        if self.discrete { -self.max_amount } else { self.max_amount }
    }

    pub fn to_entry(&self) -> PortionEntry {
        PortionEntry {
            id: self.item_id,
            volume: self.encoded_amount(),
            total_volume: self.encoded_capacity(),
            section: self.section,
        }
    }
}

#[inline]
fn sign_of(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Combined nutrients of every section at its current amount.
pub fn plate_nutrition(sections: &[PlateSection]) -> NutrientVector {
    sections.iter().map(PlateSection::scaled_nutrition).sum()
}

/// Combined nutrients with each section at the amount `pick` chooses.
pub fn plate_nutrition_with(
    sections: &[PlateSection],
    pick: impl Fn(&PlateSection) -> f64,
) -> NutrientVector {
    sections.iter().map(|s| s.nutrition_at(pick(s))).sum()
}

/// Metropolis acceptance probability of moving from `c_old` to `c_new`.
#[inline]
pub fn acceptance_probability(c_new: f64, c_old: f64, scale: f64, temp: f64) -> f64 {
    if c_new <= c_old {
        1.0
    } else {
        (-(c_new - c_old) * scale / temp).exp()
    }
}

/// Coefficient mapping `cost_bound` onto `COST_SCALE_TARGET`.
///
/// A plate already in range at both extremes has no scale to calibrate to.
pub fn cost_scale(cost_bound: f64) -> f64 {
    if cost_bound > f64::EPSILON {
        COST_SCALE_TARGET / cost_bound
    } else {
        1.0
    }
}

/// Undo record for the most recent nudge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Nudge {
    index: usize,
    previous: f64,
}

/// Counters from one optimizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnealingStats {
    pub iterations: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub cost_scale: f64,
}

/// Simulated-annealing search over section amounts.
pub struct SimulatedAnnealing {
    range: RequirementRange,
    params: AnnealingParams,
    sections: Vec<PlateSection>,
    last_nudge: Option<Nudge>,
    stats: AnnealingStats,
}

impl SimulatedAnnealing {
    pub fn new(range: RequirementRange, sections: Vec<PlateSection>, params: AnnealingParams) -> Self {
        Self {
            range,
            params,
            sections,
            last_nudge: None,
            stats: AnnealingStats::default(),
        }
    }

    pub fn sections(&self) -> &[PlateSection] {
        &self.sections
    }

    pub fn stats(&self) -> AnnealingStats {
        self.stats
    }

    /// Cost of an arbitrary nutrient total against this run's range.
    pub fn cost_of(&self, totals: &NutrientVector) -> Result<f64> {
        let cost = self.params.weights.cost(totals, &self.range);
        if cost.is_finite() {
            Ok(cost)
        } else {
            Err(PlanError::NonFiniteCost)
        }
    }

    /// Cost of the current amounts.
    pub fn current_cost(&self) -> Result<f64> {
        self.cost_of(&plate_nutrition(&self.sections))
    }

    /// Larger of the all-min and all-max plate costs.
    pub fn cost_bound(&self) -> Result<f64> {
        let lo = self.cost_of(&plate_nutrition_with(&self.sections, |s| s.min_amount))?;
        let hi = self.cost_of(&plate_nutrition_with(&self.sections, |s| s.max_amount))?;
        Ok(lo.max(hi))
    }

    /// Nutrients at all-min and all-max amounts.
    pub fn capacity_nutrition(&self) -> (NutrientVector, NutrientVector) {
        (
            plate_nutrition_with(&self.sections, |s| s.min_amount),
            plate_nutrition_with(&self.sections, |s| s.max_amount),
        )
    }

    /// Perturbs one random section by a temperature-scaled step.
    pub fn nudge(&mut self, temp: f64, rng: &mut impl Rng) {
        if self.sections.is_empty() {
            return;
        }
        let index = rng.gen_range(0..self.sections.len());
        let ratio = if rng.gen_bool(0.5) { temp } else { -temp };
        let previous = self.sections[index].nudge(ratio);
        self.last_nudge = Some(Nudge { index, previous });
    }

    /// Reverts the most recent nudge.
    pub fn undo_nudge(&mut self) {
        if let Some(Nudge { index, previous }) = self.last_nudge.take() {
            self.sections[index].amount = previous;
        }
    }

    /// Runs the search with the generator implied by `params.seed`.
    pub fn run(&mut self) -> Result<PortionResult> {
        let mut rng = self.params.rng();
        self.run_with(&mut rng)
    }

    /// Runs the search to completion, drawing from `rng`.
    pub fn run_with(&mut self, rng: &mut impl Rng) -> Result<PortionResult> {
        self.params.validate()?;
        let start = Instant::now();

        for s in &mut self.sections {
            s.amount = s.initial_amount();
        }
        let scale = cost_scale(self.cost_bound()?);
        self.stats = AnnealingStats {
            cost_scale: scale,
            ..AnnealingStats::default()
        };

        let mut cost = self.current_cost()?;
        let mut temp = self.params.initial_temp;
        while temp >= self.params.smallest_temp && !self.sections.is_empty() {
            self.nudge(temp, rng);
            let new_cost = self.current_cost()?;
            let p = acceptance_probability(new_cost, cost, scale, temp);
            if p < rng.gen_range(0.0..1.0) {
                self.undo_nudge();
                self.stats.rejected += 1;
            } else {
                cost = new_cost;
                self.stats.accepted += 1;
            }
            self.stats.iterations += 1;
            temp *= self.params.alpha;
        }

        let nutrition = plate_nutrition(&self.sections);
        let final_cost = self.cost_of(&nutrition)?;
        let runtime = start.elapsed().as_secs_f64();

        debug!(
            sections = self.sections.len(),
            iterations = self.stats.iterations,
            scheduled = self.params.iteration_count(),
            accepted = self.stats.accepted,
            cost = final_cost,
            runtime,
            "portion search finished"
        );

        Ok(PortionResult {
            sections: self.sections.iter().map(PlateSection::to_entry).collect(),
            cost: final_cost,
            runtime,
            nutrition,
        })
    }
}

/// Items assigned to each plate section for a portion run.
#[derive(Debug, Clone, Default)]
pub struct PlateItems<'a> {
    pub large: Vec<&'a CandidateItem>,
    pub small1: Vec<&'a CandidateItem>,
    pub small2: Vec<&'a CandidateItem>,
}

impl<'a> PlateItems<'a> {
    pub fn items(&self, section: SectionName) -> &[&'a CandidateItem] {
        match section {
            SectionName::Large => &self.large,
            SectionName::Small1 => &self.small1,
            SectionName::Small2 => &self.small2,
        }
    }

    /// Optimizer state for every item; empty sections contribute nothing.
    pub fn to_sections(&self, geometry: &PlateGeometry) -> Result<Vec<PlateSection>> {
        let mut sections = Vec::new();
        for name in SectionName::ALL {
            sections.extend(PlateSection::for_section(
                self.items(name),
                geometry.capacity(name),
                name,
            )?);
        }
        Ok(sections)
    }
}

/// Run counters plus the plate nutrients at the capacity extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionDiagnostics {
    pub stats: AnnealingStats,
    pub min_nutrition: NutrientVector,
    pub max_nutrition: NutrientVector,
}

/// Finds serving amounts for fixed items.
pub fn optimize_portions(
    range: &RequirementRange,
    items: &PlateItems<'_>,
    geometry: &PlateGeometry,
    params: &AnnealingParams,
    rng: &mut impl Rng,
) -> Result<(PortionResult, PortionDiagnostics)> {
    geometry.validate()?;
    let mut sa = SimulatedAnnealing::new(*range, items.to_sections(geometry)?, *params);
    let result = sa.run_with(rng)?;
    let (min_nutrition, max_nutrition) = sa.capacity_nutrition();
    let diagnostics = PortionDiagnostics {
        stats: sa.stats(),
        min_nutrition,
        max_nutrition,
    };
    Ok((result, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn continuous_item(id: ItemId, calories: f64, portion: f64) -> CandidateItem {
        CandidateItem {
            id,
            name: format!("item{id}"),
            category: Category::Grain,
            portion_volume: portion,
            max_pieces: 0,
            nutrients: NutrientVector {
                calories,
                ..Default::default()
            },
        }
    }

    fn discrete_item(id: ItemId, calories: f64, pieces: f64, max_pieces: u32) -> CandidateItem {
        CandidateItem {
            id,
            name: format!("item{id}"),
            category: Category::Protein,
            portion_volume: -pieces,
            max_pieces,
            nutrients: NutrientVector {
                calories,
                ..Default::default()
            },
        }
    }

    fn calorie_range(lo: f64, hi: f64) -> RequirementRange {
        let mut low = NutrientVector::zero();
        let mut high = NutrientVector {
            carbohydrate: UNBOUNDED,
            total_fat: UNBOUNDED,
            saturated_fat: UNBOUNDED,
            ..Default::default()
        };
        low.calories = lo;
        high.calories = hi;
        RequirementRange::new(low, high)
    }

    fn seeded(seed: u64) -> AnnealingParams {
        AnnealingParams {
            seed: Some(seed),
            ..AnnealingParams::default()
        }
    }

    #[test]
    fn test_continuous_section_bounds() {
        let item = continuous_item(1, 100.0, 100.0);
        let s = PlateSection::from_item(&item, 270.0, 1, SectionName::Small1).unwrap();
        assert_eq!(s.max_amount, 270.0);
        assert_eq!(s.min_amount, 135.0);
        assert!((s.amount - 202.5).abs() < 1e-12);

        let shared = PlateSection::from_item(&item, 610.0, 2, SectionName::Large).unwrap();
        assert_eq!(shared.max_amount, 305.0);
    }

    #[test]
    fn test_discrete_section_bounds() {
        let item = discrete_item(2, 80.0, 1.0, 5);
        let s = PlateSection::from_item(&item, 610.0, 1, SectionName::Large).unwrap();
        assert!(s.discrete);
        assert_eq!(s.max_amount, 5.0);
        assert_eq!(s.min_amount, 3.0);
        assert_eq!(s.amount, 4.0);
        assert_eq!(s.encoded_amount(), -4.0);
        assert_eq!(s.encoded_capacity(), -5.0);

        let single = discrete_item(3, 80.0, 1.0, 1);
        let s = PlateSection::from_item(&single, 610.0, 1, SectionName::Large).unwrap();
        assert_eq!(s.min_amount, 1.0);
        assert_eq!(s.amount, 1.0);
    }

    #[test]
    fn test_discrete_nudge_rounds_up() {
        let item = discrete_item(2, 80.0, 1.0, 10);
        let mut s = PlateSection::from_item(&item, 610.0, 1, SectionName::Large).unwrap();
        assert_eq!(s.amount, 8.0);
        let old = s.nudge(-0.01);
        assert_eq!(old, 8.0);
        assert_eq!(s.amount, 7.0);
        s.nudge(0.25);
        assert_eq!(s.amount, 10.0);
        s.nudge(-0.9);
        assert_eq!(s.amount, 5.0);
    }

    #[test]
    fn test_nudges_stay_in_bounds() {
        let items = [
            continuous_item(1, 100.0, 100.0),
            discrete_item(2, 80.0, 2.0, 7),
            continuous_item(3, 50.0, 30.0),
        ];
        let mut rng = StdRng::seed_from_u64(99);
        let mut sections: Vec<PlateSection> = items
            .iter()
            .map(|i| PlateSection::from_item(i, 270.0, 1, SectionName::Small2).unwrap())
            .collect();

        for _ in 0..5000 {
            let idx = rng.gen_range(0..sections.len());
            let ratio = rng.gen_range(-1.0..1.0);
            sections[idx].nudge(ratio);
            for s in &sections {
                assert!(s.amount >= s.min_amount && s.amount <= s.max_amount);
                if s.discrete {
                    assert_eq!(s.amount.fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_undo_restores_single_section() {
        let items = [continuous_item(1, 100.0, 100.0), continuous_item(2, 50.0, 100.0)];
        let sections = items
            .iter()
            .map(|i| PlateSection::from_item(i, 270.0, 1, SectionName::Small1).unwrap())
            .collect();
        let mut sa = SimulatedAnnealing::new(calorie_range(0.0, 1.0), sections, seeded(1));
        let before: Vec<f64> = sa.sections().iter().map(|s| s.amount).collect();
        let mut rng = StdRng::seed_from_u64(5);
        sa.nudge(0.3, &mut rng);
        sa.undo_nudge();
        let after: Vec<f64> = sa.sections().iter().map(|s| s.amount).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(1.0, 2.0, 1.0, 0.1), 1.0);
        assert_eq!(acceptance_probability(2.0, 2.0, 1.0, 0.1), 1.0);
        let p = acceptance_probability(3.0, 2.0, 0.5, 0.25);
        assert!((p - (-2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_cost_scale_guards_zero_bound() {
        assert_eq!(cost_scale(0.0), 1.0);
        assert!((cost_scale(120.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cost_weights_only_macro_terms() {
        let range = calorie_range(100.0, 200.0);
        let weights = CostWeights::default();
        let mut totals = NutrientVector {
            calories: 150.0,
            ..Default::default()
        };
        assert_eq!(weights.cost(&totals, &range), 0.0);
        totals.sodium = 1e6;
        assert_eq!(weights.cost(&totals, &range), 0.0);
        totals.calories = 210.0;
        assert!((weights.cost(&totals, &range) - 100.0).abs() < 1e-9);
        totals.trans_fat = 1.0;
        assert!((weights.cost(&totals, &range) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_iteration_count_matches_schedule() {
        let params = AnnealingParams::default();
        let n = params.iteration_count();
        assert!(n > 5000 && n < 8000, "unexpected iteration count {n}");
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let params = AnnealingParams {
            alpha: 1.0,
            ..AnnealingParams::default()
        };
        let mut sa = SimulatedAnnealing::new(calorie_range(0.0, 1.0), Vec::new(), params);
        assert!(matches!(sa.run(), Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_cost_everywhere() {
        let item = continuous_item(1, 300.0, 100.0);
        let sections = vec![PlateSection::from_item(&item, 200.0, 1, SectionName::Large).unwrap()];
        let mut sa = SimulatedAnnealing::new(calorie_range(200.0, 700.0), sections, seeded(3));
        let result = sa.run().unwrap();
        assert_eq!(result.cost, 0.0);
        assert_eq!(sa.stats().cost_scale, 1.0);
    }

    #[test]
    fn test_converges_when_min_state_in_range() {
        // min amount 100 mL gives 300 kcal, inside [300, 320]
        let item = continuous_item(1, 300.0, 100.0);
        for seed in 0..20 {
            let section = PlateSection::from_item(&item, 200.0, 1, SectionName::Large).unwrap();
            let mut sa =
                SimulatedAnnealing::new(calorie_range(300.0, 320.0), vec![section], seeded(seed));
            let start = sa.current_cost().unwrap();
            let result = sa.run().unwrap();
            assert!(start > 10_000.0);
            assert!(result.cost < 1e-2, "seed {seed}: final cost {}", result.cost);
            let calories = result.nutrition.calories;
            assert!(
                (299.9..=320.1).contains(&calories),
                "seed {seed}: final calories {calories}"
            );
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let items = [
            continuous_item(1, 250.0, 100.0),
            discrete_item(2, 120.0, 1.0, 6),
            continuous_item(3, 90.0, 80.0),
        ];
        let make = || {
            items
                .iter()
                .zip(SectionName::ALL)
                .map(|(i, name)| PlateSection::from_item(i, 270.0, 1, name).unwrap())
                .collect::<Vec<_>>()
        };
        let range = calorie_range(500.0, 550.0);
        let a = SimulatedAnnealing::new(range, make(), seeded(42)).run().unwrap();
        let b = SimulatedAnnealing::new(range, make(), seeded(42)).run().unwrap();
        assert_eq!(a.sections, b.sections);
        assert_eq!(a.cost, b.cost);
    }

    #[test]
    fn test_empty_plate_terminates() {
        let mut sa = SimulatedAnnealing::new(calorie_range(100.0, 200.0), Vec::new(), seeded(1));
        let result = sa.run().unwrap();
        assert!(result.sections.is_empty());
        assert_eq!(result.cost, 100.0 * 100.0);
        assert_eq!(sa.stats().iterations, 0);
    }

    #[test]
    fn test_non_finite_cost_is_an_error() {
        let item = continuous_item(1, f64::MAX, 1e-300);
        let sections = vec![PlateSection::from_item(&item, 200.0, 1, SectionName::Large).unwrap()];
        let mut sa = SimulatedAnnealing::new(calorie_range(0.0, 1.0), sections, seeded(1));
        assert!(matches!(sa.run(), Err(PlanError::NonFiniteCost)));
    }

    #[test]
    fn test_unscalable_item_rejected() {
        let mut item = discrete_item(4, 80.0, 1.0, 0);
        assert!(matches!(
            PlateSection::from_item(&item, 610.0, 1, SectionName::Large),
            Err(PlanError::InvalidItem { id: 4, .. })
        ));

        item.max_pieces = 3;
        assert!(PlateSection::from_item(&item, 610.0, 1, SectionName::Large).is_ok());

        let bowl = continuous_item(5, 100.0, 100.0);
        assert!(matches!(
            PlateSection::from_item(&bowl, -270.0, 1, SectionName::Small1),
            Err(PlanError::InvalidItem { id: 5, .. })
        ));
    }

    #[test]
    fn test_optimize_portions_rejects_bad_input() {
        let range = calorie_range(300.0, 320.0);
        let mut rng = StdRng::seed_from_u64(1);

        let no_pieces = discrete_item(1, 80.0, 1.0, 0);
        let plate = PlateItems {
            large: vec![&no_pieces],
            ..PlateItems::default()
        };
        let err = optimize_portions(&range, &plate, &PlateGeometry::default(), &seeded(1), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidItem { id: 1, .. }));

        let bowl = continuous_item(2, 300.0, 100.0);
        let plate = PlateItems {
            large: vec![&bowl],
            ..PlateItems::default()
        };
        let geometry = PlateGeometry {
            large_volume: -200.0,
            ..PlateGeometry::default()
        };
        let err = optimize_portions(&range, &plate, &geometry, &seeded(1), &mut rng).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));

        let geometry = PlateGeometry {
            small_volume: f64::NAN,
            ..PlateGeometry::default()
        };
        assert!(optimize_portions(&range, &plate, &geometry, &seeded(1), &mut rng).is_err());
    }

    #[test]
    fn test_plate_items_skip_empty_sections() {
        let a = continuous_item(1, 100.0, 100.0);
        let b = continuous_item(2, 100.0, 100.0);
        let items = PlateItems {
            large: vec![&a, &b],
            small1: vec![],
            small2: vec![&a],
        };
        let sections = items.to_sections(&PlateGeometry::default()).unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].max_amount, 305.0);
        assert_eq!(sections[2].section, SectionName::Small2);
        assert_eq!(sections[2].max_amount, 270.0);
    }
}
