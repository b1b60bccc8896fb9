//! Purchase planning strategies for shop trading trips.
//!
//! A planner turns (available gold, inventory capacity) into a purchase plan
//! over the eligible shop catalog. Each strategy trades optimality against
//! fidelity to a different in-game routine.
//!
//! # Strategy Types
//!
//! - **Greedy**: fill cost-descending; the priciest items earn the most per
//!   inventory slot, so spend on them first
//! - **Max-Spend**: exhaustive search for the mathematically largest total
//!   spend, ties broken by item count
//! - **Abacus-Greedy**: greedy, but once an abacus quota is met, stop filling
//!   slots with items at or below a price cutoff

use serde::{Deserialize, Serialize};

use crate::constants::{FAR_SHOP_ITEMS, INVENTORY_CAPACITY, NEAR_SHOP_ITEMS, ShopItem};

/// Which shop a candidate item is stocked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopLocation {
    Near,
    Far,
}

/// One purchasable item together with the shop that stocks it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub location: ShopLocation,
    pub item: &'static ShopItem,
}

/// Result of planning one purchase trip.
///
/// Invariants: `total_cost` never exceeds the gold the plan was built for,
/// and `total_items` never exceeds the capacity. An empty plan is valid.
#[derive(Debug, Clone, Default)]
pub struct PurchasePlan {
    pub near_items: Vec<&'static ShopItem>,
    pub far_items: Vec<&'static ShopItem>,
    pub total_cost: i64,
    pub total_items: usize,
    pub visits_far_shop: bool,
}

/// Selector for the purchase planning algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchaseStrategy {
    #[default]
    Greedy,
    MaxSpend,
    AbacusGreedy,
}

impl PurchaseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStrategy::Greedy => "greedy",
            PurchaseStrategy::MaxSpend => "max-spend",
            PurchaseStrategy::AbacusGreedy => "abacus-greedy",
        }
    }

    pub fn from_str(s: &str) -> Option<PurchaseStrategy> {
        match s {
            "greedy" => Some(PurchaseStrategy::Greedy),
            "max-spend" => Some(PurchaseStrategy::MaxSpend),
            "abacus-greedy" => Some(PurchaseStrategy::AbacusGreedy),
            _ => None,
        }
    }

    pub fn all_names() -> [&'static str; 3] {
        ["greedy", "max-spend", "abacus-greedy"]
    }
}

/// Trait for purchase planning algorithms.
///
/// Implementations must keep the plan within `available_gold` and `capacity`;
/// an empty plan is the correct answer when nothing is affordable.
pub trait PurchasePlanner {
    fn plan(&self, candidates: &[Candidate], available_gold: i64, capacity: usize) -> PurchasePlan;

    /// Get a descriptive name for the planner
    fn name(&self) -> &'static str;
}

/// Cost-descending greedy fill.
pub struct GreedyPlanner;

impl PurchasePlanner for GreedyPlanner {
    fn plan(&self, candidates: &[Candidate], available_gold: i64, capacity: usize) -> PurchasePlan {
        plan_greedy(candidates, available_gold, capacity, None)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Exhaustive search maximizing total spend.
pub struct MaxSpendPlanner;

impl PurchasePlanner for MaxSpendPlanner {
    fn plan(&self, candidates: &[Candidate], available_gold: i64, capacity: usize) -> PurchasePlan {
        plan_max_spend(candidates, available_gold, capacity)
    }

    fn name(&self) -> &'static str {
        "max-spend"
    }
}

/// Greedy with an abacus quota: once `count_threshold` abaci are in the plan,
/// non-abacus candidates at or below `price_cutoff` are skipped.
pub struct AbacusGreedyPlanner {
    pub count_threshold: u32,
    pub price_cutoff: i64,
}

impl PurchasePlanner for AbacusGreedyPlanner {
    fn plan(&self, candidates: &[Candidate], available_gold: i64, capacity: usize) -> PurchasePlan {
        let rule = AbacusRule {
            count_threshold: self.count_threshold,
            price_cutoff: self.price_cutoff,
        };
        plan_greedy(candidates, available_gold, capacity, Some(&rule))
    }

    fn name(&self) -> &'static str {
        "abacus-greedy"
    }
}

/// Build the planner for a configured strategy. The abacus rule needs both of
/// its parameters; with either missing the strategy degrades to plain greedy.
pub fn planner_for(
    strategy: PurchaseStrategy,
    abacus_count_threshold: Option<u32>,
    abacus_price_cutoff: Option<i64>,
) -> Box<dyn PurchasePlanner> {
    match strategy {
        PurchaseStrategy::Greedy => Box::new(GreedyPlanner),
        PurchaseStrategy::MaxSpend => Box::new(MaxSpendPlanner),
        PurchaseStrategy::AbacusGreedy => match (abacus_count_threshold, abacus_price_cutoff) {
            (Some(count), Some(cutoff)) if count > 0 && cutoff > 0 => {
                Box::new(AbacusGreedyPlanner {
                    count_threshold: count,
                    price_cutoff: cutoff,
                })
            }
            _ => Box::new(GreedyPlanner),
        },
    }
}

struct AbacusRule {
    count_threshold: u32,
    price_cutoff: i64,
}

fn is_abacus(item: &ShopItem) -> bool {
    item.name.to_ascii_lowercase().contains("abacus")
}

/// Candidate list for one shop.
pub fn shop_candidates(location: ShopLocation) -> Vec<Candidate> {
    let items: &'static [ShopItem] = match location {
        ShopLocation::Near => &NEAR_SHOP_ITEMS,
        ShopLocation::Far => &FAR_SHOP_ITEMS,
    };
    items
        .iter()
        .map(|item| Candidate { location, item })
        .collect()
}

fn near_shop_min_cost() -> i64 {
    NEAR_SHOP_ITEMS
        .iter()
        .fold(i64::MAX, |min, item| min.min(item.cost))
}

/// Pick the shop for a regular trip. The near shop always wins unless the far
/// shop is enabled, nothing near is affordable, and something far is.
pub fn choose_shop(available_gold: i64, use_far_shop: bool) -> ShopLocation {
    if !use_far_shop {
        return ShopLocation::Near;
    }

    if available_gold >= near_shop_min_cost() {
        return ShopLocation::Near;
    }

    let has_affordable_far_item = FAR_SHOP_ITEMS.iter().any(|item| item.cost <= available_gold);
    if has_affordable_far_item {
        ShopLocation::Far
    } else {
        ShopLocation::Near
    }
}

fn max_affordable_cost(candidates: &[Candidate], available_gold: i64) -> Option<i64> {
    candidates
        .iter()
        .filter(|candidate| candidate.item.cost <= available_gold)
        .map(|candidate| candidate.item.cost)
        .max()
}

/// Plan the very first purchase of a run: before any shop routine exists,
/// walk to whichever shop offers the costliest single affordable item (the
/// near shop wins ties), then fill greedily.
pub fn plan_initial_walk(gold: i64, use_far_shop: bool) -> PurchasePlan {
    let available_gold = gold;
    let capacity = INVENTORY_CAPACITY;

    if available_gold <= 0 || capacity == 0 {
        return PurchasePlan::default();
    }

    let near_candidates = shop_candidates(ShopLocation::Near);
    let far_candidates = shop_candidates(ShopLocation::Far);

    let near_max = max_affordable_cost(&near_candidates, available_gold);
    let far_max = if use_far_shop {
        max_affordable_cost(&far_candidates, available_gold)
    } else {
        None
    };

    let candidates = if far_max > near_max {
        far_candidates
    } else {
        near_candidates
    };

    plan_greedy(&candidates, available_gold, capacity, None)
}

/// Plan one regular purchase trip with the given planner, including shop
/// selection.
pub fn plan_trip(planner: &dyn PurchasePlanner, gold: i64, use_far_shop: bool) -> PurchasePlan {
    let available_gold = gold;
    let capacity = INVENTORY_CAPACITY;

    if available_gold <= 0 || capacity == 0 {
        return PurchasePlan::default();
    }

    let location = choose_shop(available_gold, use_far_shop);
    let candidates = shop_candidates(location);
    if candidates.is_empty() {
        return PurchasePlan::default();
    }

    planner.plan(&candidates, available_gold, capacity)
}

fn plan_greedy(
    candidates: &[Candidate],
    available_gold: i64,
    capacity: usize,
    abacus: Option<&AbacusRule>,
) -> PurchasePlan {
    let mut plan = PurchasePlan::default();
    let mut sorted: Vec<Candidate> = candidates.to_vec();
    sorted.sort_by(|a, b| b.item.cost.cmp(&a.item.cost));

    let mut remaining_gold = available_gold;
    let mut abaci_in_plan = 0u32;

    for candidate in &sorted {
        if plan.total_items >= capacity {
            break;
        }

        let is_abacus_item = abacus.is_some() && is_abacus(candidate.item);

        if let Some(rule) = abacus {
            let quota_met = abaci_in_plan >= rule.count_threshold;
            if quota_met && !is_abacus_item && candidate.item.cost <= rule.price_cutoff {
                continue;
            }
        }

        let affordable = (remaining_gold / candidate.item.cost) as usize;
        let max_copies = affordable.min(capacity - plan.total_items);
        if max_copies == 0 {
            continue;
        }

        for _ in 0..max_copies {
            match candidate.location {
                ShopLocation::Near => plan.near_items.push(candidate.item),
                ShopLocation::Far => plan.far_items.push(candidate.item),
            }
            plan.total_cost += candidate.item.cost;
            plan.total_items += 1;
            remaining_gold -= candidate.item.cost;
            if is_abacus_item {
                abaci_in_plan += 1;
            }
        }
    }

    plan.visits_far_shop = !plan.far_items.is_empty();
    plan
}

struct BestSelection {
    total_cost: i64,
    total_items: usize,
    counts: Vec<usize>,
}

fn plan_max_spend(candidates: &[Candidate], available_gold: i64, capacity: usize) -> PurchasePlan {
    if capacity == 0 || available_gold <= 0 || candidates.is_empty() {
        return PurchasePlan::default();
    }

    let mut sorted: Vec<Candidate> = candidates.to_vec();
    sorted.sort_by(|a, b| b.item.cost.cmp(&a.item.cost));

    let cheapest_cost = sorted
        .iter()
        .fold(i64::MAX, |min, candidate| min.min(candidate.item.cost));

    let mut selection = vec![0usize; sorted.len()];
    let mut best = BestSelection {
        total_cost: 0,
        total_items: 0,
        counts: vec![0; sorted.len()],
    };

    search_max_spend(
        &sorted,
        cheapest_cost,
        0,
        capacity,
        available_gold,
        0,
        &mut selection,
        &mut best,
    );

    let mut plan = PurchasePlan {
        total_cost: best.total_cost,
        total_items: best.total_items,
        ..PurchasePlan::default()
    };

    for (index, &count) in best.counts.iter().enumerate() {
        let candidate = &sorted[index];
        for _ in 0..count {
            match candidate.location {
                ShopLocation::Near => plan.near_items.push(candidate.item),
                ShopLocation::Far => plan.far_items.push(candidate.item),
            }
        }
    }

    plan.visits_far_shop = !plan.far_items.is_empty();
    plan
}

/// Depth-first search over per-item purchase counts, cost-descending.
///
/// Prunes as soon as remaining gold drops below the cheapest catalog cost: no
/// deeper branch can improve the spend past that point. Depth is bounded by
/// the catalog size (at most 6 distinct items), so recursion is safe.
#[allow(clippy::too_many_arguments)]
fn search_max_spend(
    sorted: &[Candidate],
    cheapest_cost: i64,
    index: usize,
    remaining_capacity: usize,
    remaining_gold: i64,
    current_cost: i64,
    selection: &mut Vec<usize>,
    best: &mut BestSelection,
) {
    if index >= sorted.len() || remaining_capacity == 0 || remaining_gold < cheapest_cost {
        update_best(selection, current_cost, best);
        return;
    }

    let cost = sorted[index].item.cost;
    let max_copies = ((remaining_gold / cost) as usize).min(remaining_capacity);

    for copies in (0..=max_copies).rev() {
        selection[index] = copies;
        search_max_spend(
            sorted,
            cheapest_cost,
            index + 1,
            remaining_capacity - copies,
            remaining_gold - copies as i64 * cost,
            current_cost + copies as i64 * cost,
            selection,
            best,
        );
    }

    selection[index] = 0;
}

fn update_best(selection: &[usize], current_cost: i64, best: &mut BestSelection) {
    if current_cost > best.total_cost {
        best.total_cost = current_cost;
        best.total_items = selection.iter().sum();
        best.counts.clear();
        best.counts.extend_from_slice(selection);
        return;
    }

    if current_cost == best.total_cost {
        let total_items: usize = selection.iter().sum();
        if total_items > best.total_items {
            best.total_items = total_items;
            best.counts.clear();
            best.counts.extend_from_slice(selection);
        }
    }
}
