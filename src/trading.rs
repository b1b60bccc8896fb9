//! Phase 2: run the shop — purchase trips, sleeping, and nightly sales.

use serde::{Deserialize, Serialize};

use crate::constants::{
    NIGHTLY_SALE_PROBABILITY, RESALE_MULTIPLIER_MAX, RESALE_MULTIPLIER_MIN, SHOP_PURCHASE_COST,
    TIME_BUY_EQUIPPABLE, TIME_BUY_UNEQUIPPABLE, TIME_COLLECT_AND_WALK_TO_NEAR_SHOP,
    TIME_EXTRA_RETURN_FROM_FAR_SHOP, TIME_EXTRA_WALK_TO_FAR_SHOP, TIME_HAND_OVER_ITEM,
    TIME_INITIAL_WALK, TIME_LUNCH, TIME_RETURN_FOR_SLEEP, TIME_RETURN_FROM_NEAR_SHOP,
    TIME_SLEEP_NIGHT,
};
use crate::rng::TrialRng;
use crate::strategies::{PurchasePlan, PurchaseStrategy, plan_initial_walk, plan_trip, planner_for};

/// Inputs of one trading phase. `start_gold` is the capital carried over from
/// negotiation; the shop purchase cost is subtracted from it up front.
#[derive(Debug, Clone)]
pub struct TradingParams {
    pub start_gold: i64,
    pub nights_to_sleep: u32,
    pub final_target: i64,
    pub use_far_shop: bool,
    pub additional_trip_cutoff: Option<i64>,
    pub one_sleep_item_threshold: Option<u32>,
    pub two_sleep_item_threshold: Option<u32>,
    pub purchase_strategy: PurchaseStrategy,
    pub abacus_count_threshold: Option<u32>,
    pub abacus_price_cutoff: Option<i64>,
}

/// Final state of one trading phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingOutcome {
    pub gold: i64,
    pub time_seconds: f64,
    pub cycles: u32,
    pub purchase_trips: u32,
}

/// What happened during one night of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightSummary {
    pub night: u32,
    pub sold_count: u32,
    pub profits_generated: i64,
    pub inventory_remaining: usize,
}

/// Diagnostic record of one trading cycle, emitted through the cycle
/// observer. Produced only when an observer is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleLog {
    pub cycle_index: u32,
    pub start_gold: i64,
    pub gold_after_purchases: i64,
    pub pending_profits_at_start: i64,
    pub pending_profits_after_sleep: i64,
    pub items_added: usize,
    pub nights_scheduled: u32,
    pub nights_slept: u32,
    pub inventory_at_start: usize,
    pub inventory_before_sleep: usize,
    pub inventory_after_sleep: usize,
    pub items_sold: u32,
    pub profits_generated: i64,
    pub trips: u32,
    pub time_spent: f64,
    pub night_summaries: Vec<NightSummary>,
}

/// Run trading cycles until the final target is reached with no inventory and
/// no pending profits left.
///
/// One cycle: realize the previous cycle's pending profits, take 1-2 purchase
/// trips, sleep, then roll a sale chance per stocked item per night. Profits
/// from nightly sales only become spendable gold at the start of the next
/// cycle.
///
/// The single fatal condition: `start_gold` cannot cover the shop purchase.
pub fn run_trading(
    rng: &mut TrialRng,
    params: &TradingParams,
    mut observer: Option<&mut dyn FnMut(CycleLog)>,
) -> Result<TradingOutcome, String> {
    let mut gold = params.start_gold - SHOP_PURCHASE_COST;
    if gold < 0 {
        return Err("Insufficient gold to purchase the shop.".to_string());
    }

    let planner = planner_for(
        params.purchase_strategy,
        params.abacus_count_threshold,
        params.abacus_price_cutoff,
    );

    let mut time_spent = 0.0f64;
    let mut cycles = 0u32;
    let mut total_trips = 0u32;
    let mut pending_profits = 0i64;
    let mut inventory: Vec<i64> = Vec::new();
    let mut initial_walk_handled = false;

    while gold < params.final_target || pending_profits > 0 || !inventory.is_empty() {
        let cycle_start_gold = gold;
        let cycle_start_pending = pending_profits;
        let cycle_start_inventory = inventory.len();
        let cycle_start_time = time_spent;

        if pending_profits > 0 {
            gold += pending_profits;
            pending_profits = 0;
        }

        if gold >= params.final_target {
            break;
        }

        let mut trips_this_cycle = 0u32;
        let mut purchased_any = false;
        let mut items_added_this_cycle = 0usize;
        let mut night_summaries = Vec::new();

        loop {
            let is_initial_walk = !initial_walk_handled;
            let plan: PurchasePlan = if is_initial_walk {
                initial_walk_handled = true;
                plan_initial_walk(gold, params.use_far_shop)
            } else {
                plan_trip(planner.as_ref(), gold, params.use_far_shop)
            };

            if plan.total_items == 0 {
                if is_initial_walk {
                    // Retry with the regular routine before giving up.
                    continue;
                }
                break;
            }

            if trips_this_cycle > 0 {
                match params.additional_trip_cutoff {
                    Some(cutoff) => {
                        if gold < cutoff || trips_this_cycle >= 2 {
                            break;
                        }
                    }
                    None => break,
                }
            }

            trips_this_cycle += 1;
            total_trips += 1;
            purchased_any = true;

            if is_initial_walk {
                time_spent += TIME_INITIAL_WALK;
            } else {
                time_spent += TIME_COLLECT_AND_WALK_TO_NEAR_SHOP;
            }

            for item in &plan.near_items {
                time_spent += if item.equippable {
                    TIME_BUY_EQUIPPABLE
                } else {
                    TIME_BUY_UNEQUIPPABLE
                };
            }

            if plan.visits_far_shop {
                if !is_initial_walk {
                    time_spent += TIME_EXTRA_WALK_TO_FAR_SHOP;
                }
                for item in &plan.far_items {
                    time_spent += if item.equippable {
                        TIME_BUY_EQUIPPABLE
                    } else {
                        TIME_BUY_UNEQUIPPABLE
                    };
                }
            }

            if !is_initial_walk {
                time_spent += TIME_RETURN_FROM_NEAR_SHOP;
                if plan.visits_far_shop {
                    time_spent += TIME_EXTRA_RETURN_FROM_FAR_SHOP;
                }
            }

            time_spent += TIME_LUNCH;
            time_spent += plan.total_items as f64 * TIME_HAND_OVER_ITEM;

            gold -= plan.total_cost;
            inventory.extend(plan.near_items.iter().map(|item| item.cost));
            inventory.extend(plan.far_items.iter().map(|item| item.cost));
            items_added_this_cycle += plan.total_items;
        }

        if !purchased_any && inventory.is_empty() {
            break;
        }

        time_spent += TIME_RETURN_FOR_SLEEP;
        cycles += 1;

        let mut nights_this_cycle = params.nights_to_sleep;
        if params
            .one_sleep_item_threshold
            .is_some_and(|threshold| items_added_this_cycle as u32 <= threshold)
        {
            nights_this_cycle = nights_this_cycle.min(1);
        } else if params
            .two_sleep_item_threshold
            .is_some_and(|threshold| items_added_this_cycle as u32 <= threshold)
        {
            nights_this_cycle = nights_this_cycle.min(2);
        }

        time_spent += f64::from(nights_this_cycle) * TIME_SLEEP_NIGHT;

        let inventory_before_sleep = inventory.len();
        let mut items_sold_this_cycle = 0u32;
        let mut profits_this_cycle = 0i64;

        for night in 0..nights_this_cycle {
            let mut remaining = Vec::with_capacity(inventory.len());
            let mut sold_this_night = 0u32;
            let mut profit_this_night = 0i64;

            for &cost in &inventory {
                if rng.next_f64() < NIGHTLY_SALE_PROBABILITY {
                    let multiplier = rng.uniform(RESALE_MULTIPLIER_MIN, RESALE_MULTIPLIER_MAX);
                    let sale_value = (cost as f64 * multiplier).round() as i64;
                    pending_profits += sale_value;
                    sold_this_night += 1;
                    profit_this_night += sale_value;
                } else {
                    remaining.push(cost);
                }
            }

            inventory = remaining;
            items_sold_this_cycle += sold_this_night;
            profits_this_cycle += profit_this_night;

            if observer.is_some() {
                night_summaries.push(NightSummary {
                    night: night + 1,
                    sold_count: sold_this_night,
                    profits_generated: profit_this_night,
                    inventory_remaining: inventory.len(),
                });
            }
        }

        if let Some(ref mut emit) = observer {
            emit(CycleLog {
                cycle_index: cycles,
                start_gold: cycle_start_gold,
                gold_after_purchases: gold,
                pending_profits_at_start: cycle_start_pending,
                pending_profits_after_sleep: pending_profits,
                items_added: items_added_this_cycle,
                nights_scheduled: params.nights_to_sleep,
                nights_slept: nights_this_cycle,
                inventory_at_start: cycle_start_inventory,
                inventory_before_sleep,
                inventory_after_sleep: inventory.len(),
                items_sold: items_sold_this_cycle,
                profits_generated: profits_this_cycle,
                trips: trips_this_cycle,
                time_spent: time_spent - cycle_start_time,
                night_summaries,
            });
        }
    }

    if pending_profits > 0 {
        gold += pending_profits;
    }

    Ok(TradingOutcome {
        gold,
        time_seconds: time_spent,
        cycles,
        purchase_trips: total_trips,
    })
}
