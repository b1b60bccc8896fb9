//! Phase 1: accumulate capital by selling armor until the shop is affordable.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARMOR_BUY_PRICES, CRITICAL_OFFER_CHANCE, CRITICAL_OFFER_MAX, CRITICAL_OFFER_MIN,
    OFFER_ACCEPT_TIME, OFFER_REJECT_TIME, PLATE_BATCH_SIZE, PLATE_COST, RESTOCK_TIME_SECONDS,
    TRAVEL_WING_COST,
};
use crate::rng::TrialRng;

/// Final state of one negotiation phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationOutcome {
    pub gold: i64,
    pub time_seconds: f64,
    pub restock_cycles: u32,
    pub offers_made: u32,
}

/// Solicit offers for restocked armor until `min_shop_gold` is banked with no
/// plates left to sell and no return wing owed.
///
/// Gold may go negative mid-loop (restocking is paid up front); it is
/// monotonically non-decreasing across whole restock cycles, so the loop
/// always terminates.
pub fn run_negotiation(
    rng: &mut TrialRng,
    price_threshold: i64,
    min_shop_gold: i64,
    start_gold: i64,
) -> NegotiationOutcome {
    let mut gold = start_gold;
    let mut time_spent = 0.0;
    let mut restock_cycles = 0u32;
    let mut offers = 0u32;
    let mut plates_remaining = 0i64;
    let mut owes_return_wing = false;

    loop {
        if gold >= min_shop_gold && plates_remaining == 0 && !owes_return_wing {
            break;
        }

        if plates_remaining == 0 {
            gold -= PLATE_COST * PLATE_BATCH_SIZE + TRAVEL_WING_COST;
            time_spent += RESTOCK_TIME_SECONDS;
            plates_remaining = PLATE_BATCH_SIZE;
            restock_cycles += 1;
            owes_return_wing = true;
        }

        let (price, _critical) = roll_offer(rng);
        offers += 1;

        if price >= price_threshold {
            gold += price;
            time_spent += OFFER_ACCEPT_TIME;
            plates_remaining -= 1;
            // The return wing is bought only once the batch is sold out.
            if plates_remaining == 0 && owes_return_wing {
                gold -= TRAVEL_WING_COST;
                owes_return_wing = false;
            }
        } else {
            time_spent += OFFER_REJECT_TIME;
        }
    }

    NegotiationOutcome {
        gold,
        time_seconds: time_spent,
        restock_cycles,
        offers_made: offers,
    }
}

/// Roll one customer offer: a rare critical offer from the high range, or a
/// uniform pick from the armor buy-price table. Returns (price, was_critical).
pub fn roll_offer(rng: &mut TrialRng) -> (i64, bool) {
    if rng.next_f64() < CRITICAL_OFFER_CHANCE {
        (rng.rand_int(CRITICAL_OFFER_MIN, CRITICAL_OFFER_MAX), true)
    } else {
        (*rng.choice(&ARMOR_BUY_PRICES), false)
    }
}
