//! Fixed game-balance tables: shop catalogs, the armor buy-price table, time
//! costs, and canonical configuration defaults. Shared read-only by every
//! trial; never mutated.

/// A purchasable shop item. Catalogs are fixed, process-wide static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub name: &'static str,
    pub cost: i64,
    pub equippable: bool,
}

// Phase 1: armor negotiation.

/// Cost of a single iron plate when restocking.
pub const PLATE_COST: i64 = 1500;
/// Plates bought per restock trip.
pub const PLATE_BATCH_SIZE: i64 = 7;
/// Seconds spent on one restock trip.
pub const RESTOCK_TIME_SECONDS: f64 = 94.0;
/// Cost of the travel wing paid on the way out and again on the way back.
pub const TRAVEL_WING_COST: i64 = 25;
/// Seconds to close an accepted offer.
pub const OFFER_ACCEPT_TIME: f64 = 4.9;
/// Seconds wasted on a rejected offer.
pub const OFFER_REJECT_TIME: f64 = 4.8;

/// Buy prices a customer may quote for one armor piece, ascending.
pub const ARMOR_BUY_PRICES: [i64; 27] = [
    1265, 1289, 1312, 1335, 1358, 1382, 1406, 1429, 1453, 1476, 1500, 1523,
    1546, 1570, 1593, 1617, 1640, 1664, 1687, 1710, 1734, 1757, 1781, 1804,
    1828, 1851, 1875,
];

/// Chance of a critical (unusually high) offer.
pub const CRITICAL_OFFER_CHANCE: f64 = 1.0 / 32.0;
/// Inclusive range a critical offer is drawn from.
pub const CRITICAL_OFFER_MIN: i64 = 2250;
pub const CRITICAL_OFFER_MAX: i64 = 3000;

// Phase 2: shop trading cycles.

/// One-time cost of buying the shop, paid at the start of phase 2.
pub const SHOP_PURCHASE_COST: i64 = 35_000;
/// Seconds for the very first walk: buy the shop, then go shopping.
pub const TIME_INITIAL_WALK: f64 = 50.0;
/// Seconds to collect profits and walk to the near shop.
pub const TIME_COLLECT_AND_WALK_TO_NEAR_SHOP: f64 = 20.3;
/// Extra seconds to continue from the near shop to the far shop.
pub const TIME_EXTRA_WALK_TO_FAR_SHOP: f64 = 3.87;
/// Seconds to buy one equippable item.
pub const TIME_BUY_EQUIPPABLE: f64 = 4.1;
/// Seconds to buy one non-equippable item (extra confirmation prompt).
pub const TIME_BUY_UNEQUIPPABLE: f64 = 5.2;
/// Seconds to walk back from the near shop.
pub const TIME_RETURN_FROM_NEAR_SHOP: f64 = 7.4;
/// Extra return seconds when the far shop was visited.
pub const TIME_EXTRA_RETURN_FROM_FAR_SHOP: f64 = 3.87;
/// Seconds to hand one purchased item over to the clerk.
pub const TIME_HAND_OVER_ITEM: f64 = 5.0;
/// Seconds for lunch, once per trip.
pub const TIME_LUNCH: f64 = 3.0;
/// Seconds to get back home before sleeping.
pub const TIME_RETURN_FOR_SLEEP: f64 = 8.7;
/// Seconds per night slept.
pub const TIME_SLEEP_NIGHT: f64 = 7.35;

/// Inventory slots available for purchased stock.
pub const INVENTORY_CAPACITY: usize = 8;
/// Chance that one stocked item sells during one night.
pub const NIGHTLY_SALE_PROBABILITY: f64 = 0.75;
/// Resale multiplier range applied to an item's cost when it sells.
pub const RESALE_MULTIPLIER_MIN: f64 = 1.5;
pub const RESALE_MULTIPLIER_MAX: f64 = 2.0;

pub static NEAR_SHOP_ITEMS: [ShopItem; 5] = [
    ShopItem { name: "Chain Sickle", cost: 550, equippable: true },
    ShopItem { name: "Venomous Dagger", cost: 750, equippable: true },
    ShopItem { name: "Iron Spear", cost: 880, equippable: true },
    ShopItem { name: "Morning Star", cost: 1250, equippable: true },
    ShopItem { name: "Abacus of Virtue", cost: 1600, equippable: true },
];

pub static FAR_SHOP_ITEMS: [ShopItem; 6] = [
    ShopItem { name: "Divine Dagger", cost: 350, equippable: true },
    ShopItem { name: "Morning Star", cost: 700, equippable: true },
    ShopItem { name: "Iron Shield", cost: 1200, equippable: false },
    ShopItem { name: "Battle Axe", cost: 1500, equippable: true },
    ShopItem { name: "Clothes H", cost: 180, equippable: true },
    ShopItem { name: "Leather Armor", cost: 650, equippable: true },
];

// Configuration defaults.

pub const DEFAULT_START_GOLD: i64 = 29_500;
pub const DEFAULT_MIN_SHOP_GOLD: i64 = 35_550;
pub const DEFAULT_FINAL_TARGET: i64 = 26_000;
pub const DEFAULT_SIMULATION_RUNS: u32 = 1000;
pub const DEFAULT_SLEEP_NIGHTS: u32 = 3;
pub const DEFAULT_ARMOR_THRESHOLDS: [i64; 7] = [1617, 1640, 1664, 1687, 1710, 1734, 1757];
pub const DEFAULT_TIME_BUCKET_SECONDS: u32 = 30;

/// Lowest and highest prices in the armor buy-price table. Acceptance
/// thresholds outside this range are rejected by config validation.
pub fn armor_price_bounds() -> (i64, i64) {
    (ARMOR_BUY_PRICES[0], ARMOR_BUY_PRICES[ARMOR_BUY_PRICES.len() - 1])
}
