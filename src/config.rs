use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARMOR_THRESHOLDS, DEFAULT_FINAL_TARGET, DEFAULT_MIN_SHOP_GOLD,
    DEFAULT_SIMULATION_RUNS, DEFAULT_SLEEP_NIGHTS, DEFAULT_START_GOLD,
    DEFAULT_TIME_BUCKET_SECONDS, SHOP_PURCHASE_COST, armor_price_bounds,
};
use crate::strategies::PurchaseStrategy;

/// Complete configuration of one simulation run.
///
/// Read-only for the engine; never mutated mid-run. Every optional knob is an
/// explicit `Option` rather than a zero sentinel, so an unset threshold is
/// never confused with a legitimate zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub start_gold: i64,
    pub min_shop_gold: i64,
    pub final_target: i64,
    pub armor_thresholds: Vec<i64>,
    pub nights_to_sleep: u32,
    #[serde(default)]
    pub one_sleep_item_threshold: Option<u32>,
    #[serde(default)]
    pub two_sleep_item_threshold: Option<u32>,
    pub runs: u32,
    #[serde(default)]
    pub additional_trip_cutoff: Option<i64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub use_far_shop: bool,
    #[serde(default)]
    pub purchase_strategy: PurchaseStrategy,
    #[serde(default)]
    pub abacus_count_threshold: Option<u32>,
    #[serde(default)]
    pub abacus_price_cutoff: Option<i64>,
    #[serde(default = "default_time_bucket_seconds")]
    pub time_bucket_seconds: u32,
}

fn default_time_bucket_seconds() -> u32 {
    DEFAULT_TIME_BUCKET_SECONDS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_gold: DEFAULT_START_GOLD,
            min_shop_gold: DEFAULT_MIN_SHOP_GOLD,
            final_target: DEFAULT_FINAL_TARGET,
            armor_thresholds: DEFAULT_ARMOR_THRESHOLDS.to_vec(),
            nights_to_sleep: DEFAULT_SLEEP_NIGHTS,
            one_sleep_item_threshold: None,
            two_sleep_item_threshold: None,
            runs: DEFAULT_SIMULATION_RUNS,
            additional_trip_cutoff: None,
            seed: None,
            use_far_shop: false,
            purchase_strategy: PurchaseStrategy::default(),
            abacus_count_threshold: None,
            abacus_price_cutoff: None,
            time_bucket_seconds: DEFAULT_TIME_BUCKET_SECONDS,
        }
    }
}

impl SimulationConfig {
    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Range-check the configuration. The engine itself assumes validated
    /// input and performs no redundant checking.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_gold < 1 {
            return Err("Start gold must be at least 1.".to_string());
        }

        if self.final_target < 1 {
            return Err("Final target must be at least 1.".to_string());
        }

        if self.min_shop_gold <= SHOP_PURCHASE_COST {
            return Err(format!(
                "Minimum shop gold must exceed the {SHOP_PURCHASE_COST} cost of the shop purchase."
            ));
        }

        if self.armor_thresholds.is_empty() {
            return Err("At least one armor threshold must be provided.".to_string());
        }

        let (min_threshold, max_threshold) = armor_price_bounds();
        for &threshold in &self.armor_thresholds {
            if threshold < min_threshold || threshold > max_threshold {
                return Err(format!(
                    "Armor threshold {threshold} outside valid range {min_threshold}-{max_threshold}."
                ));
            }
        }

        if self.runs < 1 {
            return Err("Runs must be at least 1.".to_string());
        }

        if self.nights_to_sleep < 1 {
            return Err("Nights to sleep must be at least 1.".to_string());
        }

        if self.time_bucket_seconds < 1 {
            return Err("Time bucket seconds must be at least 1.".to_string());
        }

        if let Some(cutoff) = self.additional_trip_cutoff {
            if cutoff < 0 {
                return Err("Additional trip cutoff must be non-negative.".to_string());
            }
        }

        if self.purchase_strategy == PurchaseStrategy::AbacusGreedy
            && (self.abacus_count_threshold.is_none() || self.abacus_price_cutoff.is_none())
        {
            return Err(
                "Abacus-aware strategy requires both an abacus count threshold and an abacus price cutoff."
                    .to_string(),
            );
        }

        Ok(())
    }
}
