//! Batch experiment runner for systematic parameter sweeps.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SimulationConfig;
use crate::simulation::{SimulationReport, run_simulation};
use crate::strategies::PurchaseStrategy;

/// Configuration for a batch of experiments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentBatch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub experiments: Vec<ExperimentConfig>,
}

/// Configuration for a single experiment: a name plus overrides applied on
/// top of the base configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    #[serde(default)]
    pub overrides: ExperimentOverrides,
}

/// Parameter overrides for an experiment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentOverrides {
    pub start_gold: Option<i64>,
    pub min_shop_gold: Option<i64>,
    pub final_target: Option<i64>,
    pub armor_thresholds: Option<Vec<i64>>,
    pub nights_to_sleep: Option<u32>,
    pub one_sleep_item_threshold: Option<u32>,
    pub two_sleep_item_threshold: Option<u32>,
    pub runs: Option<u32>,
    pub additional_trip_cutoff: Option<i64>,
    pub seed: Option<u64>,
    pub use_far_shop: Option<bool>,
    pub purchase_strategy: Option<PurchaseStrategy>,
    pub abacus_count_threshold: Option<u32>,
    pub abacus_price_cutoff: Option<i64>,
    pub time_bucket_seconds: Option<u32>,
}

/// Result of running one experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub name: String,
    pub success: bool,
    pub error: Option<String>,
    pub report: Option<SimulationReport>,
    pub duration_ms: u64,
}

/// On-disk form of a finished batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ExperimentResult>,
}

impl ExperimentBatch {
    /// Load a batch configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read experiment file: {}", e))?;

        serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse YAML: {}", e))
    }

    /// Run every experiment in order against the base configuration.
    ///
    /// Experiments are independent, so one failing (bad overrides, or the
    /// engine's insufficient-gold condition) does not stop the rest.
    pub fn run(&self, base: &SimulationConfig, quiet: bool) -> Vec<ExperimentResult> {
        self.experiments
            .iter()
            .map(|experiment| run_single_experiment(experiment, base, quiet))
            .collect()
    }
}

fn run_single_experiment(
    experiment: &ExperimentConfig,
    base: &SimulationConfig,
    quiet: bool,
) -> ExperimentResult {
    let start = std::time::Instant::now();

    if !quiet {
        println!("Running experiment: {}", experiment.name);
    }
    info!("experiment {} starting", experiment.name);

    let mut config = base.clone();
    apply_experiment_overrides(&mut config, &experiment.overrides);

    let outcome = config.validate().and_then(|_| run_simulation(&config));

    match outcome {
        Ok(report) => ExperimentResult {
            name: experiment.name.clone(),
            success: true,
            error: None,
            report: Some(report),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        Err(error) => {
            warn!("experiment {} failed: {}", experiment.name, error);
            ExperimentResult {
                name: experiment.name.clone(),
                success: false,
                error: Some(error),
                report: None,
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}

fn apply_experiment_overrides(config: &mut SimulationConfig, overrides: &ExperimentOverrides) {
    if let Some(start_gold) = overrides.start_gold {
        config.start_gold = start_gold;
    }
    if let Some(min_shop_gold) = overrides.min_shop_gold {
        config.min_shop_gold = min_shop_gold;
    }
    if let Some(final_target) = overrides.final_target {
        config.final_target = final_target;
    }
    if let Some(ref thresholds) = overrides.armor_thresholds {
        config.armor_thresholds = thresholds.clone();
    }
    if let Some(nights) = overrides.nights_to_sleep {
        config.nights_to_sleep = nights;
    }
    if let Some(threshold) = overrides.one_sleep_item_threshold {
        config.one_sleep_item_threshold = Some(threshold);
    }
    if let Some(threshold) = overrides.two_sleep_item_threshold {
        config.two_sleep_item_threshold = Some(threshold);
    }
    if let Some(runs) = overrides.runs {
        config.runs = runs;
    }
    if let Some(cutoff) = overrides.additional_trip_cutoff {
        config.additional_trip_cutoff = Some(cutoff);
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(use_far_shop) = overrides.use_far_shop {
        config.use_far_shop = use_far_shop;
    }
    if let Some(strategy) = overrides.purchase_strategy {
        config.purchase_strategy = strategy;
    }
    if let Some(count) = overrides.abacus_count_threshold {
        config.abacus_count_threshold = Some(count);
    }
    if let Some(cutoff) = overrides.abacus_price_cutoff {
        config.abacus_price_cutoff = Some(cutoff);
    }
    if let Some(bucket) = overrides.time_bucket_seconds {
        config.time_bucket_seconds = bucket;
    }
}

impl BatchReport {
    pub fn new(batch: &ExperimentBatch, results: Vec<ExperimentResult>) -> Self {
        Self {
            batch: batch.name.clone(),
            generated_at: Utc::now(),
            results,
        }
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
