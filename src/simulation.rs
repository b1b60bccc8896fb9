//! Trial runner and aggregator: the crate's primary entry points.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::metrics::{RunResult, ThresholdSummary, summarize_threshold};
use crate::negotiation::{NegotiationOutcome, run_negotiation};
use crate::rng::{TrialRng, derive_trial_seed, normalize_seed};
use crate::trading::{CycleLog, TradingOutcome, TradingParams, run_trading};

/// Output of a full simulation: the base seed actually used (echoed back so
/// callers can reproduce the run) and one summary per configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub seed: u32,
    pub summaries: Vec<ThresholdSummary>,
}

/// On-disk form of a finished run: the report plus the configuration that
/// produced it and a generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub generated_at: DateTime<Utc>,
    pub config: SimulationConfig,
    pub seed: u32,
    pub summaries: Vec<ThresholdSummary>,
}

impl ReportDocument {
    pub fn new(config: SimulationConfig, report: &SimulationReport) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            seed: report.seed,
            summaries: report.summaries.clone(),
        }
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let document: Self = serde_json::from_str(&json)?;
        Ok(document)
    }
}

/// Selects the single trial to run and whether to capture per-cycle logs.
#[derive(Debug, Clone, Default)]
pub struct SingleRunOptions {
    pub threshold_index: usize,
    pub run_index: u32,
    pub capture_cycles: bool,
}

/// Full trace of one trial, for offline diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRunReport {
    pub threshold: i64,
    pub base_seed: u32,
    pub run_index: u32,
    pub seed: u32,
    pub total_time: f64,
    pub negotiation: NegotiationOutcome,
    pub trading: TradingOutcome,
    pub cycle_logs: Vec<CycleLog>,
}

/// Run the full Monte Carlo simulation: `runs` independent trials per
/// configured threshold.
///
/// Assumes a validated configuration (see [`SimulationConfig::validate`]).
/// Fails fast on the engine's one fatal condition — a trial that cannot
/// afford the shop purchase — because a partial aggregate would misrepresent
/// the statistic.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, String> {
    let bucket_size = f64::from(config.time_bucket_seconds);
    let base_seed = normalize_seed(config.seed);
    let mut summaries = Vec::with_capacity(config.armor_thresholds.len());

    for &threshold in &config.armor_thresholds {
        debug!(
            "running {} trials at threshold {} (base seed {})",
            config.runs, threshold, base_seed
        );

        let mut results = Vec::with_capacity(config.runs as usize);
        for run_index in 0..config.runs {
            let (negotiation, trading) = run_trial(config, base_seed, threshold, run_index, None)?;
            results.push(RunResult {
                total_time: negotiation.time_seconds + trading.time_seconds,
                restock_cycles: negotiation.restock_cycles,
                cycles: trading.cycles,
                purchase_trips: trading.purchase_trips,
            });
        }

        summaries.push(summarize_threshold(threshold, &results, bucket_size));
    }

    Ok(SimulationReport {
        seed: base_seed,
        summaries,
    })
}

/// Run exactly one trial, optionally capturing its cycle-by-cycle trace.
pub fn run_single_simulation(
    config: &SimulationConfig,
    options: &SingleRunOptions,
) -> Result<SingleRunReport, String> {
    let threshold = *config
        .armor_thresholds
        .get(options.threshold_index)
        .ok_or_else(|| {
            format!(
                "Threshold index {} is out of range for {} configured thresholds.",
                options.threshold_index,
                config.armor_thresholds.len()
            )
        })?;

    let base_seed = normalize_seed(config.seed);
    let seed = derive_trial_seed(base_seed, threshold, options.run_index);
    debug!(
        "running single trial: threshold {}, run index {}, derived seed {}",
        threshold, options.run_index, seed
    );

    let mut cycle_logs: Vec<CycleLog> = Vec::new();
    let (negotiation, trading) = if options.capture_cycles {
        let mut capture = |log: CycleLog| cycle_logs.push(log);
        run_trial(config, base_seed, threshold, options.run_index, Some(&mut capture))?
    } else {
        run_trial(config, base_seed, threshold, options.run_index, None)?
    };

    Ok(SingleRunReport {
        threshold,
        base_seed,
        run_index: options.run_index,
        seed,
        total_time: negotiation.time_seconds + trading.time_seconds,
        negotiation,
        trading,
        cycle_logs,
    })
}

/// One trial: derive the seed, run negotiation, then run trading with the
/// banked capital. The two phases share one generator.
fn run_trial(
    config: &SimulationConfig,
    base_seed: u32,
    threshold: i64,
    run_index: u32,
    observer: Option<&mut dyn FnMut(CycleLog)>,
) -> Result<(NegotiationOutcome, TradingOutcome), String> {
    let seed = derive_trial_seed(base_seed, threshold, run_index);
    let mut rng = TrialRng::new(seed);

    let negotiation = run_negotiation(&mut rng, threshold, config.min_shop_gold, config.start_gold);

    let params = TradingParams {
        start_gold: negotiation.gold,
        nights_to_sleep: config.nights_to_sleep,
        final_target: config.final_target,
        use_far_shop: config.use_far_shop,
        additional_trip_cutoff: config.additional_trip_cutoff,
        one_sleep_item_threshold: config.one_sleep_item_threshold,
        two_sleep_item_threshold: config.two_sleep_item_threshold,
        purchase_strategy: config.purchase_strategy,
        abacus_count_threshold: config.abacus_count_threshold,
        abacus_price_cutoff: config.abacus_price_cutoff,
    };
    let trading = run_trading(&mut rng, &params, observer)?;

    Ok((negotiation, trading))
}
