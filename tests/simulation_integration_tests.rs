//! Integration tests for the full simulation pipeline.

use merchant_model::config::SimulationConfig;
use merchant_model::simulation::{SingleRunOptions, run_simulation, run_single_simulation};

/// The reference scenario: one threshold, 500 runs, fixed seed.
fn reference_config() -> SimulationConfig {
    SimulationConfig {
        start_gold: 30_000,
        min_shop_gold: 35_575,
        final_target: 26_000,
        armor_thresholds: vec![1640],
        nights_to_sleep: 3,
        runs: 500,
        seed: Some(42),
        use_far_shop: false,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_reference_scenario_shape() {
    let config = reference_config();
    assert!(config.validate().is_ok());

    let report = run_simulation(&config).expect("simulation succeeds");

    assert_eq!(report.seed, 42);
    assert_eq!(report.summaries.len(), 1);

    let summary = &report.summaries[0];
    assert_eq!(summary.threshold, 1640);
    assert!(summary.average_time > 0.0);
    assert!(summary.std_dev_time >= 0.0);
    assert!(summary.fastest_time > 0.0);
    assert!(summary.fastest_time <= summary.average_time);
    assert!(summary.average_restock_cycles >= 1.0);
    assert!(summary.average_cycles >= 1.0);
    assert!(
        (summary.average_trips_per_cycle * summary.average_cycles - summary.average_trips).abs()
            < 1e-9
    );

    let bucket_total: u32 = summary.bucket_counts.iter().map(|bucket| bucket.count).sum();
    assert_eq!(bucket_total, config.runs);
}

#[test]
fn test_same_seed_reproduces_report() {
    let config = reference_config();

    let first = run_simulation(&config).expect("first run succeeds");
    let second = run_simulation(&config).expect("second run succeeds");

    assert_eq!(first, second);
}

#[test]
fn test_min_shop_gold_below_shop_cost_fails_every_trial() {
    // Phase 1 exits immediately at 30_000 gold, which cannot cover the
    // 35_000 shop purchase. Validation would reject this config; the engine
    // must fail fatally rather than fabricate a result.
    let mut config = reference_config();
    config.min_shop_gold = 20_000;
    config.runs = 10;

    assert!(config.validate().is_err());
    assert!(run_simulation(&config).is_err());

    let options = SingleRunOptions::default();
    assert!(run_single_simulation(&config, &options).is_err());
}

#[test]
fn test_aggregate_matches_single_trial_recomputation() {
    let mut config = reference_config();
    config.runs = 50;
    config.seed = Some(7);

    let report = run_simulation(&config).expect("simulation succeeds");
    let summary = &report.summaries[0];

    let mut times = Vec::with_capacity(config.runs as usize);
    for run_index in 0..config.runs {
        let options = SingleRunOptions {
            threshold_index: 0,
            run_index,
            capture_cycles: false,
        };
        let trial = run_single_simulation(&config, &options).expect("trial succeeds");
        times.push(trial.total_time);
    }

    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let variance =
        times.iter().map(|time| (time - mean).powi(2)).sum::<f64>() / times.len() as f64;
    let fastest = times.iter().copied().fold(f64::INFINITY, f64::min);

    assert!((summary.average_time - mean).abs() < 1e-9);
    assert!((summary.std_dev_time - variance.sqrt()).abs() < 1e-9);
    assert_eq!(summary.fastest_time, fastest);
}

#[test]
fn test_single_trial_trace_capture() {
    let mut config = reference_config();
    config.runs = 1;

    let options = SingleRunOptions {
        threshold_index: 0,
        run_index: 0,
        capture_cycles: true,
    };
    let trial = run_single_simulation(&config, &options).expect("trial succeeds");

    assert_eq!(trial.threshold, 1640);
    assert_eq!(trial.base_seed, 42);
    assert_eq!(trial.cycle_logs.len(), trial.trading.cycles as usize);
    assert!(
        (trial.total_time
            - (trial.negotiation.time_seconds + trial.trading.time_seconds))
            .abs()
            < 1e-12
    );

    // Without capture the same trial produces no logs but the same numbers.
    let quiet_options = SingleRunOptions {
        threshold_index: 0,
        run_index: 0,
        capture_cycles: false,
    };
    let quiet = run_single_simulation(&config, &quiet_options).expect("trial succeeds");
    assert!(quiet.cycle_logs.is_empty());
    assert_eq!(quiet.total_time, trial.total_time);
    assert_eq!(quiet.negotiation, trial.negotiation);
    assert_eq!(quiet.trading, trial.trading);
}

#[test]
fn test_distinct_run_indices_use_distinct_seeds() {
    let config = reference_config();

    let first = run_single_simulation(
        &config,
        &SingleRunOptions {
            threshold_index: 0,
            run_index: 0,
            capture_cycles: false,
        },
    )
    .expect("trial succeeds");
    let second = run_single_simulation(
        &config,
        &SingleRunOptions {
            threshold_index: 0,
            run_index: 1,
            capture_cycles: false,
        },
    )
    .expect("trial succeeds");

    assert_ne!(first.seed, second.seed);
}

#[test]
fn test_threshold_index_out_of_range_is_rejected() {
    let config = reference_config();
    let options = SingleRunOptions {
        threshold_index: 5,
        run_index: 0,
        capture_cycles: false,
    };

    assert!(run_single_simulation(&config, &options).is_err());
}

#[test]
fn test_multiple_thresholds_produce_one_summary_each() {
    let mut config = reference_config();
    config.armor_thresholds = vec![1617, 1640, 1664];
    config.runs = 20;

    let report = run_simulation(&config).expect("simulation succeeds");

    assert_eq!(report.summaries.len(), 3);
    for (summary, &threshold) in report.summaries.iter().zip(&config.armor_thresholds) {
        assert_eq!(summary.threshold, threshold);
        let bucket_total: u32 = summary.bucket_counts.iter().map(|bucket| bucket.count).sum();
        assert_eq!(bucket_total, config.runs);
    }
}
