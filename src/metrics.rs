use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-trial measurements fed into threshold aggregation, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub total_time: f64,
    pub restock_cycles: u32,
    pub cycles: u32,
    pub purchase_trips: u32,
}

/// One histogram bucket: a human-readable `minutes:seconds` range label and
/// the number of trials that finished inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCount {
    pub label: String,
    pub count: u32,
}

/// Aggregated statistics for all trials at one acceptance threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSummary {
    pub threshold: i64,
    pub average_time: f64,
    pub std_dev_time: f64,
    pub average_restock_cycles: f64,
    pub average_cycles: f64,
    pub average_trips: f64,
    pub average_trips_per_cycle: f64,
    pub bucket_counts: Vec<BucketCount>,
    pub fastest_time: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n, not n-1). Trials per threshold
/// are the entire population of interest, not a sample from a larger one.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|value| (value - avg).powi(2)).sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Format seconds as `m:ss`, rounding to whole seconds and clamping negatives
/// and non-finite input to zero.
pub fn format_duration(total_seconds: f64) -> String {
    let safe_seconds = if total_seconds.is_finite() {
        total_seconds.max(0.0)
    } else {
        0.0
    };
    let whole_seconds = safe_seconds.round() as u64;
    format!("{}:{:02}", whole_seconds / 60, whole_seconds % 60)
}

/// Start of the bucket containing `total_time`.
pub fn bucket_start(total_time: f64, bucket_size: f64) -> f64 {
    (total_time / bucket_size).floor() * bucket_size
}

/// Bucket completion times into fixed-width intervals, sorted ascending by
/// bucket start. Bucket sizes are whole seconds, so starts are exact
/// integers and safe as map keys.
pub fn build_histogram(times: &[f64], bucket_size: f64) -> Vec<BucketCount> {
    let mut buckets: BTreeMap<i64, u32> = BTreeMap::new();
    for &time in times {
        let start = bucket_start(time, bucket_size) as i64;
        *buckets.entry(start).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(start, count)| BucketCount {
            label: format!(
                "{}-{}",
                format_duration(start as f64),
                format_duration(start as f64 + bucket_size)
            ),
            count,
        })
        .collect()
}

/// Aggregate all trials of one threshold into its summary.
pub fn summarize_threshold(
    threshold: i64,
    results: &[RunResult],
    bucket_size: f64,
) -> ThresholdSummary {
    let times: Vec<f64> = results.iter().map(|result| result.total_time).collect();
    let restock_cycles: Vec<f64> = results
        .iter()
        .map(|result| f64::from(result.restock_cycles))
        .collect();
    let cycles: Vec<f64> = results.iter().map(|result| f64::from(result.cycles)).collect();
    let trips: Vec<f64> = results
        .iter()
        .map(|result| f64::from(result.purchase_trips))
        .collect();

    let average_cycles = mean(&cycles);
    let average_trips = mean(&trips);
    let average_trips_per_cycle = if average_cycles == 0.0 {
        0.0
    } else {
        average_trips / average_cycles
    };

    let fastest_time = times.iter().copied().fold(f64::INFINITY, f64::min);

    ThresholdSummary {
        threshold,
        average_time: mean(&times),
        std_dev_time: population_std_dev(&times),
        average_restock_cycles: mean(&restock_cycles),
        average_cycles,
        average_trips,
        average_trips_per_cycle,
        bucket_counts: build_histogram(&times, bucket_size),
        fastest_time,
    }
}
