#[cfg(test)]
mod tests {
    use super::super::metrics::*;

    fn run(total_time: f64, restock_cycles: u32, cycles: u32, purchase_trips: u32) -> RunResult {
        RunResult {
            total_time,
            restock_cycles,
            cycles,
            purchase_trips,
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[4.0]), 4.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_population_std_dev() {
        // Classic fixture: mean 5, population variance 4.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_std_dev(&values), 2.0);

        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(59.6), "1:00");
        assert_eq!(format_duration(600.0), "10:00");
        assert_eq!(format_duration(-3.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_duration(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_bucket_start() {
        assert_eq!(bucket_start(0.0, 30.0), 0.0);
        assert_eq!(bucket_start(29.9, 30.0), 0.0);
        assert_eq!(bucket_start(30.0, 30.0), 30.0);
        assert_eq!(bucket_start(95.0, 30.0), 90.0);
    }

    #[test]
    fn test_build_histogram_buckets_and_labels() {
        let times = [10.0, 20.0, 40.0, 95.0];
        let histogram = build_histogram(&times, 30.0);

        assert_eq!(histogram.len(), 3);
        assert_eq!(histogram[0].label, "0:00-0:30");
        assert_eq!(histogram[0].count, 2);
        assert_eq!(histogram[1].label, "0:30-1:00");
        assert_eq!(histogram[1].count, 1);
        assert_eq!(histogram[2].label, "1:30-2:00");
        assert_eq!(histogram[2].count, 1);

        let total: u32 = histogram.iter().map(|bucket| bucket.count).sum();
        assert_eq!(total as usize, times.len());
    }

    #[test]
    fn test_summarize_threshold() {
        let results = [
            run(100.0, 2, 4, 4),
            run(200.0, 3, 6, 8),
        ];

        let summary = summarize_threshold(1640, &results, 30.0);

        assert_eq!(summary.threshold, 1640);
        assert_eq!(summary.average_time, 150.0);
        assert_eq!(summary.std_dev_time, 50.0);
        assert_eq!(summary.average_restock_cycles, 2.5);
        assert_eq!(summary.average_cycles, 5.0);
        assert_eq!(summary.average_trips, 6.0);
        assert_eq!(summary.average_trips_per_cycle, 1.2);
        assert_eq!(summary.fastest_time, 100.0);

        let total: u32 = summary.bucket_counts.iter().map(|bucket| bucket.count).sum();
        assert_eq!(total as usize, results.len());
    }

    #[test]
    fn test_summarize_threshold_zero_cycles() {
        let results = [run(10.0, 1, 0, 0)];
        let summary = summarize_threshold(1640, &results, 30.0);

        assert_eq!(summary.average_cycles, 0.0);
        assert_eq!(summary.average_trips_per_cycle, 0.0);
    }
}
