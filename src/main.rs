use merchant_model::cli::{self, CliArgs, Command};
use merchant_model::config::SimulationConfig;
use merchant_model::experiment::{BatchReport, ExperimentBatch};
use merchant_model::metrics::format_duration;
use merchant_model::simulation::{
    ReportDocument, SimulationReport, SingleRunOptions, run_simulation, run_single_simulation,
};
use merchant_model::ui;
use std::path::Path;

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!("Use --help to see available options.");
            std::process::exit(1);
        }
    };

    init_logging(&args);

    if let Err(message) = run_command(&args) {
        eprintln!("{}", message);
        eprintln!("Use --help to see available options.");
        std::process::exit(1);
    }
}

fn init_logging(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_command(args: &CliArgs) -> Result<(), String> {
    match &args.command {
        Command::Run => run_report(args),
        Command::Single => run_single(args),
        Command::Ui { file } => ui::run_ui(&file.to_string_lossy()).map_err(|e| e.to_string()),
        Command::Batch { config } => run_batch(args, config),
    }
}

/// Build the effective config, filling in an externally generated seed when
/// none was supplied so the printed report is always reproducible.
fn effective_config(args: &CliArgs) -> Result<SimulationConfig, String> {
    let mut config = cli::build_config(args)?;
    if config.seed.is_none() {
        config.seed = Some(u64::from(rand::random::<u32>()));
    }
    config.validate()?;
    Ok(config)
}

fn run_report(args: &CliArgs) -> Result<(), String> {
    let config = effective_config(args)?;
    let report = run_simulation(&config)?;

    print_report(&config, &report);

    if let Some(path) = &args.output_file {
        let document = ReportDocument::new(config, &report);
        document
            .save_to_file(&path.to_string_lossy())
            .map_err(|e| format!("Failed to write report: {e}"))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_report(config: &SimulationConfig, report: &SimulationReport) {
    println!("Using base seed: {}", report.seed);
    println!();

    for summary in &report.summaries {
        println!("Threshold {}:", summary.threshold);
        println!(
            "  Avg time: {} (σ {})",
            format_duration(summary.average_time),
            format_duration(summary.std_dev_time)
        );
        println!("  Fastest time: {}", format_duration(summary.fastest_time));
        println!(
            "  Avg restock cycles: {:.2}",
            summary.average_restock_cycles
        );
        println!(
            "  Avg trading cycles: {:.2} ({:.2} trips; {:.2} trips/cycle)",
            summary.average_cycles, summary.average_trips, summary.average_trips_per_cycle
        );
        println!(
            "  Time distribution ({} buckets):",
            format_duration(f64::from(config.time_bucket_seconds))
        );
        for bucket in &summary.bucket_counts {
            println!("    {}: {}", bucket.label, bucket.count);
        }
        println!();
    }
}

fn run_single(args: &CliArgs) -> Result<(), String> {
    let config = effective_config(args)?;
    let options = SingleRunOptions {
        threshold_index: args.threshold_index.unwrap_or(0),
        run_index: args.run_index.unwrap_or(0),
        capture_cycles: args.trace,
    };

    let report = run_single_simulation(&config, &options)?;

    println!(
        "Trial: threshold {}, run index {} (base seed {}, derived seed {})",
        report.threshold, report.run_index, report.base_seed, report.seed
    );
    println!("Total time: {}", format_duration(report.total_time));
    println!(
        "Negotiation: {} gold after {} offers, {} restock cycles, {}",
        report.negotiation.gold,
        report.negotiation.offers_made,
        report.negotiation.restock_cycles,
        format_duration(report.negotiation.time_seconds)
    );
    println!(
        "Trading: {} gold after {} cycles, {} trips, {}",
        report.trading.gold,
        report.trading.cycles,
        report.trading.purchase_trips,
        format_duration(report.trading.time_seconds)
    );

    if args.trace {
        for cycle in &report.cycle_logs {
            println!();
            println!(
                "Cycle {}: gold {} -> {}, pending {} -> {}, +{} items, {} trips, slept {}/{} nights, {}",
                cycle.cycle_index,
                cycle.start_gold,
                cycle.gold_after_purchases,
                cycle.pending_profits_at_start,
                cycle.pending_profits_after_sleep,
                cycle.items_added,
                cycle.trips,
                cycle.nights_slept,
                cycle.nights_scheduled,
                format_duration(cycle.time_spent)
            );
            for night in &cycle.night_summaries {
                println!(
                    "  Night {}: sold {} for {} gold, {} left in stock",
                    night.night, night.sold_count, night.profits_generated,
                    night.inventory_remaining
                );
            }
        }
    }

    if let Some(path) = &args.output_file {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize trial report: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write trial report: {e}"))?;
        println!();
        println!("Trial report written to {}", path.display());
    }

    Ok(())
}

fn run_batch(args: &CliArgs, batch_path: &Path) -> Result<(), String> {
    let base = effective_config(args)?;
    let batch = ExperimentBatch::load_from_file(batch_path)?;

    let results = batch.run(&base, args.quiet);

    println!();
    println!("Batch '{}': {} experiments", batch.name, results.len());
    for result in &results {
        if result.success {
            println!("  {} ({} ms)", result.name, result.duration_ms);
            if let Some(report) = &result.report {
                for summary in &report.summaries {
                    println!(
                        "    threshold {}: avg {} (σ {})",
                        summary.threshold,
                        format_duration(summary.average_time),
                        format_duration(summary.std_dev_time)
                    );
                }
            }
        } else {
            println!(
                "  {} FAILED: {}",
                result.name,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if let Some(path) = &args.output_file {
        let report = BatchReport::new(&batch, results);
        report
            .save_to_file(&path.to_string_lossy())
            .map_err(|e| format!("Failed to write batch report: {e}"))?;
        println!();
        println!("Batch report written to {}", path.display());
    }

    Ok(())
}
