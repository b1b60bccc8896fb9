//! Command-line interface for the merchant trading simulation.

use lexopt::prelude::*;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::constants::{DEFAULT_TIME_BUCKET_SECONDS, armor_price_bounds};
use crate::strategies::PurchaseStrategy;

/// Command-line arguments for the simulation.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub config_file: Option<PathBuf>,
    pub start_gold: Option<i64>,
    pub min_shop_gold: Option<i64>,
    pub final_target: Option<i64>,
    pub thresholds: Option<Vec<i64>>,
    pub runs: Option<u32>,
    pub nights: Option<u32>,
    pub one_sleep_threshold: Option<u32>,
    pub two_sleep_threshold: Option<u32>,
    pub additional_trip_cutoff: Option<i64>,
    pub seed: Option<u64>,
    pub use_far_shop: bool,
    pub purchase_strategy: Option<PurchaseStrategy>,
    pub abacus_count_threshold: Option<u32>,
    pub abacus_price_cutoff: Option<i64>,
    pub time_bucket_seconds: Option<u32>,
    pub threshold_index: Option<usize>,
    pub run_index: Option<u32>,
    pub trace: bool,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub enum Command {
    Run,
    Single,
    Ui { file: PathBuf },
    Batch { config: PathBuf },
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Run,
            config_file: None,
            start_gold: None,
            min_shop_gold: None,
            final_target: None,
            thresholds: None,
            runs: None,
            nights: None,
            one_sleep_threshold: None,
            two_sleep_threshold: None,
            additional_trip_cutoff: None,
            seed: None,
            use_far_shop: false,
            purchase_strategy: None,
            abacus_count_threshold: None,
            abacus_price_cutoff: None,
            time_bucket_seconds: None,
            threshold_index: None,
            run_index: None,
            trace: false,
            output_file: None,
            verbose: false,
            quiet: false,
        }
    }
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    let mut args = lexopt::Parser::from_env();
    let mut cli_args = CliArgs::default();
    let mut subcommand = None;
    let mut ui_file = None;
    let mut batch_config = None;

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else {
                    match subcommand.as_deref() {
                        Some("ui") => ui_file = Some(PathBuf::from(val_str)),
                        Some("batch") => batch_config = Some(PathBuf::from(val_str)),
                        _ => {}
                    }
                }
            }
            Long("config-file") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.config_file = Some(PathBuf::from(val.string()?));
                }
            }
            Long("start-gold") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.start_gold = Some(val.parse()?);
                }
            }
            Long("min-shop-gold") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.min_shop_gold = Some(val.parse()?);
                }
            }
            Long("final-target") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.final_target = Some(val.parse()?);
                }
            }
            Long("thresholds") | Short('t') => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.thresholds = Some(parse_thresholds(&val.string()?)?);
                }
            }
            Long("runs") | Short('r') => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.runs = Some(val.parse()?);
                }
            }
            Long("nights") | Short('n') => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.nights = Some(val.parse()?);
                }
            }
            Long("one-sleep-threshold") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.one_sleep_threshold = Some(val.parse()?);
                }
            }
            Long("two-sleep-threshold") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.two_sleep_threshold = Some(val.parse()?);
                }
            }
            Long("additional-trip-cutoff") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.additional_trip_cutoff = Some(val.parse()?);
                }
            }
            Long("seed") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.seed = Some(val.parse()?);
                }
            }
            Long("use-far-shop") => cli_args.use_far_shop = true,
            Long("purchase-strategy") => {
                if let Some(Value(val)) = args.next()? {
                    let name = val.string()?;
                    match PurchaseStrategy::from_str(&name) {
                        Some(strategy) => cli_args.purchase_strategy = Some(strategy),
                        None => {
                            return Err(lexopt::Error::from(format!(
                                "Purchase strategy must be one of: {}.",
                                PurchaseStrategy::all_names().join(", ")
                            )));
                        }
                    }
                }
            }
            Long("abacus-count-threshold") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.abacus_count_threshold = Some(val.parse()?);
                }
            }
            Long("abacus-price-cutoff") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.abacus_price_cutoff = Some(val.parse()?);
                }
            }
            Long("time-bucket-seconds") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.time_bucket_seconds = Some(val.parse()?);
                }
            }
            Long("threshold-index") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.threshold_index = Some(val.parse()?);
                }
            }
            Long("run-index") => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.run_index = Some(val.parse()?);
                }
            }
            Long("trace") => cli_args.trace = true,
            Long("output") | Short('o') => {
                if let Some(Value(val)) = args.next()? {
                    cli_args.output_file = Some(PathBuf::from(val.string()?));
                }
            }
            Long("verbose") | Short('v') => cli_args.verbose = true,
            Long("quiet") | Short('q') => cli_args.quiet = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    cli_args.command = match subcommand.as_deref() {
        Some("ui") => {
            if let Some(file) = ui_file {
                Command::Ui { file }
            } else {
                eprintln!("Error: ui command requires a report file");
                std::process::exit(1);
            }
        }
        Some("batch") => {
            if let Some(config) = batch_config {
                Command::Batch { config }
            } else {
                eprintln!("Error: batch command requires a configuration file");
                std::process::exit(1);
            }
        }
        Some("single") => Command::Single,
        Some("run") | None => Command::Run,
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            std::process::exit(1);
        }
    };

    Ok(cli_args)
}

fn parse_thresholds(raw: &str) -> Result<Vec<i64>, lexopt::Error> {
    let mut thresholds = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: i64 = part
            .parse()
            .map_err(|_| lexopt::Error::from(format!("Threshold '{part}' must be an integer.")))?;
        thresholds.push(value);
    }
    if thresholds.is_empty() {
        return Err(lexopt::Error::from(
            "At least one armor threshold must be provided.",
        ));
    }
    Ok(thresholds)
}

/// Build the effective configuration: defaults, then the optional config
/// file, then CLI overrides on top.
pub fn build_config(args: &CliArgs) -> Result<SimulationConfig, String> {
    let mut config = match &args.config_file {
        Some(path) => SimulationConfig::load_from_file(&path.to_string_lossy())
            .map_err(|e| format!("Failed to load config file: {e}"))?,
        None => SimulationConfig::default(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

/// Apply CLI overrides to a configuration.
pub fn apply_overrides(config: &mut SimulationConfig, args: &CliArgs) {
    if let Some(start_gold) = args.start_gold {
        config.start_gold = start_gold;
    }
    if let Some(min_shop_gold) = args.min_shop_gold {
        config.min_shop_gold = min_shop_gold;
    }
    if let Some(final_target) = args.final_target {
        config.final_target = final_target;
    }
    if let Some(ref thresholds) = args.thresholds {
        config.armor_thresholds = thresholds.clone();
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if let Some(nights) = args.nights {
        config.nights_to_sleep = nights;
    }
    if let Some(threshold) = args.one_sleep_threshold {
        config.one_sleep_item_threshold = Some(threshold);
    }
    if let Some(threshold) = args.two_sleep_threshold {
        config.two_sleep_item_threshold = Some(threshold);
    }
    if let Some(cutoff) = args.additional_trip_cutoff {
        config.additional_trip_cutoff = Some(cutoff);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.use_far_shop {
        config.use_far_shop = true;
    }
    if let Some(strategy) = args.purchase_strategy {
        config.purchase_strategy = strategy;
    }
    if let Some(count) = args.abacus_count_threshold {
        config.abacus_count_threshold = Some(count);
    }
    if let Some(cutoff) = args.abacus_price_cutoff {
        config.abacus_price_cutoff = Some(cutoff);
    }
    if let Some(bucket) = args.time_bucket_seconds {
        config.time_bucket_seconds = bucket;
    }
}

fn print_help() {
    let (min_threshold, max_threshold) = armor_price_bounds();
    let defaults = SimulationConfig::default();

    println!("\nMerchant Trading Simulation\n");
    println!("USAGE:");
    println!("    merchant-model-sim [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    run              Run the full simulation (default)");
    println!("    single           Run one trial and print its trace");
    println!("    ui FILE          View a saved report's histograms in a TUI");
    println!("    batch CONFIG     Run batch experiments from a YAML config\n");

    println!("SIMULATION OPTIONS:");
    println!(
        "    --start-gold <N>             Gold on hand when the simulation begins (default {})",
        defaults.start_gold
    );
    println!(
        "    --min-shop-gold <N>          Gold required before purchasing the shop (default {})",
        defaults.min_shop_gold
    );
    println!(
        "    --final-target <N>           Gold required after collecting profits (default {})",
        defaults.final_target
    );
    println!(
        "    -t, --thresholds <a,b,c>     Comma-separated armor thresholds between {} and {}",
        min_threshold, max_threshold
    );
    println!(
        "    -r, --runs <N>               Monte Carlo trials per threshold (default {})",
        defaults.runs
    );
    println!(
        "    -n, --nights <N>             Nights slept per trading cycle (default {})",
        defaults.nights_to_sleep
    );
    println!("    --one-sleep-threshold <N>    Sleep once when stocking this many items or fewer");
    println!("    --two-sleep-threshold <N>    Sleep twice when stocking this many items or fewer");
    println!("    --additional-trip-cutoff <N> Minimum gold left to take a second purchase trip");
    println!("    --seed <N>                   Base seed for reproducible runs");
    println!("    --use-far-shop               Allow shopping at the far shop");
    println!(
        "    --purchase-strategy <NAME>   Purchase planning algorithm ({})",
        PurchaseStrategy::all_names().join(", ")
    );
    println!("    --abacus-count-threshold <N> Abaci required before skipping cheaper items");
    println!("    --abacus-price-cutoff <N>    Price at or below which items are then skipped");
    println!(
        "    --time-bucket-seconds <N>    Histogram bucket size in seconds (default {})",
        DEFAULT_TIME_BUCKET_SECONDS
    );
    println!("    --config-file <FILE>         Load configuration from a JSON file\n");

    println!("SINGLE-TRIAL OPTIONS:");
    println!("    --threshold-index <N>        Which configured threshold to run (default 0)");
    println!("    --run-index <N>              Which run index to reproduce (default 0)");
    println!("    --trace                      Capture and print per-cycle logs\n");

    println!("OUTPUT OPTIONS:");
    println!("    -o, --output <FILE>          Write the report as JSON to FILE");
    println!("    -v, --verbose                Enable debug output");
    println!("    -q, --quiet                  Suppress non-essential output");
    println!("    -h, --help                   Print help information\n");

    println!("EXAMPLES:");
    println!("    # Compare three thresholds over 2000 runs each");
    println!("    merchant-model-sim run -t 1640,1687,1734 -r 2000\n");

    println!("    # Reproduce a run and inspect one trial's cycles");
    println!("    merchant-model-sim single --seed 42 --trace\n");

    println!("    # Sweep sleep policies defined in a YAML batch");
    println!("    merchant-model-sim batch sweeps.yaml -o sweep_reports.json");
}
