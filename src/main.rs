//! Load scheduler entry point: CLI wiring and config-driven scheduling run.

use std::path::Path;
use std::process;

use tracing::{info, warn};

use load_scheduler::config::{Scenario, ScenarioConfig};
use load_scheduler::household::HouseholdGenerator;
use load_scheduler::io::export::export_csv;
use load_scheduler::io::import::read_appliances_file;
use load_scheduler::logging;
use load_scheduler::sched::plan;
use load_scheduler::tariff::Provider;

/// Preset used when no appliance source is given.
const DEFAULT_PRESET: &str = "evening_peak";

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    appliances_csv: Option<String>,
    household: Option<usize>,
    seed: u64,
    provider: Option<String>,
    max_power_kw: Option<f64>,
    csv_out: Option<String>,
    summary: bool,
    verbosity: u8,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("load-scheduler: tariff-aware household appliance scheduler");
    eprintln!();
    eprintln!("Usage: load-scheduler [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --appliances <path>      Read the appliance list from CSV");
    eprintln!("  --household <n>          Schedule n random catalog appliances");
    eprintln!("  --seed <u64>             Seed for --household (default: 42)");
    eprintln!(
        "  --provider <name>        Override tariff provider ({})",
        Provider::NAMES.join(", ")
    );
    eprintln!("  --max-power <kW>         Override the shared power ceiling");
    eprintln!("  --csv-out <path>         Export the hourly table to CSV");
    eprintln!("  --summary                Print per-appliance scheduled hours");
    eprintln!("  -v, --verbose            More log output (repeatable)");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after scheduling");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the interactive terminal view");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no scenario, preset, or appliance source is given, the {DEFAULT_PRESET} preset is used.");
}

/// Returns the value following flag `args[*i]`, or exits with a message.
fn take_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

/// Parses a flag value, or exits with a message.
fn parse_value<T: std::str::FromStr>(flag: &str, raw: &str, what: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{raw}\" is not a valid {what}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        appliances_csv: None,
        household: None,
        seed: 42,
        provider: None,
        max_power_kw: None,
        csv_out: None,
        summary: false,
        verbosity: 0,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(take_value(&args, &mut i, "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(take_value(&args, &mut i, "a name argument").to_string());
            }
            "--appliances" => {
                cli.appliances_csv = Some(take_value(&args, &mut i, "a path argument").to_string());
            }
            "--household" => {
                let raw = take_value(&args, &mut i, "a count argument");
                cli.household = Some(parse_value("--household", raw, "count"));
            }
            "--seed" => {
                let raw = take_value(&args, &mut i, "a u64 argument");
                cli.seed = parse_value("--seed", raw, "u64");
            }
            "--provider" => {
                cli.provider = Some(take_value(&args, &mut i, "a name argument").to_string());
            }
            "--max-power" => {
                let raw = take_value(&args, &mut i, "a kW argument");
                cli.max_power_kw = Some(parse_value("--max-power", raw, "number"));
            }
            "--csv-out" => {
                cli.csv_out = Some(take_value(&args, &mut i, "a path argument").to_string());
            }
            "--summary" => cli.summary = true,
            "-v" | "--verbose" => cli.verbosity = cli.verbosity.saturating_add(1),
            #[cfg(feature = "api")]
            "--serve" => cli.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                let raw = take_value(&args, &mut i, "a u16 argument");
                cli.port = parse_value("--port", raw, "u16");
            }
            #[cfg(feature = "tui")]
            "--tui" => cli.tui = true,
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let sources = [
        cli.scenario_path.is_some(),
        cli.preset.is_some(),
        cli.appliances_csv.is_some(),
        cli.household.is_some(),
    ];
    if sources.iter().filter(|&&s| s).count() > 1 {
        eprintln!(
            "error: --scenario, --preset, --appliances and --household are mutually exclusive"
        );
        process::exit(1);
    }

    cli
}

/// Resolves the base configuration and applies CLI overrides.
fn load_config(cli: &CliArgs) -> ScenarioConfig {
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else if cli.appliances_csv.is_some() || cli.household.is_some() {
        Ok(ScenarioConfig::default())
    } else {
        ScenarioConfig::from_preset(DEFAULT_PRESET)
    };

    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref provider) = cli.provider {
        cfg.tariff.provider = provider.clone();
        cfg.tariff.prices = None;
    }
    if let Some(max) = cli.max_power_kw {
        cfg.scheduler.max_power_kw = max;
    }
    cfg
}

/// Validates the configuration and swaps in an external appliance list.
fn build_scenario(cli: &CliArgs, cfg: &ScenarioConfig) -> Scenario {
    let mut scenario = cfg.build().unwrap_or_else(|errors| {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    });

    if let Some(ref path) = cli.appliances_csv {
        scenario.appliances = read_appliances_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
    } else if let Some(n) = cli.household {
        scenario.appliances = HouseholdGenerator::new(cli.seed).generate(n);
    }
    scenario
}

fn main() {
    let cli = parse_args();
    logging::init(cli.verbosity);

    let cfg = load_config(&cli);
    let scenario = build_scenario(&cli, &cfg);

    #[cfg(feature = "tui")]
    if cli.tui {
        load_scheduler::tui::run(scenario);
        return;
    }

    let report = plan(&scenario.appliances, &scenario.tariff, scenario.max_power_kw);
    info!(
        appliances = scenario.appliances.len(),
        tariff = %scenario.tariff_label,
        total_cost = report.total_cost,
        forced = report.forced.len(),
        "schedule computed"
    );
    if report.has_forced() {
        warn!(forced = %report.forced.join(", "), "power ceiling overridden");
    }

    println!("{report}");
    if cli.summary {
        println!("\n{}", report.summary_view());
    }

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&report, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, "schedule written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(load_scheduler::api::AppState {
            tariff: scenario.tariff,
            max_power_kw: scenario.max_power_kw,
            report,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(load_scheduler::api::serve(state, addr)) {
            eprintln!("error: API server failed on {addr}: {e}");
            process::exit(1);
        }
    }
}
