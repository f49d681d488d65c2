//! AEP calculator entry point: CLI wiring and scenario-driven calculation.

use std::process;

use log::LevelFilter;

use aep_calc::cli::parse_args;
use aep_calc::config::ScenarioConfig;
use aep_calc::io::export::export_energy_csv;
use aep_calc::logging;
use aep_calc::runner::run_scenario;

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            aep_calc::cli::print_usage();
            process::exit(1);
        }
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = logging::init(level) {
        eprintln!("warning: logger not installed: {e}");
    }

    let scenario = match ScenarioConfig::from_toml_file(&cli.scenario) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match run.report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", run.report);
    }

    if let Some(ref path) = cli.energy_out {
        if let Err(e) = export_energy_csv(&run.calculator, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Energy table written to {}", path.display());
    }
}
