use std::env;
use std::path::PathBuf;

pub struct CliOptions {
    pub scenario: PathBuf,
    pub energy_out: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut energy_out = None;
    let mut json = false;
    let mut verbose = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--energy-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --energy-out (expected a file path)")?;
                if energy_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--energy-out provided more than once".to_string());
                }
            }
            "--json" => {
                json = true;
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    let scenario = scenario.ok_or_else(|| "missing required argument --scenario".to_string())?;

    Ok(CliOptions {
        scenario,
        energy_out,
        json,
        verbose,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("aep-calc: AEP ratio of a measured vs. reference power curve");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  aep-calc --scenario <path> [--energy-out <path>] [--json] [--verbose]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>     Load scenario from TOML config file");
    eprintln!("  --energy-out <path>   Export per-bin energy tables to CSV");
    eprintln!("  --json                Print the report as JSON");
    eprintln!("  -v, --verbose         Log regrid and integration details to stderr");
    eprintln!("  --help                Show this help message");
}
