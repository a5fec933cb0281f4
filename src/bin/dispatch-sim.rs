use dispatch_sim::batch::run_batch;
use dispatch_sim::config::{self, Command, FormatArg};
use dispatch_sim::engine;
use dispatch_sim::error::Result;
use dispatch_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use dispatch_sim::presets::Preset;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => {
            let (config, seed) = config::build_run_config(&args)?;
            let outcome = match args.format {
                FormatArg::Summary => engine::run_simulation_summary(&config, seed)?,
                _ => engine::run_simulation(&config, seed)?,
            };
            print!("{}", formatter_for(&args.format).write_run(&outcome));
        }
        Command::Batch(args) => {
            let config = config::build_batch_config(&args)?;
            let report = run_batch(&config)?;
            print!("{}", formatter_for(&args.format).write_batch(&report));
        }
        Command::ShowConfig(source) => {
            let config = config::build_config(&source)?;
            engine::validate_config(&config)?;
            print!("{}", output::write_config(&config));
        }
        Command::ListPresets => {
            for preset in Preset::ALL {
                println!("{}", preset);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
