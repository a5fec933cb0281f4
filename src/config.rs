use clap::error::ErrorKind;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::SimConfig;
use crate::presets::Preset;

#[derive(Parser, Debug)]
#[command(name = "dispatch-sim", version, about = "Call-center queueing simulator")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a single seeded run.
    Run(RunArgs),
    /// Simulate several runs seeded base_seed + i.
    Batch(BatchArgs),
    /// Print the resolved configuration.
    ShowConfig(SourceArgs),
    /// List built-in presets.
    ListPresets,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// TOML or JSON configuration file.
    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
    /// Override the simulated horizon in minutes.
    #[arg(long)]
    pub horizon: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub runs: Option<usize>,
    #[arg(long)]
    pub base_seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    #[value(name = "dispatch-911")]
    Dispatch911,
    SingleShift,
    FixedRate,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Dispatch911 => Preset::Dispatch911,
            PresetArg::SingleShift => Preset::SingleShift,
            PresetArg::FixedRate => Preset::FixedRate,
        }
    }
}

pub fn parse_args() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => Err(Error::Cli(e.to_string())),
    }
}

/// Resolves a config file or preset, then applies the horizon override.
/// With neither given the dispatch day profile is used.
pub fn build_config(source: &SourceArgs) -> Result<SimConfig> {
    let mut config = match (&source.config, source.preset) {
        (Some(path), _) => load_config(path)?,
        (None, Some(preset)) => Preset::from(preset).config(),
        (None, None) => Preset::Dispatch911.config(),
    };
    if let Some(horizon) = source.horizon {
        config.horizon_minutes = horizon;
    }
    Ok(config)
}

pub fn build_run_config(args: &RunArgs) -> Result<(SimConfig, u64)> {
    let config = build_config(&args.source)?;
    let seed = args.seed.unwrap_or(config.seed);
    Ok((config, seed))
}

pub fn build_batch_config(args: &BatchArgs) -> Result<SimConfig> {
    let mut config = build_config(&args.source)?;
    if let Some(runs) = args.runs {
        config.batch.runs = runs;
    }
    if let Some(base_seed) = args.base_seed {
        config.batch.base_seed = base_seed;
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SourceArgs {
        SourceArgs {
            config: None,
            preset: None,
            horizon: None,
        }
    }

    #[test]
    fn defaults_to_dispatch_profile() {
        let config = build_config(&source()).unwrap();
        assert_eq!(config.horizon_minutes, 1440);
        assert_eq!(config.windows.len(), 3);
    }

    #[test]
    fn horizon_override_applies_to_presets() {
        let args = SourceArgs {
            preset: Some(PresetArg::FixedRate),
            horizon: Some(60),
            ..source()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.horizon_minutes, 60);
        assert_eq!(config.windows[0].label, "shift");
    }

    #[test]
    fn batch_overrides_replace_config_values() {
        let args = BatchArgs {
            source: source(),
            runs: Some(2),
            base_seed: Some(7),
            format: FormatArg::Summary,
        };
        let config = build_batch_config(&args).unwrap();
        assert_eq!(config.batch.runs, 2);
        assert_eq!(config.batch.base_seed, 7);
    }

    #[test]
    fn run_seed_falls_back_to_config_seed() {
        let args = RunArgs {
            source: source(),
            seed: None,
            format: FormatArg::Human,
        };
        let (_, seed) = build_run_config(&args).unwrap();
        assert_eq!(seed, 404);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_config(Path::new("src/lib.rs")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported config format 'rs'");
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_config(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigIo(_)));
    }
}
