use clap::Parser;
use config::{
    Config as ConfigCrate,
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::fitter::{check_line_width, Chunking, FitError, FitRequest, QuoteStyle};

const DEFAULT_MAX_CHARS: usize = 72;
const DEFAULT_PRINT: bool = true;
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "TEXT_FITTER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    Validation(#[from] FitError),
}

// Values a config file or the environment may set. Anything missing falls
// through to the command line or the defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    max_chars: Option<usize>,
    wrapper: Option<QuoteStyle>,
    chunking: Option<Chunking>,
    print: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file_path: PathBuf,
    pub output: Option<PathBuf>,
    pub clip: bool,
    pub max_chars: usize,
    pub wrapper: QuoteStyle,
    pub chunking: Chunking,
    /// Show the fitted text on the console.
    pub print: bool,
}

impl Config {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Config {
            file_path: file_path.into(),
            output: None,
            clip: false,
            max_chars: DEFAULT_MAX_CHARS,
            wrapper: QuoteStyle::default(),
            chunking: Chunking::default(),
            print: DEFAULT_PRINT,
        }
    }

    pub fn fit_request(&self, text: String) -> FitRequest {
        FitRequest::new(text, self.wrapper, self.max_chars).with_chunking(self.chunking)
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fit text to a fixed-sized column of quoted lines.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the file containing a text to fit
    pub file_path: PathBuf,

    /// Copy the fitted text to the clipboard
    #[cfg(feature = "clipboard")]
    #[arg(short, long)]
    pub clip: bool,

    /// A file to save the fitted text to
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum number of characters per line, quotes included [default: 72]
    #[arg(short = 'm', long = "max_chars", value_name = "N")]
    pub max_chars: Option<usize>,

    /// Quotation mark wrapping every line [default: single]
    #[arg(short, long, value_enum)]
    pub wrapper: Option<QuoteStyle>,

    /// How lines are cut [default: exact]
    #[arg(long, value_enum)]
    pub chunking: Option<Chunking>,

    /// Do not print the fitted text
    #[arg(short, long)]
    pub quiet: bool,

    /// Log what is being done to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a custom configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub debug_config: bool,
}

impl CliArgs {
    #[cfg(feature = "clipboard")]
    fn clip_requested(&self) -> bool {
        self.clip
    }

    #[cfg(not(feature = "clipboard"))]
    fn clip_requested(&self) -> bool {
        false
    }
}

/// Resolves the configuration: defaults, config file, environment, then arguments.
pub fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    // TEXT_FITTER_MAX_CHARS; `__` only separates nested keys
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|err| {
        warn!(%err, "ignoring environment settings");
        Map::new()
    });

    build_config_from_args(args, default_config_path(), Some(env_map))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "text-fitter").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// Separate from `load_config` so tests control the file and override sources
fn build_config_from_args(
    args: &CliArgs,
    fallback_file: Option<PathBuf>,
    override_source: Option<Map<String, Value>>,
) -> Result<Config, ConfigError> {
    let mut config_builder = ConfigCrate::builder();

    // An explicit --config has to exist, the per-user file does not
    if let Some(ref path) = args.config {
        config_builder = config_builder.add_source(File::from(path.clone()).required(true));
    } else if let Some(path) = fallback_file {
        config_builder = config_builder.add_source(File::from(path).required(false));
    }

    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    let config = Config {
        file_path: args.file_path.clone(),
        output: args.output.clone(),
        clip: args.clip_requested(),
        max_chars: args
            .max_chars
            .or(loaded_sources.max_chars)
            .unwrap_or(DEFAULT_MAX_CHARS),
        wrapper: args.wrapper.or(loaded_sources.wrapper).unwrap_or_default(),
        chunking: args
            .chunking
            .or(loaded_sources.chunking)
            .unwrap_or_default(),
        print: !args.quiet && loaded_sources.print.unwrap_or(DEFAULT_PRINT),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Rejects line widths the fitter could never work with, before any file is read.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    check_line_width(config.max_chars, config.chunking)?;
    Ok(())
}
