use crate::checker::tokenizer::Tokenization;
use crate::model::TrainOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".typocheck.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the JSON report is written.
    pub target: PathBuf,

    /// Typos seen fewer times than this are left out of the report.
    pub threshold: usize,

    pub tokenization: Tokenization,

    /// Drop the last character of long suggestions (for models that leave a
    /// trailing artifact byte on their candidates).
    pub strip_trailing_byte: bool,

    /// Tokens matching any of these regexes are never checked.
    pub ignore_patterns: Vec<String>,

    /// Pretty-print the JSON report.
    pub pretty: bool,

    pub train: TrainOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: PathBuf::from("results.json"),
            threshold: 1,
            tokenization: Tokenization::Whitespace,
            strip_trailing_byte: false,
            ignore_patterns: Vec::new(),
            pretty: false,
            train: TrainOptions::default(),
        }
    }
}

/// One config file as written: only the keys it mentions are `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub target: Option<PathBuf>,
    pub threshold: Option<usize>,
    pub tokenization: Option<Tokenization>,
    pub strip_trailing_byte: Option<bool>,
    pub ignore_patterns: Option<Vec<String>>,
    pub pretty: Option<bool>,
    pub train: Option<PartialTrain>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialTrain {
    pub depth: Option<usize>,
    pub threshold: Option<usize>,
    pub skip_apostrophes: Option<bool>,
    pub prefix_length: Option<usize>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line. `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub threshold: Option<usize>,
}

impl Config {
    /// Load configuration with priority: CLI args > explicit or local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                layers.push(global_path);
            }
        }

        // An explicit --config replaces the local file lookup
        match &overrides.config_file {
            Some(path) => layers.push(path.clone()),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    layers.push(local_path);
                }
            }
        }

        let mut config = Self::from_layers(&layers)?;

        // Apply CLI overrides
        if let Some(target) = overrides.target {
            config.target = target;
        }
        if let Some(threshold) = overrides.threshold {
            config.threshold = threshold;
        }

        Ok(config)
    }

    /// Defaults, then each file in order; later files win key by key.
    pub fn from_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();
        for path in paths {
            config.apply(PartialConfig::from_file(path)?);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.apply(PartialConfig::from_file(path)?);
        Ok(config)
    }

    /// Overwrite exactly the keys `layer` sets.
    pub fn apply(&mut self, layer: PartialConfig) {
        if let Some(target) = layer.target {
            self.target = target;
        }
        if let Some(threshold) = layer.threshold {
            self.threshold = threshold;
        }
        if let Some(tokenization) = layer.tokenization {
            self.tokenization = tokenization;
        }
        if let Some(strip) = layer.strip_trailing_byte {
            self.strip_trailing_byte = strip;
        }
        if let Some(patterns) = layer.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(pretty) = layer.pretty {
            self.pretty = pretty;
        }
        if let Some(train) = layer.train {
            if let Some(depth) = train.depth {
                self.train.depth = depth;
            }
            if let Some(threshold) = train.threshold {
                self.train.threshold = threshold;
            }
            if let Some(skip) = train.skip_apostrophes {
                self.train.skip_apostrophes = skip;
            }
            if let Some(prefix_length) = train.prefix_length {
                self.train.prefix_length = prefix_length;
            }
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typo-check").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
