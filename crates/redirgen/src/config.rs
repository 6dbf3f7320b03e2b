//! TOML configuration (`redirgen.toml`).
//!
//! Precedence, lowest to highest: built-in defaults, config file, env
//! overrides, CLI flags. The file is optional at the default location and
//! required when passed explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use redirgen_core::{InvalidParams, Vocabulary};

pub const DEFAULT_CONFIG_FILE: &str = "redirgen.toml";

pub const DEFAULT_COUNT: u64 = 1000;
pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_PREFIX_PROBABILITY: f64 = 0.7;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid env override {var}=`{value}`: {reason}")]
    EnvOverride {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Vocabulary(#[from] InvalidParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: DefaultsConfig,
    pub vocabulary: VocabularyConfig,
}

/// Generation parameters used when the CLI flag is absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub count: Option<u64>,
    pub max_depth: Option<usize>,
    pub prefix_probability: Option<f64>,
    pub seed: Option<u64>,
}

/// Custom vocabulary: inline words, or a word file (one segment per line,
/// `#` comments and blank lines skipped). A file wins over inline words.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub words: Vec<String>,
    pub file: Option<PathBuf>,
}

/// Load config. An explicit path must exist; the default location may be
/// absent, in which case built-in defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut config = if path.exists() || required {
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// `REDIRGEN_SEED` pins the seed, `REDIRGEN_WORDS` points at a word file.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    if let Ok(raw) = std::env::var("REDIRGEN_SEED") {
        let seed = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::EnvOverride {
                var: "REDIRGEN_SEED",
                value: raw,
                reason: e.to_string(),
            })?;
        config.defaults.seed = Some(seed);
    }
    if let Ok(raw) = std::env::var("REDIRGEN_WORDS") {
        config.vocabulary.file = Some(PathBuf::from(raw));
    }
    Ok(())
}

impl Config {
    /// Resolve the vocabulary: CLI word file > config word file > inline
    /// config words > bundled defaults.
    pub fn vocabulary(&self, cli_words: Option<&Path>) -> Result<Vocabulary, ConfigError> {
        if let Some(path) = cli_words.or(self.vocabulary.file.as_deref()) {
            return load_word_file(path);
        }
        if !self.vocabulary.words.is_empty() {
            return Ok(Vocabulary::new(self.vocabulary.words.iter().cloned())?);
        }
        Ok(Vocabulary::default_words())
    }
}

fn load_word_file(path: &Path) -> Result<Vocabulary, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let words = contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty());
    Ok(Vocabulary::new(words)?)
}
