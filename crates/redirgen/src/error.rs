//! Crate-level convenience error.
//!
//! Not a "god error": a thin wrapper over the canonical capability errors
//! from the core crate plus host concerns (config, file I/O, check runs).

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Params(#[from] redirgen_core::InvalidParams),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    WriteOutput(#[from] std::io::Error),

    #[error("{problems} problem(s) found in {path}")]
    CheckFailed { path: PathBuf, problems: usize },
}
