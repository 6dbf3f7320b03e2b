//! Tracing setup for the CLI.
//!
//! Stderr only: rules go to stdout (or a file), so logs must never mix
//! with the fixture itself. The `LOG` env var overrides the verbosity
//! flag with a full EnvFilter directive.

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbose).into())
        .with_env_var("LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Progress sink that reports through tracing: a progress line every
/// `interval` accepted rules, warnings for the advisory and abort events.
#[derive(Debug)]
pub struct TracingSink {
    interval: u64,
}

impl TracingSink {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        // The classic cadence of the generator this replaces.
        Self::new(100_000)
    }
}

impl redirgen_core::ProgressSink for TracingSink {
    fn accepted(&mut self, generated: u64, target: u64) {
        if generated % self.interval == 0 {
            tracing::info!(generated, requested = target, "progress");
        }
    }

    fn near_exhaustion(&mut self, target: u64, possible_paths: u128) {
        tracing::warn!(
            requested = target,
            possible_paths,
            "requested count is close to the number of distinct paths; \
             generation may be slow or stop early"
        );
    }

    fn aborted(&mut self, reason: &redirgen_core::AbortReason, generated: u64, target: u64) {
        tracing::warn!(?reason, generated, requested = target, "generation stopped early");
    }
}
