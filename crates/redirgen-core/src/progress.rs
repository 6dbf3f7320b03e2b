//! Reporting boundary for generation runs.
//!
//! The builder reports through this trait instead of logging directly, so
//! hosts choose the cadence and the medium (tracing, stderr, test capture).

use crate::builder::AbortReason;

/// Sink for generation-progress events.
///
/// `accepted` fires after every accepted rule; implementations that want
/// the classic every-N cadence filter on `generated`.
pub trait ProgressSink {
    /// A rule was accepted; `generated` rules exist so far.
    fn accepted(&mut self, generated: u64, target: u64);

    /// Advisory, emitted once before generation when the requested count
    /// approaches the namespace size. Does not block generation.
    fn near_exhaustion(&mut self, target: u64, possible_paths: u128);

    /// Generation stopped early; the partial rule set is still returned.
    fn aborted(&mut self, reason: &AbortReason, generated: u64, target: u64);
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn accepted(&mut self, _generated: u64, _target: u64) {}
    fn near_exhaustion(&mut self, _target: u64, _possible_paths: u128) {}
    fn aborted(&mut self, _reason: &AbortReason, _generated: u64, _target: u64) {}
}
