//! Metrics collection.
//!
//! # Metrics
//! - `ether_transfer_transfers_total` (counter): transfers by outcome
//!   (`submitted` or the failing stage)
//! - `ether_transfer_stage_duration_seconds` (histogram): time spent per stage
//!
//! No recorder is installed here; without one these calls are no-ops.

use std::time::Duration;

use crate::blockchain::types::Stage;

/// Record the final outcome of a transfer. `None` means submitted.
pub fn record_outcome(failed_stage: Option<Stage>) {
    let outcome = match failed_stage {
        None => "submitted",
        Some(stage) => stage.as_str(),
    };
    ::metrics::counter!("ether_transfer_transfers_total", "outcome" => outcome).increment(1);
}

/// Record how long one pipeline stage took.
pub fn record_stage_latency(stage: Stage, elapsed: Duration) {
    ::metrics::histogram!("ether_transfer_stage_duration_seconds", "stage" => stage.as_str())
        .record(elapsed.as_secs_f64());
}
