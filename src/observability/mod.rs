//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Transfer pipeline produces:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (outcome counter, stage latency histogram)
//! ```
//!
//! # Design Decisions
//! - Every transfer runs in a span carrying a `transfer_id`
//! - Private keys never appear in logs or metric labels

pub mod logging;
pub mod metrics;
