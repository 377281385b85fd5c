//! Structured logging for Lookout.
//!
//! Console and rolling JSON file output, plus analysis lifecycle events.

pub mod event_logger;
pub mod logger;

pub use event_logger::{AnalysisEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LoggerGuard};
