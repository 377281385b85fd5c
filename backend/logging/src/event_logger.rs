//! Analysis Event Logger
//!
//! Structured lifecycle events for image analyses, emitted on the
//! `analysis_events` target so they can be filtered or shipped separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Requested {
        image_path: String,
        model: String,
        targets: usize,
    },
    Completed {
        found: usize,
        maybe_found: usize,
        not_found: usize,
    },
    Failed {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log an analysis lifecycle event as a single JSON field.
    pub fn log_event(request_id: &str, event: AnalysisEvent) {
        let failed = matches!(event, AnalysisEvent::Failed { .. });
        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();

        if failed {
            warn!(target: "analysis_events", event = %json, "Analysis event");
        } else {
            info!(target: "analysis_events", event = %json, "Analysis event");
        }
    }
}
