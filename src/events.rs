//! Build log for sspc.
//!
//! When a build log is configured, every translation appends one event in
//! NDJSON format (one JSON object per line). Each event carries:
//! - `ts`: RFC3339 timestamp
//! - `action`: `compile` or `compile_failed`
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `product`: the product that was translated
//! - `details`: freeform object (paths, segment counts, error message)

use crate::error::{Result, SspError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A module was generated and written.
    Compile,
    /// A translation was aborted.
    CompileFailed,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Compile => write!(f, "compile"),
            EventAction::CompileFailed => write!(f, "compile_failed"),
        }
    }
}

/// An event record for the build log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Product name of the translated template.
    pub product: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event for `product`.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction, product: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            product: product.into(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SspError::IoError(format!("failed to serialize event to JSON: {}", e)))
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the build log at `path`.
///
/// The file and its parent directory are created if missing. Each append
/// results in one line with a trailing newline.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SspError::IoError(format!(
                "failed to create build log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            SspError::IoError(format!(
                "failed to open build log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SspError::IoError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Compile, "Home");

        assert_eq!(event.action, EventAction::Compile);
        assert_eq!(event.product, "Home");
        assert!(!event.actor.is_empty());
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_event_with_details() {
        let event = Event::new(EventAction::Compile, "Home")
            .with_details(json!({"segments": 5, "imports": 2}));

        assert_eq!(event.details["segments"], 5);
        assert_eq!(event.details["imports"], 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::new(EventAction::CompileFailed, "Home")
            .with_details(json!({"error": "malformed template"}));

        let json_line = event.to_ndjson_line().unwrap();
        assert!(!json_line.contains('\n'));
        assert!(json_line.contains("\"compile_failed\""));

        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::CompileFailed);
        assert_eq!(parsed.product, "Home");
    }

    #[test]
    fn test_action_display_matches_serialization() {
        assert_eq!(EventAction::Compile.to_string(), "compile");
        assert_eq!(EventAction::CompileFailed.to_string(), "compile_failed");
    }

    #[test]
    fn test_append_event_creates_file_and_dirs() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("logs").join("sspc.ndjson");

        append_event(&log, &Event::new(EventAction::Compile, "A")).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_append_event_multiple_lines() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("sspc.ndjson");

        append_event(&log, &Event::new(EventAction::Compile, "A")).unwrap();
        append_event(&log, &Event::new(EventAction::CompileFailed, "B")).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        let events: Vec<Event> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].product, "A");
        assert_eq!(events[1].action, EventAction::CompileFailed);
    }
}
