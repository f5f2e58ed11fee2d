use crate::board::EditOutcome;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// User actions on the board or its presentation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Toggle a wall at (x, y)
    ToggleWall { x: i32, y: i32 },
    /// Toggle a destination at (x, y)
    ToggleDestination { x: i32, y: i32 },
    /// Path arrows switched on or off
    ShowPaths(bool),
    /// Grid overlay switched on or off
    ShowGrid(bool),
    /// Layout copied to the clipboard
    CopyLayout,
    /// Layout pasted from the clipboard, with the number of rejected edits
    PasteLayout { rejected: usize },
}

/// Logged action with timestamp and, for board edits, what the board did
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub outcome: Option<EditOutcome>,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    pub fn log(&mut self, action: Action, outcome: Option<EditOutcome>) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            outcome,
        });
    }

    /// Log a board edit and its outcome
    pub fn log_edit(&mut self, action: Action, outcome: EditOutcome) {
        self.log(action, Some(outcome));
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        info!(path, events = self.actions.len(), "action log saved");
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut accepted = 0;
        let mut rejected = 0;
        let mut ignored = 0;
        let mut walls = 0;
        let mut destinations = 0;

        for logged in &self.actions {
            match logged.action {
                Action::ToggleWall { .. } => walls += 1,
                Action::ToggleDestination { .. } => destinations += 1,
                _ => {}
            }
            match logged.outcome {
                Some(EditOutcome::Accepted) => accepted += 1,
                Some(EditOutcome::Rejected) => rejected += 1,
                Some(EditOutcome::Ignored) => ignored += 1,
                None => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Edits: {} wall toggles, {} destination toggles\n\
             Outcomes: {} accepted, {} rejected, {} ignored",
            duration,
            self.actions.len(),
            walls,
            destinations,
            accepted,
            rejected,
            ignored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_edits_and_outcomes() {
        let mut log = ActionLog::new();
        log.log_edit(Action::ToggleWall { x: 1, y: 0 }, EditOutcome::Accepted);
        log.log_edit(Action::ToggleWall { x: 0, y: 1 }, EditOutcome::Rejected);
        log.log_edit(Action::ToggleDestination { x: 1, y: 1 }, EditOutcome::Rejected);
        log.log(Action::ShowPaths(true), None);

        assert_eq!(log.get_actions().len(), 4);
        let summary = log.summary();
        assert!(summary.contains("Total Events: 4"));
        assert!(summary.contains("2 wall toggles, 1 destination toggles"));
        assert!(summary.contains("1 accepted, 2 rejected, 0 ignored"));
    }

    #[test]
    fn actions_serialize_to_json() {
        let mut log = ActionLog::new();
        log.log_edit(Action::ToggleWall { x: 2, y: 3 }, EditOutcome::Accepted);
        let json = serde_json::to_string(log.get_actions()).unwrap();
        assert!(json.contains("\"ToggleWall\":{\"x\":2,\"y\":3}"));
        assert!(json.contains("\"outcome\":\"Accepted\""));

        let back: Vec<LoggedAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].action, Action::ToggleWall { x: 2, y: 3 });
    }
}
