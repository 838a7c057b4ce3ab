use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single task. Three variants share a description and a completion flag;
/// deadlines and events carry the time text exactly as the user entered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    Todo {
        description: String,
        #[serde(default)]
        done: bool,
    },
    Deadline {
        description: String,
        #[serde(default)]
        done: bool,
        by: String,
    },
    Event {
        description: String,
        #[serde(default)]
        done: bool,
        from: String,
        to: String,
    },
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Task::Todo {
            description: description.into(),
            done: false,
        }
    }

    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Task::Deadline {
            description: description.into(),
            done: false,
            by: by.into(),
        }
    }

    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Task::Event {
            description: description.into(),
            done: false,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Task::Todo { description, .. }
            | Task::Deadline { description, .. }
            | Task::Event { description, .. } => description,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done
            }
        }
    }

    pub fn set_done(&mut self, value: bool) {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done = value;
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_done() { 'X' } else { ' ' };
        match self {
            Task::Todo { description, .. } => write!(f, "[T][{}] {}", check, description),
            Task::Deadline {
                description, by, ..
            } => write!(
                f,
                "[D][{}] {} (by: {})",
                check,
                description,
                display_when(by)
            ),
            Task::Event {
                description,
                from,
                to,
                ..
            } => write!(
                f,
                "[E][{}] {} (from: {} to: {})",
                check,
                description,
                display_when(from),
                display_when(to)
            ),
        }
    }
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%d/%m/%Y %H%M"];

/// Render a user-entered time marker. Text that parses under one of the
/// accepted formats gets a friendlier form; everything else is shown verbatim.
/// The stored value is never rewritten, so unparsed text still round-trips.
pub fn display_when(raw: &str) -> String {
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(when) = NaiveDateTime::parse_from_str(trimmed, format) {
            return when.format("%b %-d %Y %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%b %-d %Y").to_string();
    }
    trimmed.to_string()
}
