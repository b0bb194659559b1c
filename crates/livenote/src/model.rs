//! Core record types for livenote.
//!
//! This module defines the note and stream records and the elapsed-time
//! formatting shared by the timer display, note timestamps, and exports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single timestamped text entry captured while the timer runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Elapsed time at capture, formatted `HH:MM:SS`.
    pub timestamp: String,

    /// The note text (trimmed, non-empty at creation).
    pub text: String,
}

impl Note {
    /// Create a note at the given elapsed second count.
    ///
    /// The text is trimmed; validation of emptiness happens at the session
    /// boundary, not here.
    #[must_use]
    pub fn at(elapsed_seconds: u64, text: &str) -> Self {
        Self {
            timestamp: format_elapsed(elapsed_seconds),
            text: text.trim().to_string(),
        }
    }
}

/// A finalized, named recording session: its notes, total duration, and
/// the date it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Stable identifier, generated at save time.
    ///
    /// Archives written before ids existed decode with a fresh id; only
    /// `name`, `notes`, `totalSeconds`, and `date` take part in shape
    /// validation.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Display name, unique (trimmed, case-sensitive) within the archive.
    pub name: String,

    /// The notes captured during the stream.
    pub notes: Vec<Note>,

    /// Total stopwatch duration in whole seconds.
    pub total_seconds: u64,

    /// When the stream was saved.
    pub date: DateTime<Utc>,
}

impl Stream {
    /// Create a new stream from the transient session state.
    ///
    /// Assigns a fresh id and stamps the current time as the save date.
    /// The name is trimmed; validation happens at the archive boundary.
    #[must_use]
    pub fn new(name: &str, notes: Vec<Note>, total_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            notes,
            total_seconds,
            date: Utc::now(),
        }
    }

    /// Number of notes in this stream.
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// The stream's duration formatted as `HH:MM:SS`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_elapsed(self.total_seconds)
    }
}

/// Format a whole-second count as zero-padded `HH:MM:SS`.
///
/// The hour field widens past two digits rather than wrapping.
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
