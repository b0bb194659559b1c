//! The persisted state snapshot: five logical records, each independently
//! optional and independently recoverable.
//!
//! A record that fails to parse is logged, cleared from the store, and
//! replaced by its default; the other records load untouched. The archive
//! record additionally gets shape validation through its typed decode, so
//! a malformed entry resets the whole archive to empty.

use serde::de::DeserializeOwned;
use tracing::warn;

use super::{keys, StateStore};
use crate::error::Result;
use crate::model::{Note, Stream};

/// In-memory image of everything livenote persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// The stream name being edited for the next save.
    pub stream_name: String,
    /// The working note log.
    pub notes: Vec<Note>,
    /// The stopwatch's elapsed seconds.
    pub seconds: u64,
    /// The archive, in archival order.
    pub archived_streams: Vec<Stream>,
    /// The archived stream currently selected for viewing/editing.
    pub selected_stream: Option<Stream>,
}

impl Snapshot {
    /// Rehydrate the snapshot from the store.
    ///
    /// Each record decodes independently: a parse or shape failure clears
    /// that record and falls back to its default without touching the
    /// others.
    ///
    /// # Errors
    ///
    /// Returns an error only on a store fault; corrupt data never
    /// propagates as an error.
    pub fn load(store: &StateStore) -> Result<Self> {
        Ok(Self {
            stream_name: load_record(store, keys::STREAM_NAME)?,
            notes: load_record(store, keys::NOTES)?,
            seconds: load_record(store, keys::SECONDS)?,
            archived_streams: load_record(store, keys::ARCHIVED_STREAMS)?,
            selected_stream: load_record(store, keys::SELECTED_STREAM)?,
        })
    }

    /// Write every record to the store.
    ///
    /// Normal operation writes through per slice; this exists for seeding
    /// and for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a write fails.
    pub fn persist(&self, store: &StateStore) -> Result<()> {
        store.put_json(keys::STREAM_NAME, &self.stream_name)?;
        store.put_json(keys::NOTES, &self.notes)?;
        store.put_json(keys::SECONDS, &self.seconds)?;
        store.put_json(keys::ARCHIVED_STREAMS, &self.archived_streams)?;
        store.put_json(keys::SELECTED_STREAM, &self.selected_stream)?;
        Ok(())
    }
}

/// Decode one record, falling back to the type's default on corrupt data.
///
/// The corrupt record is cleared from the store so the next load starts
/// clean.
fn load_record<T: DeserializeOwned + Default>(store: &StateStore, key: &str) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!("Discarding corrupt '{key}' record: {err}");
            store.delete(key)?;
            Ok(T::default())
        }
    }
}
