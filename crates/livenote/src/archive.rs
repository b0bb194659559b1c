//! The archive: the ordered collection of saved streams.
//!
//! All structural invariants live here: names stay unique (trimmed,
//! case-sensitive) because every write path checks before mutating, and
//! note edits address a concrete index or fail loudly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Note, Stream};

/// Ordered collection of archived streams; insertion order is archival
/// order. Identity is the stream id; `name` is a unique display field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive {
    streams: Vec<Stream>,
}

impl Archive {
    /// Create an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-validated list of streams (used on rehydrate).
    #[must_use]
    pub fn from_streams(streams: Vec<Stream>) -> Self {
        Self { streams }
    }

    /// The archived streams in archival order.
    #[must_use]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Number of archived streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether the archive is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Look up a stream by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Stream> {
        self.streams.iter().find(|s| s.id == id)
    }

    /// Look up a stream by display name (trimmed, case-sensitive exact).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Stream> {
        let name = name.trim();
        self.streams.iter().find(|s| s.name == name)
    }

    /// Append a new stream built from the transient session state.
    ///
    /// Returns the id of the saved stream.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStreamName`] if `name` is blank after trimming.
    /// - [`Error::NoNotes`] if `notes` is empty.
    /// - [`Error::DuplicateStreamName`] if a stream with the trimmed name
    ///   already exists.
    pub fn save(&mut self, name: &str, notes: Vec<Note>, total_seconds: u64) -> Result<Uuid> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyStreamName);
        }
        if notes.is_empty() {
            return Err(Error::NoNotes { action: "save" });
        }
        if self.find_by_name(trimmed).is_some() {
            return Err(Error::duplicate_name(trimmed));
        }
        let stream = Stream::new(trimmed, notes, total_seconds);
        let id = stream.id;
        self.streams.push(stream);
        Ok(id)
    }

    /// Rename a stream, keeping notes, duration, date, and id.
    ///
    /// Uniqueness is enforced at write time: a rename colliding with a
    /// *different* stream fails, so two entries can never share a name.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStreamName`] if `new_name` is blank after trimming.
    /// - [`Error::DuplicateStreamName`] on collision with another stream.
    /// - [`Error::StreamNotFound`] if `id` matches nothing.
    pub fn rename(&mut self, id: Uuid, new_name: &str) -> Result<()> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyStreamName);
        }
        if self.streams.iter().any(|s| s.id != id && s.name == trimmed) {
            return Err(Error::duplicate_name(trimmed));
        }
        let stream = self
            .streams
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::stream_not_found(id.to_string()))?;
        stream.name = trimmed.to_string();
        Ok(())
    }

    /// Remove a stream, returning it. No soft delete; confirmation is the
    /// caller's concern.
    ///
    /// # Errors
    ///
    /// [`Error::StreamNotFound`] if `id` matches nothing.
    pub fn remove(&mut self, id: Uuid) -> Result<Stream> {
        let pos = self
            .streams
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::stream_not_found(id.to_string()))?;
        Ok(self.streams.remove(pos))
    }

    /// Rewrite the text of one note in an archived stream.
    ///
    /// # Errors
    ///
    /// - [`Error::StreamNotFound`] if `id` matches nothing.
    /// - [`Error::NoteNotFound`] if `index` is out of range.
    /// - [`Error::EmptyNoteText`] if the replacement text is blank.
    pub fn edit_note(&mut self, id: Uuid, index: usize, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyNoteText);
        }
        let stream = self
            .streams
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::stream_not_found(id.to_string()))?;
        let len = stream.notes.len();
        let note = stream
            .notes
            .get_mut(index)
            .ok_or(Error::NoteNotFound { index, len })?;
        note.text = trimmed.to_string();
        Ok(())
    }

    /// Remove one note from an archived stream, returning it.
    ///
    /// # Errors
    ///
    /// - [`Error::StreamNotFound`] if `id` matches nothing.
    /// - [`Error::NoteNotFound`] if `index` is out of range.
    pub fn remove_note(&mut self, id: Uuid, index: usize) -> Result<Note> {
        let stream = self
            .streams
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::stream_not_found(id.to_string()))?;
        let len = stream.notes.len();
        if index >= len {
            return Err(Error::NoteNotFound { index, len });
        }
        Ok(stream.notes.remove(index))
    }
}
