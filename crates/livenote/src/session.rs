//! The session: livenote's single state container.
//!
//! Owns the five state slices (stream name, note log, elapsed seconds,
//! archive, selection) plus the timer, and is the only mutator. Every
//! mutation validates first, then writes the affected slice through to the
//! store, so the persisted state never lags the in-memory state.

use tracing::{debug, info};
use uuid::Uuid;

use crate::archive::Archive;
use crate::error::{Error, Result};
use crate::model::{Note, Stream};
use crate::store::{keys, Snapshot, StateStore};
use crate::timer::Timer;

/// The application state container.
///
/// The running flag is deliberately transient: rehydrating always yields a
/// stopped timer holding the persisted elapsed count.
#[derive(Debug)]
pub struct Session {
    store: StateStore,
    stream_name: String,
    notes: Vec<Note>,
    timer: Timer,
    archive: Archive,
    selected: Option<Uuid>,
}

impl Session {
    /// Rehydrate a session from the store.
    ///
    /// The persisted selection is re-linked to the archive entry by id; if
    /// no entry matches (the stream was deleted out-of-band or the record
    /// predates ids), the selection is cleared and the record rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault. Corrupt records never fail the
    /// open; they fall back per slice inside [`Snapshot::load`].
    pub fn open(store: StateStore) -> Result<Self> {
        let snapshot = Snapshot::load(&store)?;

        let archive = Archive::from_streams(snapshot.archived_streams);
        let selected = snapshot
            .selected_stream
            .as_ref()
            .and_then(|s| archive.get(s.id).map(|found| found.id));

        let mut session = Self {
            store,
            stream_name: snapshot.stream_name,
            notes: snapshot.notes,
            timer: Timer::with_elapsed(snapshot.seconds),
            archive,
            selected,
        };

        if snapshot.selected_stream.is_some() && session.selected.is_none() {
            debug!("Persisted selection no longer matches an archive entry; clearing");
            session.persist_selected()?;
        }

        Ok(session)
    }

    // === Accessors ===

    /// The stream name staged for the next save.
    #[must_use]
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// The working note log.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The timer.
    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The archive.
    #[must_use]
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// The selected archived stream, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Stream> {
        self.selected.and_then(|id| self.archive.get(id))
    }

    // === Timer ===

    /// Start the timer. Returns `false` if it was already running.
    pub fn start_timer(&mut self) -> bool {
        self.timer.start()
    }

    /// Stop the timer. Returns `false` if it was not running.
    pub fn stop_timer(&mut self) -> bool {
        self.timer.stop()
    }

    /// Advance the timer by one second and persist the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn tick(&mut self) -> Result<()> {
        self.timer.tick();
        self.store.put_json(keys::SECONDS, &self.timer.elapsed())
    }

    // === Transient state ===

    /// Stage a stream name for the next save.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn set_stream_name(&mut self, name: &str) -> Result<()> {
        self.stream_name = name.to_string();
        self.store.put_json(keys::STREAM_NAME, &self.stream_name)
    }

    /// Append a note stamped with the current elapsed time.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyNoteText`] for blank/whitespace-only text.
    /// - [`Error::TimerNotRunning`] if the timer is stopped. The note log
    ///   is unchanged in both cases.
    pub fn add_note(&mut self, text: &str) -> Result<Note> {
        if text.trim().is_empty() {
            return Err(Error::EmptyNoteText);
        }
        if !self.timer.is_running() {
            return Err(Error::TimerNotRunning);
        }
        let note = Note::at(self.timer.elapsed(), text);
        self.notes.push(note.clone());
        self.store.put_json(keys::NOTES, &self.notes)?;
        Ok(note)
    }

    // === Archive ===

    /// Commit the transient state into the archive as a new stream, then
    /// reset: note log cleared, seconds zero, timer stopped, staged name
    /// cleared. All four slices plus the archive are written through.
    ///
    /// # Errors
    ///
    /// Validation errors from [`Archive::save`]; the transient state is
    /// untouched on failure.
    pub fn save_stream(&mut self) -> Result<Uuid> {
        let id = self.archive.save(
            &self.stream_name,
            self.notes.clone(),
            self.timer.elapsed(),
        )?;

        self.notes.clear();
        self.stream_name.clear();
        self.timer.reset();

        self.persist_archive()?;
        self.store.put_json(keys::NOTES, &self.notes)?;
        self.store.put_json(keys::STREAM_NAME, &self.stream_name)?;
        self.store.put_json(keys::SECONDS, &self.timer.elapsed())?;

        info!("Archived stream {id}");
        Ok(id)
    }

    /// Select an archived stream for viewing/editing.
    ///
    /// # Errors
    ///
    /// [`Error::StreamNotFound`] if `id` matches nothing.
    pub fn select_stream(&mut self, id: Uuid) -> Result<()> {
        if self.archive.get(id).is_none() {
            return Err(Error::stream_not_found(id.to_string()));
        }
        self.selected = Some(id);
        self.persist_selected()
    }

    /// Clear the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn clear_selection(&mut self) -> Result<()> {
        self.selected = None;
        self.persist_selected()
    }

    /// Rename an archived stream. The selection stays valid because
    /// identity is the id.
    ///
    /// # Errors
    ///
    /// Validation errors from [`Archive::rename`].
    pub fn rename_stream(&mut self, id: Uuid, new_name: &str) -> Result<()> {
        self.archive.rename(id, new_name)?;
        self.persist_archive()?;
        self.persist_selected()
    }

    /// Delete an archived stream. Clears the selection if it pointed at
    /// the deleted stream.
    ///
    /// # Errors
    ///
    /// [`Error::StreamNotFound`] if `id` matches nothing.
    pub fn delete_stream(&mut self, id: Uuid) -> Result<Stream> {
        let removed = self.archive.remove(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.persist_archive()?;
        self.persist_selected()?;
        Ok(removed)
    }

    /// Rewrite one note's text in an archived stream.
    ///
    /// # Errors
    ///
    /// Validation errors from [`Archive::edit_note`].
    pub fn edit_archived_note(&mut self, id: Uuid, index: usize, text: &str) -> Result<()> {
        self.archive.edit_note(id, index, text)?;
        self.persist_archive()?;
        self.persist_selected()
    }

    /// Remove one note from an archived stream.
    ///
    /// # Errors
    ///
    /// Validation errors from [`Archive::remove_note`].
    pub fn delete_archived_note(&mut self, id: Uuid, index: usize) -> Result<Note> {
        let removed = self.archive.remove_note(id, index)?;
        self.persist_archive()?;
        self.persist_selected()?;
        Ok(removed)
    }

    fn persist_archive(&self) -> Result<()> {
        self.store
            .put_json(keys::ARCHIVED_STREAMS, &self.archive)
    }

    // The record is a full Stream JSON when a selection exists, and absent
    // otherwise.
    fn persist_selected(&self) -> Result<()> {
        match self.selected() {
            Some(stream) => self.store.put_json(keys::SELECTED_STREAM, stream),
            None => {
                self.store.delete(keys::SELECTED_STREAM)?;
                Ok(())
            }
        }
    }
}
