//! Plain-text export of note logs.
//!
//! One note per line, `"HH:MM:SS - <text>"`, newline-joined, UTF-8.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Note, Stream};

/// Default file name for the working note log.
pub const WORKING_LOG_FILENAME: &str = "livestream-notes.txt";

/// Render a note list as export text.
///
/// # Errors
///
/// [`Error::NoNotes`] if the list is empty.
pub fn render(notes: &[Note]) -> Result<String> {
    if notes.is_empty() {
        return Err(Error::NoNotes { action: "export" });
    }
    Ok(notes
        .iter()
        .map(|note| format!("{} - {}", note.timestamp, note.text))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// File name for an archived stream's export.
#[must_use]
pub fn stream_filename(stream: &Stream) -> String {
    format!("{}-notes.txt", stream.name)
}

/// Render the notes and write them to `path`.
///
/// # Errors
///
/// [`Error::NoNotes`] if the list is empty, or an I/O error if the write
/// fails.
pub fn export_to(notes: &[Note], path: &Path) -> Result<()> {
    let content = render(notes)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(path, content)?;
    info!("Exported {} notes to {}", notes.len(), path.display());
    Ok(())
}

/// Export the working note log into `dir` under its default file name.
///
/// Returns the written path.
///
/// # Errors
///
/// Same as [`export_to`].
pub fn export_working_log(notes: &[Note], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(WORKING_LOG_FILENAME);
    export_to(notes, &path)?;
    Ok(path)
}

/// Export an archived stream's notes into `dir` as `{name}-notes.txt`.
///
/// Returns the written path.
///
/// # Errors
///
/// Same as [`export_to`].
pub fn export_stream(stream: &Stream, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(stream_filename(stream));
    export_to(&stream.notes, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_note() {
        let notes = vec![Note::at(5, "intro")];
        assert_eq!(render(&notes).unwrap(), "00:00:05 - intro");
    }

    #[test]
    fn test_render_joins_with_newlines_no_trailer() {
        let notes = vec![Note::at(5, "intro"), Note::at(65, "first raid")];
        let content = render(&notes).unwrap();
        assert_eq!(content, "00:00:05 - intro\n00:01:05 - first raid");
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_render_empty_is_an_error() {
        let err = render(&[]).unwrap_err();
        assert!(matches!(err, Error::NoNotes { action: "export" }));
    }

    #[test]
    fn test_stream_filename() {
        let stream = Stream::new("Friday VOD", vec![Note::at(1, "x")], 1);
        assert_eq!(stream_filename(&stream), "Friday VOD-notes.txt");
    }

    #[test]
    fn test_export_working_log_writes_file() {
        let dir = std::env::temp_dir().join(format!("livenote_export_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let notes = vec![Note::at(5, "intro")];
        let path = export_working_log(&notes, &dir).unwrap();

        assert_eq!(path.file_name().unwrap(), WORKING_LOG_FILENAME);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "00:00:05 - intro");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_stream_uses_stream_name() {
        let dir = std::env::temp_dir().join(format!("livenote_export_s_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let stream = Stream::new("speedrun", vec![Note::at(1, "go")], 1);
        let path = export_stream(&stream, &dir).unwrap();

        assert!(path.to_string_lossy().ends_with("speedrun-notes.txt"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "00:00:01 - go"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_empty_stream_is_an_error() {
        let dir = std::env::temp_dir();
        let stream = Stream::new("empty", vec![], 0);
        assert!(export_stream(&stream, &dir).is_err());
    }
}
