//! `livenote` - A stopwatch-driven timestamp logger for livestreamers
//!
//! This library provides the core functionality for recording timestamped
//! notes against a running stopwatch, archiving completed streams to
//! persistent local storage, and exporting note logs as plain text.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod archive;
pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod timer;

pub use archive::Archive;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{format_elapsed, Note, Stream};
pub use session::Session;
pub use store::{Snapshot, StateStore};
pub use timer::{Ticker, Timer};
