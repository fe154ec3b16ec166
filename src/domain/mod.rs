//! Domain types for numlog
//!
//! - Entry: a single timestamped measurement
//! - Log: a named, unit-labelled ordered series of entries
//! - AppState: every log plus the pending input and dialog flags

pub mod entry;
pub mod log_record;
pub mod state;

pub use entry::Entry;
pub use log_record::{DEFAULT_UNITS, Log};
pub use state::{AppState, Dialog, INITIAL_LOG_NAME};
