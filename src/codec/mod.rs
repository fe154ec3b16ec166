//! Text encodings for numlog
//!
//! - state: whole-state JSON with load-time migrations
//! - tsv: single-log tab-separated export and import

pub mod state;
pub mod tsv;

pub use state::{MIGRATIONS, Migration, deserialize_state, migrate, serialize_state};
pub use tsv::{LineSeparator, export_file_name, export_log, import_log, parse_file_name};
