//! Durable storage for numlog.
//!
//! The state store only needs a key-value store of text: one read at
//! startup and one write after every change. `FileStore` keeps each key in
//! its own file; `MemoryStore` keeps everything in a map.

mod file;
mod memory;
mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, validate_key};
