//! numlog - a number logger
//!
//! Keeps one or more named logs of timestamped numbers. The whole state is
//! mirrored to a key-value store after every change, and single logs can be
//! exported to and imported from tab-separated files.

pub mod codec;
pub mod domain;
pub mod error;
pub mod numeric;
pub mod storage;
pub mod store;
pub mod timestamp;

pub use error::{NumlogError, Result};
pub use store::LogStore;
