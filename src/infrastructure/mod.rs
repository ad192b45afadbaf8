//! Infrastructure layer wiring concrete adapters.

pub mod storage;

pub use storage::JsonFileStore;
