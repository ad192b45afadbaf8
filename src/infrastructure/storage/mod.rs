//! Storage adapters for the survey service.
//!
//! This module currently exposes the file-backed store that keeps one JSON
//! document per response category.

pub mod json_file_store;

pub use json_file_store::JsonFileStore;
