//! Service layer orchestrating domain operations and infrastructure adapters.

mod response_service;

pub use response_service::{ResponseService, ResponseStore};
