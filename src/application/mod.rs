//! Application layer wiring DTOs and services for the survey service.

pub mod dtos;
pub mod services;

pub use dtos::{
    DistributionQuery, HealthStatusResponse, QueryPairs, ResponsesQuery, SaveResponse,
};
pub use services::ResponseService;
