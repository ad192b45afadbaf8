//! Domain layer: response categories, curve points and the Gaussian generator.

pub mod distribution;
pub mod errors;
pub mod models;

pub use distribution::{normal_distribution, pdf, DistributionParams, MAX_POINTS};
pub use errors::DomainError;
pub use models::{CategoryKey, Point, ResponseDocument};
