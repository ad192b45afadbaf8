use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    application::dtos::HealthStatusResponse,
    domain::{CategoryKey, DomainError, ResponseDocument},
};

/// Contract for wherever response documents end up living.
pub trait ResponseStore: Send + Sync {
    /// Returns `None` when nothing has been stored for `key` yet.
    fn load(&self, key: &CategoryKey) -> Result<Option<ResponseDocument>, DomainError>;

    /// Replaces whatever was stored for `key`.
    fn save(&self, key: &CategoryKey, document: &ResponseDocument) -> Result<(), DomainError>;

    fn ping(&self) -> Result<(), DomainError>;

    /// Human readable location of the backing data, for logs and diagnostics.
    fn describe(&self) -> String {
        String::from("unspecified")
    }
}

/// Validates `type` keys and delegates whole-document reads and writes to the store.
pub struct ResponseService {
    store: Arc<dyn ResponseStore>,
}

impl ResponseService {
    pub fn new(store: Arc<dyn ResponseStore>) -> Self {
        Self { store }
    }

    /// Stored document for `kind`, or an empty array when none exists.
    pub fn fetch(&self, kind: Option<&str>) -> Result<ResponseDocument, DomainError> {
        let key = CategoryKey::from_query(kind)?;

        match self.store.load(&key)? {
            Some(document) => {
                debug!(category = %key, "loaded stored responses");
                Ok(document)
            }
            None => {
                info!(category = %key, "no responses stored yet, returning empty array");
                Ok(ResponseDocument::Array(Vec::new()))
            }
        }
    }

    /// Parse `body` as JSON and overwrite the document stored for `kind`.
    ///
    /// The key is checked before the body so a missing `type` is always
    /// reported as a client error.
    pub fn store(&self, kind: Option<&str>, body: &[u8]) -> Result<(), DomainError> {
        let key = CategoryKey::from_query(kind)?;

        let document: ResponseDocument = serde_json::from_slice(body).map_err(|err| {
            DomainError::serialization(format!("request body is not valid JSON: {err}"))
        })?;

        self.store.save(&key, &document)?;
        info!(category = %key, "stored responses");
        Ok(())
    }

    pub fn health(&self) -> Result<HealthStatusResponse, DomainError> {
        self.store.ping()?;

        Ok(HealthStatusResponse {
            ok: true,
            message: "ready".into(),
            details: Some(format!(
                "data: {}, checked_at: {}",
                self.store.describe(),
                Utc::now()
            )),
        })
    }
}
