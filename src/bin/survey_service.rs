//! Long-running HTTP service persisting survey responses per category.
//!
//! # Usage
//!
//! ```bash
//! SURVEY_DATA_DIR=./data survey-service
//! ```
//!
//! # Endpoints
//!
//! - `GET /api/responses?type=<name>` - Read the stored document (`[]` if none)
//! - `POST /api/responses?type=<name>` - Overwrite the stored document
//! - `GET /api/distribution` - Sample a Gaussian curve over `[0, 100]`
//! - `PUT /api/distribution/defaults` - Change the curve parameters used by default
//! - `GET /health` - Health check
//!
//! # Environment Variables
//!
//! - `SURVEY_LOG`: Set logging level (trace, debug, info, warn, error)
//! - `SURVEY_DATA_DIR`: Override data directory location
//! - `SURVEY_SERVICE_PORT`: Listen port (default: 3300)
//! - `SURVEY_SERVICE_HOST`: Bind address (default: 127.0.0.1)

use survey_lib::settings::ServiceSettings;

#[tokio::main]
async fn main() {
    let result = match ServiceSettings::from_env() {
        Ok(settings) => survey_lib::run_service(settings).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("[survey::service] Service failed: {err:?}");
        std::process::exit(1);
    }
}
