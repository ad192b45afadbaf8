use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
#[cfg(feature = "http-server")]
use tracing::info;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod settings;

use application::{services::ResponseStore, ResponseService};
use infrastructure::JsonFileStore;
use settings::ConfigManager;
#[cfg(feature = "http-server")]
use settings::ServiceSettings;

#[cfg(feature = "http-server")]
use interfaces::http::{build_router, AppState};

/// Everything the service needs once bootstrapped.
pub struct AppHandles {
    pub service: Arc<ResponseService>,
    pub config: Arc<ConfigManager>,
    pub data_dir: PathBuf,
}

/// Open the JSON store and config rooted at `data_dir`.
pub fn build_environment(data_dir: impl Into<PathBuf>) -> Result<AppHandles> {
    let data_dir = data_dir.into();

    let store_impl = JsonFileStore::open(&data_dir)
        .map_err(|err| anyhow!(err.to_string()))
        .context("failed to open response store")?;
    let store: Arc<dyn ResponseStore> = Arc::new(store_impl);

    let config = Arc::new(ConfigManager::load(&data_dir).context("failed to load config file")?);
    let service = Arc::new(ResponseService::new(Arc::clone(&store)));

    Ok(AppHandles {
        service,
        config,
        data_dir,
    })
}

/// Entry point used by the `survey-service` binary.
#[cfg(feature = "http-server")]
pub async fn run_service(settings: ServiceSettings) -> Result<()> {
    init_tracing();

    info!("Starting survey service v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = settings.data_dir.clone();
    let handles = tokio::task::spawn_blocking(move || build_environment(data_dir))
        .await
        .context("failed to spawn initialization task")?
        .context("failed to bootstrap survey service")?;

    info!("Data directory: {}", handles.data_dir.display());

    let app = build_router(AppState {
        service: handles.service,
        config: handles.config,
    });

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Survey service listening on http://{}", addr);
    info!("Responses API: http://{}/api/responses?type=<name>", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("Survey service stopped");
    Ok(())
}

#[cfg(feature = "http-server")]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(feature = "http-server")]
pub fn init_tracing() {
    init_tracing_with_writer(std::io::stderr);
}

#[cfg(feature = "http-server")]
fn init_tracing_with_writer<W>(make_writer: fn() -> W)
where
    W: std::io::Write + Send + Sync + 'static,
{
    static INIT: std::sync::OnceLock<()> = std::sync::OnceLock::new();

    let _ = INIT.get_or_init(|| {
        let filter = std::env::var(settings::ENV_LOG).unwrap_or_else(|_| "info".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(make_writer)
            .compact()
            .try_init();
    });
}
