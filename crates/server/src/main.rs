//! Fieldcall server binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fieldcall_config::load_settings;
use fieldcall_dialer::InMemoryCallRecordStore;
use fieldcall_server::{
    create_router, init_metrics, AppState, InMemoryFieldRepDirectory, InMemoryProspectDirectory,
};

mod seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args().nth(1);
    let settings = load_settings(config_path.as_deref())?;

    init_metrics();

    let prospects = Arc::new(InMemoryProspectDirectory::new());
    let field_reps = Arc::new(InMemoryFieldRepDirectory::new());
    let call_records = Arc::new(InMemoryCallRecordStore::new());

    if let Ok(path) = std::env::var("FIELDCALL_SEED") {
        seed::load_seed(&path, &prospects, &field_reps)?;
    }

    let addr = settings.bind_addr();
    let state = AppState::new(settings, prospects, field_reps, call_records);
    let router = create_router(state);

    tracing::info!(%addr, "Fieldcall server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
