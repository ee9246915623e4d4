// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]

use sizopi_server::{build_router, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ServerConfig::from_env();
    init_tracing(cfg.log_json);

    let state = AppState::from_config(&cfg)?;
    {
        let conn = state.pool.checkout()?;
        sizopi_query::init_schema(&conn)?;
    }

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        db = %cfg.db_path.display(),
        "listening"
    );
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
