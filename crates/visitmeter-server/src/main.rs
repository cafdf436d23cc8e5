use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use visitmeter_mysql::MySqlStore;
use visitmeter_server::state::AppState;

/// `visitmeter health` — liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$VISITMETER_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("VISITMETER_PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Health-check subcommand — must be handled before tokio runtime
    // initialisation so the binary stays small and fast when used as a Docker
    // HEALTHCHECK probe.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }
    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("visitmeter=info".parse()?),
        )
        .json()
        .init();

    let cfg = visitmeter_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Pool is lazy: no connection is attempted until the first request (or the
    // schema init below). An unreachable database is a per-request 500, not a
    // startup crash.
    let store = MySqlStore::connect_lazy(&cfg);

    // Ensure the visitors table and its uniqueness constraint exist. Failure
    // here (database not up yet) is non-fatal — the table is expected to be
    // provisioned externally in that case, and requests surface store errors
    // as 500s until it is.
    if let Err(e) = store.init_schema().await {
        tracing::warn!(error = %e, "Schema init failed — assuming externally managed schema");
    } else {
        info!("visitors table ready");
    }

    let state = Arc::new(AppState::new(Arc::new(store), cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = visitmeter_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "visitmeter listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
