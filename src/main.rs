use anyhow::Result;
use axum::Router;
use energy_consumption_predictor::{api, app::AppState, config::Config, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::load()?;
    telemetry::init_tracing(cfg.log.format);

    let app_state = AppState::new(cfg.clone())?;
    if !app_state.model_available() {
        warn!(
            path = %cfg.model.path.display(),
            "starting without a model; the predict action is disabled"
        );
    }

    #[allow(unused_mut)]
    let mut app: Router = api::router(app_state);

    #[cfg(feature = "metrics")]
    {
        app = api::with_metrics(app);
    }

    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting energy consumption predictor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
