//! Focus Timer - A state-managed HTTP server driving a Pomodoro timer
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-timer server v{}", env!("CARGO_PKG_VERSION"));

    let store = config.store()?;
    match config.state_path()? {
        Some(path) => info!("Session file: {}", path.display()),
        None => info!("Ephemeral session, nothing will be saved"),
    }

    // Create the session controller, restoring the last snapshot
    let state = Arc::new(AppState::new(store, config.controller_options()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/state          - Current timer view");
    info!("  POST /api/start          - Start the countdown");
    info!("  POST /api/pause          - Pause the countdown");
    info!("  POST /api/toggle         - Start or pause");
    info!("  POST /api/reset          - Reset the current phase");
    info!("  POST /api/skip           - Complete the current phase now");
    info!("  POST /api/mode/:phase    - Switch to pomodoro, short_break or long_break");
    info!("  PUT  /api/task           - Set the task label");
    info!("  POST /api/theme/toggle   - Cycle the theme preference");
    info!("  POST /api/shortcut       - Run a keyboard shortcut");
    info!("  GET  /api/events         - Session event stream (SSE)");
    info!("  GET  /api/tone.wav       - Completion tone");
    info!("  GET  /api/timer-config   - Phase durations");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
