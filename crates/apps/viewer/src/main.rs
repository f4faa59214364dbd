use clap::Parser;
use gpu::LogSink;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::config::{Args, ViewerConfig};
use viewer::{build_loop, spawn_fetch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ViewerConfig::from_env(Args::parse())?;
    let source = config.source();
    info!(
        source = %source.describe(),
        lat = config.query.lat,
        long = config.query.long,
        zoom = config.query.zoom,
        "starting viewer"
    );

    let (outbox, inbox) = runtime::inbox();
    let fetch = spawn_fetch(source, config.query, outbox);

    let sink = LogSink::new(u64::from(config.fps));
    let mut render_loop = build_loop(&config, inbox, sink);
    let frames = render_loop.run(shutdown_signal()).await;

    fetch.abort();
    info!(frames, "viewer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler unavailable, relying on --max-frames");
        std::future::pending::<()>().await;
    }
}
