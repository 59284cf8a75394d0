//! Echoscape - An audio-reactive mood visualizer
//!
//! Live microphone audio is classified into a mood that drives ribbons,
//! a dot swarm, a pulsing web and a liquid surface. A short generated
//! phrase tints the scene.

mod app;
mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use echoscape::params::ServerConfig;

fn main() -> anyhow::Result<()> {
    // RUST_LOG takes precedence
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve { host, port } => serve(host, port),
        Command::Visualize {
            description,
            server,
            device,
            no_mic,
        } => app::run(app::VisualizeOptions {
            description,
            server,
            device,
            listen: !no_mic,
        }),
    }
}

fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let config = ServerConfig::from_env()
        .context("invalid phrase service environment")?
        .with_address(host, port);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(echoscape::phrase::run(config))
        .context("phrase service failed")
}
