/// Unison reference client - plays the shared timeline against a
/// simulated device and logs what the drift monitor does about it.
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unison_engine::{
    daily_seed, elapsed_seconds, locate, rotation_date, shuffle_playlist, DriftMonitor,
    SyncSession, SystemClock,
};
use unison_core::PlaylistProvider;
use unison_provider::{HttpPlaylistProvider, ProviderConfig};

mod config;
mod sim;

use config::{ClientConfig, StationSettings};
use sim::SimulatedPlayer;

#[derive(Parser)]
#[command(name = "unison-client")]
#[command(about = "Unison shared-timeline reference client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live sync session against a simulated playback device
    Run {
        /// Playback rate of the simulated device; below 1.0 the device
        /// falls behind and the drift monitor has to keep correcting it
        #[arg(long, default_value_t = 1.0)]
        rate: f64,
    },
    /// Print the position every client in the world should be at right now
    Now,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "unison_client=info,unison_engine=info,unison_provider=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;

    match cli.command {
        Commands::Run { rate } => run(config, rate).await,
        Commands::Now => now(config).await,
    }
}

fn provider(station: &StationSettings) -> anyhow::Result<HttpPlaylistProvider> {
    let provider_config = ProviderConfig {
        request_timeout_secs: station.request_timeout_secs,
        max_attempts: station.max_attempts,
        ..ProviderConfig::new(station.url.clone())
    };
    HttpPlaylistProvider::new(provider_config).context("creating playlist provider")
}

/// Compute and print the shared position, then exit
async fn now(config: ClientConfig) -> anyhow::Result<()> {
    let provider = provider(&config.station)?;

    let now = chrono::Utc::now();
    let playlist = provider
        .fetch(rotation_date(now))
        .await
        .context("fetching today's playlist")?;
    let order = shuffle_playlist(&playlist, daily_seed(now));
    let position = locate(&order, elapsed_seconds(now))?;
    let track = &order.tracks()[position.track_index];

    println!(
        "{} - {}  [{} / {} s]  track {}/{}",
        track.artist,
        track.title,
        position.offset.as_secs(),
        track.duration_secs,
        position.track_index + 1,
        order.len(),
    );
    Ok(())
}

/// Run the sync loop until ctrl-c
async fn run(config: ClientConfig, rate: f64) -> anyhow::Result<()> {
    let provider = Arc::new(provider(&config.station)?);
    let (player_tx, player_rx) = mpsc::channel(32);
    let player = Arc::new(SimulatedPlayer::new(player_tx, rate));
    let (events_tx, mut events) = mpsc::channel(256);

    let monitor = DriftMonitor::new(
        config.sync.clone(),
        Arc::new(SystemClock),
        provider,
        player,
        events_tx,
    );
    let session = SyncSession::spawn(monitor, player_rx);
    info!(station = %config.station.url, rate, "session started, ctrl-c to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Some(event) => info!(event = ?event, "sync"),
                None => break,
            },
        }
    }

    info!("shutting down");
    session.stop().await;
    Ok(())
}
