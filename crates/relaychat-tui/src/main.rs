//! relaychat entry point.
//!
//! # Usage
//!
//! ```bash
//! # Two channels, quiet loopback
//! relaychat --nick ferris
//!
//! # Custom channels with background chatter every 1.5s
//! relaychat --channel '#tokio' --channel '#ratatui' --chatter-ms 1500
//! ```

use std::{fs::OpenOptions, sync::Mutex, time::Duration};

use clap::Parser;
use relaychat_app::update_queue;
use relaychat_tui::{LoopbackConfig, Runtime, SystemEnv, TerminalDriver, spawn_loopback};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const UPDATE_QUEUE_CAPACITY: usize = 256;
const TICK_RATE: Duration = Duration::from_millis(250);

/// relaychat terminal client
#[derive(Parser, Debug)]
#[command(name = "relaychat")]
#[command(about = "Terminal chat client with activity ranking")]
#[command(version)]
struct Args {
    /// Nick to send as
    #[arg(short, long, default_value = "guest")]
    nick: String,

    /// Channel to open (repeatable)
    #[arg(short, long = "channel", default_values = ["#general", "#rust"])]
    channels: Vec<String>,

    /// Background chatter interval in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    chatter_ms: u64,

    /// Seed for background chatter
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal is taken over by the UI)
    #[arg(long, default_value = "relaychat.log")]
    log_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_file = OpenOptions::new().create(true).append(true).open(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!(nick = %args.nick, channels = ?args.channels, "relaychat starting");

    let chatter_interval = (args.chatter_ms > 0).then_some(Duration::from_millis(args.chatter_ms));
    let (updates, update_rx) = update_queue(UPDATE_QUEUE_CAPACITY);
    let transport = spawn_loopback(
        LoopbackConfig {
            nick: args.nick,
            channels: args.channels,
            chatter_interval,
            seed: args.seed,
        },
        updates,
    );

    let driver = TerminalDriver::new(update_rx, transport.outbound(), TICK_RATE)?;
    let mut runtime = Runtime::new(driver, SystemEnv::new());
    let result = runtime.run().await;

    transport.stop();
    tracing::info!("relaychat stopped");
    result?;
    Ok(())
}
