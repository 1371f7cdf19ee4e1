//! In-process loopback transport.
//!
//! Stands in for a chat network: it opens the configured channels, echoes
//! every outbound message back as an inbound message from our own nick, and
//! optionally generates background chatter (messages, joins and parts from a
//! small cast of simulated users).
//!
//! Runs as its own tokio task and only talks to the UI task through the
//! update queue, the same way a networked transport would.

use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use relaychat_app::{InboundEvent, OutboundMessage, QueueError, UpdateSender};
use tokio::{sync::mpsc, time::Interval};

const OUTBOUND_CAPACITY: usize = 32;

/// Simulated users that populate every channel.
const CHATTERS: [&str; 4] = ["ada", "bob", "cy", "dee"];

const PHRASES: [&str; 6] = [
    "anyone tried the new release?",
    "lgtm",
    "that test is flaky again",
    "brb",
    "ship it",
    "has anyone seen the borrow checker today",
];

/// Loopback transport configuration.
#[derive(Debug, Clone)]
pub struct LoopbackConfig {
    /// Our nick. Echoed messages are attributed to it.
    pub nick: String,
    /// Channels opened at startup, in presentation order.
    pub channels: Vec<String>,
    /// Background chatter interval. `None` disables chatter.
    pub chatter_interval: Option<Duration>,
    /// Chatter seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Handle to a running loopback transport.
pub struct TransportHandle {
    outbound: mpsc::Sender<OutboundMessage>,
    abort_handle: tokio::task::AbortHandle,
}

impl TransportHandle {
    /// Channel the UI uses to hand messages to the transport.
    pub fn outbound(&self) -> mpsc::Sender<OutboundMessage> {
        self.outbound.clone()
    }

    /// Stop the transport.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn the loopback transport.
///
/// Must be called from within a tokio runtime. The transport runs until the
/// update queue closes, every outbound sender is dropped, or it is stopped.
pub fn spawn_loopback(config: LoopbackConfig, updates: UpdateSender) -> TransportHandle {
    let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);

    let handle = tokio::spawn(async move {
        match run_loopback(config, updates, outbound_rx).await {
            Ok(()) => tracing::debug!("loopback transport finished"),
            Err(e) => tracing::warn!("loopback transport stopped: {e}"),
        }
    });

    TransportHandle { outbound, abort_handle: handle.abort_handle() }
}

async fn run_loopback(
    config: LoopbackConfig,
    updates: UpdateSender,
    mut outbound: mpsc::Receiver<OutboundMessage>,
) -> Result<(), QueueError> {
    for (buffer_id, channel) in (1..).zip(&config.channels) {
        let members = std::iter::once(config.nick.as_str()).chain(CHATTERS).map(String::from);
        updates
            .send(InboundEvent::MemberListSnapshot {
                channel: channel.clone(),
                buffer_id,
                members: members.collect(),
            })
            .await?;
    }
    tracing::info!(channels = config.channels.len(), "loopback transport ready");

    let mut chatter = Chatter::new(config.seed);
    let mut interval = config.chatter_interval.map(tokio::time::interval);

    loop {
        tokio::select! {
            message = outbound.recv() => {
                let Some(message) = message else {
                    return Ok(());
                };
                tracing::debug!(channel = %message.channel, buffer_id = message.buffer_id, "echoing send");
                updates
                    .send(InboundEvent::Message {
                        channel: message.channel,
                        from: config.nick.clone(),
                        text: message.text,
                    })
                    .await?;
            }

            () = next_tick(&mut interval) => {
                if let Some(event) = chatter.next_event(&config.channels) {
                    updates.send(event).await?;
                }
            }
        }
    }
}

/// Wait for the next chatter tick, forever if chatter is disabled.
async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        },
        None => std::future::pending().await,
    }
}

/// Background chatter generator.
pub struct Chatter {
    rng: StdRng,
}

impl Chatter {
    /// Create a generator. `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng }
    }

    /// Next simulated event in one of `channels`. `None` if there are none.
    ///
    /// Mostly messages, with the occasional join or part.
    pub fn next_event(&mut self, channels: &[String]) -> Option<InboundEvent> {
        let channel = channels.choose(&mut self.rng)?.clone();
        let nick = (*CHATTERS.choose(&mut self.rng)?).to_string();
        let hostmask = format!("{nick}@loopback");

        let event = match self.rng.random_range(0..10) {
            0 => InboundEvent::Join { channel, nick, hostmask },
            1 => InboundEvent::Part { channel, nick, hostmask },
            _ => {
                let text = (*PHRASES.choose(&mut self.rng)?).to_string();
                InboundEvent::Message { channel, from: nick, text }
            },
        };
        Some(event)
    }
}
