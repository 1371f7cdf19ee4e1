//! Script steps for property tests and fuzzing.
//!
//! Operations are generated from `Arbitrary` input and translated into
//! [`AppEvent`]s. Channel and nick spaces are tiny on purpose, so random
//! sequences hit existing buffers, duplicates and removals often.

use arbitrary::Arbitrary;
use relaychat_app::{AppEvent, InboundEvent, KeyInput};

/// Channel drawn from a small fixed pool.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct SmallChannel(pub u8);

impl SmallChannel {
    const NAMES: [&'static str; 4] = ["#rust", "#tokio", "#ratatui", "#offtopic"];

    /// Channel name.
    pub fn name(self) -> &'static str {
        Self::NAMES[usize::from(self.0) % Self::NAMES.len()]
    }

    /// Buffer identifier a snapshot for this channel uses.
    pub fn buffer_id(self) -> u64 {
        u64::from(self.0) % Self::NAMES.len() as u64 + 1
    }
}

/// Nick drawn from a small fixed pool.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct SmallNick(pub u8);

impl SmallNick {
    const NICKS: [&'static str; 3] = ["ada", "bob", "cy"];

    /// Nick.
    pub fn name(self) -> &'static str {
        Self::NICKS[usize::from(self.0) % Self::NICKS.len()]
    }
}

/// One step of a simulated session.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Transport opens a channel.
    Open(SmallChannel),
    /// Transport closes a channel.
    Close(SmallChannel),
    /// Someone speaks.
    Message(SmallChannel, SmallNick),
    /// Someone joins.
    Join(SmallChannel, SmallNick),
    /// Someone leaves.
    Part(SmallChannel, SmallNick),
    /// Silent member-list addition.
    MemberAdded(SmallChannel, SmallNick),
    /// Silent member-list removal.
    MemberRemoved(SmallChannel, SmallNick),
    /// Next buffer.
    FocusNext,
    /// Previous buffer.
    FocusPrevious,
    /// Type a character.
    Type(u8),
    /// Submit the input line.
    Submit,
    /// Advance the virtual clock.
    AdvanceTime(u8),
}

impl Operation {
    /// Event this operation injects. `None` for clock-only steps.
    pub fn to_event(&self) -> Option<AppEvent> {
        let inbound = match *self {
            Self::Open(channel) => InboundEvent::MemberListSnapshot {
                channel: channel.name().into(),
                buffer_id: channel.buffer_id(),
                members: vec!["me".into()],
            },
            Self::Close(channel) => InboundEvent::BufferClosed { channel: channel.name().into() },
            Self::Message(channel, nick) => InboundEvent::Message {
                channel: channel.name().into(),
                from: nick.name().into(),
                text: format!("hello from {}", nick.name()),
            },
            Self::Join(channel, nick) => InboundEvent::Join {
                channel: channel.name().into(),
                nick: nick.name().into(),
                hostmask: format!("{}@sim", nick.name()),
            },
            Self::Part(channel, nick) => InboundEvent::Part {
                channel: channel.name().into(),
                nick: nick.name().into(),
                hostmask: format!("{}@sim", nick.name()),
            },
            Self::MemberAdded(channel, nick) => InboundEvent::MemberAdded {
                channel: channel.name().into(),
                nick: nick.name().into(),
            },
            Self::MemberRemoved(channel, nick) => InboundEvent::MemberRemoved {
                channel: channel.name().into(),
                nick: nick.name().into(),
            },
            Self::FocusNext => return Some(AppEvent::Key(KeyInput::Tab)),
            Self::FocusPrevious => return Some(AppEvent::Key(KeyInput::BackTab)),
            Self::Type(byte) => {
                let c = char::from(b'a' + byte % 26);
                return Some(AppEvent::Key(KeyInput::Char(c)));
            },
            Self::Submit => return Some(AppEvent::Key(KeyInput::Enter)),
            Self::AdvanceTime(_) => return None,
        };
        Some(AppEvent::Inbound(inbound))
    }
}
