//! Buffer and transcript types.
//!
//! A [`Buffer`] is one conversation context: a channel with its members and
//! an append-only transcript. Buffers are only mutated through
//! [`crate::BufferRegistry`], which is what keeps the transcript append-only.

use std::{collections::BTreeSet, fmt};

/// Stable buffer identifier, assigned by the transport when the channel is
/// opened and used to address outbound sends.
pub type BufferId = u64;

/// A single conversation buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    id: BufferId,
    name: String,
    /// Member nicks. Sorted, which doubles as the presentation order.
    members: BTreeSet<String>,
    transcript: Vec<TranscriptLine>,
}

impl Buffer {
    pub(crate) fn new(id: BufferId, name: String, members: BTreeSet<String>) -> Self {
        Self { id, name, members, transcript: Vec::new() }
    }

    /// Stable identifier.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Unique display name, also the lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in presentation order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether `nick` is a member of this buffer.
    pub fn has_member(&self, nick: &str) -> bool {
        self.members.contains(nick)
    }

    /// Transcript lines, oldest first.
    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub(crate) fn insert_member(&mut self, nick: String) -> bool {
        self.members.insert(nick)
    }

    pub(crate) fn remove_member(&mut self, nick: &str) -> bool {
        self.members.remove(nick)
    }

    pub(crate) fn push_line(&mut self, line: TranscriptLine) -> &TranscriptLine {
        self.transcript.push(line);
        // INVARIANT: just pushed, so the transcript is non-empty
        &self.transcript[self.transcript.len() - 1]
    }
}

/// One rendered transcript entry.
///
/// Rendering goes through [`fmt::Display`], which produces the line exactly
/// as the terminal shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// Speaker-attributed message.
    Message {
        /// Sender nick.
        from: String,
        /// Message body.
        text: String,
    },

    /// A member arrived.
    Join {
        /// Nick that joined.
        nick: String,
        /// Hostmask reported by the server.
        hostmask: String,
    },

    /// A member departed.
    Part {
        /// Nick that left.
        nick: String,
        /// Hostmask reported by the server.
        hostmask: String,
    },
}

impl TranscriptLine {
    /// Whether this line is a message (as opposed to a membership notice).
    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message { .. })
    }
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message { from, text } => write!(f, "<{from}> {text}"),
            Self::Join { nick, hostmask } => write!(f, "  -> {nick} joined ({hostmask})"),
            Self::Part { nick, hostmask } => write!(f, "  <- {nick} left ({hostmask})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_line_is_speaker_attributed() {
        let line = TranscriptLine::Message { from: "ada".into(), text: "hello".into() };
        assert_eq!(line.to_string(), "<ada> hello");
        assert!(line.is_message());
    }

    #[test]
    fn join_and_part_lines_are_indented_notices() {
        let join = TranscriptLine::Join { nick: "bob".into(), hostmask: "bob@host".into() };
        let part = TranscriptLine::Part { nick: "bob".into(), hostmask: "bob@host".into() };

        assert_eq!(join.to_string(), "  -> bob joined (bob@host)");
        assert_eq!(part.to_string(), "  <- bob left (bob@host)");
        assert!(!join.is_message());
    }

    #[test]
    fn members_are_presented_sorted() {
        let members = ["zed", "ada", "mia"].into_iter().map(String::from).collect();
        let buffer = Buffer::new(1, "#rust".into(), members);

        assert_eq!(buffer.members().collect::<Vec<_>>(), ["ada", "mia", "zed"]);
        assert_eq!(buffer.member_count(), 3);
    }
}
