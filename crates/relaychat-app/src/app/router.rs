//! Inbound event routing.
//!
//! Resolves each [`InboundEvent`] to its buffer and applies it. Only message
//! events register activity: join/part churn must not crowd genuinely active
//! conversations out of the ranking.
//!
//! Every lookup happens before any mutation, so an event for an unknown
//! buffer leaves all state untouched.

use relaychat_core::{Buffer, BufferId, Environment, RegistryError, TranscriptLine};

use super::App;
use crate::{AppAction, InboundEvent, InputLine, RenderRequest};

impl<E: Environment> App<E> {
    /// Apply an inbound event to its buffer.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if the channel is not open
    /// - [`RegistryError::DuplicateBuffer`] or
    ///   [`RegistryError::DuplicateBufferId`] for a member-list snapshot of a
    ///   channel that is already open
    pub fn route(&mut self, event: InboundEvent) -> Result<Vec<AppAction>, RegistryError> {
        match event {
            InboundEvent::Message { channel, from, text } => {
                self.route_message(&channel, from, text)
            },
            InboundEvent::Join { channel, nick, hostmask } => {
                self.route_join(&channel, nick, hostmask)
            },
            InboundEvent::Part { channel, nick, hostmask } => {
                self.route_part(&channel, nick, hostmask)
            },
            InboundEvent::MemberAdded { channel, nick } => {
                let added = self.registry.add_member(&channel, nick.clone())?;
                Ok(added.then(|| member_added(channel, nick)).into_iter().collect())
            },
            InboundEvent::MemberRemoved { channel, nick } => {
                let removed = self.registry.remove_member(&channel, &nick)?;
                Ok(removed.then(|| member_removed(channel, nick)).into_iter().collect())
            },
            InboundEvent::MemberListSnapshot { channel, buffer_id, members } => {
                self.open_buffer(channel, buffer_id, members)
            },
            InboundEvent::BufferClosed { channel } => self.close_buffer(&channel),
        }
    }

    /// Route an event, dropping it if its buffer is unknown.
    ///
    /// Lookup failures are expected when events race with buffer removal, so
    /// they are logged and counted rather than surfaced.
    pub(super) fn dispatch(&mut self, event: InboundEvent) -> Vec<AppAction> {
        let channel = event.channel().to_string();
        match self.route(event) {
            Ok(actions) => actions,
            Err(e) if e.is_not_found() => {
                self.dropped_events += 1;
                tracing::warn!(%channel, dropped = self.dropped_events, "dropping event: {e}");
                vec![]
            },
            Err(e) => {
                tracing::warn!(%channel, "rejected event: {e}");
                self.set_status(e.to_string());
                vec![AppAction::Render(RenderRequest::Full)]
            },
        }
    }

    fn route_message(
        &mut self,
        channel: &str,
        from: String,
        text: String,
    ) -> Result<Vec<AppAction>, RegistryError> {
        let buffer_id = self.registry.lookup(channel)?.id();
        let line = self.registry.append_transcript_line(channel, TranscriptLine::Message {
            from,
            text,
        })?;
        let append = transcript_append(channel, line);

        let now = self.env.now();
        self.activity.register_activity(buffer_id, channel, now);
        let ranked = self.activity.ranked_names();

        Ok(vec![append, AppAction::Render(RenderRequest::ActivityIndicator { ranked })])
    }

    fn route_join(
        &mut self,
        channel: &str,
        nick: String,
        hostmask: String,
    ) -> Result<Vec<AppAction>, RegistryError> {
        let line = self.registry.append_transcript_line(channel, TranscriptLine::Join {
            nick: nick.clone(),
            hostmask,
        })?;
        let mut actions = vec![transcript_append(channel, line)];

        if self.registry.add_member(channel, nick.clone())? {
            actions.push(member_added(channel.to_string(), nick));
        }
        Ok(actions)
    }

    fn route_part(
        &mut self,
        channel: &str,
        nick: String,
        hostmask: String,
    ) -> Result<Vec<AppAction>, RegistryError> {
        let line = self.registry.append_transcript_line(channel, TranscriptLine::Part {
            nick: nick.clone(),
            hostmask,
        })?;
        let mut actions = vec![transcript_append(channel, line)];

        if self.registry.remove_member(channel, &nick)? {
            actions.push(member_removed(channel.to_string(), nick));
        }
        Ok(actions)
    }

    /// Open a buffer with an empty input line and focus it.
    fn open_buffer(
        &mut self,
        channel: String,
        buffer_id: BufferId,
        members: Vec<String>,
    ) -> Result<Vec<AppAction>, RegistryError> {
        self.registry.add_buffer(channel.clone(), buffer_id, members)?;
        self.inputs.insert(buffer_id, InputLine::new());
        let index = self.registry.len() - 1;
        self.focus.focus(index);

        Ok(vec![
            AppAction::Render(RenderRequest::BufferOpened { buffer: channel.clone() }),
            AppAction::Render(RenderRequest::SwitchFocus { buffer: channel }),
        ])
    }

    /// Close a buffer along with its input line. Evicts its activity and
    /// re-clamps focus.
    fn close_buffer(&mut self, channel: &str) -> Result<Vec<AppAction>, RegistryError> {
        let focused_before = self.focused_buffer().map(Buffer::id);
        let (index, buffer) = self.registry.remove_buffer(channel)?;
        self.inputs.remove(&buffer.id());
        self.focus.removed(index, self.registry.len());

        let mut actions =
            vec![AppAction::Render(RenderRequest::BufferClosed { buffer: channel.to_string() })];

        if self.activity.evict(buffer.id()) {
            let ranked = self.activity.ranked_names();
            actions.push(AppAction::Render(RenderRequest::ActivityIndicator { ranked }));
        }

        if focused_before == Some(buffer.id())
            && let Some(focused) = self.focused_buffer()
        {
            let name = focused.name().to_string();
            actions.push(AppAction::Render(RenderRequest::SwitchFocus { buffer: name }));
        }

        Ok(actions)
    }
}

fn transcript_append(channel: &str, line: &TranscriptLine) -> AppAction {
    AppAction::Render(RenderRequest::TranscriptAppend {
        buffer: channel.to_string(),
        line: line.to_string(),
    })
}

fn member_added(buffer: String, nick: String) -> AppAction {
    AppAction::Render(RenderRequest::MemberAdded { buffer, nick })
}

fn member_removed(buffer: String, nick: String) -> AppAction {
    AppAction::Render(RenderRequest::MemberRemoved { buffer, nick })
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use relaychat_core::{ActivityError, BufferRegistry};

    use super::*;
    use crate::AppEvent;

    #[derive(Debug, Clone, Default)]
    struct TestEnv(Arc<AtomicU64>);

    impl Environment for TestEnv {
        type Instant = u64;

        fn now(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn snapshot(channel: &str, buffer_id: BufferId) -> InboundEvent {
        InboundEvent::MemberListSnapshot {
            channel: channel.into(),
            buffer_id,
            members: vec!["me".into(), "ada".into()],
        }
    }

    fn message(channel: &str, from: &str, text: &str) -> InboundEvent {
        InboundEvent::Message { channel: channel.into(), from: from.into(), text: text.into() }
    }

    fn join(channel: &str, nick: &str) -> InboundEvent {
        InboundEvent::Join { channel: channel.into(), nick: nick.into(), hostmask: "u@h".into() }
    }

    fn part(channel: &str, nick: &str) -> InboundEvent {
        InboundEvent::Part { channel: channel.into(), nick: nick.into(), hostmask: "u@h".into() }
    }

    fn app_with(channels: &[&str]) -> App<TestEnv> {
        let mut app = App::new(TestEnv::default());
        for (id, channel) in (1..).zip(channels) {
            assert!(app.route(snapshot(channel, id)).is_ok());
        }
        app
    }

    fn transcript(app: &App<TestEnv>, channel: &str) -> Vec<String> {
        app.registry()
            .lookup(channel)
            .map(|b| b.transcript().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn message_appends_line_and_ranks_buffer() {
        let mut app = app_with(&["#a", "#b"]);

        let actions = app.route(message("#a", "ada", "hi"));

        assert_eq!(
            actions,
            Ok(vec![
                AppAction::Render(RenderRequest::TranscriptAppend {
                    buffer: "#a".into(),
                    line: "<ada> hi".into(),
                }),
                AppAction::Render(RenderRequest::ActivityIndicator { ranked: vec!["#a".into()] }),
            ])
        );
        assert_eq!(app.most_recently_active(), Ok("#a"));
    }

    #[test]
    fn message_to_unknown_channel_is_not_found_and_mutates_nothing() {
        let mut app = app_with(&["#a"]);
        assert!(app.route(message("#a", "ada", "first")).is_ok());
        let before = app.registry().clone();

        let result = app.route(message("#nope", "ada", "lost"));

        assert_eq!(result, Err(RegistryError::NotFound { name: "#nope".into() }));
        assert_eq!(transcript(&app, "#a"), transcript_of(&before, "#a"));
        assert_eq!(app.ranked_buffers(), ["#a"]);
    }

    fn transcript_of(registry: &BufferRegistry, channel: &str) -> Vec<String> {
        registry
            .lookup(channel)
            .map(|b| b.transcript().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn dispatch_counts_dropped_events() {
        let mut app = app_with(&["#a"]);

        let actions = app.handle(AppEvent::Inbound(message("#gone", "ada", "hi")));

        assert!(actions.is_empty());
        assert_eq!(app.dropped_events(), 1);
    }

    #[test]
    fn join_does_not_change_ranking() {
        let mut app = app_with(&["#a", "#b"]);
        assert!(app.route(message("#a", "ada", "hi")).is_ok());

        assert!(app.route(join("#b", "bob")).is_ok());

        assert_eq!(app.most_recently_active(), Ok("#a"));
        assert_eq!(transcript(&app, "#b"), ["  -> bob joined (u@h)"]);
        assert!(app.registry().lookup("#b").is_ok_and(|b| b.has_member("bob")));
    }

    #[test]
    fn join_on_fresh_client_leaves_tracker_empty() {
        let mut app = app_with(&["#a"]);
        assert!(app.route(join("#a", "bob")).is_ok());

        assert_eq!(app.most_recently_active(), Err(ActivityError::NoActiveBuffer));
    }

    #[test]
    fn part_removes_member_and_appends_notice() {
        let mut app = app_with(&["#a"]);

        let actions = app.route(part("#a", "ada"));

        assert_eq!(
            actions,
            Ok(vec![
                AppAction::Render(RenderRequest::TranscriptAppend {
                    buffer: "#a".into(),
                    line: "  <- ada left (u@h)".into(),
                }),
                AppAction::Render(RenderRequest::MemberRemoved {
                    buffer: "#a".into(),
                    nick: "ada".into(),
                }),
            ])
        );
        assert!(app.registry().lookup("#a").is_ok_and(|b| !b.has_member("ada")));
    }

    #[test]
    fn part_of_absent_member_only_appends_notice() {
        let mut app = app_with(&["#a"]);

        let actions = app.route(part("#a", "ghost"));

        assert!(actions.is_ok_and(|a| a.len() == 1));
        assert_eq!(app.registry().lookup("#a").map(Buffer::member_count), Ok(2));
    }

    #[test]
    fn member_list_changes_without_notice() {
        let mut app = app_with(&["#a"]);

        let add = || InboundEvent::MemberAdded { channel: "#a".into(), nick: "zed".into() };
        let added = app.route(add());
        let again = app.route(add());
        let removed =
            app.route(InboundEvent::MemberRemoved { channel: "#a".into(), nick: "nobody".into() });

        assert!(added.is_ok_and(|a| a.len() == 1));
        assert_eq!(again, Ok(vec![]));
        assert_eq!(removed, Ok(vec![]));
        assert!(transcript(&app, "#a").is_empty());
    }

    #[test]
    fn snapshot_opens_and_focuses_buffer() {
        let mut app = app_with(&["#a"]);

        let actions = app.route(snapshot("#b", 2));

        assert_eq!(
            actions,
            Ok(vec![
                AppAction::Render(RenderRequest::BufferOpened { buffer: "#b".into() }),
                AppAction::Render(RenderRequest::SwitchFocus { buffer: "#b".into() }),
            ])
        );
        assert_eq!(app.focused_buffer().map(Buffer::name), Some("#b"));
    }

    #[test]
    fn duplicate_snapshot_keeps_existing_buffer() {
        let mut app = app_with(&["#a"]);
        assert!(app.route(message("#a", "ada", "hi")).is_ok());

        let actions = app.handle(AppEvent::Inbound(snapshot("#a", 9)));

        assert_eq!(actions, vec![AppAction::Render(RenderRequest::Full)]);
        assert_eq!(app.registry().lookup("#a").map(Buffer::id), Ok(1));
        assert_eq!(transcript(&app, "#a").len(), 1);
        assert_eq!(app.dropped_events(), 0);
    }

    #[test]
    fn closing_focused_buffer_moves_focus_and_evicts_activity() {
        let mut app = app_with(&["#a", "#b", "#c"]);
        assert!(app.route(message("#c", "ada", "hi")).is_ok());
        assert_eq!(app.focused_buffer().map(Buffer::name), Some("#c"));

        let actions = app.route(InboundEvent::BufferClosed { channel: "#c".into() });

        assert_eq!(
            actions,
            Ok(vec![
                AppAction::Render(RenderRequest::BufferClosed { buffer: "#c".into() }),
                AppAction::Render(RenderRequest::ActivityIndicator { ranked: vec![] }),
                AppAction::Render(RenderRequest::SwitchFocus { buffer: "#b".into() }),
            ])
        );
        assert_eq!(app.focused_index(), Some(1));
        assert!(app.activity().is_empty());
    }

    #[test]
    fn event_after_close_is_not_found() {
        let mut app = app_with(&["#a", "#b"]);
        assert!(app.route(InboundEvent::BufferClosed { channel: "#a".into() }).is_ok());

        let result = app.route(message("#a", "ada", "late"));

        assert!(result.is_err_and(|e| e.is_not_found()));
        assert_eq!(app.registry().lookup("#b").map(Buffer::id), Ok(2));
        assert_eq!(app.focused_buffer().map(Buffer::name), Some("#b"));
    }
}
