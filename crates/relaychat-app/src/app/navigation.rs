//! Buffer navigation.
//!
//! Cycles focus through the presentation order. Every successful move emits a
//! [`RenderRequest::SwitchFocus`], even when only one buffer is open and
//! focus lands where it was.

use relaychat_core::Environment;

use super::App;
use crate::{AppAction, RenderRequest};

impl<E: Environment> App<E> {
    /// Focus the next buffer, wrapping from last to first.
    pub fn focus_next(&mut self) -> Vec<AppAction> {
        let index = self.focus.next(self.registry.len());
        self.switch_focus(index)
    }

    /// Focus the previous buffer, wrapping from first to last.
    pub fn focus_previous(&mut self) -> Vec<AppAction> {
        let index = self.focus.previous(self.registry.len());
        self.switch_focus(index)
    }

    fn switch_focus(&self, index: Option<usize>) -> Vec<AppAction> {
        let Some(buffer) = index.and_then(|index| self.registry.get(index)) else {
            return vec![];
        };

        tracing::trace!(buffer = buffer.name(), index, "focus moved");
        vec![AppAction::Render(RenderRequest::SwitchFocus { buffer: buffer.name().to_string() })]
    }
}
