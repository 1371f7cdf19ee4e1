//! Buffer registry.
//!
//! The [`BufferRegistry`] is the source of truth for which buffers exist. It
//! is an arena keyed by [`BufferId`] with a secondary name index that
//! enforces name uniqueness, plus the presentation order used for positional
//! navigation.
//!
//! Removing a buffer never changes the identifier of another buffer, so
//! anything holding a [`BufferId`] (activity records, outbound sends in
//! flight) either still resolves to the same buffer or gets
//! [`RegistryError::NotFoundId`].

use std::collections::{HashMap, hash_map::Entry};

use crate::{Buffer, BufferId, RegistryError, TranscriptLine};

/// Owns all open buffers.
#[derive(Debug, Clone, Default)]
pub struct BufferRegistry {
    /// Buffer arena.
    buffers: HashMap<BufferId, Buffer>,
    /// Name → id. Enforces unique names.
    names: HashMap<String, BufferId>,
    /// Presentation (insertion) order.
    order: Vec<BufferId>,
}

impl BufferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a buffer and append it to the presentation order.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateBuffer`] if `name` is already open
    /// - [`RegistryError::DuplicateBufferId`] if `id` is already in use
    pub fn add_buffer<M>(
        &mut self,
        name: impl Into<String>,
        id: BufferId,
        members: M,
    ) -> Result<&Buffer, RegistryError>
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(RegistryError::DuplicateBuffer { name });
        }

        let buffer = match self.buffers.entry(id) {
            Entry::Occupied(_) => return Err(RegistryError::DuplicateBufferId { id }),
            Entry::Vacant(entry) => {
                let members = members.into_iter().map(Into::into).collect();
                entry.insert(Buffer::new(id, name.clone(), members))
            },
        };

        tracing::debug!(buffer = %name, id, "buffer opened");
        self.names.insert(name, id);
        self.order.push(id);
        Ok(buffer)
    }

    /// Look up a buffer by name.
    pub fn lookup(&self, name: &str) -> Result<&Buffer, RegistryError> {
        self.names
            .get(name)
            .and_then(|id| self.buffers.get(id))
            .ok_or_else(|| RegistryError::NotFound { name: name.to_string() })
    }

    /// Look up a buffer by identifier.
    pub fn lookup_id(&self, id: BufferId) -> Result<&Buffer, RegistryError> {
        self.buffers.get(&id).ok_or(RegistryError::NotFoundId { id })
    }

    /// Add `nick` to the named buffer.
    ///
    /// Returns `false` if `nick` was already a member.
    pub fn add_member(
        &mut self,
        name: &str,
        nick: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        Ok(self.lookup_mut(name)?.insert_member(nick.into()))
    }

    /// Remove `nick` from the named buffer.
    ///
    /// Removing an absent member is a no-op and returns `false`.
    pub fn remove_member(&mut self, name: &str, nick: &str) -> Result<bool, RegistryError> {
        Ok(self.lookup_mut(name)?.remove_member(nick))
    }

    /// Append a line to the named buffer's transcript.
    pub fn append_transcript_line(
        &mut self,
        name: &str,
        line: TranscriptLine,
    ) -> Result<&TranscriptLine, RegistryError> {
        Ok(self.lookup_mut(name)?.push_line(line))
    }

    /// Close the named buffer.
    ///
    /// Returns the removed buffer together with the presentation index it
    /// occupied, so focus can be re-clamped by the caller.
    pub fn remove_buffer(&mut self, name: &str) -> Result<(usize, Buffer), RegistryError> {
        let id = self
            .names
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound { name: name.to_string() })?;

        let buffer =
            self.buffers.remove(&id).ok_or_else(|| RegistryError::NotFound { name: name.into() })?;
        let index = self.position(id).unwrap_or(self.order.len());
        self.order.retain(|&other| other != id);

        tracing::debug!(buffer = %name, id, "buffer closed");
        Ok((index, buffer))
    }

    /// Buffer at `index` in presentation order.
    pub fn get(&self, index: usize) -> Option<&Buffer> {
        self.order.get(index).and_then(|id| self.buffers.get(id))
    }

    /// Presentation index of `id`.
    pub fn position(&self, id: BufferId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Buffers in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.order.iter().filter_map(|id| self.buffers.get(id))
    }

    /// Number of open buffers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no buffers are open.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut Buffer, RegistryError> {
        self.names
            .get(name)
            .and_then(|id| self.buffers.get_mut(id))
            .ok_or_else(|| RegistryError::NotFound { name: name.to_string() })
    }
}
