//! Conversation memory: a sliding window over the chat history.
//!
//! Holds at most `capacity` messages; appending past capacity evicts the
//! oldest message first. Single-writer: the owning agent mutates it through
//! `&mut self`, so no locking is involved.

use std::collections::VecDeque;
use ressa_core::message::{Message, Role};
use tracing::debug;

pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Bounded FIFO log of role-tagged messages.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl ConversationMemory {
    /// Create a memory holding at most `capacity` messages (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        debug!(capacity, "Initialized conversation memory");
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, evicting the oldest if the window is full.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message::new(role, content));
        debug!(%role, len = self.messages.len(), "Added message to memory");
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Role::User, content);
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(Role::Assistant, content);
    }

    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.add_message(Role::System, content);
    }

    /// Snapshot of the retained messages, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Render the last `n` messages as `"Role: content"` lines.
    pub fn recent_context(&self, n: usize) -> String {
        let skip = self.messages.len().saturating_sub(n);
        self.messages
            .iter()
            .skip(skip)
            .map(|m| format!("{}: {}", m.role().label(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drop every message. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.messages.clear();
        debug!("Cleared conversation memory");
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl std::fmt::Display for ConversationMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConversationMemory({} messages)", self.messages.len())
    }
}
