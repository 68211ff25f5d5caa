//! Bounded log of recent human-readable messages.
//!
//! Front-ends show these to explain what just happened (a number was read as
//! hex, a definition was saved). Nothing reads them back to make decisions.

use std::collections::VecDeque;

/// Number of messages kept by default
pub const ADVISORY_CAPACITY: usize = 6;

/// Fixed-capacity FIFO of the most recent messages
#[derive(Debug, Clone)]
pub struct AdvisoryLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl Default for AdvisoryLog {
    fn default() -> Self {
        Self::with_capacity(ADVISORY_CAPACITY)
    }
}

impl AdvisoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, evicting the oldest when full. Empty messages are ignored.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() || self.capacity == 0 {
            return;
        }

        tracing::info!(target: "bitdef::advisory", "{}", message);

        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Messages, oldest first
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// All messages as text, one per line
    pub fn render(&self) -> String {
        self.messages.iter().fold(String::new(), |mut out, message| {
            out.push_str(message);
            out.push('\n');
            out
        })
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

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
