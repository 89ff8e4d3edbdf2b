//! Debounced free-text search input
//!
//! The input is clock-driven: callers pass `Instant`s in and poll for the
//! debounced value, which keeps the event loop in charge of time.

use std::time::{Duration, Instant};

/// Quiet period before a typed value is emitted
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Search box state with a cancellable debounce timer
#[derive(Debug, Clone)]
pub struct SearchInput {
    buffer: String,
    cursor_position: usize,
    /// Last value known to the controller
    synced: String,
    deadline: Option<Instant>,
    delay: Duration,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchInput {
    pub fn new(delay: Duration) -> Self {
        Self {
            buffer: String::new(),
            cursor_position: 0,
            synced: String::new(),
            deadline: None,
            delay,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Re-sync with the controller's value, e.g. after a programmatic clear
    pub fn sync(&mut self, value: &str) {
        if self.synced != value {
            self.synced = value.to_string();
            self.buffer = value.to_string();
            self.cursor_position = self.buffer.chars().count();
            self.deadline = None;
        }
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        let byte_idx = self.byte_index(self.cursor_position);
        self.buffer.insert(byte_idx, c);
        self.cursor_position += 1;
        self.restart_timer(now);
    }

    pub fn delete_char(&mut self, now: Instant) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.byte_index(self.cursor_position);
            self.buffer.remove(byte_idx);
            self.restart_timer(now);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Clear the box and emit the empty value immediately
    pub fn clear(&mut self) -> Option<String> {
        self.buffer.clear();
        self.cursor_position = 0;
        self.deadline = None;
        self.emit()
    }

    /// Emit the buffered value once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.emit()
            }
            _ => None,
        }
    }

    fn emit(&mut self) -> Option<String> {
        if self.buffer == self.synced {
            return None;
        }
        self.synced = self.buffer.clone();
        Some(self.buffer.clone())
    }

    fn restart_timer(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
