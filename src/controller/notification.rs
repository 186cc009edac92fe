use std::time::{
    Duration,
    Instant,
};

/// A single transient message. Showing a new one replaces the old one and
/// restarts the clear timer.
#[derive(Debug, Clone)]
pub struct Notification {
    message: Option<String>,
    clear_at: Option<Instant>,
    delay: Duration,
}

impl Notification {
    pub fn new(delay: Duration) -> Self {
        Self { message: None, clear_at: None, delay }
    }

    pub fn show(&mut self, message: Option<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: Option<String>, now: Instant) {
        match message {
            Some(message) => {
                self.message = Some(message);
                self.clear_at = Some(now + self.delay);
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.clear_at = None;
    }

    /// Clears an expired message. Returns how long the current one has left.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let clear_at = self.clear_at?;
        if now >= clear_at {
            self.clear();
            return None;
        }
        Some(clear_at - now)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_displaying(&self) -> bool {
        self.message.is_some()
    }
}
