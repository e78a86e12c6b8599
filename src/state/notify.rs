/// Notification queue shown on top of the studio
///
/// The workflow controller never draws anything itself: it hands
/// `Notification`s back to the shell, which pushes them here.
/// The queue keeps the newest `limit` entries and expires each one
/// after `ttl`.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Variant::Success)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Variant::Info)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Variant::Destructive)
    }

    fn new(title: impl Into<String>, description: impl Into<String>, variant: Variant) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }
}

/// A notification currently on screen
#[derive(Debug, Clone)]
pub struct Shown {
    pub id: u64,
    pub notification: Notification,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    entries: VecDeque<Shown>,
    limit: usize,
    ttl: Duration,
    next_id: u64,
}

impl Notifications {
    pub fn new(limit: usize, ttl: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
            ttl,
            next_id: 0,
        }
    }

    /// Show a notification, evicting the oldest one when full
    pub fn push(&mut self, notification: Notification, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(Shown {
            id,
            notification,
            expires_at: now + self.ttl,
        });

        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|shown| shown.id != id);
    }

    /// Drop every entry whose lifetime has run out
    pub fn prune(&mut self, now: Instant) {
        self.entries.retain(|shown| shown.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shown> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
