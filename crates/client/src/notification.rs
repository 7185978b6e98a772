//! Short-lived user notifications.

use std::time::{Duration, Instant};

/// How long a toast stays up before it is pruned.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME)
    }
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            lifetime,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message.into(), ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message.into(), ToastKind::Error)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop every toast older than the lifetime at `now`.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < lifetime);
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Remove and return everything currently shown.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    // Expired toasts are dropped whenever a new one is shown.
    fn push(&mut self, message: String, kind: ToastKind) -> u64 {
        let now = Instant::now();
        self.prune(now);

        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message,
            kind,
            created_at: now,
        });
        id
    }
}
