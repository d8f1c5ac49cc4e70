//! Fire-and-forget user notifications (toasts).

use std::sync::{Mutex, PoisonError};

use crate::sync::types::{Notification, NotificationKind};

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => log::error!("[NOTIFY] {}", notification.message),
            NotificationKind::Success => log::info!("[NOTIFY] {}", notification.message),
        }
    }
}

/// Keeps every notification; handy for tests and for front-ends that drain
/// toasts on their own schedule.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        log::debug!("[NOTIFY] recorded {:?}", notification);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
