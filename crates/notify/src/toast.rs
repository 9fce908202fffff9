use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::Notifier;

/// Success toast display duration in milliseconds.
const SUCCESS_DURATION_MS: u64 = 4000;

/// Failure toast display duration in milliseconds.
const FAILURE_DURATION_MS: u64 = 6000;

/// Whether a toast reports a confirmed write or a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u64,
}

/// In-memory toast queue with monotonic ID assignment.
///
/// Timer-based dismissal belongs to whatever renders the queue; this only
/// holds toasts in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast and return its ID.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, duration_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            duration_ms,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message, SUCCESS_DURATION_MS)
    }

    pub fn failure(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Failure, message, FAILURE_DURATION_MS)
    }

    /// Dismiss a toast by ID. Returns `true` if it was queued.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let len_before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != len_before
    }

    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Most recently queued toast.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Take every queued toast, oldest first. IDs keep increasing afterwards.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// A [`ToastQueue`] shared between controllers and the view that renders it.
#[derive(Debug, Clone, Default)]
pub struct SharedToasts {
    inner: Arc<Mutex<ToastQueue>>,
}

impl SharedToasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the queue. A poisoned lock still yields the queue; toasts are
    /// plain data.
    pub fn lock(&self) -> MutexGuard<'_, ToastQueue> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for SharedToasts {
    fn success(&self, message: &str) {
        let id = self.lock().success(message);
        tracing::debug!(toast_id = id, text = message, "queued success toast");
    }

    fn failure(&self, message: &str) {
        let id = self.lock().failure(message);
        tracing::debug!(toast_id = id, text = message, "queued failure toast");
    }
}
