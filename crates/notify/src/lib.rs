//! Notification side channel for library actions.
//!
//! Library writes report their outcome through a [`Notifier`]; the hosting
//! view decides how to show it. [`ToastQueue`] is the in-memory queue a UI
//! renders transient notifications from, and [`SharedToasts`] plugs it into
//! a controller.

pub mod toast;

pub use toast::{SharedToasts, Toast, ToastKind, ToastQueue};

/// Receives the outcome message of every library write.
pub trait Notifier: Send + Sync {
    /// A write was confirmed by the server.
    fn success(&self, message: &str);

    /// A write failed; `message` is what the user should read.
    fn failure(&self, message: &str);
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn failure(&self, _message: &str) {}
}
