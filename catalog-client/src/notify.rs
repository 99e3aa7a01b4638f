//! User-facing notifications
//!
//! Stores record failures as state. A failed optimistic delete additionally
//! needs the user's attention, so it is pushed through a [`Notifier`].

use std::fmt;

/// A blocking notice for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Resource kind the notice is about (e.g. "category")
    pub resource: &'static str,
    /// Short message to show
    pub message: String,
    /// Underlying error text, if any
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(resource: &'static str, message: impl Into<String>) -> Self {
        Self {
            resource,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

/// Notification sink injected into the stores
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Default notifier: logs the notice at `error` level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::error!(
            resource = notice.resource,
            detail = notice.detail.as_deref().unwrap_or(""),
            "{}",
            notice.message
        );
    }
}
