//! Alerts
//!
//! Dismissible messages shown after an action succeeds or fails.

use serde::Serialize;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    /// The action went through
    Success,

    /// The action failed
    Error,
}

/// A single alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Severity
    pub kind: AlertKind,

    /// Message shown to the user
    pub message: String,
}

/// Alerts waiting to be dismissed, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alerts {
    alerts: Vec<Alert>,
}

impl Alerts {
    /// No alerts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a success alert.
    pub fn push_success(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Success, message.into());
    }

    /// Push an error alert.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Error, message.into());
    }

    fn push(&mut self, kind: AlertKind, message: String) {
        self.alerts.push(Alert { kind, message });
    }

    /// Dismiss the alert at `index`, returning it.
    pub fn dismiss(&mut self, index: usize) -> Option<Alert> {
        (index < self.alerts.len()).then(|| self.alerts.remove(index))
    }

    /// Alerts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Most recent alert.
    pub fn last(&self) -> Option<&Alert> {
        self.alerts.last()
    }

    /// Number of alerts.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether there are no alerts.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
