//! # Ready Alerts
//!
//! What the user sees and hears when an order becomes ready: an in-app banner, a sound (only once
//! the audio session has been unlocked by a user gesture) and a system notification (only when the
//! user granted permission). Delivery goes through an [`AlertSink`] so the session does not care
//! whether alerts end up in a log or in a test's buffer.

pub mod push;

pub use push::{MalformedPayload, PushPayload};

use std::sync::{Arc, Mutex};
use tracing::info;

/// Playback is refused until the user has interacted with the page once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioSession {
    unlocked: bool,
}

impl AudioSession {
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

/// One user-facing signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Banner(String),
    Sound,
    System(PushPayload),
}

/// Where alerts are delivered.
pub trait AlertSink: Send + Sync {
    fn deliver(&self, alert: Alert);
}

/// Writes alerts to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn deliver(&self, alert: Alert) {
        match alert {
            Alert::Banner(text) => info!(%text, "Banner"),
            Alert::Sound => info!("Sound"),
            Alert::System(payload) => info!(title = %payload.title, body = %payload.body, "System notification"),
        }
    }
}

/// Keeps every alert it receives. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlertSink {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn banners(&self) -> usize {
        self.alerts()
            .iter()
            .filter(|a| matches!(a, Alert::Banner(_)))
            .count()
    }
}

impl AlertSink for RecordingAlertSink {
    fn deliver(&self, alert: Alert) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_starts_locked() {
        let mut audio = AudioSession::default();
        assert!(!audio.is_unlocked());
        audio.unlock();
        assert!(audio.is_unlocked());
    }

    #[test]
    fn test_recording_sink_clones_share_buffer() {
        let sink = RecordingAlertSink::new();
        let shared = sink.clone();
        shared.deliver(Alert::Banner("Order ready".into()));
        shared.deliver(Alert::Sound);
        assert_eq!(sink.banners(), 1);
        assert_eq!(sink.alerts().len(), 2);
    }
}
