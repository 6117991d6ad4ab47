//! Shared application state handed to every request handler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use marquee_accounts::UserRegistry;
use marquee_jsonlog::Logger;

use crate::config::Config;

/// Everything the handlers share, hung off an `Arc` behind an axum
/// `Extension` layer.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub logger: Logger,
    pub users: UserRegistry,
    pub metrics: RequestMetrics,
}

impl AppState {
    pub fn new(config: Config, logger: Logger) -> Self {
        Self {
            config,
            logger,
            users: UserRegistry::new(),
            metrics: RequestMetrics::default(),
        }
    }
}

/// Process-wide request counters exposed on `/debug/vars` and pushed to
/// Graphite by the gauge reporter.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    received: AtomicU64,
    sent: AtomicU64,
    processing_time_us: AtomicU64,
}

impl RequestMetrics {
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self, handler_time: Duration) {
        self.sent.fetch_add(1, Ordering::Relaxed);
        self.processing_time_us
            .fetch_add(handler_time.as_micros() as u64, Ordering::Relaxed);
    }

    /// Consistent-enough copy of the counters. Individual loads are relaxed,
    /// so a snapshot taken mid-request may show one more request received
    /// than responses sent.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests_received: self.received.load(Ordering::Relaxed),
            total_responses_sent: self.sent.load(Ordering::Relaxed),
            total_processing_time_us: self.processing_time_us.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_requests_received: u64,
    pub total_responses_sent: u64,
    pub total_processing_time_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = RequestMetrics::default();
        let snapshot = metrics.snapshot();

        assert_eq!(snapshot.total_requests_received, 0);
        assert_eq!(snapshot.total_responses_sent, 0);
        assert_eq!(snapshot.total_processing_time_us, 0);
    }

    #[test]
    fn recording_accumulates() {
        let metrics = RequestMetrics::default();

        metrics.record_received();
        metrics.record_received();
        metrics.record_sent(Duration::from_micros(150));
        metrics.record_sent(Duration::from_micros(50));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests_received, 2);
        assert_eq!(snapshot.total_responses_sent, 2);
        assert_eq!(snapshot.total_processing_time_us, 200);
    }
}
