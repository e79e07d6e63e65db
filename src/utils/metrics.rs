//! Observability and Metrics
//!
//! Counters for the handshake filter. Every handshake ends in exactly one
//! terminal outcome: rewritten, or passed through (with an optional failure
//! reason recorded alongside).
//!
//! Uses atomic counters for thread-safe metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for handshake filtering
#[derive(Debug)]
pub struct Metrics {
    /// Hostnames handed to the filter
    pub handshakes_total: AtomicU64,
    /// Hostnames that carried an embedded payload
    pub payloads_detected: AtomicU64,
    /// Hostnames rewritten with a resolved identity
    pub rewrites: AtomicU64,
    /// Hostnames returned unchanged
    pub pass_throughs: AtomicU64,
    /// Payloads that failed to decrypt
    pub decrypt_failures: AtomicU64,
    /// Payloads with the wrong field count
    pub invalid_payloads: AtomicU64,
    /// Payloads with a corrupt numeric or linked-player field
    pub decode_errors: AtomicU64,
    /// Remainders too short to substitute into
    pub short_remainders: AtomicU64,
    start_time: Instant,
}

/// Point-in-time copy of [`Metrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub handshakes_total: u64,
    pub payloads_detected: u64,
    pub rewrites: u64,
    pub pass_throughs: u64,
    pub decrypt_failures: u64,
    pub invalid_payloads: u64,
    pub decode_errors: u64,
    pub short_remainders: u64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            handshakes_total: AtomicU64::new(0),
            payloads_detected: AtomicU64::new(0),
            rewrites: AtomicU64::new(0),
            pass_throughs: AtomicU64::new(0),
            decrypt_failures: AtomicU64::new(0),
            invalid_payloads: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            short_remainders: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn handshake_seen(&self) {
        self.handshakes_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn payload_detected(&self) {
        self.payloads_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rewritten(&self) {
        self.rewrites.fetch_add(1, Ordering::Relaxed);
    }

    pub fn passed_through(&self) {
        self.pass_throughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrypt_failed(&self) {
        self.decrypt_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn invalid_payload(&self) {
        self.invalid_payloads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn short_remainder(&self) {
        self.short_remainders.fetch_add(1, Ordering::Relaxed);
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            handshakes_total: self.handshakes_total.load(Ordering::Relaxed),
            payloads_detected: self.payloads_detected.load(Ordering::Relaxed),
            rewrites: self.rewrites.load(Ordering::Relaxed),
            pass_throughs: self.pass_throughs.load(Ordering::Relaxed),
            decrypt_failures: self.decrypt_failures.load(Ordering::Relaxed),
            invalid_payloads: self.invalid_payloads.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            short_remainders: self.short_remainders.load(Ordering::Relaxed),
        }
    }

    /// Share of handshakes that were rewritten (0.0 - 1.0)
    pub fn rewrite_rate(&self) -> f64 {
        let total = self.handshakes_total.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        self.rewrites.load(Ordering::Relaxed) as f64 / total as f64
    }

    /// Log all metrics
    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            uptime_secs = self.uptime_secs(),
            handshakes_total = s.handshakes_total,
            payloads_detected = s.payloads_detected,
            rewrites = s.rewrites,
            pass_throughs = s.pass_throughs,
            decrypt_failures = s.decrypt_failures,
            invalid_payloads = s.invalid_payloads,
            decode_errors = s.decode_errors,
            short_remainders = s.short_remainders,
            rewrite_rate = %format!("{:.2}%", self.rewrite_rate() * 100.0),
            "Handshake filter metrics"
        );
    }

    /// Reset all counters (for testing)
    #[cfg(test)]
    pub fn reset(&self) {
        self.handshakes_total.store(0, Ordering::Relaxed);
        self.payloads_detected.store(0, Ordering::Relaxed);
        self.rewrites.store(0, Ordering::Relaxed);
        self.pass_throughs.store(0, Ordering::Relaxed);
        self.decrypt_failures.store(0, Ordering::Relaxed);
        self.invalid_payloads.store(0, Ordering::Relaxed);
        self.decode_errors.store(0, Ordering::Relaxed);
        self.short_remainders.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
