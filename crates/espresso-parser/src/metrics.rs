//! Optional process-wide parse metrics.
//!
//! Collection is off by default and every recording site is a single
//! relaxed atomic load when disabled. Counters are process-wide and safe
//! under concurrent parser instances.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

static ENABLED: AtomicBool = AtomicBool::new(false);

static PARSE_TIME_NANOS: AtomicU64 = AtomicU64::new(0);
static TOKENIZE_TIME_NANOS: AtomicU64 = AtomicU64::new(0);
static FILES_PROCESSED: AtomicU64 = AtomicU64::new(0);
static NODES_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static TOKENS_CREATED: AtomicU64 = AtomicU64::new(0);
static PARSE_ERRORS: AtomicU64 = AtomicU64::new(0);
static RECOVERED_ERRORS: AtomicU64 = AtomicU64::new(0);
static PEAK_NODE_BYTES: AtomicU64 = AtomicU64::new(0);

/// Turn metrics collection on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub(crate) fn record_parse(duration: Duration, nodes: u64, node_bytes: u64, failed: bool) {
    if !enabled() {
        return;
    }

    PARSE_TIME_NANOS.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    FILES_PROCESSED.fetch_add(1, Ordering::Relaxed);
    NODES_ALLOCATED.fetch_add(nodes, Ordering::Relaxed);
    if failed {
        PARSE_ERRORS.fetch_add(1, Ordering::Relaxed);
    }
    PEAK_NODE_BYTES.fetch_max(node_bytes, Ordering::Relaxed);
}

pub(crate) fn record_tokenize(duration: Duration, tokens: u64) {
    if !enabled() {
        return;
    }

    TOKENIZE_TIME_NANOS.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    TOKENS_CREATED.fetch_add(tokens, Ordering::Relaxed);
}

/// An immutable snapshot of the process-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_parse_time: Duration,
    pub total_tokenize_time: Duration,
    pub files_processed: u64,
    pub nodes_allocated: u64,
    pub tokens_created: u64,
    pub parse_errors: u64,
    /// Always zero: the parser aborts at the first error and never
    /// recovers.
    pub recovered_errors: u64,
    /// Largest arena footprint observed for a single parse, in bytes.
    pub peak_node_bytes: u64,
}

impl MetricsSnapshot {
    /// Mean wall-clock time per processed file.
    pub fn average_parse_time(&self) -> Duration {
        if self.files_processed == 0 {
            return Duration::ZERO;
        }
        self.total_parse_time / self.files_processed as u32
    }

    /// Mean node count per processed file.
    pub fn average_nodes_per_file(&self) -> u64 {
        if self.files_processed == 0 {
            return 0;
        }
        self.nodes_allocated / self.files_processed
    }
}

/// Take a snapshot of the counters.
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        total_parse_time: Duration::from_nanos(PARSE_TIME_NANOS.load(Ordering::Relaxed)),
        total_tokenize_time: Duration::from_nanos(TOKENIZE_TIME_NANOS.load(Ordering::Relaxed)),
        files_processed: FILES_PROCESSED.load(Ordering::Relaxed),
        nodes_allocated: NODES_ALLOCATED.load(Ordering::Relaxed),
        tokens_created: TOKENS_CREATED.load(Ordering::Relaxed),
        parse_errors: PARSE_ERRORS.load(Ordering::Relaxed),
        recovered_errors: RECOVERED_ERRORS.load(Ordering::Relaxed),
        peak_node_bytes: PEAK_NODE_BYTES.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disabled_metrics_record_nothing() {
        set_enabled(false);
        let before = snapshot();
        record_parse(Duration::from_millis(5), 100, 1600, false);
        assert_eq!(before, snapshot());
    }

    #[test]
    fn snapshot_averages_handle_zero_files() {
        let snapshot = MetricsSnapshot {
            total_parse_time: Duration::ZERO,
            total_tokenize_time: Duration::ZERO,
            files_processed: 0,
            nodes_allocated: 0,
            tokens_created: 0,
            parse_errors: 0,
            recovered_errors: 0,
            peak_node_bytes: 0,
        };
        assert_eq!(snapshot.average_parse_time(), Duration::ZERO);
        assert_eq!(snapshot.average_nodes_per_file(), 0);
    }
}
