use std::collections::VecDeque;
use std::sync::Arc;

use crate::clock::Clock;

/// Maximum number of samples the ledger retains.
pub const MAX_SAMPLES: usize = 20;

/// One recorded timing observation tagged with connection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    /// Unix epoch milliseconds at record time; only relative ordering matters.
    pub timestamp_ms: u64,
    /// Full round trip as observed by the client.
    pub total_ms: u64,
    /// Database portion, as reported by the server.
    pub db_ms: u64,
    pub is_hyperdrive: bool,
}

/// Timing fields of a sample before the ledger stamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProbe {
    pub total_ms: u64,
    pub db_ms: u64,
    pub is_hyperdrive: bool,
}

/// Bounded FIFO of latency samples. Owned by the session that records them;
/// readers work from [`LatencyLedger::snapshot`].
pub struct LatencyLedger {
    samples: VecDeque<LatencySample>,
    clock: Arc<dyn Clock>,
}

impl LatencyLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { samples: VecDeque::with_capacity(MAX_SAMPLES), clock }
    }

    /// Stamp `probe` with the current time and append it, evicting from the
    /// front so at most [`MAX_SAMPLES`] remain. `db_ms > total_ms` is not
    /// rejected; the ledger records whatever the caller measured.
    pub fn append(&mut self, probe: LatencyProbe) {
        while self.samples.len() >= MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(LatencySample {
            timestamp_ms: self.clock.unix_now_millis(),
            total_ms: probe.total_ms,
            db_ms: probe.db_ms,
            is_hyperdrive: probe.is_hyperdrive,
        });
    }

    /// Drop every sample. Idempotent.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current samples, oldest first.
    pub fn snapshot(&self) -> Vec<LatencySample> {
        self.samples.iter().copied().collect()
    }
}

/// Summary statistics over a sequence of samples, split by connection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_requests: usize,
    pub hyperdrive_requests: usize,
    pub direct_requests: usize,
    pub avg_hyperdrive_total: Option<u64>,
    pub avg_hyperdrive_db: Option<u64>,
    pub avg_direct_total: Option<u64>,
    pub avg_direct_db: Option<u64>,
    /// The most recently appended sample, `None` when the ledger is empty.
    pub last_sample: Option<LatencySample>,
}

/// Compute summary statistics over `samples` (oldest first).
///
/// Averages are rounded half-away-from-zero to the nearest millisecond. A
/// subset with no samples reports `None` for both of its averages: "no data
/// yet" is distinct from "measured zero latency".
pub fn compute_stats(samples: &[LatencySample]) -> LedgerStats {
    let hyperdrive: Vec<&LatencySample> = samples.iter().filter(|s| s.is_hyperdrive).collect();
    let direct: Vec<&LatencySample> = samples.iter().filter(|s| !s.is_hyperdrive).collect();

    LedgerStats {
        total_requests: samples.len(),
        hyperdrive_requests: hyperdrive.len(),
        direct_requests: direct.len(),
        avg_hyperdrive_total: rounded_avg(&hyperdrive, |s| s.total_ms),
        avg_hyperdrive_db: rounded_avg(&hyperdrive, |s| s.db_ms),
        avg_direct_total: rounded_avg(&direct, |s| s.total_ms),
        avg_direct_db: rounded_avg(&direct, |s| s.db_ms),
        last_sample: samples.last().copied(),
    }
}

fn rounded_avg(samples: &[&LatencySample], field: impl Fn(&LatencySample) -> u64) -> Option<u64> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.iter().map(|s| field(s)).sum();
    Some((sum as f64 / samples.len() as f64).round() as u64)
}

/// How the accelerated path compares to the direct path on average database
/// time. A display layer must keep all three states apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Improvement {
    /// Hyperdrive is faster by this percentage (always positive).
    Faster(u32),
    /// Both averages are present but hyperdrive is no faster.
    NoDifference,
    /// One of the two averages is missing.
    InsufficientData,
}

/// Percentage improvement of the hyperdrive database average over the direct
/// one: `round((direct - hyperdrive) / direct * 100)`.
pub fn db_improvement(stats: &LedgerStats) -> Improvement {
    match (stats.avg_direct_db, stats.avg_hyperdrive_db) {
        (Some(direct), Some(hyperdrive)) => {
            if direct == 0 {
                // Nothing can improve on a zero-millisecond average.
                return Improvement::NoDifference;
            }
            let percent =
                ((direct as f64 - hyperdrive as f64) / direct as f64 * 100.0).round() as i64;
            if percent > 0 {
                Improvement::Faster(percent as u32)
            } else {
                Improvement::NoDifference
            }
        }
        _ => Improvement::InsufficientData,
    }
}
