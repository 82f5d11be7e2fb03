use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

static RPC_ISSUED_TOTAL: AtomicU64 = AtomicU64::new(0);
static RPC_FAILED_TOTAL: AtomicU64 = AtomicU64::new(0);
static NOTIFICATIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static RPC_FAILED_BY_CALL: OnceLock<Mutex<HashMap<&'static str, u64>>> = OnceLock::new();

fn rpc_failed_by_call() -> &'static Mutex<HashMap<&'static str, u64>> {
    RPC_FAILED_BY_CALL.get_or_init(|| Mutex::new(HashMap::new()))
}

fn lock_rpc_failed_by_call() -> std::sync::MutexGuard<'static, HashMap<&'static str, u64>> {
    match rpc_failed_by_call().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub fn rpc_issued(_call: &'static str) {
    RPC_ISSUED_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn rpc_failed(call: &'static str) {
    RPC_FAILED_TOTAL.fetch_add(1, Ordering::Relaxed);
    let mut by_call = lock_rpc_failed_by_call();
    let entry = by_call.entry(call).or_insert(0);
    *entry = entry.saturating_add(1);
}

pub fn notification_emitted() {
    NOTIFICATIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

#[derive(Clone, Debug, Default)]
pub struct MetricsSnapshot {
    pub rpc_issued: u64,
    pub rpc_failed: u64,
    pub notifications_emitted: u64,
    pub failed_by_call: Vec<(&'static str, u64)>,
}

pub fn metrics_snapshot() -> MetricsSnapshot {
    let mut failed_by_call: Vec<(&'static str, u64)> = lock_rpc_failed_by_call()
        .iter()
        .map(|(call, count)| (*call, *count))
        .collect();
    failed_by_call.sort_by(|a, b| a.0.cmp(b.0));

    MetricsSnapshot {
        rpc_issued: RPC_ISSUED_TOTAL.load(Ordering::Relaxed),
        rpc_failed: RPC_FAILED_TOTAL.load(Ordering::Relaxed),
        notifications_emitted: NOTIFICATIONS_TOTAL.load(Ordering::Relaxed),
        failed_by_call,
    }
}

/// Opt-in tracing setup for embedding shells; honors `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forgather=info")),
        )
        .try_init();
}

#[cfg(test)]
fn reset_for_tests() {
    RPC_ISSUED_TOTAL.store(0, Ordering::Relaxed);
    RPC_FAILED_TOTAL.store(0, Ordering::Relaxed);
    NOTIFICATIONS_TOTAL.store(0, Ordering::Relaxed);
    lock_rpc_failed_by_call().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are process-global and other tests bump them concurrently,
    // so assert per-call entries with names only this test uses.
    #[test]
    fn failures_are_counted_per_call() {
        reset_for_tests();

        rpc_issued("obs_test_call");
        rpc_issued("obs_test_call");
        rpc_failed("obs_test_call");
        rpc_failed("obs_test_other");

        let snapshot = metrics_snapshot();
        assert!(snapshot.rpc_issued >= 2);
        assert!(snapshot.rpc_failed >= 2);
        let count = |name| {
            snapshot
                .failed_by_call
                .iter()
                .find(|(call, _)| *call == name)
                .map(|(_, n)| *n)
        };
        assert_eq!(count("obs_test_call"), Some(1));
        assert_eq!(count("obs_test_other"), Some(1));
    }
}
