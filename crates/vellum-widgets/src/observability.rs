//! Reconciler counters.
//!
//! Process-wide monotonic counters over the reconciler's load-bearing
//! transitions, with a serializable snapshot for diagnostics endpoints
//! and tests. Counting is always-on; the cost is a relaxed atomic
//! increment per event.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub const RENDER_TOTAL: &str = "render_total";
pub const RECONCILE_FRESH_TOTAL: &str = "reconcile_fresh_total";
pub const RECONCILE_ADOPTED_TOTAL: &str = "reconcile_adopted_total";
pub const EVENT_DISPATCH_TOTAL: &str = "event_dispatch_total";
pub const INVALID_HANDLER_TOTAL: &str = "invalid_handler_total";
pub const TASK_SUBMIT_TOTAL: &str = "task_submit_total";
pub const TASK_DISPOSE_TOTAL: &str = "task_dispose_total";
pub const CAPTURE_TRANSITION_TOTAL: &str = "capture_transition_total";

static RENDERS: AtomicU64 = AtomicU64::new(0);
static RECONCILE_FRESH: AtomicU64 = AtomicU64::new(0);
static RECONCILE_ADOPTED: AtomicU64 = AtomicU64::new(0);
static EVENT_DISPATCHES: AtomicU64 = AtomicU64::new(0);
static INVALID_HANDLERS: AtomicU64 = AtomicU64::new(0);
static TASK_SUBMITS: AtomicU64 = AtomicU64::new(0);
static TASK_DISPOSALS: AtomicU64 = AtomicU64::new(0);
static CAPTURE_TRANSITIONS: AtomicU64 = AtomicU64::new(0);

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_render() {
    bump(&RENDERS);
}

pub(crate) fn record_reconcile_fresh() {
    bump(&RECONCILE_FRESH);
}

pub(crate) fn record_reconcile_adopted() {
    bump(&RECONCILE_ADOPTED);
}

pub(crate) fn record_event_dispatch() {
    bump(&EVENT_DISPATCHES);
}

pub(crate) fn record_invalid_handler() {
    bump(&INVALID_HANDLERS);
}

pub(crate) fn record_task_submit() {
    bump(&TASK_SUBMITS);
}

pub(crate) fn record_task_dispose() {
    bump(&TASK_DISPOSALS);
}

pub(crate) fn record_capture_transition() {
    bump(&CAPTURE_TRANSITIONS);
}

/// Point-in-time view of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub render_total: u64,
    pub reconcile_fresh_total: u64,
    pub reconcile_adopted_total: u64,
    pub event_dispatch_total: u64,
    pub invalid_handler_total: u64,
    pub task_submit_total: u64,
    pub task_dispose_total: u64,
    pub capture_transition_total: u64,
}

/// Read every counter. Counters are monotonic; subtracting two
/// snapshots gives the activity in between.
pub fn snapshot() -> CountersSnapshot {
    CountersSnapshot {
        render_total: RENDERS.load(Ordering::Relaxed),
        reconcile_fresh_total: RECONCILE_FRESH.load(Ordering::Relaxed),
        reconcile_adopted_total: RECONCILE_ADOPTED.load(Ordering::Relaxed),
        event_dispatch_total: EVENT_DISPATCHES.load(Ordering::Relaxed),
        invalid_handler_total: INVALID_HANDLERS.load(Ordering::Relaxed),
        task_submit_total: TASK_SUBMITS.load(Ordering::Relaxed),
        task_dispose_total: TASK_DISPOSALS.load(Ordering::Relaxed),
        capture_transition_total: CAPTURE_TRANSITIONS.load(Ordering::Relaxed),
    }
}
