//! Process-wide fresh-id generators.
//!
//! Component-instance ids and event-handler ids are monotonic and never
//! reused within a process lifetime. The two counters are the only
//! cross-thread mutable state this subsystem introduces besides task
//! handles, so plain relaxed atomics suffice.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identity of a live component instance, stable across reconciliations
/// that preserve the instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an event handler registered by a single render. Handler
/// tables are regenerated on every render, so an id is only live until
/// its component next renders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HandlerId(pub u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(0);

/// Allocate a component-instance id.
pub fn fresh_component_id() -> ComponentId {
    ComponentId(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Allocate an event-handler id.
pub fn fresh_handler_id() -> HandlerId {
    HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
}
