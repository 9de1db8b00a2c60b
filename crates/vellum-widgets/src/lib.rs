#![forbid(unsafe_code)]
//! Server-side vdom reconciler with a component/hooks model.
//!
//! Takes a declarative description of a UI tree — primitive elements,
//! text, and parameterised components evaluated by a host scripting
//! runtime — renders it to a JSON tree for a remote client, and updates
//! that tree in response to events, asynchronous task completions, and
//! mouse-capture transitions while preserving component identity and
//! local state across renders.
//!
//! The moving parts:
//!
//! - [`vdom`] — the rendered tree: elements, text, component instances.
//! - [`hooks`] — the per-component hook stack (action filtering, props
//!   mapping, update gating, local state, async tasks, mouse capture).
//! - [`component`] — live component instances: render, reconcile, and
//!   route events back through nested handlers.
//! - [`render`] — translation of host html values into vdom forests.
//! - [`task_queue`] — the contract to the external background task
//!   queue.
//! - [`harness`] — host-value builders and a recording task queue for
//!   tests and embeddings.
//!
//! All tree operations run on one owning thread; the only cross-thread
//! state is the pair of fresh-id counters, task-handle cells, and the
//! pending-completion collector.

pub mod component;
pub mod fresh_id;
pub mod harness;
pub mod hooks;
pub mod observability;
pub mod render;
pub mod route;
pub mod task_queue;
pub mod vdom;

use crate::fresh_id::HandlerId;
use vellum_host::HostError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure surfaced by a widget-tree operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// An event referenced a handler id or route that no longer exists.
    /// Expected when a client dispatches against a stale render; never
    /// fatal.
    #[error("no live event handler for id {handler_id}")]
    InvalidHandler { handler_id: HandlerId },

    /// The host supplied a tagged value with an unknown constructor
    /// index. Callers treat this as a programming error in the host
    /// program.
    #[error("unknown constructor index {ctor} while decoding {what}")]
    UnexpectedConstructor { ctor: u32, what: &'static str },

    /// A `with_task` component was used before a task queue was
    /// configured.
    #[error("task queue is not configured")]
    TaskQueueNotSet,

    /// The task queue singleton was configured twice.
    #[error("task queue is already configured")]
    TaskQueueAlreadySet,

    /// An internal precondition did not hold.
    #[error("invariant violated: {detail}")]
    Invariant { detail: &'static str },

    /// A host evaluation failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl WidgetError {
    /// Stable machine-readable label for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHandler { .. } => "invalid_handler",
            Self::UnexpectedConstructor { .. } => "unexpected_constructor",
            Self::TaskQueueNotSet => "task_queue_not_set",
            Self::TaskQueueAlreadySet => "task_queue_double_set",
            Self::Invariant { .. } => "invariant_violation",
            Self::Host(_) => "host_evaluation",
        }
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;
