//! Contract to the external background task queue.
//!
//! The reconciler never runs tasks itself. A `with_task` hook evaluates
//! its builder to a host task value and hands it to the configured
//! [`TaskQueue`] together with the completion route of its component
//! instance. The queue owns scheduling; on completion it commits the
//! result into the [`TaskHandle`] and enqueues the completion route
//! onto a [`PendingRoutes`] collector, which the owning thread drains
//! at a safe point into `handle_task_completed` calls.
//!
//! [`TaskHandle::peek`] is non-blocking and race-free: readers observe
//! either nothing or a committed result, never a partial write.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use vellum_host::Value;

use crate::route::Route;
use crate::{WidgetError, WidgetResult};

// ---------------------------------------------------------------------------
// TaskHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TaskCell {
    result: OnceLock<Value>,
    disposed: AtomicBool,
}

/// Handle to one submitted task. Cloning shares the underlying cell.
#[derive(Clone, Default)]
pub struct TaskHandle {
    cell: Arc<TaskCell>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed result, if the task has completed.
    pub fn peek(&self) -> Option<Value> {
        self.cell.result.get().cloned()
    }

    /// Commit the task's result. Returns `false` if a result was
    /// already committed; the first commit wins.
    pub fn complete(&self, result: Value) -> bool {
        self.cell.result.set(result).is_ok()
    }

    /// Mark the handle disposed. A result committed before disposal
    /// stays committed.
    pub fn dispose(&self) {
        self.cell.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.cell.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("completed", &self.cell.result.get().is_some())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TaskQueue — the external actor
// ---------------------------------------------------------------------------

/// The background task queue, implemented by the embedding.
pub trait TaskQueue: Send + Sync {
    /// Accept a host task value for execution. `completion_route` is the
    /// delivery route of the component instance that owns the task; the
    /// queue must enqueue it for the owning thread once the task
    /// completes.
    fn submit(&self, task: Value, completion_route: Route) -> WidgetResult<TaskHandle>;

    /// Abandon a task whose owning component was destroyed. Must be
    /// safe to call after completion or repeatedly.
    fn fail_and_dispose(&self, handle: &TaskHandle);
}

// ---------------------------------------------------------------------------
// PendingRoutes — completion collector
// ---------------------------------------------------------------------------

/// Routes of completed tasks awaiting delivery on the owning thread.
#[derive(Debug, Default)]
pub struct PendingRoutes {
    routes: Mutex<VecDeque<Route>>,
}

impl PendingRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the queue when a task completes.
    pub fn push(&self, route: Route) {
        self.routes
            .lock()
            .expect("pending-routes lock poisoned")
            .push_back(route);
    }

    /// Drain everything collected so far, in completion order.
    pub fn drain(&self) -> Vec<Route> {
        self.routes
            .lock()
            .expect("pending-routes lock poisoned")
            .drain(..)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Process-wide queue registry
// ---------------------------------------------------------------------------

static TASK_QUEUE: Mutex<Option<Arc<dyn TaskQueue>>> = Mutex::new(None);

/// Configure the task queue. Errors if one is already configured.
pub fn set_task_queue(queue: Arc<dyn TaskQueue>) -> WidgetResult<()> {
    let mut slot = TASK_QUEUE.lock().expect("task-queue registry poisoned");
    if slot.is_some() {
        return Err(WidgetError::TaskQueueAlreadySet);
    }
    *slot = Some(queue);
    Ok(())
}

/// Remove the configured task queue, if any.
pub fn clear_task_queue() {
    *TASK_QUEUE.lock().expect("task-queue registry poisoned") = None;
}

/// The configured task queue. Errors if none is configured.
pub fn task_queue() -> WidgetResult<Arc<dyn TaskQueue>> {
    TASK_QUEUE
        .lock()
        .expect("task-queue registry poisoned")
        .clone()
        .ok_or(WidgetError::TaskQueueNotSet)
}
