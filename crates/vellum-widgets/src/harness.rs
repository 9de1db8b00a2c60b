//! Test and embedding support.
//!
//! Builders for host values in the shapes the renderer and the
//! component decoder consume — html nodes, attributes, component
//! layers — plus a [`RecordingTaskQueue`] that makes the external task
//! queue deterministic: submissions are recorded, completion happens on
//! demand, and completion routes land in a drainable collector.
//!
//! Everything here is ordinary library code so that integration tests
//! and pure-Rust embeddings can share it.

use std::sync::{Arc, Mutex, OnceLock};

use vellum_host::{self as host, Value};

use crate::WidgetResult;
use crate::component::{
    COMPONENT_FILTER_MAP_ACTION, COMPONENT_MAP_PROPS, COMPONENT_PURE, COMPONENT_WITH_MOUSE_CAPTURE,
    COMPONENT_WITH_SHOULD_UPDATE, COMPONENT_WITH_STATE, COMPONENT_WITH_TASK,
};
use crate::render::{
    ATTR_MOUSE_EVENT, ATTR_STYLE, ATTR_TEXT_CHANGE_EVENT, ATTR_TOOLTIP, ATTR_VAL, HTML_COMPONENT,
    HTML_ELEMENT, HTML_TEXT,
};
use crate::route::Route;
use crate::task_queue::{self, PendingRoutes, TaskHandle, TaskQueue};

// ---------------------------------------------------------------------------
// Html builders
// ---------------------------------------------------------------------------

/// An element node: tag, attribute list, child list.
pub fn element(tag: &str, attrs: Vec<Value>, children: Vec<Value>) -> Value {
    host::data(
        HTML_ELEMENT,
        vec![host::string(tag), host::list(attrs), host::list(children)],
    )
}

/// A text node.
pub fn text(body: &str) -> Value {
    host::data(HTML_TEXT, vec![host::string(body)])
}

/// A nested component with its props.
pub fn of_component(props: Value, component: Value) -> Value {
    host::data(HTML_COMPONENT, vec![props, component])
}

// ---------------------------------------------------------------------------
// Attribute builders
// ---------------------------------------------------------------------------

/// A plain string attribute.
pub fn attr_val(key: &str, value: &str) -> Value {
    host::data(ATTR_VAL, vec![host::string(key), host::string(value)])
}

/// A mouse event binding; `kind` is 0 click, 1 enter, 2 leave.
pub fn mouse_event(kind: u32, handler: Value) -> Value {
    host::data(ATTR_MOUSE_EVENT, vec![host::simple(kind), handler])
}

/// Style entries merged into the element's `style` object.
pub fn style(entries: Vec<(&str, &str)>) -> Value {
    let pairs = entries
        .into_iter()
        .map(|(k, v)| host::pair(host::string(k), host::string(v)))
        .collect();
    host::data(ATTR_STYLE, vec![host::list(pairs)])
}

/// A tooltip subtree.
pub fn tooltip(html: Value) -> Value {
    host::data(ATTR_TOOLTIP, vec![html])
}

/// A text-change event binding.
pub fn text_change_event(handler: Value) -> Value {
    host::data(ATTR_TEXT_CHANGE_EVENT, vec![handler])
}

// ---------------------------------------------------------------------------
// Component-layer builders
// ---------------------------------------------------------------------------

/// The innermost layer: a pure view function.
pub fn pure(view: Value) -> Value {
    host::data(COMPONENT_PURE, vec![view])
}

/// Rewrite or swallow outgoing actions with `map(props, action)`.
pub fn filter_map_action(map: Value, inner: Value) -> Value {
    host::data(COMPONENT_FILTER_MAP_ACTION, vec![map, inner])
}

/// Transform props inward with `map(props)`.
pub fn map_props(map: Value, inner: Value) -> Value {
    host::data(COMPONENT_MAP_PROPS, vec![map, inner])
}

/// Gate re-rendering on `pred(prev_props, new_props)`.
pub fn with_should_update(pred: Value, inner: Value) -> Value {
    host::data(COMPONENT_WITH_SHOULD_UPDATE, vec![pred, inner])
}

/// Local state: `init(props, prev_state?)` and
/// `update(props, state, action)`.
pub fn with_state(init: Value, update: Value, inner: Value) -> Value {
    host::data(COMPONENT_WITH_STATE, vec![init, update, inner])
}

/// A background task built from the props.
pub fn with_task(builder: Value, inner: Value) -> Value {
    host::data(COMPONENT_WITH_TASK, vec![builder, inner])
}

/// Ternary pointer-capture state threaded into the props.
pub fn with_mouse_capture(inner: Value) -> Value {
    host::data(COMPONENT_WITH_MOUSE_CAPTURE, vec![inner])
}

// ---------------------------------------------------------------------------
// RecordingTaskQueue
// ---------------------------------------------------------------------------

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct SubmittedTask {
    pub task: Value,
    pub route: Route,
    pub handle: TaskHandle,
}

/// A deterministic task queue: records submissions and completes tasks
/// only when the test asks it to.
#[derive(Default)]
pub struct RecordingTaskQueue {
    submitted: Mutex<Vec<SubmittedTask>>,
    disposed: Mutex<Vec<TaskHandle>>,
    pending: PendingRoutes,
}

impl RecordingTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<SubmittedTask> {
        self.submitted.lock().expect("queue lock poisoned").clone()
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().expect("queue lock poisoned").len()
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed.lock().expect("queue lock poisoned").len()
    }

    /// Complete the `index`-th submission with `result` and collect its
    /// completion route. Returns the route for delivery.
    pub fn complete(&self, index: usize, result: Value) -> Route {
        let submission = self.submitted.lock().expect("queue lock poisoned")[index].clone();
        submission.handle.complete(result);
        self.pending.push(submission.route.clone());
        submission.route
    }

    /// Drain completion routes collected since the last drain.
    pub fn drain_completed(&self) -> Vec<Route> {
        self.pending.drain()
    }
}

impl TaskQueue for RecordingTaskQueue {
    fn submit(&self, task: Value, completion_route: Route) -> WidgetResult<TaskHandle> {
        let handle = TaskHandle::new();
        self.submitted
            .lock()
            .expect("queue lock poisoned")
            .push(SubmittedTask {
                task,
                route: completion_route,
                handle: handle.clone(),
            });
        Ok(handle)
    }

    fn fail_and_dispose(&self, handle: &TaskHandle) {
        handle.dispose();
        self.disposed
            .lock()
            .expect("queue lock poisoned")
            .push(handle.clone());
    }
}

/// Install one process-wide [`RecordingTaskQueue`] and return it. Later
/// calls return the same queue, so parallel tests can share it.
pub fn install_recording_queue() -> Arc<RecordingTaskQueue> {
    static QUEUE: OnceLock<Arc<RecordingTaskQueue>> = OnceLock::new();
    let queue = Arc::clone(QUEUE.get_or_init(|| Arc::new(RecordingTaskQueue::new())));
    // Tolerate repeat installs from other tests in the same process.
    let _ = task_queue::set_task_queue(queue.clone());
    queue
}
