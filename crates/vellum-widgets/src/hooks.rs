//! The per-component hook stack.
//!
//! A component is declared as layers wrapped around an innermost pure
//! view function; each layer becomes one hook. Hooks intercept props on
//! the way in (`get_props`), actions on the way out (`action`), decide
//! whether a reconciliation must re-render (`reconcile`), and carry
//! local state between renders.
//!
//! Six variants:
//!
//! - **FilterMapAction** — rewrites or swallows outgoing actions.
//! - **MapProps** — transforms props on their way inward.
//! - **ShouldUpdate** — gates re-rendering on a host predicate over the
//!   previous and new props.
//! - **Stateful** — local state seeded by `init` and advanced by
//!   `update` on each action.
//! - **Task** — owns a background task handle; exposes the peeked
//!   result as part of the props; disposes the task when destroyed.
//! - **MouseCapture** — ternary pointer-capture state, exposed as a
//!   small scalar in the props.
//!
//! Unimplemented methods fall back to pass-through behaviour: continue
//! reconciling, identity props, propagate the action, no-op initialize.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use vellum_host::{self as host, Value};

use crate::observability;
use crate::route::Route;
use crate::task_queue::{self, TaskHandle, TaskQueue};
use crate::{WidgetError, WidgetResult};

// ---------------------------------------------------------------------------
// HookKind — positional kind matching under reconciliation
// ---------------------------------------------------------------------------

/// Discriminant of a hook variant. Reconciliation matches hook stacks
/// position-by-position on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    FilterMapAction,
    MapProps,
    ShouldUpdate,
    Stateful,
    Task,
    MouseCapture,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FilterMapAction => "filter_map_action",
            Self::MapProps => "map_props",
            Self::ShouldUpdate => "should_update",
            Self::Stateful => "stateful",
            Self::Task => "task",
            Self::MouseCapture => "mouse_capture",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// CaptureState
// ---------------------------------------------------------------------------

/// Pointer-capture state of a component: the pointer is outside,
/// directly inside, or inside a descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Outside,
    InsideImmediate,
    InsideChild,
}

impl CaptureState {
    /// The small-scalar encoding handed to view functions.
    pub fn as_index(self) -> u32 {
        match self {
            Self::Outside => 0,
            Self::InsideImmediate => 1,
            Self::InsideChild => 2,
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Outside => "outside",
            Self::InsideImmediate => "inside_immediate",
            Self::InsideChild => "inside_child",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Hook variants
// ---------------------------------------------------------------------------

/// Rewrites or swallows actions on their way outward.
#[derive(Debug)]
pub struct FilterMapActionHook {
    map: Value,
    props: Option<Value>,
}

/// Transforms props on their way inward.
#[derive(Debug)]
pub struct MapPropsHook {
    map: Value,
}

/// Gates re-rendering on `pred(prev_props, new_props)`.
#[derive(Debug)]
pub struct ShouldUpdateHook {
    pred: Value,
    props: Option<Value>,
}

/// Local state seeded by `init(props, prev_state?)` and advanced by
/// `update(props, state, action)`.
#[derive(Debug)]
pub struct StatefulHook {
    init: Value,
    update: Value,
    props: Option<Value>,
    state: Option<Value>,
}

struct ActiveTask {
    handle: TaskHandle,
    queue: Arc<dyn TaskQueue>,
}

/// Owns a background task for the enclosing component instance.
pub struct TaskHook {
    builder: Value,
    route: Route,
    active: Option<ActiveTask>,
}

impl fmt::Debug for TaskHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHook")
            .field("route", &self.route)
            .field("active", &self.active.as_ref().map(|a| &a.handle))
            .finish()
    }
}

impl Drop for TaskHook {
    fn drop(&mut self) {
        // A completion racing this disposal may leave its committed
        // result unread; the handle keeps it regardless.
        if let Some(active) = self.active.take() {
            active.queue.fail_and_dispose(&active.handle);
            observability::record_task_dispose();
        }
    }
}

/// Ternary pointer-capture state.
#[derive(Debug)]
pub struct MouseCaptureHook {
    state: CaptureState,
}

/// One layer of a component's hook stack.
#[derive(Debug)]
pub enum Hook {
    FilterMapAction(FilterMapActionHook),
    MapProps(MapPropsHook),
    ShouldUpdate(ShouldUpdateHook),
    Stateful(StatefulHook),
    Task(TaskHook),
    MouseCapture(MouseCaptureHook),
}

impl Hook {
    pub fn filter_map_action(map: Value) -> Self {
        Self::FilterMapAction(FilterMapActionHook { map, props: None })
    }

    pub fn map_props(map: Value) -> Self {
        Self::MapProps(MapPropsHook { map })
    }

    pub fn should_update(pred: Value) -> Self {
        Self::ShouldUpdate(ShouldUpdateHook { pred, props: None })
    }

    pub fn stateful(init: Value, update: Value) -> Self {
        Self::Stateful(StatefulHook {
            init,
            update,
            props: None,
            state: None,
        })
    }

    pub fn task(builder: Value, route: Route) -> Self {
        Self::Task(TaskHook {
            builder,
            route,
            active: None,
        })
    }

    pub fn mouse_capture() -> Self {
        Self::MouseCapture(MouseCaptureHook {
            state: CaptureState::Outside,
        })
    }

    pub fn kind(&self) -> HookKind {
        match self {
            Self::FilterMapAction(_) => HookKind::FilterMapAction,
            Self::MapProps(_) => HookKind::MapProps,
            Self::ShouldUpdate(_) => HookKind::ShouldUpdate,
            Self::Stateful(_) => HookKind::Stateful,
            Self::Task(_) => HookKind::Task,
            Self::MouseCapture(_) => HookKind::MouseCapture,
        }
    }

    /// Set up per-variant state for the given props.
    pub(crate) fn initialize(&mut self, props: &Value) -> WidgetResult<()> {
        match self {
            Self::FilterMapAction(hook) => {
                hook.props = Some(props.clone());
                Ok(())
            }
            Self::ShouldUpdate(hook) => {
                hook.props = Some(props.clone());
                Ok(())
            }
            Self::Stateful(hook) => hook.initialize(props),
            Self::Task(hook) => hook.initialize(props),
            Self::MapProps(_) | Self::MouseCapture(_) => Ok(()),
        }
    }

    /// Decide whether reconciliation must keep re-rendering, given the
    /// previous hook at the same stack position. Returning `false`
    /// makes the instance adopt the previous render; the caller then
    /// carries the previous hook forward in place of this one.
    pub(crate) fn reconcile(&mut self, new_props: &Value, prev: &Hook) -> WidgetResult<bool> {
        match self {
            Self::FilterMapAction(hook) => {
                hook.props = Some(new_props.clone());
                Ok(true)
            }
            Self::ShouldUpdate(hook) => hook.reconcile(new_props, prev),
            Self::Stateful(hook) => hook.reconcile(new_props, prev),
            Self::Task(hook) => {
                // Props may have changed, so the task is rebuilt.
                hook.initialize(new_props)?;
                Ok(true)
            }
            Self::MapProps(_) | Self::MouseCapture(_) => Ok(true),
        }
    }

    /// Thread props inward through this hook.
    pub(crate) fn get_props(&mut self, props: Value) -> WidgetResult<Value> {
        match self {
            Self::MapProps(hook) => Ok(host::invoke(&hook.map, &[props])?),
            Self::Stateful(hook) => hook.get_props(props),
            Self::Task(hook) => hook.get_props(props),
            Self::MouseCapture(hook) => {
                Ok(host::pair(host::nat(hook.state.as_index()), props))
            }
            Self::FilterMapAction(_) | Self::ShouldUpdate(_) => Ok(props),
        }
    }

    /// Transform an outgoing action. `None` swallows it.
    pub(crate) fn action(&mut self, action: Value) -> WidgetResult<Option<Value>> {
        match self {
            Self::FilterMapAction(hook) => hook.action(action),
            Self::Stateful(hook) => hook.action(action),
            Self::MapProps(_)
            | Self::ShouldUpdate(_)
            | Self::Task(_)
            | Self::MouseCapture(_) => Ok(Some(action)),
        }
    }

    /// Update mouse-capture state; reports whether it changed. No-op
    /// (and `false`) for other variants.
    pub(crate) fn set_capture_state(&mut self, state: CaptureState) -> bool {
        match self {
            Self::MouseCapture(hook) => hook.set_state(state),
            _ => false,
        }
    }

    pub(crate) fn is_mouse_capture(&self) -> bool {
        matches!(self, Self::MouseCapture(_))
    }
}

// ---------------------------------------------------------------------------
// Per-variant behaviour
// ---------------------------------------------------------------------------

impl FilterMapActionHook {
    fn action(&mut self, action: Value) -> WidgetResult<Option<Value>> {
        let props = self.props.clone().ok_or(WidgetError::Invariant {
            detail: "filter_map_action hook used before initialize",
        })?;
        let out = host::invoke(&self.map, &[props, action])?;
        Ok(host::as_option(&out)?)
    }
}

impl ShouldUpdateHook {
    fn reconcile(&mut self, new_props: &Value, prev: &Hook) -> WidgetResult<bool> {
        let Hook::ShouldUpdate(prev) = prev else {
            return Ok(true);
        };
        let Some(prev_props) = prev.props.clone() else {
            return Ok(true);
        };
        self.props = Some(new_props.clone());
        let verdict = host::invoke(&self.pred, &[prev_props, new_props.clone()])?;
        Ok(host::as_bool(&verdict)?)
    }
}

impl StatefulHook {
    fn initialize(&mut self, props: &Value) -> WidgetResult<()> {
        let seed = match &self.state {
            Some(state) => host::some(state.clone()),
            None => host::none(),
        };
        let state = host::invoke(&self.init, &[props.clone(), seed])?;
        self.state = Some(state);
        self.props = Some(props.clone());
        Ok(())
    }

    fn reconcile(&mut self, new_props: &Value, prev: &Hook) -> WidgetResult<bool> {
        // Inherit the previous state, then re-initialize from the new
        // props. The second call runs unconditionally.
        if let Hook::Stateful(prev) = prev {
            self.state = prev.state.clone();
            self.initialize(new_props)?;
        }
        self.initialize(new_props)?;
        Ok(true)
    }

    fn get_props(&mut self, props: Value) -> WidgetResult<Value> {
        if self.state.is_none() {
            self.initialize(&props)?;
        }
        let state = self.state.clone().ok_or(WidgetError::Invariant {
            detail: "stateful hook has no state after initialize",
        })?;
        Ok(host::pair(state, props))
    }

    fn action(&mut self, action: Value) -> WidgetResult<Option<Value>> {
        let props = self.props.clone().ok_or(WidgetError::Invariant {
            detail: "stateful hook used before initialize",
        })?;
        let state = self.state.clone().ok_or(WidgetError::Invariant {
            detail: "stateful hook used before initialize",
        })?;
        let outcome = host::invoke(&self.update, &[props, state, action])?;
        self.state = Some(outcome.field(0)?);
        let out_action = outcome.field(1)?;
        Ok(host::as_option(&out_action)?)
    }
}

impl TaskHook {
    fn initialize(&mut self, props: &Value) -> WidgetResult<()> {
        if self.active.is_some() {
            return Ok(());
        }
        let task = host::invoke(&self.builder, &[props.clone()])?;
        let queue = task_queue::task_queue()?;
        let handle = queue.submit(task, self.route.clone())?;
        observability::record_task_submit();
        self.active = Some(ActiveTask { handle, queue });
        Ok(())
    }

    fn get_props(&mut self, props: Value) -> WidgetResult<Value> {
        let peeked = self.active.as_ref().and_then(|active| active.handle.peek());
        let result = match peeked {
            Some(value) => host::some(value),
            None => host::none(),
        };
        Ok(host::pair(result, props))
    }
}

impl MouseCaptureHook {
    fn set_state(&mut self, state: CaptureState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        observability::record_capture_transition();
        true
    }
}
