//! Live component instances.
//!
//! A component instance is the identity-bearing node wrapping a
//! user-declared component: it owns the hook stack decoded from the
//! component's layers, the current outer and inner props, the last
//! rendered forest, the child instances discovered during that render,
//! and the event-handler table the render registered.
//!
//! Instances are created during a parent render — fresh, or inheriting
//! identity from a hash-equal predecessor under reconciliation — and
//! destroyed when a later reconciliation fails to match them, at which
//! point any task hook disposes its outstanding task.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::mem;
use std::rc::Rc;

use serde_json::{Map, Value as Json};

use vellum_host::{self as host, Value};

use crate::fresh_id::{ComponentId, HandlerId, fresh_component_id};
use crate::hooks::{CaptureState, Hook};
use crate::observability;
use crate::render::{RenderSink, render_forest};
use crate::route::Route;
use crate::vdom::{SharedInstance, VDom, reconcile_children};
use crate::{WidgetError, WidgetResult};

// ---------------------------------------------------------------------------
// Component-layer constructor vocabulary
// ---------------------------------------------------------------------------

pub(crate) const COMPONENT_PURE: u32 = 0;
pub(crate) const COMPONENT_FILTER_MAP_ACTION: u32 = 1;
pub(crate) const COMPONENT_MAP_PROPS: u32 = 2;
pub(crate) const COMPONENT_WITH_SHOULD_UPDATE: u32 = 3;
pub(crate) const COMPONENT_WITH_STATE: u32 = 4;
pub(crate) const COMPONENT_WITH_TASK: u32 = 5;
pub(crate) const COMPONENT_WITH_MOUSE_CAPTURE: u32 = 6;

/// Unwrap a component value layer by layer until the innermost pure
/// constructor, pushing one hook per layer (outermost first) and
/// returning the view function.
fn decode_layers(component: &Value, route: &Route) -> WidgetResult<(Vec<Hook>, Value)> {
    let mut hooks = Vec::new();
    let mut cursor = component.clone();
    loop {
        match host::expect_ctor(&cursor)? {
            COMPONENT_PURE => {
                let view = cursor.field(0)?;
                return Ok((hooks, view));
            }
            COMPONENT_FILTER_MAP_ACTION => {
                hooks.push(Hook::filter_map_action(cursor.field(0)?));
                cursor = cursor.field(1)?;
            }
            COMPONENT_MAP_PROPS => {
                hooks.push(Hook::map_props(cursor.field(0)?));
                cursor = cursor.field(1)?;
            }
            COMPONENT_WITH_SHOULD_UPDATE => {
                hooks.push(Hook::should_update(cursor.field(0)?));
                cursor = cursor.field(1)?;
            }
            COMPONENT_WITH_STATE => {
                hooks.push(Hook::stateful(cursor.field(0)?, cursor.field(1)?));
                cursor = cursor.field(2)?;
            }
            COMPONENT_WITH_TASK => {
                hooks.push(Hook::task(cursor.field(0)?, route.clone()));
                cursor = cursor.field(1)?;
            }
            COMPONENT_WITH_MOUSE_CAPTURE => {
                hooks.push(Hook::mouse_capture());
                cursor = cursor.field(0)?;
            }
            ctor => {
                return Err(WidgetError::UnexpectedConstructor {
                    ctor,
                    what: "component",
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentInstance
// ---------------------------------------------------------------------------

/// A live, identity-bearing node wrapping a user-declared component.
#[derive(Debug)]
pub struct ComponentInstance {
    id: ComponentId,
    /// Delivery route of this instance: root-first, excluding the root
    /// instance's id, including this instance's own id (empty for the
    /// root). Stable across reconciliations that preserve identity.
    route: Route,
    component_hash: u64,
    outer_props: Value,
    inner_props: Option<Value>,
    hooks: Vec<Hook>,
    view: Value,
    children: Vec<SharedInstance>,
    render: Vec<VDom>,
    handlers: BTreeMap<HandlerId, Value>,
    has_rendered: bool,
    reconcile_count: u64,
}

impl ComponentInstance {
    /// The root instance of a widget tree.
    pub fn root(component: &Value, props: Value) -> WidgetResult<Self> {
        Self::build(component, props, Route::root(), fresh_component_id())
    }

    /// A nested instance discovered during a parent render.
    pub(crate) fn child(
        component: &Value,
        props: Value,
        parent_route: &Route,
    ) -> WidgetResult<Self> {
        let id = fresh_component_id();
        Self::build(component, props, parent_route.child(id), id)
    }

    fn build(
        component: &Value,
        props: Value,
        route: Route,
        id: ComponentId,
    ) -> WidgetResult<Self> {
        let (hooks, view) = decode_layers(component, &route)?;
        Ok(Self {
            id,
            route,
            component_hash: component.stable_hash(),
            outer_props: props,
            inner_props: None,
            hooks,
            view,
            children: Vec::new(),
            render: Vec::new(),
            handlers: BTreeMap::new(),
            has_rendered: false,
            reconcile_count: 0,
        })
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn reconcile_count(&self) -> u64 {
        self.reconcile_count
    }

    pub fn has_rendered(&self) -> bool {
        self.has_rendered
    }

    /// The props after threading through every hook, once computed.
    pub fn inner_props(&self) -> Option<&Value> {
        self.inner_props.as_ref()
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Compute `inner_props` by folding `get_props` across the hook
    /// stack from the outer props, running each hook's `initialize`
    /// along the way.
    pub fn initialize(&mut self) -> WidgetResult<()> {
        let mut props = self.outer_props.clone();
        for hook in &mut self.hooks {
            hook.initialize(&props)?;
            props = hook.get_props(props)?;
        }
        self.inner_props = Some(props);
        Ok(())
    }

    /// Evaluate the view on the inner props, translate the output into
    /// a vdom forest, and reconcile it against the previous render.
    pub fn render(&mut self) -> WidgetResult<()> {
        let inner = self.inner_props.clone().ok_or(WidgetError::Invariant {
            detail: "render called before initialize",
        })?;
        let view_output = host::invoke(&self.view, &[inner])?;
        let mut sink = RenderSink::new();
        let mut forest = render_forest(&view_output, &self.route, &mut sink)?;
        let previous = mem::take(&mut self.render);
        reconcile_children(&mut forest, previous)?;
        self.handlers = sink.handlers;
        self.children = sink.components;
        self.render = forest;
        self.has_rendered = true;
        observability::record_render();
        Ok(())
    }

    /// Reconcile this freshly constructed instance against the node
    /// previously at its tree position.
    pub(crate) fn reconcile(&mut self, old: VDom) -> WidgetResult<()> {
        let VDom::Component(old) = old else {
            return self.render_fresh();
        };
        let mut old = old.borrow_mut();
        if old.component_hash != self.component_hash
            || old.hooks.len() != self.hooks.len()
        {
            return self.render_fresh();
        }

        let mut should_update = !self.outer_props.eq_value(&old.outer_props);
        let mut props = self.outer_props.clone();
        for i in 0..self.hooks.len() {
            if should_update {
                should_update &= self.hooks[i].reconcile(&props, &old.hooks[i])?;
            }
            if !should_update {
                // Carry the previous hook (and its state) forward; the
                // never-initialized replacement goes down with `old`.
                mem::swap(&mut self.hooks[i], &mut old.hooks[i]);
            } else {
                props = self.hooks[i].get_props(props)?;
            }
        }

        if !should_update {
            self.inner_props = old.inner_props.take();
            self.children = mem::take(&mut old.children);
            self.render = mem::take(&mut old.render);
            self.id = old.id;
            self.route = mem::take(&mut old.route);
            self.has_rendered = true;
            self.reconcile_count = old.reconcile_count + 1;
            observability::record_reconcile_adopted();
            Ok(())
        } else {
            self.inner_props = Some(props);
            self.render()
        }
    }

    /// Reconcile a re-built root instance against its predecessor.
    pub fn reconcile_root(&mut self, old: ComponentInstance) -> WidgetResult<()> {
        self.reconcile(VDom::Component(Rc::new(RefCell::new(old))))
    }

    fn render_fresh(&mut self) -> WidgetResult<()> {
        observability::record_reconcile_fresh();
        self.initialize()?;
        self.render()
    }

    // -----------------------------------------------------------------
    // JSON emission
    // -----------------------------------------------------------------

    /// Serialize for the client, rendering on demand if this instance
    /// has never rendered.
    pub fn to_json(&mut self) -> WidgetResult<Json> {
        if !self.has_rendered {
            self.initialize()?;
            self.render()?;
        }
        let mut children = Vec::with_capacity(self.render.len());
        for node in &self.render {
            children.push(node.to_json(&self.route)?);
        }
        let mut entry = Map::new();
        entry.insert("c".to_owned(), Json::Array(children));
        if self.hooks.iter().any(Hook::is_mouse_capture) {
            let mut capture = Map::new();
            capture.insert("r".to_owned(), self.route.to_json());
            entry.insert("mouse_capture".to_owned(), Json::Object(capture));
        }
        entry.insert("id".to_owned(), Json::from(self.id.0));
        Ok(Json::Object(entry))
    }

    // -----------------------------------------------------------------
    // Actions and events
    // -----------------------------------------------------------------

    /// Thread an action outward through the hook stack, innermost
    /// first. The first hook returning `None` swallows it.
    pub fn handle_action(&mut self, action: Value) -> WidgetResult<Option<Value>> {
        let mut current = Some(action);
        for hook in self.hooks.iter_mut().rev() {
            let Some(action) = current else { break };
            current = hook.action(action)?;
        }
        Ok(current)
    }

    /// Deliver an event to the instance addressed by `route`, then pipe
    /// the resulting action outward through every enclosing instance.
    pub fn handle_event(
        &mut self,
        route: &[ComponentId],
        handler_id: HandlerId,
        args: Value,
    ) -> WidgetResult<Option<Value>> {
        let Some((head, tail)) = route.split_first() else {
            let Some(handler) = self.handlers.get(&handler_id).cloned() else {
                observability::record_invalid_handler();
                return Err(WidgetError::InvalidHandler { handler_id });
            };
            observability::record_event_dispatch();
            let action = host::invoke(&handler, &[args])?;
            return self.handle_action(action);
        };
        let Some(child) = self.child_by_id(*head) else {
            // The addressed component no longer exists: the client
            // dispatched against a stale render.
            observability::record_invalid_handler();
            return Err(WidgetError::InvalidHandler { handler_id });
        };
        let out = child.borrow_mut().handle_event(tail, handler_id, args)?;
        match out {
            Some(action) => self.handle_action(action),
            None => Ok(None),
        }
    }

    /// A background task owned by the instance at `route` completed:
    /// re-initialize and re-render it. Unknown routes are ignored.
    pub fn handle_task_completed(&mut self, route: &[ComponentId]) -> WidgetResult<()> {
        let Some((head, tail)) = route.split_first() else {
            self.initialize()?;
            return self.render();
        };
        if let Some(child) = self.child_by_id(*head) {
            child.borrow_mut().handle_task_completed(tail)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Mouse capture
    // -----------------------------------------------------------------

    fn update_capture_state(&mut self, state: CaptureState) -> WidgetResult<()> {
        let mut changed = false;
        for hook in &mut self.hooks {
            changed |= hook.set_capture_state(state);
        }
        if changed {
            self.initialize()?;
            self.render()?;
        }
        Ok(())
    }

    /// The pointer was captured by the instance at `route`.
    pub fn handle_mouse_gain_capture(&mut self, route: &[ComponentId]) -> WidgetResult<()> {
        let Some((head, tail)) = route.split_first() else {
            return self.update_capture_state(CaptureState::InsideImmediate);
        };
        self.update_capture_state(CaptureState::InsideChild)?;
        if let Some(child) = self.child_by_id(*head) {
            child.borrow_mut().handle_mouse_gain_capture(tail)?;
        }
        Ok(())
    }

    /// Capture was released. The empty route resets the whole live
    /// subtree; a non-empty route resets locally and follows the named
    /// child.
    pub fn handle_mouse_lose_capture(&mut self, route: &[ComponentId]) -> WidgetResult<()> {
        self.update_capture_state(CaptureState::Outside)?;
        match route.split_first() {
            None => {
                for child in self.children.clone() {
                    child.borrow_mut().handle_mouse_lose_capture(&[])?;
                }
            }
            Some((head, tail)) => {
                if let Some(child) = self.child_by_id(*head) {
                    child.borrow_mut().handle_mouse_lose_capture(tail)?;
                }
            }
        }
        Ok(())
    }

    fn child_by_id(&self, id: ComponentId) -> Option<SharedInstance> {
        self.children
            .iter()
            .find(|child| child.borrow().id == id)
            .cloned()
    }
}
