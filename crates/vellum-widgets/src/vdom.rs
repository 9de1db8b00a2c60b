//! The rendered virtual-DOM tree.
//!
//! A vdom node is an element, a text run, or a live component instance.
//! Nodes support reconciliation against the previous render (keyed
//! child matching, recursive for elements with equal tags) and JSON
//! emission in the client wire shape.
//!
//! Component instances are shared between the render forest and their
//! parent's child table, so they sit behind `Rc<RefCell<…>>`; the tree
//! is owned and mutated by a single thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Map, Value as Json};

use crate::WidgetResult;
use crate::component::ComponentInstance;
use crate::fresh_id::HandlerId;
use crate::route::Route;

/// A component instance shared between the render forest and the child
/// table of its owning component.
pub type SharedInstance = Rc<RefCell<ComponentInstance>>;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// One node of the rendered tree.
#[derive(Debug)]
pub enum VDom {
    Element(VdomElement),
    Text(String),
    Component(SharedInstance),
}

/// A primitive element: tag, attributes, event bindings, children, and
/// an optional tooltip subtree.
#[derive(Debug)]
pub struct VdomElement {
    pub(crate) tag: String,
    pub(crate) attrs: Map<String, Json>,
    pub(crate) events: BTreeMap<String, HandlerId>,
    pub(crate) children: Vec<VDom>,
    pub(crate) tooltip: Option<Box<VDom>>,
}

impl VDom {
    /// The node's reconciliation key: the `key` attribute of an
    /// element, if present.
    pub fn key(&self) -> Option<String> {
        match self {
            VDom::Element(el) => el
                .attrs
                .get("key")
                .and_then(Json::as_str)
                .map(str::to_owned),
            _ => None,
        }
    }

    /// Reconcile this freshly produced node against its predecessor at
    /// the same position.
    pub(crate) fn reconcile(&mut self, old: VDom) -> WidgetResult<()> {
        match self {
            VDom::Element(el) => el.reconcile(old),
            VDom::Text(_) => Ok(()),
            VDom::Component(instance) => instance.borrow_mut().reconcile(old),
        }
    }

    /// Serialize for the client. `route` is the delivery route of the
    /// component whose render this node belongs to.
    pub fn to_json(&self, route: &Route) -> WidgetResult<Json> {
        match self {
            VDom::Element(el) => el.to_json(route),
            VDom::Text(text) => Ok(Json::String(text.clone())),
            VDom::Component(instance) => instance.borrow_mut().to_json(),
        }
    }
}

impl VdomElement {
    fn reconcile(&mut self, old: VDom) -> WidgetResult<()> {
        let VDom::Element(old) = old else {
            return Ok(());
        };
        if old.tag != self.tag {
            return Ok(());
        }
        reconcile_children(&mut self.children, old.children)?;
        if let (Some(tooltip), Some(old_tooltip)) = (&mut self.tooltip, old.tooltip) {
            tooltip.reconcile(*old_tooltip)?;
        }
        Ok(())
    }

    fn to_json(&self, route: &Route) -> WidgetResult<Json> {
        let mut entry = Map::new();
        entry.insert("t".to_owned(), Json::String(self.tag.clone()));
        entry.insert("a".to_owned(), Json::Object(self.attrs.clone()));
        if !self.events.is_empty() {
            let mut events = Map::new();
            for (name, handler_id) in &self.events {
                let mut binding = Map::new();
                binding.insert("r".to_owned(), route.to_json());
                binding.insert("h".to_owned(), Json::from(handler_id.0));
                events.insert(name.clone(), Json::Object(binding));
            }
            entry.insert("e".to_owned(), Json::Object(events));
        }
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            children.push(child.to_json(route)?);
        }
        entry.insert("c".to_owned(), Json::Array(children));
        if let Some(tooltip) = &self.tooltip {
            entry.insert("tt".to_owned(), tooltip.to_json(route)?);
        }
        Ok(Json::Object(entry))
    }
}

// ---------------------------------------------------------------------------
// Keyed child reconciliation
// ---------------------------------------------------------------------------

/// Match a new child sequence against the previous one and reconcile
/// each matched pair.
///
/// Keyed nodes match the first old node with the same key; unkeyed
/// nodes consume old nodes positionally. New nodes with no match are
/// left untouched and render fresh on demand. Duplicate or partial
/// keys give unspecified (but non-crashing) matching, like React.
pub(crate) fn reconcile_children(new: &mut [VDom], old: Vec<VDom>) -> WidgetResult<()> {
    let mut old = old;
    for node in new.iter_mut() {
        if let Some(key) = node.key() {
            let matched = old
                .iter()
                .position(|candidate| candidate.key().as_deref() == Some(&key));
            if let Some(index) = matched {
                let previous = old.remove(index);
                node.reconcile(previous)?;
            }
        } else if !old.is_empty() {
            let previous = old.remove(0);
            node.reconcile(previous)?;
        }
    }
    Ok(())
}
