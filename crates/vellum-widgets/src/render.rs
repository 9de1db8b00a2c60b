//! Translation of host html values into vdom forests.
//!
//! A host html value is a tagged tree with three variants: element
//! (tag, attribute list, child list), text, and component (props plus a
//! component value). Rendering walks the tree once, building vdom
//! nodes, collecting the component instances discovered along the way,
//! and registering a fresh event-handler table for the enclosing
//! component.
//!
//! Attribute handling:
//!
//! | attr | effect |
//! |---|---|
//! | `val(key, value)` | plain attribute; `className` concatenates |
//! | `mouse_event(kind, handler)` | `onClick` / `onMouseEnter` / `onMouseLeave` |
//! | `style(entries)` | accumulates into a nested `style` object |
//! | `tooltip(subtree)` | renders and attaches a tooltip |
//! | `text_change_event(handler)` | `onChange` |

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Map, Value as Json};

use vellum_host::{self as host, Value};

use crate::component::ComponentInstance;
use crate::fresh_id::{HandlerId, fresh_handler_id};
use crate::route::Route;
use crate::vdom::{SharedInstance, VDom, VdomElement};
use crate::{WidgetError, WidgetResult};

// ---------------------------------------------------------------------------
// Constructor vocabulary
// ---------------------------------------------------------------------------

pub(crate) const HTML_ELEMENT: u32 = 0;
pub(crate) const HTML_TEXT: u32 = 1;
pub(crate) const HTML_COMPONENT: u32 = 2;

pub(crate) const ATTR_VAL: u32 = 0;
pub(crate) const ATTR_MOUSE_EVENT: u32 = 1;
pub(crate) const ATTR_STYLE: u32 = 2;
pub(crate) const ATTR_TOOLTIP: u32 = 3;
pub(crate) const ATTR_TEXT_CHANGE_EVENT: u32 = 4;

pub(crate) const MOUSE_EVENT_CLICK: u32 = 0;
pub(crate) const MOUSE_EVENT_ENTER: u32 = 1;
pub(crate) const MOUSE_EVENT_LEAVE: u32 = 2;

// ---------------------------------------------------------------------------
// RenderSink — per-render accumulators
// ---------------------------------------------------------------------------

/// Accumulators for one render of one component: the child instances
/// discovered in the view output and the handler table for the events
/// it registered.
#[derive(Default)]
pub(crate) struct RenderSink {
    pub(crate) components: Vec<SharedInstance>,
    pub(crate) handlers: BTreeMap<HandlerId, Value>,
}

impl RenderSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn register_event(&mut self, name: &str, handler: Value, events: &mut BTreeMap<String, HandlerId>) {
        let id = fresh_handler_id();
        events.insert(name.to_owned(), id);
        self.handlers.insert(id, handler);
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a host list of html values. `route` is the delivery route of
/// the component whose view produced them.
pub(crate) fn render_forest(
    htmls: &Value,
    route: &Route,
    sink: &mut RenderSink,
) -> WidgetResult<Vec<VDom>> {
    let items = host::list_items(htmls)?;
    let mut forest = Vec::with_capacity(items.len());
    for html in &items {
        forest.push(render_node(html, route, sink)?);
    }
    Ok(forest)
}

/// Render a single host html value.
pub(crate) fn render_node(html: &Value, route: &Route, sink: &mut RenderSink) -> WidgetResult<VDom> {
    match host::expect_ctor(html)? {
        HTML_ELEMENT => render_element(html, route, sink),
        HTML_TEXT => Ok(VDom::Text(host::expect_str(&html.field(0)?)?)),
        HTML_COMPONENT => {
            let props = html.field(0)?;
            let component = html.field(1)?;
            let instance = ComponentInstance::child(&component, props, route)?;
            let shared: SharedInstance = Rc::new(RefCell::new(instance));
            sink.components.push(Rc::clone(&shared));
            Ok(VDom::Component(shared))
        }
        ctor => Err(WidgetError::UnexpectedConstructor { ctor, what: "html" }),
    }
}

fn render_element(elt: &Value, route: &Route, sink: &mut RenderSink) -> WidgetResult<VDom> {
    let tag = host::expect_str(&elt.field(0)?)?;
    let mut attrs: Map<String, Json> = Map::new();
    let mut events: BTreeMap<String, HandlerId> = BTreeMap::new();
    let mut tooltip: Option<Box<VDom>> = None;

    for attr in &host::list_items(&elt.field(1)?)? {
        match host::expect_ctor(attr)? {
            ATTR_VAL => {
                let key = host::expect_str(&attr.field(0)?)?;
                let value = host::expect_str(&attr.field(1)?)?;
                let merged = match attrs.get(&key) {
                    Some(Json::String(existing)) if key == "className" => {
                        format!("{existing} {value}")
                    }
                    _ => value,
                };
                attrs.insert(key, Json::String(merged));
            }
            ATTR_MOUSE_EVENT => {
                let kind = host::expect_ctor(&attr.field(0)?)?;
                let handler = attr.field(1)?;
                let name = match kind {
                    MOUSE_EVENT_CLICK => "onClick",
                    MOUSE_EVENT_ENTER => "onMouseEnter",
                    MOUSE_EVENT_LEAVE => "onMouseLeave",
                    ctor => {
                        return Err(WidgetError::UnexpectedConstructor {
                            ctor,
                            what: "mouse event kind",
                        });
                    }
                };
                sink.register_event(name, handler, &mut events);
            }
            ATTR_STYLE => {
                if !attrs.get("style").is_some_and(Json::is_object) {
                    attrs.insert("style".to_owned(), Json::Object(Map::new()));
                }
                let style = attrs
                    .get_mut("style")
                    .and_then(Json::as_object_mut)
                    .ok_or(WidgetError::Invariant {
                        detail: "style attribute is not an object",
                    })?;
                for entry in &host::list_items(&attr.field(0)?)? {
                    let key = host::expect_str(&entry.field(0)?)?;
                    let value = host::expect_str(&entry.field(1)?)?;
                    style.insert(key, Json::String(value));
                }
            }
            ATTR_TOOLTIP => {
                let subtree = render_node(&attr.field(0)?, route, sink)?;
                tooltip = Some(Box::new(subtree));
            }
            ATTR_TEXT_CHANGE_EVENT => {
                let handler = attr.field(0)?;
                sink.register_event("onChange", handler, &mut events);
            }
            ctor => return Err(WidgetError::UnexpectedConstructor { ctor, what: "attr" }),
        }
    }

    let children = render_forest(&elt.field(2)?, route, sink)?;
    Ok(VDom::Element(VdomElement {
        tag,
        attrs,
        events,
        children,
        tooltip,
    }))
}
