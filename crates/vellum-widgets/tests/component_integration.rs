#![forbid(unsafe_code)]
//! Integration tests for the component/hooks reconciler.
//!
//! Drives the system the way a client would: render the root to JSON,
//! read routes and handler ids back out of the JSON, and dispatch
//! events, task completions, and mouse-capture transitions against the
//! root instance.

use std::sync::{Arc, Mutex};

use serde_json::Value as Json;

use vellum_host::mock::callable;
use vellum_host::{Value, expect_str, list, nat, none, pair, some, string};
use vellum_widgets::component::ComponentInstance;
use vellum_widgets::fresh_id::{ComponentId, HandlerId};
use vellum_widgets::harness::{
    attr_val, element, filter_map_action, install_recording_queue, map_props, mouse_event,
    of_component, pure, text, with_mouse_capture, with_should_update, with_state, with_task,
};
use vellum_widgets::route::Route;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CLICK: u32 = 0;

/// A view that always renders the same text.
fn static_view(body: &'static str) -> Value {
    callable(move |_| Ok(list(vec![text(body)])))
}

/// Parse an event-binding route out of rendered JSON.
fn route_ids(route: &Json) -> Vec<ComponentId> {
    route
        .as_array()
        .expect("route is an array")
        .iter()
        .map(|id| ComponentId(id.as_u64().expect("route ids are integers")))
        .collect()
}

/// Find the first binding for `event` anywhere in rendered JSON.
fn find_event(json: &Json, event: &str) -> Option<(Vec<ComponentId>, HandlerId)> {
    match json {
        Json::Object(map) => {
            if let Some(binding) = map.get("e").and_then(|e| e.get(event)) {
                let ids = route_ids(&binding["r"]);
                let handler = HandlerId(binding["h"].as_u64().expect("handler id"));
                return Some((ids, handler));
            }
            map.values().find_map(|value| find_event(value, event))
        }
        Json::Array(items) => items.iter().find_map(|value| find_event(value, event)),
        _ => None,
    }
}

/// Collect every component-instance id in rendered JSON.
fn collect_ids(json: &Json, into: &mut Vec<u64>) {
    match json {
        Json::Object(map) => {
            if let (Some(id), Some(_)) = (map.get("id"), map.get("c")) {
                into.push(id.as_u64().expect("instance id"));
            }
            for value in map.values() {
                collect_ids(value, into);
            }
        }
        Json::Array(items) => {
            for value in items {
                collect_ids(value, into);
            }
        }
        _ => {}
    }
}

// ===========================================================================
// 1. Initial render
// ===========================================================================

#[test]
fn initial_render_produces_the_wire_shape() {
    let view = callable(|_| {
        Ok(list(vec![element(
            "div",
            vec![attr_val("id", "x")],
            vec![text("hi")],
        )]))
    });
    let mut root = ComponentInstance::root(&pure(view), string("props")).unwrap();
    let json = root.to_json().unwrap();

    assert_eq!(json["c"][0]["t"], "div");
    assert_eq!(json["c"][0]["a"], serde_json::json!({"id": "x"}));
    assert_eq!(json["c"][0]["c"], serde_json::json!(["hi"]));
    assert_eq!(json["id"].as_u64().unwrap(), root.id().0);
    assert!(json.get("mouse_capture").is_none());
}

#[test]
fn rendered_ids_are_pairwise_distinct() {
    let leaf = || of_component(string("p"), pure(static_view("leaf")));
    let view = callable(move |_| Ok(list(vec![leaf(), leaf(), leaf()])));
    let mut root = ComponentInstance::root(&pure(view), string("props")).unwrap();
    let json = root.to_json().unwrap();

    let mut ids = vec![root.id().0];
    collect_ids(&json, &mut ids);
    // Root appears once in the json and once from the accessor.
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

// ===========================================================================
// 2. Event routing
// ===========================================================================

#[test]
fn click_routes_to_the_child_and_back_through_its_hooks() {
    let button_view = callable(|_| {
        let on_click = callable(|args| {
            let event = expect_str(&args[0])?;
            Ok(string(format!("clicked:{event}")))
        });
        Ok(list(vec![element(
            "button",
            vec![mouse_event(CLICK, on_click)],
            vec![text("go")],
        )]))
    });
    let child = filter_map_action(
        callable(|args| {
            let action = expect_str(&args[1])?;
            Ok(some(string(format!("{action}/child"))))
        }),
        pure(button_view),
    );
    let root_view = callable(move |_| Ok(list(vec![of_component(string("cp"), child.clone())])));
    let mut root = ComponentInstance::root(&pure(root_view), string("rp")).unwrap();
    let json = root.to_json().unwrap();

    let (route, handler) = find_event(&json, "onClick").expect("button binding");
    assert_eq!(route.len(), 1);
    assert_eq!(json["c"][0]["id"].as_u64().unwrap(), route[0].0);

    let action = root
        .handle_event(&route, handler, string("evt"))
        .unwrap()
        .unwrap();
    assert_eq!(action.as_str(), Some("clicked:evt/child"));
}

#[test]
fn actions_compose_right_to_left_along_the_route() {
    let button_view = callable(|_| {
        let on_click = callable(|_| Ok(string("a")));
        Ok(list(vec![element(
            "button",
            vec![mouse_event(CLICK, on_click)],
            vec![],
        )]))
    });
    let grandchild = filter_map_action(
        callable(|args| Ok(some(string(format!("{}>g", expect_str(&args[1])?))))),
        pure(button_view),
    );
    let child = filter_map_action(
        callable(|args| Ok(some(string(format!("{}>c", expect_str(&args[1])?))))),
        pure(callable(move |_| {
            Ok(list(vec![of_component(string("gp"), grandchild.clone())]))
        })),
    );
    let root_view = callable(move |_| Ok(list(vec![of_component(string("cp"), child.clone())])));
    let root_component = filter_map_action(
        callable(|args| Ok(some(string(format!("{}>r", expect_str(&args[1])?))))),
        pure(root_view),
    );
    let mut root = ComponentInstance::root(&root_component, string("rp")).unwrap();
    let json = root.to_json().unwrap();

    let (route, handler) = find_event(&json, "onClick").expect("button binding");
    assert_eq!(route.len(), 2);
    let action = root
        .handle_event(&route, handler, string("e"))
        .unwrap()
        .unwrap();
    assert_eq!(action.as_str(), Some("a>g>c>r"));
}

#[test]
fn a_swallowed_action_skips_enclosing_hooks() {
    let button_view = callable(|_| {
        let on_click = callable(|_| Ok(string("a")));
        Ok(list(vec![element(
            "button",
            vec![mouse_event(CLICK, on_click)],
            vec![],
        )]))
    });
    let child = filter_map_action(callable(|_| Ok(none())), pure(button_view));
    let outer_ran = Arc::new(Mutex::new(false));
    let flag = outer_ran.clone();
    let root_view = callable(move |_| Ok(list(vec![of_component(string("cp"), child.clone())])));
    let root_component = filter_map_action(
        callable(move |args| {
            *flag.lock().unwrap() = true;
            Ok(some(args[1].clone()))
        }),
        pure(root_view),
    );
    let mut root = ComponentInstance::root(&root_component, string("rp")).unwrap();
    let json = root.to_json().unwrap();

    let (route, handler) = find_event(&json, "onClick").expect("button binding");
    let out = root.handle_event(&route, handler, string("e")).unwrap();
    assert!(out.is_none());
    assert!(!*outer_ran.lock().unwrap());
}

#[test]
fn stale_handler_ids_raise_invalid_handler() {
    let view = callable(|_| {
        let on_click = callable(|_| Ok(none()));
        Ok(list(vec![element(
            "button",
            vec![mouse_event(CLICK, on_click)],
            vec![],
        )]))
    });
    let component = pure(view);
    let mut root = ComponentInstance::root(&component, string("p")).unwrap();
    let json = root.to_json().unwrap();
    let (route, stale_handler) = find_event(&json, "onClick").expect("binding");

    // Re-render: the handler table is regenerated wholesale.
    root.render().unwrap();
    let err = root
        .handle_event(&route, stale_handler, string("e"))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_handler");

    // The fresh binding works.
    let json = root.to_json().unwrap();
    let (route, handler) = find_event(&json, "onClick").expect("binding");
    assert!(root.handle_event(&route, handler, string("e")).is_ok());
}

// ===========================================================================
// 3. Should-update gating
// ===========================================================================

#[test]
fn should_update_false_preserves_the_previous_render() {
    let never = callable(|_| Ok(vellum_host::boolean(false)));
    let view = callable(|args| {
        let p = expect_str(&args[0])?;
        Ok(list(vec![
            text(&format!("props:{p}")),
            of_component(string("leaf"), pure(static_view("leaf"))),
        ]))
    });
    let component = with_should_update(never, pure(view));

    let mut gen1 = ComponentInstance::root(&component, string("p1")).unwrap();
    let json1 = gen1.to_json().unwrap();

    let mut gen2 = ComponentInstance::root(&component, string("p2")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json2 = gen2.to_json().unwrap();

    // Props changed, but the gate said no: identical render, same ids.
    assert_eq!(json1, json2);
    assert_eq!(json2["c"][0], serde_json::json!("props:p1"));
    assert_eq!(gen2.reconcile_count(), 1);

    let mut gen3 = ComponentInstance::root(&component, string("p3")).unwrap();
    gen3.reconcile_root(gen2).unwrap();
    assert_eq!(gen3.to_json().unwrap(), json1);
    assert_eq!(gen3.reconcile_count(), 2);
}

#[test]
fn equal_props_adopt_without_consulting_hooks() {
    let pred_calls = Arc::new(Mutex::new(0u32));
    let calls = pred_calls.clone();
    let pred = callable(move |_| {
        *calls.lock().unwrap() += 1;
        Ok(vellum_host::boolean(true))
    });
    let component = with_should_update(pred, pure(static_view("body")));

    let mut gen1 = ComponentInstance::root(&component, string("same")).unwrap();
    let json1 = gen1.to_json().unwrap();
    let id1 = json1["id"].as_u64().unwrap();

    let mut gen2 = ComponentInstance::root(&component, string("same")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json2 = gen2.to_json().unwrap();

    assert_eq!(*pred_calls.lock().unwrap(), 0);
    assert_eq!(json2["id"].as_u64().unwrap(), id1);
    assert_eq!(gen2.reconcile_count(), 1);
}

#[test]
fn changed_props_re_render_when_the_gate_allows() {
    let pred = callable(|args| {
        let prev = expect_str(&args[0])?;
        let new = expect_str(&args[1])?;
        Ok(vellum_host::boolean(prev != new))
    });
    let view = callable(|args| {
        let p = expect_str(&args[0])?;
        Ok(list(vec![text(&format!("props:{p}"))]))
    });
    let component = with_should_update(pred, pure(view));

    let gen1 = {
        let mut root = ComponentInstance::root(&component, string("p1")).unwrap();
        root.to_json().unwrap();
        root
    };
    let mut gen2 = ComponentInstance::root(&component, string("p2")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json = gen2.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("props:p2"));
    assert_eq!(gen2.reconcile_count(), 0);
}

// ===========================================================================
// 4. Stateful hooks
// ===========================================================================

#[test]
fn counter_state_advances_across_events() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let log = observed.clone();
    let init = callable(|args| match vellum_host::as_option(&args[1])? {
        Some(state) => Ok(state),
        None => Ok(nat(0)),
    });
    let update = callable(move |args| {
        let state = args[1].ctor().ok_or(vellum_host::HostError::Untagged)?;
        log.lock().unwrap().push(state);
        Ok(pair(nat(state + 1), none()))
    });
    let view = callable(|_| {
        let on_click = callable(|_| Ok(string("inc")));
        Ok(list(vec![element(
            "button",
            vec![mouse_event(CLICK, on_click)],
            vec![],
        )]))
    });
    let component = with_state(init, update, pure(view));
    let mut root = ComponentInstance::root(&component, string("p")).unwrap();
    let json = root.to_json().unwrap();
    let (route, handler) = find_event(&json, "onClick").expect("binding");

    for _ in 0..3 {
        let out = root.handle_event(&route, handler, string("e")).unwrap();
        assert!(out.is_none());
    }
    assert_eq!(*observed.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn state_survives_reconciliation_of_changed_props() {
    let init = callable(|args| match vellum_host::as_option(&args[1])? {
        Some(state) => Ok(state),
        None => Ok(nat(0)),
    });
    let update = callable(|args| {
        let state = args[1].ctor().ok_or(vellum_host::HostError::Untagged)?;
        Ok(pair(nat(state + 1), none()))
    });
    let view = callable(|args| {
        // Props are (state, outer).
        let state = args[0].field(0)?.ctor().unwrap_or(99);
        Ok(list(vec![
            text(&format!("count:{state}")),
            element(
                "button",
                vec![mouse_event(CLICK, callable(|_| Ok(string("inc"))))],
                vec![],
            ),
        ]))
    });
    let component = with_state(init, update, pure(view));

    let mut gen1 = ComponentInstance::root(&component, string("p1")).unwrap();
    let json = gen1.to_json().unwrap();
    let (route, handler) = find_event(&json, "onClick").expect("binding");
    root_events(&mut gen1, &route, handler, 2);

    // Changed props force a re-render; the inherited state shows up in
    // the new output.
    let mut gen2 = ComponentInstance::root(&component, string("p2")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json = gen2.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("count:2"));
}

fn root_events(root: &mut ComponentInstance, route: &[ComponentId], handler: HandlerId, n: u32) {
    for _ in 0..n {
        root.handle_event(route, handler, string("e")).unwrap();
    }
}

// ===========================================================================
// 5. Tasks
// ===========================================================================

#[test]
fn task_completion_triggers_a_re_render() {
    let queue = install_recording_queue();
    let builder = callable(|_| Ok(string("job:root-task")));
    let view = callable(|args| {
        // Props are (peeked-result?, outer).
        let body = match vellum_host::as_option(&args[0].field(0)?)? {
            Some(result) => format!("done:{}", expect_str(&result)?),
            None => "pending".to_owned(),
        };
        Ok(list(vec![text(&body)]))
    });
    let component = with_task(builder, pure(view));
    let mut root = ComponentInstance::root(&component, string("p")).unwrap();

    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("pending"));

    let submission = queue
        .submissions()
        .into_iter()
        .enumerate()
        .find(|(_, s)| s.task.as_str() == Some("job:root-task"))
        .expect("task submitted");
    assert!(submission.1.route.is_empty());

    queue.complete(submission.0, string("v"));
    for route in queue.drain_completed() {
        if route == submission.1.route {
            root.handle_task_completed(route.as_slice()).unwrap();
        }
    }
    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("done:v"));
}

#[test]
fn nested_task_components_complete_by_route() {
    let queue = install_recording_queue();
    let builder = callable(|_| Ok(string("job:nested-task")));
    let child_view = callable(|args| {
        let body = match vellum_host::as_option(&args[0].field(0)?)? {
            Some(result) => expect_str(&result)?,
            None => "waiting".to_owned(),
        };
        Ok(list(vec![text(&body)]))
    });
    let child = with_task(builder, pure(child_view));
    let root_view = callable(move |_| Ok(list(vec![of_component(string("cp"), child.clone())])));
    let mut root = ComponentInstance::root(&pure(root_view), string("p")).unwrap();

    let json = root.to_json().unwrap();
    let child_id = json["c"][0]["id"].as_u64().unwrap();
    assert_eq!(json["c"][0]["c"][0], serde_json::json!("waiting"));

    let submission = queue
        .submissions()
        .into_iter()
        .enumerate()
        .find(|(_, s)| s.task.as_str() == Some("job:nested-task"))
        .expect("task submitted");
    assert_eq!(
        submission.1.route,
        Route(vec![ComponentId(child_id)]),
        "completion route names the owning child"
    );

    queue.complete(submission.0, string("ready"));
    root.handle_task_completed(submission.1.route.as_slice())
        .unwrap();
    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0]["c"][0], serde_json::json!("ready"));
}

#[test]
fn replaced_task_components_dispose_their_tasks() {
    let queue = install_recording_queue();
    let builder = callable(|_| Ok(string("job:disposable")));
    let child = with_task(builder, pure(static_view("child")));
    let view = callable(move |args| {
        // Render the task child only while props say so.
        if expect_str(&args[0])? == "with-child" {
            Ok(list(vec![of_component(string("cp"), child.clone())]))
        } else {
            Ok(list(vec![text("empty")]))
        }
    });
    let component = pure(view);

    let mut gen1 = ComponentInstance::root(&component, string("with-child")).unwrap();
    gen1.to_json().unwrap();
    let submission = queue
        .submissions()
        .into_iter()
        .find(|s| s.task.as_str() == Some("job:disposable"))
        .expect("task submitted");
    assert!(!submission.handle.is_disposed());

    let mut gen2 = ComponentInstance::root(&component, string("without")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    gen2.to_json().unwrap();
    drop(gen2);
    assert!(submission.handle.is_disposed());
}

// ===========================================================================
// 6. Mouse capture
// ===========================================================================

/// A capture-aware view rendering its state index plus extra children.
fn capture_view(children: impl Fn() -> Vec<Value> + Send + Sync + 'static) -> Value {
    callable(move |args| {
        // Props are (capture-state, outer).
        let state = args[0]
            .field(0)?
            .ctor()
            .ok_or(vellum_host::HostError::Untagged)?;
        let mut nodes = vec![text(&format!("s{state}"))];
        nodes.extend(children());
        Ok(list(nodes))
    })
}

#[test]
fn capture_routes_appear_in_the_json() {
    let b = with_mouse_capture(pure(capture_view(Vec::new)));
    let a = with_mouse_capture(pure(capture_view(move || {
        vec![of_component(string("bp"), b.clone())]
    })));
    let root_component = with_mouse_capture(pure(capture_view(move || {
        vec![of_component(string("ap"), a.clone())]
    })));
    let mut root = ComponentInstance::root(&root_component, string("p")).unwrap();
    let json = root.to_json().unwrap();

    assert_eq!(json["mouse_capture"]["r"], serde_json::json!([]));
    let a_json = &json["c"][1];
    let b_json = &a_json["c"][1];
    assert_eq!(
        route_ids(&a_json["mouse_capture"]["r"]),
        vec![ComponentId(a_json["id"].as_u64().unwrap())]
    );
    assert_eq!(
        route_ids(&b_json["mouse_capture"]["r"]),
        vec![
            ComponentId(a_json["id"].as_u64().unwrap()),
            ComponentId(b_json["id"].as_u64().unwrap()),
        ]
    );
}

#[test]
fn gain_and_lose_capture_propagate() {
    let b = with_mouse_capture(pure(capture_view(Vec::new)));
    let a = with_mouse_capture(pure(capture_view(move || {
        vec![of_component(string("bp"), b.clone())]
    })));
    let root_component = with_mouse_capture(pure(capture_view(move || {
        vec![of_component(string("ap"), a.clone())]
    })));
    let mut root = ComponentInstance::root(&root_component, string("p")).unwrap();
    let json = root.to_json().unwrap();
    let capture_route = route_ids(&json["c"][1]["c"][1]["mouse_capture"]["r"]);

    root.handle_mouse_gain_capture(&capture_route).unwrap();
    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("s2"), "root: inside child");
    assert_eq!(
        json["c"][1]["c"][0],
        serde_json::json!("s2"),
        "a: inside child"
    );
    assert_eq!(
        json["c"][1]["c"][1]["c"][0],
        serde_json::json!("s1"),
        "b: inside immediate"
    );

    root.handle_mouse_lose_capture(&[]).unwrap();
    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0], serde_json::json!("s0"));
    assert_eq!(json["c"][1]["c"][0], serde_json::json!("s0"));
    assert_eq!(json["c"][1]["c"][1]["c"][0], serde_json::json!("s0"));
}

#[test]
fn capture_updates_preserve_component_identity() {
    let inner = with_mouse_capture(pure(capture_view(Vec::new)));
    let root_view = callable(move |_| Ok(list(vec![of_component(string("ip"), inner.clone())])));
    let mut root = ComponentInstance::root(&pure(root_view), string("p")).unwrap();
    let json = root.to_json().unwrap();
    let inner_id = json["c"][0]["id"].as_u64().unwrap();
    let route = route_ids(&json["c"][0]["mouse_capture"]["r"]);

    root.handle_mouse_gain_capture(&route).unwrap();
    let json = root.to_json().unwrap();
    assert_eq!(json["c"][0]["id"].as_u64().unwrap(), inner_id);
    assert_eq!(json["c"][0]["c"][0], serde_json::json!("s1"));
}

// ===========================================================================
// 7. Keyed reconciliation
// ===========================================================================

#[test]
fn keyed_children_keep_their_instances_across_reorders() {
    // Component values are built once so that reconciliation sees the
    // same component hash across renders.
    let leaf_a = of_component(string("a"), pure(static_view("a")));
    let leaf_b = of_component(string("b"), pure(static_view("b")));
    let view = callable(move |args| {
        let order = expect_str(&args[0])?;
        let mut nodes = Vec::new();
        for key in order.split(',') {
            let body = if key == "a" {
                leaf_a.clone()
            } else {
                leaf_b.clone()
            };
            nodes.push(element(
                "div",
                vec![attr_val("key", key)],
                vec![body],
            ));
        }
        Ok(list(nodes))
    });
    let component = pure(view);

    let mut gen1 = ComponentInstance::root(&component, string("a,b")).unwrap();
    let json1 = gen1.to_json().unwrap();
    let id_a = json1["c"][0]["c"][0]["id"].as_u64().unwrap();
    let id_b = json1["c"][1]["c"][0]["id"].as_u64().unwrap();

    let mut gen2 = ComponentInstance::root(&component, string("b,a")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json2 = gen2.to_json().unwrap();

    assert_eq!(json2["c"][0]["a"]["key"], "b");
    assert_eq!(json2["c"][0]["c"][0]["id"].as_u64().unwrap(), id_b);
    assert_eq!(json2["c"][1]["c"][0]["id"].as_u64().unwrap(), id_a);
}

#[test]
fn unkeyed_children_match_positionally_across_renders() {
    let leaf = of_component(string("x"), pure(static_view("x")));
    let view = callable(move |args| {
        let n = expect_str(&args[0])?.len();
        Ok(list((0..n).map(|_| leaf.clone()).collect()))
    });
    let component = pure(view);

    let mut gen1 = ComponentInstance::root(&component, string("ab")).unwrap();
    let json1 = gen1.to_json().unwrap();
    let first_id = json1["c"][0]["id"].as_u64().unwrap();

    // One more child: the first two match positionally, the third is
    // fresh.
    let mut gen2 = ComponentInstance::root(&component, string("abc")).unwrap();
    gen2.reconcile_root(gen1).unwrap();
    let json2 = gen2.to_json().unwrap();
    assert_eq!(json2["c"][0]["id"].as_u64().unwrap(), first_id);
    assert!(json2["c"][2]["id"].as_u64().unwrap() > first_id);
}

// ===========================================================================
// 8. Inner-props invariant
// ===========================================================================

#[test]
fn inner_props_equal_the_fold_of_get_props() {
    let init = callable(|args| match vellum_host::as_option(&args[1])? {
        Some(state) => Ok(state),
        None => Ok(nat(0)),
    });
    let update = callable(|_| Ok(pair(nat(0), none())));
    let mapper = callable(|args| {
        let p = expect_str(&args[0])?;
        Ok(string(format!("m:{p}")))
    });
    let component = map_props(
        mapper,
        with_state(init, update, pure(static_view("x"))),
    );
    let mut root = ComponentInstance::root(&component, string("base")).unwrap();
    root.to_json().unwrap();

    let expected = pair(nat(0), string("m:base"));
    assert!(root.inner_props().unwrap().eq_value(&expected));
}
