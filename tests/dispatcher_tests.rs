//! Dispatch loop: parameter binding, fallback handling and sub-routers.

use brrtmux::dispatcher::{
    Dispatcher, HandlerRef, HandlerResponse, HttpError, RequestContext, NOT_FOUND_BODY,
};
use brrtmux::ids::RequestId;
use brrtmux::router::Router;
use http::Method;
use serde_json::json;
use std::sync::Arc;

fn echo_params(ctx: &RequestContext) -> HandlerResponse {
    HandlerResponse::json(200, json!({ "params": ctx.params(), "path": ctx.path }))
}

#[test]
fn test_params_are_bound_for_the_handler() {
    let mut router = Router::new();
    router.get("/head/:param1/middle/prefix:param2.html", echo_params, &[]);
    let dispatcher = Dispatcher::new(router);

    let resp = dispatcher.dispatch(RequestContext::new(
        Method::GET,
        "/head/one/two/middle/prefixthree/four.html",
    ));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["params"]["param1"], "one/two");
    assert_eq!(resp.body["params"]["param2"], "three/four");
}

#[test]
fn test_default_not_found() {
    let dispatcher = Dispatcher::new(Router::new());
    let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/missing"));
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body_str(), Some(NOT_FOUND_BODY));
    assert_eq!(resp.get_header("content-type"), Some("text/plain; charset=utf-8"));
}

#[test]
fn test_custom_not_found_sees_no_params() {
    let mut router = Router::new();
    router.get("/known/:id", echo_params, &[]);

    let fallback: HandlerRef = Arc::new(|ctx: &RequestContext| {
        assert!(ctx.params().is_empty());
        HandlerResponse::json(404, json!({ "missing": ctx.path }))
    });
    let dispatcher = Dispatcher::new(router).with_not_found(fallback);

    let resp = dispatcher.dispatch(RequestContext::new(Method::POST, "/known/1"));
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, json!({ "missing": "/known/1" }));
}

#[test]
fn test_method_mismatch_falls_back() {
    let mut router = Router::new();
    router.get("/only-get", echo_params, &[]);
    let dispatcher = Dispatcher::new(router);

    assert_eq!(
        dispatcher
            .dispatch(RequestContext::new(Method::PUT, "/only-get"))
            .status,
        404
    );
}

#[test]
fn test_query_string_is_not_part_of_the_match() {
    let mut router = Router::new();
    router.get(
        "/search/:term",
        |ctx: &RequestContext| {
            HandlerResponse::json(
                200,
                json!({ "term": ctx.param("term"), "page": ctx.query_param("page") }),
            )
        },
        &[],
    );
    let dispatcher = Dispatcher::new(router);

    let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/search/rust?page=2"));
    assert_eq!(resp.body, json!({ "term": "rust", "page": "2" }));
}

#[test]
fn test_stale_params_are_cleared_before_dispatch() {
    let mut inner = Router::new();
    inner.get("/api/:rest", echo_params, &[]);
    let inner = Dispatcher::new(inner);

    // mounting the inner dispatcher re-dispatches the same context
    let mut outer = Router::new();
    outer.add(Method::GET, "/api/v1/:tail", Arc::new(inner), &[]);
    let outer = Dispatcher::new(outer);

    let resp = outer.dispatch(RequestContext::new(Method::GET, "/api/v1/users/9"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["params"], json!({ "rest": "v1/users/9" }));
}

#[test]
fn test_sub_router_not_found() {
    let inner = Dispatcher::new(Router::new()).with_not_found(Arc::new(|_: &RequestContext| {
        HandlerResponse::text(404, "inner miss")
    }));
    let mut outer = Router::new();
    outer.add(Method::GET, "/admin", Arc::new(inner), &[]);
    let outer = Dispatcher::new(outer);

    let resp = outer.dispatch(RequestContext::new(Method::GET, "/admin/x"));
    assert_eq!(resp.body_str(), Some("inner miss"));
}

#[test]
fn test_http_error_rendering() {
    let mut router = Router::new();
    router.get(
        "/items/:id",
        |ctx: &RequestContext| match ctx.param("id").map(str::parse::<u32>) {
            Some(Ok(id)) => HandlerResponse::json(200, json!({ "id": id })),
            _ => HttpError::bad_request("id must be numeric").into(),
        },
        &[],
    );
    router.get(
        "/boom",
        |_: &RequestContext| {
            let err = std::io::Error::other("disk on fire");
            HandlerResponse::from_error(&err)
        },
        &[],
    );
    let dispatcher = Dispatcher::new(router);

    let ok = dispatcher.dispatch(RequestContext::new(Method::GET, "/items/12"));
    assert_eq!(ok.body, json!({ "id": 12 }));

    let bad = dispatcher.dispatch(RequestContext::new(Method::GET, "/items/abc"));
    assert_eq!(bad.status, 400);

    let boom = dispatcher.dispatch(RequestContext::new(Method::GET, "/boom"));
    assert_eq!(boom.status, 500);
    assert_eq!(boom.body_str(), Some("disk on fire"));
}

#[test]
fn test_request_id_is_preserved() {
    let mut router = Router::new();
    router.get(
        "/id",
        |ctx: &RequestContext| HandlerResponse::text(200, ctx.request_id.to_string()),
        &[],
    );
    let dispatcher = Dispatcher::new(router);

    let id = RequestId::new();
    let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/id").with_request_id(id));
    assert_eq!(resp.body_str(), Some(id.to_string().as_str()));
}
