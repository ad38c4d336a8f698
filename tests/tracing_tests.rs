use http::{Method, StatusCode};
use sprig::{Request, ResponseWriter, TracingMiddleware};
use tracing::Level;

mod common;
use common::{call, router, zoo};
use tracing_util::TestTracing;

#[test]
fn test_tracing_middleware_emits_request_span() {
    let tracing = TestTracing::init();

    let mut r = router();
    r.add_middleware(TracingMiddleware);
    r.get("/pets/:id", |req: &Request, w: &mut ResponseWriter| {
        w.write_header(StatusCode::ACCEPTED);
        w.write_str(req.param("id"));
    })
    .unwrap();

    let req = Request::new(Method::GET, "/pets/12345");
    let request_id = req.request_id;
    let mut w = ResponseWriter::new();
    r.dispatch(req, &mut w);
    assert_eq!(w.body_text(), "12345");

    let spans = tracing.spans_named("request");
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.field("method"), Some("GET"));
    assert_eq!(span.field("path"), Some("/pets/12345"));
    assert_eq!(span.field("request_id"), Some(request_id.to_string().as_str()));
    assert_eq!(span.field("status"), Some("202"));
    assert!(span.field("latency_ms").is_some());
}

#[test]
fn test_no_span_for_not_found() {
    let tracing = TestTracing::init();

    let mut r = router();
    r.add_middleware(TracingMiddleware);
    r.get("/pets", |_req: &Request, w: &mut ResponseWriter| w.write_str("pets"))
        .unwrap();

    let (_, w) = call(&r, Method::GET, "/plants");
    assert_eq!(w.status(), StatusCode::NOT_FOUND);
    assert!(tracing.spans_named("request").is_empty());
}

#[test]
fn test_dump_routes_logs_every_route() {
    let tracing = TestTracing::init();

    let r = zoo();
    r.dump_routes();

    let header = tracing.events_with_message("Routing table");
    assert_eq!(header.len(), 1);
    assert_eq!(header[0].level, Level::INFO);
    assert_eq!(header[0].field("routes_count"), Some("8"));

    let rows = tracing.events_with_message("Route");
    assert_eq!(rows.len(), 8);
    assert!(rows
        .iter()
        .any(|e| e.field("method") == Some("DELETE") && e.field("pattern") == Some("zoo/animals/:id")));
    assert!(rows.iter().any(|e| e.field("pattern") == Some("")));
}
