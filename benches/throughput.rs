use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use sprig::{Request, ResponseWriter, Router, RuntimeConfig};

fn zoo_router() -> Router {
    let router = Router::with_config(RuntimeConfig::default());
    let patterns = [
        (Method::GET, "/"),
        (Method::GET, "/zoo/animals"),
        (Method::POST, "/zoo/animals"),
        (Method::GET, "/zoo/animals/:id"),
        (Method::PUT, "/zoo/animals/:id"),
        (Method::PATCH, "/zoo/animals/:id"),
        (Method::DELETE, "/zoo/animals/:id"),
        (Method::GET, "/zoo/animals/:id/toys/:toy_id"),
        (
            Method::GET,
            "/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id",
        ),
        (
            Method::POST,
            "/inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id",
        ),
        (Method::GET, "/complex/:a/:b/:c/:d/:e/:f/:g/:h/:i"),
        (Method::GET, "/zoo/health"),
    ];
    for (method, pattern) in patterns {
        if let Err(e) = router.handle(method, pattern, |_req: &Request, w: &mut ResponseWriter| {
            w.write_str("ok");
        }) {
            panic!("failed to register {pattern}: {e}");
        }
    }
    router
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = zoo_router();
    let test_paths = [
        (Method::GET, "/zoo/animals/123"),
        (Method::GET, "/zoo/animals/123/toys/456"),
        (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
        (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
        (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
        (Method::GET, "/zoo/missing/route"),
    ];

    c.bench_function("dispatch", |b| {
        b.iter(|| {
            for (method, path) in &test_paths {
                let mut w = ResponseWriter::new();
                let outcome = router.dispatch(Request::new(method.clone(), *path), &mut w);
                black_box((&outcome, &w));
            }
        })
    });

    c.bench_function("dispatch_literal", |b| {
        b.iter(|| {
            let mut w = ResponseWriter::new();
            let outcome =
                router.dispatch(Request::new(Method::GET, black_box("/zoo/health")), &mut w);
            black_box(outcome);
        })
    });
}

criterion_group!(benches, bench_route_throughput);
criterion_main!(benches);
