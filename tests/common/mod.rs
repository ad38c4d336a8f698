#![allow(dead_code)]

use http::Method;
use sprig::{Dispatch, Request, ResponseWriter, Router, RuntimeConfig};

/// Router with default runtime config, independent of the process environment
pub fn router() -> Router {
    Router::with_config(RuntimeConfig::default())
}

/// Handler that writes a fixed body
pub fn text(body: &'static str) -> impl Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static {
    move |_req: &Request, w: &mut ResponseWriter| w.write_str(body)
}

/// Dispatch `method path` and hand back both the outcome and the writer
pub fn call(router: &Router, method: Method, path: &str) -> (Dispatch, ResponseWriter) {
    let mut w = ResponseWriter::new();
    let outcome = router.dispatch(Request::new(method, path), &mut w);
    (outcome, w)
}

/// The "verb zoo" fixture: every allowed method, literals and params mixed
pub fn zoo() -> Router {
    let r = router();
    r.get("/", text("root")).unwrap();
    r.get("/zoo/animals", text("list")).unwrap();
    r.post("/zoo/animals", text("create")).unwrap();
    r.get("/zoo/animals/:id", |req: &Request, w: &mut ResponseWriter| {
        w.write_str(&format!("get {}", req.param("id")));
    })
    .unwrap();
    r.put("/zoo/animals/:id", |req: &Request, w: &mut ResponseWriter| {
        w.write_str(&format!("put {}", req.param("id")));
    })
    .unwrap();
    r.patch("/zoo/animals/:id", |req: &Request, w: &mut ResponseWriter| {
        w.write_str(&format!("patch {}", req.param("id")));
    })
    .unwrap();
    r.delete("/zoo/animals/:id", |req: &Request, w: &mut ResponseWriter| {
        w.write_str(&format!("delete {}", req.param("id")));
    })
    .unwrap();
    r.get(
        "/zoo/keepers/:keeper/animals/:animal",
        |req: &Request, w: &mut ResponseWriter| {
            w.write_str(&format!("{}:{}", req.param("keeper"), req.param("animal")));
        },
    )
    .unwrap();
    r
}
