//! Request and response primitives shared by the router, handlers and
//! middleware. The transport itself lives outside this crate; adapters convert
//! from `http::Request` and back to `http::Response`.

pub mod request;
pub mod response;

pub use request::{Request, REQUEST_ID_HEADER};
pub use response::{ResponseWriter, NOT_FOUND_BODY};
