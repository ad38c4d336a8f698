//! # Dispatcher Module
//!
//! Defines what the router dispatches *to*: the [`Handler`] callable and the
//! [`Dispatch`] outcome returned by `Router::dispatch`.
//!
//! ## Outcomes
//!
//! Every dispatch ends in exactly one of two states. `Matched` means the bound
//! handler (wrapped in its middleware chain) ran once; `NotFound` means the
//! router's not-found handler ran once. There is no path that runs both.

mod core;

pub use core::{handler, Dispatch, Handler};
