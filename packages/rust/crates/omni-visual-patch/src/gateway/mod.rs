//! Gateway namespace: HTTP tool endpoint.

mod http;

pub use http::{GatewayHealthResponse, GatewayState, router, run_http};
