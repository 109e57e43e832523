//! HTTP surface of the registry.
//!
//! HTML pages for registration, edit and listing, plus a small JSON search
//! API. Everything is served by one axum `Router` built from an explicit
//! `AppContext`; there is no global state.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::build_router;
pub use server::{start_server, start_server_on, RegistryServer, ServerError, ServerSession};
pub use types::AppContext;
