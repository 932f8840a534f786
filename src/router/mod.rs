//! # Router Module
//!
//! Path matching and route resolution for the control surface.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (`player`, `playlists/:plref`, `static/:path*`)
//! - Building a segment trie from those patterns at startup
//! - Resolving an incoming method and path to a handler factory
//! - Extracting path parameters in traversal order
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Build**: route patterns are compiled into typed segments and inserted
//!    into the trie through [`Router::define_route`]. Invalid patterns and
//!    duplicate routes fail here, before any request is served.
//!
//! 2. **Dispatch**: each request walks the trie once. At every node a literal
//!    child beats the param child, and the param child beats the rest child.
//!    The walk never backtracks.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use msrv_router::handler::{handler_fn, HandlerResponse};
//! use msrv_router::request::Request;
//! use msrv_router::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.define_route(
//!     Method::GET,
//!     "playlists/:plref/items/:range",
//!     handler_fn(|_, _| HandlerResponse::ok(serde_json::json!([]))),
//! )?;
//!
//! let result = router.dispatch(&Request::new(Method::GET, "/playlists/p1/items/0:10"));
//! assert!(result.is_match());
//! assert_eq!(result.param("plref"), Some("p1"));
//! assert_eq!(result.param("range"), Some("0:10"));
//! # Ok(())
//! # }
//! ```

mod core;
mod segment;
mod trie;

pub use self::core::{
    DispatchResult, MatchOutcome, ParamVec, PathParams, RouteEntry, Router,
    DEFAULT_SLOW_DISPATCH, MAX_INLINE_PARAMS,
};
pub use self::segment::{compile, RoutePattern, Segment};
