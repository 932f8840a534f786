//! # msrv-router
//!
//! Request routing for the HTTP control surface of a media player
//! remote-control server.
//!
//! ## Overview
//!
//! Given an HTTP method and an already decoded path, the router resolves which
//! registered handler factory services the request and extracts the parameters
//! embedded in the path. HTTP parsing, URL decoding, authentication and
//! response encoding all happen outside this crate.
//!
//! ## Architecture
//!
//! - **[`router`]** - pattern compiler, segment trie and dispatcher
//! - **[`request`]** - the request carrier handed to the router
//! - **[`handler`]** - the handler factory / handler traits
//! - **[`registry`]** - named factories for declarative route tables
//! - **[`routes`]** - route tables loaded from TOML, YAML or JSON
//! - **[`host`]** - owned control-surface context and init/quit lifecycle
//! - **[`runtime_config`]** / **[`logging`]** - environment-driven setup
//! - **[`cli`]** - the `msrv-router` command-line tool
//!
//! ## Pattern Syntax
//!
//! | Pattern piece | Matches                         | Binds                     |
//! |---------------|---------------------------------|---------------------------|
//! | `player`      | exactly `player`                | nothing                   |
//! | `:plref`      | any single segment              | `plref` = the segment     |
//! | `:path*`      | one or more trailing segments   | `path` = segments joined by `/` |
//!
//! At every position a literal match beats a parameter, and a parameter beats
//! a rest capture. Matching never backtracks.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use msrv_router::handler::{handler_fn, HandlerResponse};
//! use msrv_router::host::{ControlSurface, SurfaceSettings};
//! use msrv_router::request::Request;
//! use msrv_router::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.define_route(
//!     Method::GET,
//!     "artwork/:plref/:index",
//!     handler_fn(|_, params| {
//!         HandlerResponse::ok(serde_json::json!({ "index": params.get("index") }))
//!     }),
//! )?;
//!
//! let surface = ControlSurface::new(router, SurfaceSettings::default());
//! let response = surface.handle(&Request::new(Method::GET, "/artwork/p1/3"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["index"], "3");
//!
//! let missing = surface.handle(&Request::new(Method::GET, "/nonexistent"));
//! assert_eq!(missing.status, 404);
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod echo;
pub mod error;
pub mod handler;
pub mod host;
pub mod logging;
pub mod registry;
pub mod request;
pub mod router;
pub mod routes;
pub mod runtime_config;

pub use echo::EchoFactory;
pub use error::ConfigurationError;
pub use handler::{handler_fn, HandlerFactory, HandlerResponse, RequestHandler, SharedFactory};
pub use request::Request;
pub use router::{DispatchResult, MatchOutcome, PathParams, Router};
