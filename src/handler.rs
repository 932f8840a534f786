//! Handler factory seam between the router and the hosting HTTP layer.
//!
//! The router stores one [`HandlerFactory`] per route and method. On a match the
//! host asks the factory for a fresh [`RequestHandler`] bound to the request and
//! runs it with the captured path parameters.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::request::Request;
use crate::router::PathParams;

/// Produces a request handler for a matched request.
///
/// Implemented by every concrete handler factory, and by any closure of the
/// shape `Fn(&Request) -> Box<dyn RequestHandler>`.
pub trait HandlerFactory: Send + Sync {
    fn create_handler(&self, request: &Request) -> Box<dyn RequestHandler>;
}

impl<F> HandlerFactory for F
where
    F: Fn(&Request) -> Box<dyn RequestHandler> + Send + Sync,
{
    fn create_handler(&self, request: &Request) -> Box<dyn RequestHandler> {
        self(request)
    }
}

/// Factory shared between the routing table and dispatch results
pub type SharedFactory = Arc<dyn HandlerFactory>;

/// A single-use handler created for one request
pub trait RequestHandler: Send {
    /// Execute the handler with the parameters captured by the router
    fn handle(&mut self, params: &PathParams) -> HandlerResponse;
}

/// Response produced by a handler
///
/// Rendering this onto the wire is the hosting server's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// JSON body
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self {
            status: 404,
            body: serde_json::json!({
                "error": "Not found",
                "path": path,
            }),
        }
    }

    #[must_use]
    pub fn method_not_allowed(path: &str, allowed: &[http::Method]) -> Self {
        let allowed: Vec<&str> = allowed.iter().map(http::Method::as_str).collect();
        Self {
            status: 405,
            body: serde_json::json!({
                "error": "Method not allowed",
                "path": path,
                "allowed": allowed,
            }),
        }
    }
}

struct FnHandler<F> {
    request: Request,
    func: Arc<F>,
}

impl<F> RequestHandler for FnHandler<F>
where
    F: Fn(&Request, &PathParams) -> HandlerResponse + Send + Sync + 'static,
{
    fn handle(&mut self, params: &PathParams) -> HandlerResponse {
        (self.func)(&self.request, params)
    }
}

/// Wrap a plain function as a shared handler factory.
///
/// Each created handler keeps its own copy of the request.
///
/// ```rust
/// use msrv_router::handler::{handler_fn, HandlerResponse};
///
/// let factory = handler_fn(|_req, params| {
///     HandlerResponse::ok(serde_json::json!({ "id": params.get("id") }))
/// });
/// # let _ = factory;
/// ```
pub fn handler_fn<F>(func: F) -> SharedFactory
where
    F: Fn(&Request, &PathParams) -> HandlerResponse + Send + Sync + 'static,
{
    let func = Arc::new(func);
    Arc::new(move |request: &Request| -> Box<dyn RequestHandler> {
        Box::new(FnHandler {
            request: request.clone(),
            func: Arc::clone(&func),
        })
    })
}
