//! Echo handler used when no player backend is attached.

use crate::handler::{HandlerFactory, HandlerResponse, RequestHandler};
use crate::request::Request;
use crate::router::PathParams;

/// Factory whose handlers echo back what the router resolved.
///
/// Used for dry runs from the CLI, where route tables name handlers that are
/// not linked into the binary.
#[derive(Debug, Clone)]
pub struct EchoFactory {
    handler_name: String,
}

impl EchoFactory {
    pub fn new(handler_name: impl Into<String>) -> Self {
        Self {
            handler_name: handler_name.into(),
        }
    }
}

impl HandlerFactory for EchoFactory {
    fn create_handler(&self, request: &Request) -> Box<dyn RequestHandler> {
        Box::new(EchoHandler {
            handler_name: self.handler_name.clone(),
            request: request.clone(),
        })
    }
}

struct EchoHandler {
    handler_name: String,
    request: Request,
}

impl RequestHandler for EchoHandler {
    fn handle(&mut self, params: &PathParams) -> HandlerResponse {
        HandlerResponse::ok(serde_json::json!({
            "handler": self.handler_name,
            "method": self.request.method().as_str(),
            "path": self.request.path(),
            "params": params,
        }))
    }
}
