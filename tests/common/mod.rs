#![allow(dead_code)]

use msrv_router::handler::{handler_fn, HandlerResponse, SharedFactory};
use msrv_router::request::Request;
use msrv_router::router::DispatchResult;
use std::sync::Arc;

/// Factory whose handler answers with a fixed tag and the captured params
pub fn tagged(tag: &'static str) -> SharedFactory {
    handler_fn(move |_, params| {
        HandlerResponse::ok(serde_json::json!({
            "tag": tag,
            "params": params,
        }))
    })
}

/// Run the handler for `result`, returning its tag
pub fn handler_tag(result: &DispatchResult, request: &Request) -> Option<String> {
    let mut handler = result.create_handler(request)?;
    let response = handler.handle(&result.params);
    response.body["tag"].as_str().map(str::to_string)
}

/// Whether `result` carries exactly `factory`
pub fn is_factory(result: &DispatchResult, factory: &SharedFactory) -> bool {
    result
        .factory
        .as_ref()
        .is_some_and(|found| Arc::ptr_eq(found, factory))
}

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file with the given extension
    pub fn create_temp_table(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("msrv_routes_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
