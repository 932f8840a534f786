//! Router core module - route registration and the dispatch hot path.
//!
//! Registration compiles a pattern and grows the trie; it runs once at startup.
//! Dispatch is a read-only trie walk that copies captured values out, so a
//! [`DispatchResult`] never borrows from the router.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::segment::{compile, RoutePattern};
use super::trie::TrieNode;
use crate::error::ConfigurationError;
use crate::handler::{RequestHandler, SharedFactory};
use crate::request::Request;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum number of request path segments before heap allocation.
const MAX_INLINE_SEGMENTS: usize = 16;

/// Default threshold above which a dispatch is logged as slow
pub const DEFAULT_SLOW_DISPATCH: Duration = Duration::from_millis(1);

/// Captured parameters in traversal order.
///
/// Names are `Arc<str>` shared with the trie; values are copied from the
/// request path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Ordered parameter bindings produced by a dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    /// Get a parameter by name.
    ///
    /// Uses "last write wins" semantics when the same name was bound at more
    /// than one depth.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in the order they were captured (outermost first)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a HashMap.
    /// Note: This allocates and loses ordering - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl From<ParamVec> for PathParams {
    fn from(params: ParamVec) -> Self {
        Self(params)
    }
}

impl Serialize for PathParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// How a dispatch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A factory was found for the path and method
    Matched,
    /// No node matched the path, or the reached node has no factories at all
    NotFound,
    /// The path matched a route, but not for the requested method
    MethodNotAllowed {
        /// Methods registered at the matched node, sorted by name
        allowed: Vec<Method>,
    },
}

/// Result of dispatching a request
///
/// `factory` is the primary signal: `None` means no handler is available,
/// whatever bindings may have been captured along the way. `outcome` tells
/// an unmatched path apart from a method that is not registered there.
#[derive(Clone)]
pub struct DispatchResult {
    /// Factory for the matched route, if any
    pub factory: Option<SharedFactory>,
    /// Bindings captured during the walk, outermost first
    pub params: PathParams,
    /// Why the dispatch ended the way it did
    pub outcome: MatchOutcome,
}

impl DispatchResult {
    #[inline]
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.factory.is_some()
    }

    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Instantiate the handler for `request`, if a factory matched
    #[must_use]
    pub fn create_handler(&self, request: &Request) -> Option<Box<dyn RequestHandler>> {
        self.factory
            .as_ref()
            .map(|factory| factory.create_handler(request))
    }
}

impl fmt::Debug for DispatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchResult")
            .field("factory", &self.factory.as_ref().map(|_| "<factory>"))
            .field("params", &self.params)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// A registered route, kept for introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: RoutePattern,
}

/// Router that matches HTTP requests to handler factories using a segment trie
///
/// Routes are added with [`Router::define_route`] through `&mut self`; once the
/// router is shared (typically behind an `Arc`) it can only be dispatched
/// against, which makes the table read-only for the serving lifetime.
///
/// # Performance
///
/// - Registration: O(k) in the number of pattern segments
/// - Dispatch: O(k) in the number of request segments, at most one decision
///   per segment, no backtracking
pub struct Router {
    root: TrieNode,
    routes: Vec<RouteEntry>,
    slow_dispatch: Duration,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            routes: Vec::new(),
            slow_dispatch: DEFAULT_SLOW_DISPATCH,
        }
    }

    /// Set the duration above which dispatches are logged as slow
    pub fn set_slow_dispatch_threshold(&mut self, threshold: Duration) {
        self.slow_dispatch = threshold;
    }

    /// Register `factory` for `method` at `pattern`.
    ///
    /// # Errors
    ///
    /// * [`ConfigurationError::EmptyParamName`] / [`ConfigurationError::RestParamNotLast`]
    ///   if the pattern does not compile
    /// * [`ConfigurationError::DuplicateRoute`] if a factory is already
    ///   registered for this method at the same resolved route
    ///
    /// A failed registration leaves the routing table unchanged.
    pub fn define_route(
        &mut self,
        method: Method,
        pattern: &str,
        factory: SharedFactory,
    ) -> Result<(), ConfigurationError> {
        let compiled = compile(pattern)?;

        if self.root.has_handler(compiled.segments(), &method) {
            warn!(method = %method, pattern = %compiled, "Duplicate route rejected");
            return Err(ConfigurationError::DuplicateRoute {
                method,
                pattern: pattern.to_string(),
            });
        }

        self.root.insert(compiled.segments(), method.clone(), factory);
        debug!(method = %method, pattern = %compiled, "Route registered");
        self.routes.push(RouteEntry {
            method,
            pattern: compiled,
        });
        Ok(())
    }

    /// Registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Log the full routing table at info level
    pub fn dump_routes(&self) {
        info!(routes_count = self.routes.len(), "Routing table");
        for entry in &self.routes {
            info!(method = %entry.method, pattern = %entry.pattern, "Route");
        }
    }

    /// Methods registered at the node `path` resolves to.
    ///
    /// Empty when the path does not resolve to any node.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let segments: SmallVec<[&str; MAX_INLINE_SEGMENTS]> =
            crate::request::split_segments(path).collect();
        let mut params = ParamVec::new();
        self.root
            .walk(&segments, &mut params)
            .map(TrieNode::methods)
            .unwrap_or_default()
    }

    /// Resolve a request to a handler factory and its path parameters.
    ///
    /// Never fails: a missing factory in the result means no handler is
    /// available for this request.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> DispatchResult {
        let method = request.method();
        let path = request.path();
        debug!(method = %method, path = %path, "Dispatch attempt");

        let start = Instant::now();
        let segments: SmallVec<[&str; MAX_INLINE_SEGMENTS]> = request.segments().collect();
        let mut params = ParamVec::new();

        let (factory, outcome) = match self.root.walk(&segments, &mut params) {
            None => (None, MatchOutcome::NotFound),
            Some(node) => match node.handler(method) {
                Some(factory) => (Some(Arc::clone(factory)), MatchOutcome::Matched),
                None => {
                    let allowed = node.methods();
                    if allowed.is_empty() {
                        (None, MatchOutcome::NotFound)
                    } else {
                        (None, MatchOutcome::MethodNotAllowed { allowed })
                    }
                }
            },
        };

        let duration = start.elapsed();
        if duration > self.slow_dispatch {
            warn!(
                method = %method,
                path = %path,
                duration_us = duration.as_micros(),
                "Slow dispatch detected"
            );
        }

        match &outcome {
            MatchOutcome::Matched => debug!(
                method = %method,
                path = %path,
                path_params = ?params,
                duration_us = duration.as_micros(),
                "Route matched"
            ),
            MatchOutcome::NotFound => warn!(
                method = %method,
                path = %path,
                "No route matched"
            ),
            MatchOutcome::MethodNotAllowed { allowed } => warn!(
                method = %method,
                path = %path,
                allowed = ?allowed,
                "Route matched without handler for method"
            ),
        }

        DispatchResult {
            factory,
            params: PathParams::from(params),
            outcome,
        }
    }
}
