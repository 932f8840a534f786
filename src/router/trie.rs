//! Segment trie backing the router
//!
//! Each node represents one position in a route pattern:
//! - literal children are keyed by exact segment text
//! - at most one param child binds a single request segment
//! - at most one rest child binds the remaining request segments
//! - handler factories live at terminal nodes, keyed by HTTP method
//!
//! Lookups never backtrack: at every node the walk takes the literal child if
//! one matches, else the param child, else the rest child, and fails otherwise.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::core::ParamVec;
use super::segment::Segment;
use crate::handler::SharedFactory;

/// Named child slot (`:name` or `:name*`)
struct ParamChild {
    /// Binding name; the most recent registration through this slot wins
    name: Arc<str>,
    node: TrieNode,
}

impl ParamChild {
    fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            node: TrieNode::default(),
        }
    }
}

#[derive(Default)]
pub(super) struct TrieNode {
    literals: HashMap<String, TrieNode>,
    param: Option<Box<ParamChild>>,
    rest: Option<Box<ParamChild>>,
    handlers: HashMap<Method, SharedFactory>,
}

impl TrieNode {
    /// Follow a compiled pattern without creating nodes
    fn find(&self, segments: &[Segment]) -> Option<&TrieNode> {
        let mut node = self;
        for segment in segments {
            node = match segment {
                Segment::Literal(text) => node.literals.get(text)?,
                Segment::Param(_) => &node.param.as_ref()?.node,
                Segment::RestParam(_) => &node.rest.as_ref()?.node,
            };
        }
        Some(node)
    }

    /// Whether a factory is already installed for `method` at this pattern
    pub(super) fn has_handler(&self, segments: &[Segment], method: &Method) -> bool {
        self.find(segments)
            .is_some_and(|node| node.handlers.contains_key(method))
    }

    /// Insert a factory, creating or reusing nodes along the way.
    ///
    /// Callers check [`TrieNode::has_handler`] first; an existing factory for
    /// `method` is never replaced.
    pub(super) fn insert(&mut self, segments: &[Segment], method: Method, factory: SharedFactory) {
        let mut node = self;
        for segment in segments {
            node = match segment {
                Segment::Literal(text) => node.literals.entry(text.clone()).or_default(),
                Segment::Param(name) => bind_slot(&mut node.param, name),
                Segment::RestParam(name) => bind_slot(&mut node.rest, name),
            };
        }

        node.handlers.entry(method).or_insert(factory);
    }

    /// Walk request segments from this node, pushing captured params.
    ///
    /// Returns the node reached once every segment is consumed (or absorbed
    /// by a rest child), or `None` at a dead end. Bindings pushed before a
    /// dead end are left in `params`.
    pub(super) fn walk<'a>(&'a self, segments: &[&str], params: &mut ParamVec) -> Option<&'a TrieNode> {
        let mut node = self;
        let mut idx = 0;

        while let Some(&segment) = segments.get(idx) {
            if let Some(child) = node.literals.get(segment) {
                node = child;
                idx += 1;
            } else if let Some(param) = node.param.as_deref() {
                params.push((Arc::clone(&param.name), segment.to_string()));
                node = &param.node;
                idx += 1;
            } else if let Some(rest) = node.rest.as_deref() {
                params.push((Arc::clone(&rest.name), segments[idx..].join("/")));
                return Some(&rest.node);
            } else {
                return None;
            }
        }

        Some(node)
    }

    #[inline]
    pub(super) fn handler(&self, method: &Method) -> Option<&SharedFactory> {
        self.handlers.get(method)
    }

    /// Methods with a factory at this node, sorted by name
    pub(super) fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

/// Create or reuse a named slot and make `name` its binding name
fn bind_slot<'a>(slot: &'a mut Option<Box<ParamChild>>, name: &str) -> &'a mut TrieNode {
    let child = slot.get_or_insert_with(|| Box::new(ParamChild::new(name)));
    if child.name.as_ref() != name {
        warn!(
            previous = %child.name,
            name = %name,
            "Parameter slot renamed by later route"
        );
        child.name = Arc::from(name);
    }
    &mut child.node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{handler_fn, HandlerResponse};
    use crate::request::split_segments;
    use crate::router::compile;

    fn factory() -> SharedFactory {
        handler_fn(|_, _| HandlerResponse::ok(serde_json::Value::Null))
    }

    fn insert(root: &mut TrieNode, method: Method, pattern: &str) {
        let pattern = compile(pattern).unwrap();
        root.insert(pattern.segments(), method, factory());
    }

    fn walk<'a>(root: &'a TrieNode, path: &str) -> (Option<&'a TrieNode>, ParamVec) {
        let segments: Vec<&str> = split_segments(path).collect();
        let mut params = ParamVec::new();
        let node = root.walk(&segments, &mut params);
        (node, params)
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::GET, "playlists/:plref/items");
        insert(&mut root, Method::GET, "playlists/:plref");
        assert_eq!(root.literals.len(), 1);
        let playlists = &root.literals["playlists"];
        assert!(playlists.param.is_some());
        assert!(playlists.literals.is_empty());
    }

    #[test]
    fn test_has_handler_sees_existing_method() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::GET, "data");
        insert(&mut root, Method::POST, "data");
        let data = compile("/data/").unwrap();
        assert!(root.has_handler(data.segments(), &Method::GET));
        assert!(!root.has_handler(data.segments(), &Method::PUT));
        let missing = compile("other").unwrap();
        assert!(!root.has_handler(missing.segments(), &Method::GET));
        assert!(root.literals.get("other").is_none());
    }

    #[test]
    fn test_last_param_name_wins() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::GET, "items/:id");
        insert(&mut root, Method::PUT, "items/:item_id");
        let (node, params) = walk(&root, "/items/7");
        assert!(node.is_some());
        assert_eq!(params[0].0.as_ref(), "item_id");
        assert_eq!(params[0].1, "7");
    }

    #[test]
    fn test_walk_keeps_partial_bindings_on_dead_end() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::GET, "playlists/:plref/items");
        let (node, params) = walk(&root, "/playlists/p3/columns");
        assert!(node.is_none());
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].1, "p3");
    }

    #[test]
    fn test_rest_absorbs_remaining_segments() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::GET, "static/:path*");
        let (node, params) = walk(&root, "/static/css/app/main.css");
        assert!(node.is_some_and(|n| n.handler(&Method::GET).is_some()));
        assert_eq!(params[0].1, "css/app/main.css");
    }

    #[test]
    fn test_methods_sorted() {
        let mut root = TrieNode::default();
        insert(&mut root, Method::PUT, "data");
        insert(&mut root, Method::DELETE, "data");
        insert(&mut root, Method::GET, "data");
        let (node, _) = walk(&root, "/data");
        assert_eq!(
            node.map(TrieNode::methods),
            Some(vec![Method::DELETE, Method::GET, Method::PUT])
        );
    }
}
