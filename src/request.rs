//! Incoming request carrier consumed by the router.
//!
//! The path is expected to be decoded and stripped of its query string by the
//! HTTP layer before it reaches the router.

use http::Method;

/// An incoming request as seen by the router: method plus decoded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Split the path into `/`-delimited segments.
    ///
    /// Leading and trailing slashes are ignored, so the root path (`/` or the
    /// empty string) yields no segments. Interior empty pieces are kept.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        split_segments(&self.path)
    }
}

/// Split a path or pattern on `/`, dropping only the empty outer pieces.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_matches('/');
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
