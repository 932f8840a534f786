//! Route pattern compiler.
//!
//! Turns a pattern string such as `playlists/:plref/items/:range` or
//! `static/:path*` into an ordered list of typed [`Segment`]s. Compilation is
//! pure and runs only while the routing table is being built.

use std::fmt;

use crate::error::ConfigurationError;
use crate::request::split_segments;

/// One compiled segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact, case-sensitive text equality
    Literal(String),
    /// `:name` - binds exactly one request segment
    Param(String),
    /// `:name*` - binds every remaining request segment joined by `/`
    RestParam(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{name}"),
            Segment::RestParam(name) => write!(f, ":{name}*"),
        }
    }
}

/// A compiled route pattern; zero segments denotes the root route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parameter names in pattern order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::RestParam(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Compile a pattern string into a [`RoutePattern`].
///
/// # Errors
///
/// * [`ConfigurationError::EmptyParamName`] for `:` or `:*`
/// * [`ConfigurationError::RestParamNotLast`] when `:name*` is followed by
///   another segment
pub fn compile(pattern: &str) -> Result<RoutePattern, ConfigurationError> {
    let pieces: Vec<&str> = split_segments(pattern).collect();
    let mut segments = Vec::with_capacity(pieces.len());

    for (i, piece) in pieces.iter().enumerate() {
        let Some(param) = piece.strip_prefix(':') else {
            segments.push(Segment::Literal((*piece).to_string()));
            continue;
        };

        let (name, is_rest) = match param.strip_suffix('*') {
            Some(name) => (name, true),
            None => (param, false),
        };

        if name.is_empty() {
            return Err(ConfigurationError::EmptyParamName {
                pattern: pattern.to_string(),
            });
        }

        if is_rest {
            if i + 1 != pieces.len() {
                return Err(ConfigurationError::RestParamNotLast {
                    pattern: pattern.to_string(),
                    segment: (*piece).to_string(),
                });
            }
            segments.push(Segment::RestParam(name.to_string()));
        } else {
            segments.push(Segment::Param(name.to_string()));
        }
    }

    Ok(RoutePattern { segments })
}
