//! Errors raised while building the routing table.

use std::fmt;

use http::Method;

/// Route registration error
///
/// Returned by [`crate::router::compile`] and [`crate::router::Router::define_route`]
/// when a route definition is invalid. These are raised while the routing
/// table is being built, never while requests are dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A `:name*` segment appeared before the end of the pattern
    RestParamNotLast {
        /// The pattern being compiled
        pattern: String,
        /// The offending segment text
        segment: String,
    },
    /// A `:` or `:*` segment with no parameter name
    EmptyParamName {
        /// The pattern being compiled
        pattern: String,
    },
    /// A handler factory is already installed for this method at this route
    DuplicateRoute {
        /// HTTP method of the rejected registration
        method: Method,
        /// The pattern being registered
        pattern: String,
    },
    /// A route table references a handler name the registry does not know
    UnknownHandler {
        /// Handler name from the route table
        handler: String,
        /// The pattern it was registered for
        pattern: String,
    },
    /// A route table contains a method token that is not a valid HTTP method
    InvalidMethod {
        /// The method token as written
        method: String,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::RestParamNotLast { pattern, segment } => {
                write!(
                    f,
                    "route configuration error: rest parameter '{segment}' must be the last \
                    segment of pattern '{pattern}'"
                )
            }
            ConfigurationError::EmptyParamName { pattern } => {
                write!(
                    f,
                    "route configuration error: empty parameter name in pattern '{pattern}'"
                )
            }
            ConfigurationError::DuplicateRoute { method, pattern } => {
                write!(
                    f,
                    "route configuration error: duplicate route {method} '{pattern}'"
                )
            }
            ConfigurationError::UnknownHandler { handler, pattern } => {
                write!(
                    f,
                    "route configuration error: unknown handler '{handler}' for pattern '{pattern}'"
                )
            }
            ConfigurationError::InvalidMethod { method } => {
                write!(
                    f,
                    "route configuration error: invalid HTTP method '{method}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
