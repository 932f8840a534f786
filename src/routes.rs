//! Declarative route tables
//!
//! A route table lists `(method, path, handler)` triples plus an optional base
//! path, and is loaded from TOML, YAML or JSON:
//!
//! ```toml
//! base_path = "/api"
//!
//! [[routes]]
//! method = "GET"
//! path = "player"
//! handler = "get_player"
//!
//! [[routes]]
//! method = "POST"
//! path = "playlists/:plref/items/add"
//! handler = "add_items"
//! ```
//!
//! Handler names are resolved against a [`HandlerRegistry`] when the router is
//! built.

use std::path::Path;

use anyhow::{bail, Context, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigurationError;
use crate::registry::HandlerRegistry;
use crate::router::Router;

/// One route definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDef {
    pub method: String,
    pub path: String,
    pub handler: String,
}

/// File formats accepted by [`RouteTable::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Toml,
    Yaml,
    Json,
}

impl TableFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(TableFormat::Toml),
            "yaml" | "yml" => Some(TableFormat::Yaml),
            "json" => Some(TableFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Prefix joined in front of every route path
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub routes: Vec<RouteDef>,
}

impl RouteTable {
    /// Read and parse a route table file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(format) = TableFormat::from_path(path) else {
            bail!(
                "unsupported route table extension for {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            );
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("failed to parse route table {}", path.display()))
    }

    pub fn parse(content: &str, format: TableFormat) -> Result<Self> {
        let table = match format {
            TableFormat::Toml => toml::from_str(content)?,
            TableFormat::Yaml => serde_yaml::from_str(content)?,
            TableFormat::Json => serde_json::from_str(content)?,
        };
        Ok(table)
    }

    /// Full pattern for a definition, with the base path applied
    #[must_use]
    pub fn full_pattern(&self, def: &RouteDef) -> String {
        if self.base_path.is_empty() {
            def.path.clone()
        } else {
            format!(
                "{}/{}",
                self.base_path.trim_end_matches('/'),
                def.path.trim_start_matches('/')
            )
        }
    }

    /// Build a router with every route in this table.
    ///
    /// # Errors
    ///
    /// Any [`ConfigurationError`]: invalid method token, unknown handler name,
    /// invalid pattern or duplicate route. The first failure aborts the build.
    pub fn build_router(&self, registry: &HandlerRegistry) -> Result<Router, ConfigurationError> {
        let mut router = Router::new();
        for def in &self.routes {
            let pattern = self.full_pattern(def);
            let method = parse_method(&def.method)?;
            let factory = registry
                .get(&def.handler)
                .ok_or_else(|| ConfigurationError::UnknownHandler {
                    handler: def.handler.clone(),
                    pattern: pattern.clone(),
                })?;
            router.define_route(method, &pattern, factory)?;
        }

        info!(
            routes_count = router.routes().len(),
            base_path = %self.base_path,
            "Routing table loaded"
        );
        Ok(router)
    }
}

/// Parse a method token, case-insensitively
pub fn parse_method(token: &str) -> Result<Method, ConfigurationError> {
    Method::from_bytes(token.trim().to_ascii_uppercase().as_bytes()).map_err(|_| {
        ConfigurationError::InvalidMethod {
            method: token.to_string(),
        }
    })
}
