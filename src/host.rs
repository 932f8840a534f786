//! # Host Module
//!
//! The explicitly owned context that sits between the hosting HTTP server and
//! the router, plus the init/quit lifecycle that creates and destroys it.
//!
//! The hosting application owns a [`Lifecycle`]; `on_init` builds the routing
//! table once and wraps it in a [`ControlSurface`], which is then shared with
//! request-serving threads. Nothing here is process-global.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::handler::HandlerResponse;
use crate::registry::HandlerRegistry;
use crate::request::Request;
use crate::router::{MatchOutcome, Router};
use crate::routes::RouteTable;
use crate::runtime_config::RuntimeConfig;

/// How the surface translates unmatched dispatches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceSettings {
    /// Answer 405 instead of 404 when only the method is unregistered
    pub method_not_allowed: bool,
}

impl From<&RuntimeConfig> for SurfaceSettings {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            method_not_allowed: config.method_not_allowed,
        }
    }
}

/// Frozen routing table plus response policy, shared by serving threads
#[derive(Clone)]
pub struct ControlSurface {
    router: Arc<Router>,
    settings: SurfaceSettings,
}

impl ControlSurface {
    /// Freeze `router`; it can no longer be modified once wrapped
    pub fn new(router: Router, settings: SurfaceSettings) -> Self {
        Self {
            router: Arc::new(router),
            settings,
        }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    /// Dispatch `request`, create its handler and run it.
    pub fn handle(&self, request: &Request) -> HandlerResponse {
        let result = self.router.dispatch(request);
        if let Some(mut handler) = result.create_handler(request) {
            return handler.handle(&result.params);
        }

        match result.outcome {
            MatchOutcome::MethodNotAllowed { allowed } if self.settings.method_not_allowed => {
                HandlerResponse::method_not_allowed(request.path(), &allowed)
            }
            _ => HandlerResponse::not_found(request.path()),
        }
    }
}

/// Init/quit hooks for the embedding player plugin.
///
/// Failures in either hook are logged and swallowed so that a broken route
/// table never takes down the host application.
pub struct Lifecycle {
    config: RuntimeConfig,
    registry: HandlerRegistry,
    surface: Option<ControlSurface>,
}

impl Lifecycle {
    pub fn new(config: RuntimeConfig, registry: HandlerRegistry) -> Self {
        Self {
            config,
            registry,
            surface: None,
        }
    }

    /// Build the routing table and bring the surface up.
    ///
    /// Returns whether the surface is live afterwards.
    pub fn on_init(&mut self) -> bool {
        match build_surface(&self.config, &self.registry) {
            Ok(surface) => {
                info!(
                    routes_count = surface.router().routes().len(),
                    method_not_allowed = surface.settings().method_not_allowed,
                    "Control surface started"
                );
                surface.router().dump_routes();
                self.surface = Some(surface);
                true
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "Control surface failed to start");
                self.surface = None;
                false
            }
        }
    }

    /// Tear the surface down; in-flight clones stay valid until dropped
    pub fn on_quit(&mut self) {
        if self.surface.take().is_some() {
            info!("Control surface stopped");
        }
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ControlSurface> {
        self.surface.as_ref()
    }
}

/// Build a surface from the configured route table.
///
/// Without `MSRV_ROUTES` the surface starts with an empty table.
pub fn build_surface(config: &RuntimeConfig, registry: &HandlerRegistry) -> Result<ControlSurface> {
    let mut router = match &config.routes_file {
        Some(path) => RouteTable::load(path)?
            .build_router(registry)
            .with_context(|| format!("invalid route table {}", path.display()))?,
        None => Router::new(),
    };
    router.set_slow_dispatch_threshold(config.slow_dispatch);
    Ok(ControlSurface::new(router, SurfaceSettings::from(config)))
}
