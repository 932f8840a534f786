//! # CLI Module
//!
//! Command-line tooling for route tables.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Validate a route table and report how many routes it defines:
//!
//! ```bash
//! msrv-router check --routes routes.toml
//! ```
//!
//! ### `routes`
//!
//! Print every route as `METHOD /pattern -> handler`.
//!
//! ### `dispatch`
//!
//! Resolve one request against the table and print the outcome, the captured
//! parameters and the echo handler's output as JSON:
//!
//! ```bash
//! msrv-router dispatch --routes routes.toml GET /api/playlists/p1/items/0:10
//! ```
//!
//! Handlers named in the table are replaced by echo handlers, so no player
//! backend is required.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::host::{ControlSurface, SurfaceSettings};
use crate::logging::{init_logging, LogConfig};
use crate::registry::HandlerRegistry;
use crate::request::Request;
use crate::router::MatchOutcome;
use crate::routes::{parse_method, RouteTable};

#[derive(Parser)]
#[command(name = "msrv-router")]
#[command(about = "Route table tooling for the player control surface", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a route table
    Check {
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// List the routes of a route table
    Routes {
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Dispatch one request against a route table
    Dispatch {
        #[arg(short, long)]
        routes: PathBuf,

        /// Answer 405 instead of 404 when only the method is missing
        #[arg(long, default_value_t = false)]
        method_not_allowed: bool,

        method: String,

        path: String,
    },
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {err:#}");
    }
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { routes } => {
            let table = RouteTable::load(&routes)?;
            let router = table
                .build_router(&HandlerRegistry::echo())
                .with_context(|| format!("invalid route table {}", routes.display()))?;
            println!("{}: {} routes OK", routes.display(), router.routes().len());
            Ok(())
        }
        Commands::Routes { routes } => {
            let table = RouteTable::load(&routes)?;
            for def in &table.routes {
                println!(
                    "{} {} -> {}",
                    def.method.to_ascii_uppercase(),
                    table.full_pattern(def),
                    def.handler
                );
            }
            Ok(())
        }
        Commands::Dispatch {
            routes,
            method_not_allowed,
            method,
            path,
        } => {
            let table = RouteTable::load(&routes)?;
            let router = table.build_router(&HandlerRegistry::echo())?;
            let surface = ControlSurface::new(router, SurfaceSettings { method_not_allowed });

            let request = Request::new(parse_method(&method)?, path);
            let result = surface.router().dispatch(&request);
            let outcome = match &result.outcome {
                MatchOutcome::Matched => "matched",
                MatchOutcome::NotFound => "not_found",
                MatchOutcome::MethodNotAllowed { .. } => "method_not_allowed",
            };
            let response = surface.handle(&request);

            let report = serde_json::json!({
                "outcome": outcome,
                "params": result.params,
                "response": response,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
