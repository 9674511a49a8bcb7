use crate::config::{load_config, MuxConfig, RuntimeConfig};
use crate::middleware::MetricsMiddleware;
use crate::router::{compile, match_path, normalize, Token};
use crate::server::MuxService;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Command-line interface for brrtmux
#[derive(Parser, Debug)]
#[command(name = "brrtmux")]
#[command(about = "Greedy pattern HTTP router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the routes of a TOML route file
    Serve {
        /// Path to the route file
        #[arg(short, long)]
        config: PathBuf,

        /// Address and port to bind, overrides BRRTMUX_ADDR and the file
        #[arg(long)]
        addr: Option<String>,
    },
    /// Print the route table of a route file
    Routes {
        /// Path to the route file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Match one path against one pattern and print the result as JSON
    Match {
        /// Route pattern, e.g. `/users/:id`
        #[arg(short, long)]
        pattern: String,

        /// Request path
        #[arg(long)]
        path: String,
    },
}

/// Token as printed by `brrtmux match`: `{"literal": "..."}` or `{"param": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenReport {
    Literal(String),
    Param(String),
}

/// Output of `brrtmux match`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub pattern: String,
    pub path: String,
    pub normalized_path: String,
    pub tokens: Vec<TokenReport>,
    pub matched: bool,
    pub params: BTreeMap<String, String>,
}

/// Compile `pattern`, match `path` and describe the outcome
#[must_use]
pub fn match_report(pattern: &str, path: &str) -> MatchReport {
    let compiled = compile(pattern);
    let normalized_path = normalize(path);
    let captures = match_path(&compiled, &normalized_path);

    MatchReport {
        pattern: pattern.to_string(),
        path: path.to_string(),
        tokens: compiled
            .tokens()
            .iter()
            .map(|t| match t {
                Token::Literal(text) => TokenReport::Literal(text.clone()),
                Token::Param(name) => TokenReport::Param(name.to_string()),
            })
            .collect(),
        matched: captures.is_some(),
        params: captures
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        normalized_path,
    }
}

fn print_routes(config: &MuxConfig) {
    println!("[routes] count={}", config.routes.len());
    for route in &config.routes {
        println!(
            "{:<7} {:<40} -> {} {:?} {:?}",
            route.method.to_ascii_uppercase(),
            route.pattern,
            route.status,
            route.content_type,
            route.body
        );
    }
    match &config.not_found {
        Some(nf) => println!("[not_found] -> {} {:?} {:?}", nf.status, nf.content_type, nf.body),
        None => println!("[not_found] -> default 404"),
    }
}

fn serve(config_path: &Path, addr: Option<&str>) -> anyhow::Result<()> {
    let runtime = RuntimeConfig::from_env();
    runtime.apply();

    let config = load_config(config_path)?;
    let addr = addr
        .map(str::to_string)
        .or(runtime.addr)
        .unwrap_or_else(|| config.server.addr.clone());

    let dispatcher = config.build_dispatcher()?;
    let mut service = MuxService::new(dispatcher);
    if config.server.metrics {
        service = service.with_metrics(MetricsMiddleware::new());
    }

    info!(
        addr = %addr,
        routes = config.routes.len(),
        stack_size = runtime.stack_size,
        metrics = config.server.metrics,
        "Starting brrtmux"
    );
    let handle = service
        .start(addr.as_str())
        .with_context(|| format!("Failed to bind {addr}"))?;
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("Server coroutine panicked: {e:?}"))
}

/// Execute an already-parsed command
///
/// # Errors
///
/// Returns an error if the route file cannot be read or parsed, or the
/// server fails to start.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Serve { config, addr } => {
            serve(&config, addr.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes { config } => {
            print_routes(&load_config(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { pattern, path } => {
            let report = match_report(&pattern, &path);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to render report")?
            );
            Ok(if report.matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// See [`run`].
pub fn run_cli() -> anyhow::Result<ExitCode> {
    run(Cli::parse())
}
