//! # Configuration
//!
//! Two sources configure a brrtmux process:
//!
//! - **Environment** ([`RuntimeConfig::from_env`]): coroutine stack size and
//!   an optional bind address override.
//! - **Route file** ([`MuxConfig`], TOML): listen address, not-found response
//!   and a list of routes answered by [`StaticResponder`]s.
//!
//! ## Environment Variables
//!
//! ### `BRRTMUX_STACK_SIZE`
//!
//! Stack size for the coroutines serving requests, decimal (`16384`) or
//! hexadecimal (`0x4000`). Default: `0x4000` (16 KB). Invalid values fall back
//! to the default. Memory use is roughly `stack_size × concurrent requests`.
//!
//! ### `BRRTMUX_ADDR`
//!
//! Listen address, overriding `[server] addr` of the route file.
//!
//! ## Route File
//!
//! ```toml
//! [server]
//! addr = "127.0.0.1:8080"
//!
//! [not_found]
//! status = 404
//! body = "nothing here"
//!
//! [[routes]]
//! method = "GET"
//! pattern = "/hello/:name"
//! content_type = "text"
//! body = "Hello, {name}!"
//!
//! [[routes]]
//! method = "get"
//! pattern = "/users/:id"
//! content_type = "json"
//! body = '{"id": "{id}"}'
//! ```
//!
//! Routes are registered in file order, which is also their match precedence.

use anyhow::{bail, Context};
use http::Method;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::handlers::{ContentKind, StaticResponder};
use crate::middleware::{MiddlewareRef, TracingMiddleware};
use crate::router::Router;

/// Default coroutine stack size (16 KB)
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Listen address override from `BRRTMUX_ADDR`
    pub addr: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            addr: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            stack_size: env::var("BRRTMUX_STACK_SIZE")
                .map(|v| parse_stack_size(&v))
                .unwrap_or(DEFAULT_STACK_SIZE),
            addr: env::var("BRRTMUX_ADDR").ok().filter(|a| !a.trim().is_empty()),
        }
    }

    /// Apply the stack size to the `may` coroutine runtime
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal size, defaulting on error
#[must_use]
pub fn parse_stack_size(val: &str) -> usize {
    let val = val.trim();
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => val.parse(),
    };
    parsed.unwrap_or(DEFAULT_STACK_SIZE)
}

/// Parsed route file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuxConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub not_found: Option<NotFoundSection>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// `[server]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Serve counters on `GET /metrics`
    #[serde(default)]
    pub metrics: bool,
    /// Wrap every route in the tracing middleware
    #[serde(default = "default_true")]
    pub trace_requests: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            metrics: false,
            trace_requests: true,
        }
    }
}

/// `[not_found]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotFoundSection {
    #[serde(default = "default_not_found_status")]
    pub status: u16,
    #[serde(default)]
    pub content_type: ContentKind,
    pub body: String,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub method: String,
    pub pattern: String,
    #[serde(default = "default_status")]
    pub status: u16,
    #[serde(default)]
    pub content_type: ContentKind,
    #[serde(default)]
    pub body: String,
}

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_status() -> u16 {
    200
}

fn default_not_found_status() -> u16 {
    404
}

impl RouteConfig {
    /// Method name, upper-cased; extension methods are allowed
    pub fn http_method(&self) -> anyhow::Result<Method> {
        let name = self.method.trim().to_ascii_uppercase();
        Method::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid HTTP method '{}'", self.method))
    }

    #[must_use]
    pub fn responder(&self) -> StaticResponder {
        StaticResponder::new(self.status, self.content_type, self.body.clone())
    }
}

impl MuxConfig {
    /// Parse a route file from TOML text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse route file")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (i, route) in self.routes.iter().enumerate() {
            route
                .http_method()
                .with_context(|| format!("routes[{i}] ({})", route.pattern))?;
            if !(100..=999).contains(&route.status) {
                bail!("routes[{i}] ({}): invalid status {}", route.pattern, route.status);
            }
        }
        if let Some(nf) = &self.not_found {
            if !(100..=999).contains(&nf.status) {
                bail!("not_found: invalid status {}", nf.status);
            }
        }
        Ok(())
    }

    /// Register every route, in file order, on a new [`Router`]
    pub fn build_router(&self) -> anyhow::Result<Router> {
        let mut router = Router::new();
        let middlewares = if self.server.trace_requests {
            vec![Arc::new(TracingMiddleware) as MiddlewareRef]
        } else {
            Vec::new()
        };
        for route in &self.routes {
            router.add(
                route.http_method()?,
                &route.pattern,
                Arc::new(route.responder()),
                &middlewares,
            );
        }
        Ok(router)
    }

    /// Router plus the configured not-found responder
    pub fn build_dispatcher(&self) -> anyhow::Result<Dispatcher> {
        let mut dispatcher = Dispatcher::new(self.build_router()?);
        if let Some(nf) = &self.not_found {
            dispatcher.set_not_found(Arc::new(StaticResponder::new(
                nf.status,
                nf.content_type,
                nf.body.clone(),
            )));
        }
        Ok(dispatcher)
    }
}

/// Read and parse a route file
pub fn load_config(path: &Path) -> anyhow::Result<MuxConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file: {}", path.display()))?;
    MuxConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid route file: {}", path.display()))
}
