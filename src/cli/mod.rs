//! # CLI Module
//!
//! Command-line front end of the `brrtmux` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Serve the routes declared in a TOML route file:
//!
//! ```bash
//! brrtmux serve --config routes.toml --addr 0.0.0.0:8080
//! ```
//!
//! The listen address is taken from `--addr`, then `BRRTMUX_ADDR`, then
//! `[server] addr` in the file.
//!
//! ### `routes`
//!
//! Print the route table of a route file in match order:
//!
//! ```bash
//! brrtmux routes --config routes.toml
//! ```
//!
//! ### `match`
//!
//! Compile one pattern and match one path, printing tokens and captures as
//! JSON. Exits with status 1 when the path does not match:
//!
//! ```bash
//! brrtmux match --pattern '/head/:rest' --path /head/a/b
//! ```

mod commands;


pub use commands::{match_report, run, run_cli, Cli, Commands, MatchReport, TokenReport};
