//! # Router Module
//!
//! Path-pattern compilation, greedy matching and the ordered route table.
//!
//! ## Patterns
//!
//! A pattern is literal text with named parameters introduced by `:`:
//!
//! | pattern                           | path                              | captures                    |
//! |-----------------------------------|-----------------------------------|-----------------------------|
//! | `/one/:middle/three`              | `/one/two/three`                  | `middle=two`                |
//! | `/one/:middle/four`               | `/one/two/three/four`             | `middle=two/three`          |
//! | `/head/:p1/middle/prefix:p2.html` | `/head/a/b/middle/prefixc/d.html` | `p1=a/b`, `p2=c/d`          |
//! | `/files/:rest`                    | `/files/x/y/z`                    | `rest=x/y/z`                |
//!
//! Patterns and request paths are both trimmed of leading/trailing `/` and
//! lower-cased before matching, so matching is case-insensitive and ignores
//! trailing slashes.
//!
//! ## Architecture
//!
//! 1. **Compilation** ([`compile`]): at registration, a pattern becomes a list
//!    of [`Token`]s.
//! 2. **Matching** ([`match_path`]): a single left-to-right pass with no
//!    backtracking. A parameter stops at the *first* occurrence of the literal
//!    that follows it; captures may span several path segments.
//! 3. **Lookup** ([`Router::route`]): routes for the request method are tried
//!    in registration order and the first match wins.
//!
//! ## Example
//!
//! ```rust
//! use brrtmux::router::Router;
//! use brrtmux::dispatcher::{HandlerResponse, RequestContext};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/blog/:slug/comments", |_ctx: &RequestContext| HandlerResponse::text(200, "ok"), &[]);
//!
//! let m = router.route(&Method::GET, "/Blog/2024/rust-routers/comments").unwrap();
//! assert_eq!(m.get_path_param("slug"), Some("2024/rust-routers"));
//! ```

mod core;
mod matcher;
mod pattern;
#[cfg(test)]
mod tests;

pub use core::{Route, RouteMatch, Router};
pub use matcher::{is_match, match_path, ParamVec, MAX_INLINE_PARAMS};
pub use pattern::{compile, normalize, CompiledPattern, Token};
