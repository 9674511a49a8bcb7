//! Built-in handlers
//!
//! [`StaticResponder`] backs the routes declared in a TOML route file: a fixed
//! status, content kind and body template in which `{name}` placeholders are
//! replaced by the captures of the matched route.

mod static_responder;

pub use static_responder::{ContentKind, StaticResponder};
