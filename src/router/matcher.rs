//! Greedy single-pass path matching.
//!
//! The matcher walks the compiled tokens once, keeping a cursor into the
//! normalized request path:
//!
//! - a literal must appear exactly at the cursor;
//! - a parameter followed by a literal captures everything up to the **first**
//!   occurrence of that literal (slashes included);
//! - a trailing parameter captures the rest of the path.
//!
//! There is no backtracking. If the bounding literal also occurs inside the
//! text the registrant meant to capture, the capture stops at that occurrence
//! and the remaining text is left to the following tokens.
//!
//! Trailing input after a final literal is accepted, so `simple` matches
//! `simple/test`.

use super::pattern::{CompiledPattern, Token};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of captured parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured `(name, value)` pairs in pattern order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Match a normalized path against a compiled pattern.
///
/// Returns the captures on success and `None` on no-match. The caller is
/// responsible for normalizing `path` with [`super::pattern::normalize`].
#[must_use]
pub fn match_path(pattern: &CompiledPattern, path: &str) -> Option<ParamVec> {
    let tokens = pattern.tokens();
    if tokens.is_empty() {
        return path.is_empty().then(ParamVec::new);
    }

    let mut params = ParamVec::new();
    let mut rest = path;

    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(text) => {
                rest = rest.strip_prefix(text.as_str())?;
            }
            Token::Param(name) => match tokens.get(idx + 1) {
                Some(Token::Literal(next)) => {
                    let end = rest.find(next.as_str())?;
                    params.push((Arc::clone(name), rest[..end].to_string()));
                    rest = &rest[end..];
                }
                // trailing parameter takes the rest of the path
                _ => {
                    params.push((Arc::clone(name), rest.to_string()));
                    return Some(params);
                }
            },
        }
    }

    Some(params)
}

/// Returns `true` if `path` matches `pattern`, without collecting captures.
#[must_use]
pub fn is_match(pattern: &CompiledPattern, path: &str) -> bool {
    match_path(pattern, path).is_some()
}
