//! Pattern compilation.
//!
//! A route pattern such as `/files/:dir/raw/:name.txt` is normalized (trimmed of
//! separators, lower-cased) and split into an alternating list of literal text
//! and named parameters:
//!
//! ```text
//! "/files/:dir/raw/:name.txt"
//!     → Literal("files/") Param("dir") Literal("/raw/") Param("name") Literal(".txt")
//! ```
//!
//! A parameter name is one or more ASCII lowercase letters or digits. The first
//! character that is neither ends the name and becomes the first character of
//! the following literal, so two parameters are never adjacent.

use std::fmt;
use std::sync::Arc;

/// Characters trimmed from both ends of patterns and request paths.
const TRIM_CHARS: &[char] = &['/', ' '];

/// Marker that opens a parameter name inside a pattern.
const PARAM_MARKER: char = ':';

/// One unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text that must appear verbatim at the cursor.
    Literal(String),
    /// Named capture bounded by the next literal (or end of input).
    Param(Arc<str>),
}

impl Token {
    /// Returns `true` for [`Token::Param`].
    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Token::Param(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "{text}"),
            Token::Param(name) => write!(f, "{PARAM_MARKER}{name}"),
        }
    }
}

/// An immutable, normalized route pattern.
///
/// Built once per registered route by [`compile`]. Param names are `Arc<str>`
/// so every captured value can share the name without copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    tokens: Vec<Token>,
}

impl CompiledPattern {
    /// The pattern string as it was registered.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Token sequence in match order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parameter names in the order they appear.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Param(name) => Some(name.as_ref()),
            Token::Literal(_) => None,
        })
    }

    /// `true` when the pattern compiled to no tokens (it only matches the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Normalize a pattern or request path: trim separators and lower-case.
///
/// Patterns and paths go through the same function so that matching is
/// case-insensitive while the matcher itself compares bytes.
#[must_use]
pub fn normalize(path: &str) -> String {
    path.trim_matches(TRIM_CHARS).to_ascii_lowercase()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Compile a pattern string into tokens. Every string is accepted.
#[must_use]
pub fn compile(pattern: &str) -> CompiledPattern {
    let normalized = normalize(pattern);
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut in_param = false;

    for c in normalized.chars() {
        if in_param {
            if !is_name_char(c) {
                flush(&mut tokens, &mut buf, true);
                in_param = false;
            }
        } else if c == PARAM_MARKER {
            flush(&mut tokens, &mut buf, false);
            in_param = true;
        }
        buf.push(c);
    }
    flush(&mut tokens, &mut buf, in_param);

    CompiledPattern {
        source: pattern.to_string(),
        tokens,
    }
}

fn flush(tokens: &mut Vec<Token>, buf: &mut String, param: bool) {
    if buf.is_empty() {
        return;
    }
    let text = std::mem::take(buf);
    if param {
        // buf always starts with the marker while collecting a parameter
        let name = text.strip_prefix(PARAM_MARKER).unwrap_or(&text);
        tokens.push(Token::Param(Arc::from(name)));
    } else {
        tokens.push(Token::Literal(text));
    }
}
