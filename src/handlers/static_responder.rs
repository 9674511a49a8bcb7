use serde::Deserialize;
use serde_json::Value;

use crate::dispatcher::{Handler, HandlerResponse, PathParams, RequestContext};

/// How a [`StaticResponder`] body is sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Json,
}

/// Answers every request with the same status and a templated body.
///
/// `{name}` is replaced by the route capture `name`. Braces that do not
/// enclose a captured name are left as they are, so JSON bodies need no
/// escaping. For [`ContentKind::Json`] the substituted values are JSON-string
/// escaped and the rendered body is parsed; a body that is not valid JSON is
/// sent as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResponder {
    status: u16,
    kind: ContentKind,
    template: String,
}

impl StaticResponder {
    #[must_use]
    pub fn new(status: u16, kind: ContentKind, template: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            template: template.into(),
        }
    }

    #[must_use]
    pub fn text(status: u16, template: impl Into<String>) -> Self {
        Self::new(status, ContentKind::Text, template)
    }

    #[must_use]
    pub fn json(status: u16, template: impl Into<String>) -> Self {
        Self::new(status, ContentKind::Json, template)
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute `{name}` placeholders from `params`
    #[must_use]
    pub fn render(&self, params: &PathParams) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let value = after
                .find('}')
                .and_then(|close| params.get(&after[..close]).map(|v| (close, v)));
            match value {
                Some((close, v)) => {
                    self.push_value(&mut out, v);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn push_value(&self, out: &mut String, value: &str) {
        match self.kind {
            ContentKind::Text => out.push_str(value),
            ContentKind::Json => {
                let quoted = Value::String(value.to_string()).to_string();
                out.push_str(&quoted[1..quoted.len() - 1]);
            }
        }
    }
}

impl Handler for StaticResponder {
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse {
        let body = self.render(ctx.params());
        match self.kind {
            ContentKind::Text => HandlerResponse::text(self.status, body),
            ContentKind::Json => match serde_json::from_str::<Value>(&body) {
                Ok(value) => HandlerResponse::json(self.status, value),
                Err(_) => HandlerResponse::text(self.status, body),
            },
        }
    }
}
