//! Classifies GraphQL operation text into [`Script`]s.
//!
//! This is a keyword sniffer, not a GraphQL parser: the text is tested against
//! `query <Name>`, `mutation <Name>` and `fragment <Name> on <Type>` in that
//! order and the first match decides the kind. Nothing past the leading
//! keyword is validated.

use std::{fmt, sync::Arc, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

static QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bquery\s+([_A-Za-z][_0-9A-Za-z]*)").expect("query pattern is valid")
});
static MUTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmutation\s+([_A-Za-z][_0-9A-Za-z]*)").expect("mutation pattern is valid")
});
static FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfragment\s+([_A-Za-z][_0-9A-Za-z]*)\s+on\s+([_A-Za-z][_0-9A-Za-z]*)")
        .expect("fragment pattern is valid")
});

/// The operation kind a [`Script`] was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Query,
    Mutation,
    Fragment,
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ScriptKind::Query => "query",
            ScriptKind::Mutation => "mutation",
            ScriptKind::Fragment => "fragment",
        };
        f.write_str(kind)
    }
}

/// Errors produced while assembling a [`Script`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The text matched none of the operation keywords
    #[error("Invalid script")]
    InvalidScript,
    /// An interpolated value cannot be spliced into operation text
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A value interpolated between the literal parts of a script template
#[derive(Debug, Clone)]
pub enum ScriptArg {
    /// Spliced in verbatim
    Text(String),
    /// Spliced in as its `on <Type> <body>` spread; only fragments are accepted
    Script(Script),
}

impl From<&str> for ScriptArg {
    fn from(value: &str) -> Self {
        ScriptArg::Text(value.to_string())
    }
}

impl From<String> for ScriptArg {
    fn from(value: String) -> Self {
        ScriptArg::Text(value)
    }
}

impl From<&Script> for ScriptArg {
    fn from(value: &Script) -> Self {
        ScriptArg::Script(value.clone())
    }
}

impl From<Script> for ScriptArg {
    fn from(value: Script) -> Self {
        ScriptArg::Script(value)
    }
}

/// A classified, immutable GraphQL operation.
///
/// Cloning is cheap; the text is shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script {
    kind: ScriptKind,
    name: Arc<str>,
    text: Arc<str>,
    body: Arc<str>,
    on_type: Option<Arc<str>>,
}

impl Script {
    /// Classifies `text`, which contains no interpolations
    pub fn parse(text: impl AsRef<str>) -> Result<Script, ScriptError> {
        let text = text.as_ref();
        if let Some(captures) = QUERY.captures(text) {
            return Ok(Script::operation(ScriptKind::Query, &captures[1], text));
        }
        if let Some(captures) = MUTATION.captures(text) {
            return Ok(Script::operation(ScriptKind::Mutation, &captures[1], text));
        }
        if let Some(captures) = FRAGMENT.captures(text) {
            let end = captures.get(0).map_or(0, |m| m.end());
            return Ok(Script {
                kind: ScriptKind::Fragment,
                name: Arc::from(&captures[1]),
                text: Arc::from(text),
                body: Arc::from(text[end..].trim()),
                on_type: Some(Arc::from(&captures[2])),
            });
        }
        Err(ScriptError::InvalidScript)
    }

    /// Joins literal `parts` with the interpolated `args` and classifies the result.
    ///
    /// There must be exactly one more part than there are arguments, the same shape
    /// a template literal has.
    pub fn build<P, A>(parts: &[P], args: A) -> Result<Script, ScriptError>
    where
        P: AsRef<str>,
        A: IntoIterator,
        A::Item: Into<ScriptArg>,
    {
        let args: Vec<ScriptArg> = args.into_iter().map(Into::into).collect();
        if parts.len() != args.len() + 1 {
            return Err(ScriptError::InvalidArgument(format!(
                "expected {} arguments for {} template parts, got {}",
                parts.len().saturating_sub(1),
                parts.len(),
                args.len()
            )));
        }

        let mut text = String::new();
        for (index, part) in parts.iter().enumerate() {
            text.push_str(part.as_ref());
            if let Some(arg) = args.get(index) {
                match arg {
                    ScriptArg::Text(value) => text.push_str(value),
                    ScriptArg::Script(script) => match script.spread() {
                        Some(spread) => text.push_str(&spread),
                        None => {
                            return Err(ScriptError::InvalidArgument(format!(
                                "cannot interpolate {} `{}`, only fragments can be spread",
                                script.kind, script.name
                            )))
                        }
                    },
                }
            }
        }
        Script::parse(text)
    }

    fn operation(kind: ScriptKind, name: &str, text: &str) -> Script {
        let text: Arc<str> = Arc::from(text);
        Script {
            kind,
            name: Arc::from(name),
            body: text.clone(),
            text,
            on_type: None,
        }
    }

    pub const fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// The operation or fragment name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full text sent over the wire
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The full text for operations; the selection set that follows `on <Type>` for fragments
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn on_type(&self) -> Option<&str> {
        self.on_type.as_deref()
    }

    /// The `on <Type> <body>` form used when a fragment is interpolated into another script
    pub fn spread(&self) -> Option<String> {
        self.on_type
            .as_ref()
            .map(|on_type| format!("on {} {}", on_type, self.body))
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Script")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("on_type", &self.on_type)
            .finish_non_exhaustive()
    }
}

impl std::str::FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::parse(s)
    }
}
