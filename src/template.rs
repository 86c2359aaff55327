use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// Context handed to banner, footer, and separator templates at render time.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Ordered source paths being joined. Sources skipped for being
    /// unreadable are excluded, so templates describe the produced output.
    pub sources: &'a [PathBuf],
    /// Destination path the joined output is written to.
    pub dest: &'a Path,
}

impl RenderContext<'_> {
    /// Resolves a single template token, `None` when unrecognized.
    fn token(&self, name: &str) -> Option<String> {
        match name {
            "files" => Some(
                self.sources
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            "count" => Some(self.sources.len().to_string()),
            "dest" => Some(self.dest.display().to_string()),
            "timestamp" => Some(chrono::Utc::now().to_rfc3339()),
            _ => None,
        }
    }
}

/// A template value: either a literal string (possibly containing
/// `{{ token }}` references) or a function of the render context.
///
/// Computed values are invoked lazily at every render site, so a dynamic
/// separator is re-evaluated between each adjacent pair of joined files.
pub enum TemplateValue {
    Literal(String),
    Computed(Box<dyn Fn(&RenderContext) -> String + Send + Sync>),
}

impl TemplateValue {
    /// Renders the value against `context`.
    ///
    /// # Errors
    ///
    /// Returns `TransfoError::Regex` if the token pattern fails to compile.
    pub fn resolve(&self, context: &RenderContext) -> Result<String> {
        match self {
            Self::Literal(text) => expand_tokens(text, |name| context.token(name)),
            Self::Computed(render) => Ok(render(context)),
        }
    }
}

impl Default for TemplateValue {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl From<&str> for TemplateValue {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl fmt::Debug for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Expands `{{ token }}` references in `template` using `lookup`.
///
/// Tokens the lookup does not recognize expand to the empty string; an
/// unresolved token is never a fatal error.
///
/// # Errors
///
/// Returns `TransfoError::Regex` if the token pattern fails to compile.
pub fn expand_tokens<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*\}\}")?;
    let expanded = pattern.replace_all(template, |capture: &regex::Captures| {
        lookup(&capture[1]).unwrap_or_default()
    });
    Ok(expanded.into_owned())
}
