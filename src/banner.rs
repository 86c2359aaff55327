use crate::error::Result;
use regex::Regex;

/// Selects which comment forms count as a strippable banner.
///
/// With neither flag set, only a leading block comment that does not open
/// with `/*!` is stripped; `/*!` conventionally marks a banner that must
/// survive minification and is preserved here too. With `block` set, any
/// leading block comment is stripped, `/*!` included. With `line` set, only
/// a leading run of `//` comments is stripped — a file whose true leading
/// construct is a block comment is returned unchanged, and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripMode {
    /// Strip block comment banners, including `/*! ... */`.
    pub block: bool,
    /// Strip banners made of consecutive `//` line comments.
    pub line: bool,
}

/// Builds the anchored pattern matching a leading banner under `mode`.
///
/// The pattern is a single alternation over the eligible comment forms,
/// anchored at position 0 after whitespace-only content, and consumes any
/// blank lines trailing the matched comment. Block comments match
/// non-greedily to the first closing token.
fn banner_pattern(mode: StripMode) -> String {
    let mut alternatives: Vec<&str> = Vec::new();
    if mode.line {
        alternatives.push(r"(?://[^\n]*\n)+");
    }
    if mode.block {
        alternatives.push(r"/\*[\s\S]*?\*/");
    } else if !mode.line {
        alternatives.push(r"/\*[^!][\s\S]*?\*/");
    }
    format!(r"^\s*(?:{})\s*", alternatives.join("|"))
}

/// Strips a leading banner comment from `src` according to `mode`.
///
/// A banner is only ever the prefix of the text: if the anchored pattern
/// does not match — the leading content is not a comment, or is a comment
/// form the mode does not cover — the input is returned unchanged rather
/// than risking a false positive. Stripping is idempotent once no banner
/// remains.
///
/// # Errors
///
/// Returns `TransfoError::Regex` if the banner pattern fails to compile.
pub fn strip_banner(src: &str, mode: StripMode) -> Result<String> {
    let pattern = Regex::new(&banner_pattern(mode))?;
    Ok(pattern.replace(src, "").into_owned())
}
