//! Allow-list matching for candidate files.
//!
//! The allow-list is the same comma-separated grammar a browser accepts in
//! an `<input type="file" accept="...">` attribute. Each token is one of:
//!
//! - `*` -- any file
//! - `.ext` -- file name ends with the extension (case-insensitive)
//! - `type/*` -- MIME type lies under the given top-level type
//! - `type/subtype` -- MIME type matches exactly (case-insensitive)
//!
//! Tokens that fit none of these shapes never match. The list is parsed
//! fresh on every call; it is cheap and the host may change it between
//! update cycles.

/// One parsed allow-list token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    /// `*`
    Any,
    /// `.pdf` -- stored lowercase, including the leading dot.
    Extension(String),
    /// `image/*` -- stored as the top-level type without the `/*`.
    MimeWildcard(String),
    /// `application/pdf` -- stored lowercase.
    Mime(String),
    /// Anything else. Kept so the parse is lossless, but never matches.
    Unrecognized(String),
}

impl FormatToken {
    /// Classify a single trimmed, lowercased token.
    fn classify(token: &str) -> Self {
        if token == "*" {
            Self::Any
        } else if let Some(prefix) = token.strip_suffix("/*") {
            Self::MimeWildcard(prefix.to_owned())
        } else if token.starts_with('.') {
            Self::Extension(token.to_owned())
        } else if token.contains('/') {
            Self::Mime(token.to_owned())
        } else {
            Self::Unrecognized(token.to_owned())
        }
    }

    /// Test this token against an already-lowercased MIME type and name.
    fn matches(&self, mime: &str, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::MimeWildcard(prefix) => mime
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
            Self::Extension(ext) => name.ends_with(ext.as_str()),
            Self::Mime(exact) => mime == exact,
            Self::Unrecognized(_) => false,
        }
    }
}

/// Split an allow-list string into tokens, in written order.
///
/// Tokens are trimmed and lowercased; empty tokens are dropped.
#[must_use]
pub fn parse_allow_list(spec: &str) -> Vec<FormatToken> {
    spec.split(',')
        .map(|raw| raw.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(|token| FormatToken::classify(&token))
        .collect()
}

/// Decide whether a file passes the allow-list.
///
/// `None`, an empty string, or a list with no non-empty tokens admits
/// everything. Otherwise the first matching token admits; no match
/// rejects.
#[must_use]
pub fn is_allowed(mime_type: &str, name: &str, allowed: Option<&str>) -> bool {
    let Some(spec) = allowed else {
        return true;
    };
    let tokens = parse_allow_list(spec);
    if tokens.is_empty() {
        return true;
    }

    let mime = mime_type.to_lowercase();
    let name = name.to_lowercase();
    tokens.iter().any(|token| token.matches(&mime, &name))
}
