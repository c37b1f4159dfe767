//! RFC 3986 URI parsing, recomposition and relative resolution
//!
//! Identity of nodes in the repository depends on byte-exact resolution
//! results, so this module implements sections 3, 4.3 and 5.2-5.3 of
//! RFC 3986 directly instead of normalizing through a generic URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while decomposing a URI
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("URI contains illegal character {character:?} at index {index}: {uri}")]
    IllegalCharacter {
        uri: String,
        index: usize,
        character: char,
    },

    #[error("Path in URI with authority must start by / or be empty: {0}")]
    RelativePathWithAuthority(String),

    #[error("Path in URI without authority cannot start by //: {0}")]
    AmbiguousPath(String),
}

/// The five components of a URI reference
///
/// An undefined component is `None`, an empty one is `Some("")`.
/// The path is always defined, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriComponents {
    pub scheme: Option<String>,
    pub authority: Option<String>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl UriComponents {
    /// Check the authority/path combination rules of RFC 3986 section 3.3
    pub fn validate(&self) -> Result<(), UriError> {
        match self.authority {
            Some(_) if !self.path.is_empty() && !self.path.starts_with('/') => {
                Err(UriError::RelativePathWithAuthority(self.to_string()))
            }
            None if self.path.starts_with("//") => Err(UriError::AmbiguousPath(self.to_string())),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

fn is_legal_character(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && c != '<' && c != '>'
}

/// Length of the scheme at the start of `uri`, if there is one
///
/// A scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` followed by `:`
/// before any `/`, `?` or `#`.
fn scheme_length(uri: &str) -> Option<usize> {
    let colon = uri.find(|c| matches!(c, ':' | '/' | '?' | '#'))?;
    if !uri[colon..].starts_with(':') {
        return None;
    }
    let candidate = &uri[..colon];
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return None,
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(colon)
    } else {
        None
    }
}

/// Whether `uri` is an absolute URI (RFC 3986 section 4.3)
///
/// It must have a scheme and either an authority or a non-empty path.
pub fn is_absolute(uri: &str) -> bool {
    let Some(length) = scheme_length(uri) else {
        return false;
    };
    let rest = &uri[length + 1..];
    if rest.starts_with("//") {
        return true;
    }
    match rest.chars().next() {
        None => false,
        Some(c) => c != '?' && c != '#',
    }
}

/// Decompose a URI reference into its five components
pub fn parse(uri: &str) -> Result<UriComponents, UriError> {
    if let Some((index, character)) = uri.char_indices().find(|(_, c)| !is_legal_character(*c)) {
        return Err(UriError::IllegalCharacter {
            uri: uri.to_string(),
            index,
            character,
        });
    }

    let mut components = UriComponents::default();
    let mut rest = uri;

    if let Some(length) = scheme_length(rest) {
        components.scheme = Some(rest[..length].to_string());
        rest = &rest[length + 1..];
    }

    if let Some((before, fragment)) = rest.split_once('#') {
        components.fragment = Some(fragment.to_string());
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        components.query = Some(query.to_string());
        rest = before;
    }

    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find('/').unwrap_or(after.len());
        components.authority = Some(after[..end].to_string());
        rest = &after[end..];
    }
    components.path = rest.to_string();

    components.validate()?;
    Ok(components)
}

/// Recompose components into a URI (RFC 3986 section 5.3)
pub fn recompose(components: &UriComponents) -> Result<String, UriError> {
    components.validate()?;
    Ok(components.to_string())
}

/// Resolve `reference` against `base` (RFC 3986 section 5.2)
///
/// An empty reference yields the base and an empty base yields the
/// reference, both unchanged.
pub fn resolve(base: &str, reference: &str) -> Result<String, UriError> {
    if reference.is_empty() {
        return Ok(base.to_string());
    }
    if base.is_empty() {
        return Ok(reference.to_string());
    }

    let base = parse(base)?;
    let reference = parse(reference)?;

    let target = if reference.scheme.is_some() {
        UriComponents {
            path: remove_dot_segments(&reference.path),
            scheme: reference.scheme,
            authority: reference.authority,
            query: reference.query,
            fragment: reference.fragment,
        }
    } else if reference.authority.is_some() {
        UriComponents {
            scheme: base.scheme,
            path: remove_dot_segments(&reference.path),
            authority: reference.authority,
            query: reference.query,
            fragment: reference.fragment,
        }
    } else if reference.path.is_empty() {
        UriComponents {
            scheme: base.scheme,
            authority: base.authority,
            path: base.path,
            query: reference.query.or(base.query),
            fragment: reference.fragment,
        }
    } else {
        let path = if reference.path.starts_with('/') {
            remove_dot_segments(&reference.path)
        } else {
            remove_dot_segments(&merge_paths(base.authority.as_deref(), &base.path, &reference.path))
        };
        UriComponents {
            scheme: base.scheme,
            authority: base.authority,
            path,
            query: reference.query,
            fragment: reference.fragment,
        }
    };

    recompose(&target)
}

/// RFC 3986 section 5.2.3
fn merge_paths(base_authority: Option<&str>, base_path: &str, reference_path: &str) -> String {
    if base_authority.is_some() && base_path.is_empty() {
        format!("/{}", reference_path)
    } else {
        match base_path.rfind('/') {
            Some(index) => format!("{}{}", &base_path[..=index], reference_path),
            None => reference_path.to_string(),
        }
    }
}

/// Remove `.` and `..` segments from a path (RFC 3986 section 5.2.4)
///
/// Leading and trailing empty segments are kept so that absolute paths
/// and trailing slashes survive.
pub fn remove_dot_segments(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let absolute = path.starts_with('/');
    let input: Vec<&str> = path.split('/').collect();
    let last = input.len() - 1;
    let mut output: Vec<&str> = Vec::with_capacity(input.len());

    for (i, segment) in input.iter().enumerate() {
        match *segment {
            ".." => {
                let at_root = absolute && output.len() == 1 && output[0].is_empty();
                if output.is_empty() || at_root {
                    if at_root && i == last {
                        output.push("");
                    }
                    continue;
                }
                output.pop();
                if i == last {
                    output.push("");
                }
            }
            "." => {
                if i == last {
                    output.push("");
                }
            }
            other => output.push(other),
        }
    }

    output.join("/")
}
