//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse a pattern such as `/p/:id` into segments
//! - Match a concrete path against the segments
//! - Bind parameter segments to their (percent-decoded) values
//!
//! # Design Decisions
//! - Static segments are compared literally (case-sensitive)
//! - A parameter segment matches exactly one non-empty segment
//! - One trailing slash is tolerated, an empty interior segment is not
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Error raised when a pattern string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("pattern `{0}` has a parameter without a name")]
    UnnamedParameter(String),
    #[error("pattern `{pattern}` declares parameter `{name}` twice")]
    DuplicateParameter { pattern: String, name: String },
}

/// One component of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Static(String),
    /// Matches any non-empty segment and binds it under this name.
    Param(String),
}

/// Parameters bound while matching a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn insert(&mut self, name: &str, value: String) {
        self.0.insert(name.to_string(), value);
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. `/` is the root pattern and has no segments.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(raw.to_string()))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                match part.strip_prefix(':') {
                    Some("") => return Err(PatternError::UnnamedParameter(raw.to_string())),
                    Some(name) => {
                        let duplicate = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if duplicate {
                            return Err(PatternError::DuplicateParameter {
                                pattern: raw.to_string(),
                                name: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match a path (already stripped of query and fragment).
    /// Returns the bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if expected != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name, value);
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a concrete path into segments.
///
/// Returns `None` when the path does not start with `/` or contains an
/// empty segment other than a single trailing one.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Drop the query string and fragment from a request target.
pub fn strip_query(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}
