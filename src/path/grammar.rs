//! Dotted path grammar: `name[.name[index]]*`.
//!
//! A segment is either a plain name or `name[digits]`. Anything else that
//! contains a bracket is rejected rather than read as "no index".

use std::fmt;
use std::str::FromStr;

use super::error::PathError;

/// One unit of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub name: String,
    pub index: Option<usize>,
}

impl Segment {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// A parsed path. Never empty; the first segment names a submodel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdShortPath {
    segments: Vec<Segment>,
}

impl IdShortPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::malformed(path, "empty path"));
        }

        let segments = path
            .split('.')
            .map(|raw| parse_segment(path, raw))
            .collect::<Result<Vec<_>, _>>()?;

        if segments[0].name.is_empty() {
            return Err(PathError::malformed(path, "empty leading segment"));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The submodel segment.
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Segments below the submodel.
    pub fn tail(&self) -> &[Segment] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The path below the submodel, rendered without the submodel segment.
    pub fn tail_string(&self) -> String {
        join(self.tail())
    }
}

fn parse_segment(path: &str, raw: &str) -> Result<Segment, PathError> {
    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(PathError::malformed(path, "unbalanced ']' in segment"));
        }
        return Ok(Segment::named(raw));
    };

    let Some(inner) = raw[open + 1..].strip_suffix(']') else {
        return Err(PathError::malformed(path, "index must close the segment"));
    };
    if inner.is_empty() {
        return Err(PathError::malformed(path, "empty index"));
    }
    if !inner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::malformed(path, "index is not a non-negative integer"));
    }
    let index = inner
        .parse::<usize>()
        .map_err(|_| PathError::malformed(path, "index out of range"))?;

    Ok(Segment::indexed(&raw[..open], index))
}

fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for IdShortPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.segments))
    }
}

impl FromStr for IdShortPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
