use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AstError;

/// A byte range in one of the compilation's source files.
///
/// This is solc's `src` triple, written as `offset:length:fileIndex`. The
/// compiler emits `-1` for components it cannot determine (synthesized
/// nodes, locations spanning files); those come through as [`None`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// The starting byte's offset.
    pub offset: Option<usize>,

    /// The length of the range in bytes.
    pub length: Option<usize>,

    /// An index into the compilation's source list.
    pub file: Option<usize>,
}

impl SourceLocation {
    pub fn new(offset: usize, length: usize, file: usize) -> Self {
        Self {
            offset: Some(offset),
            length: Some(length),
            file: Some(file),
        }
    }

    /// Returns `true` if no component of the triple is known, as is the
    /// case for nodes synthesized by a factory rather than read from
    /// compiler output.
    pub fn is_synthetic(&self) -> bool {
        self.offset.is_none() && self.length.is_none() && self.file.is_none()
    }
}

fn component(s: &str) -> Option<Option<usize>> {
    match s {
        "-1" => Some(None),
        _ => s.parse().ok().map(Some),
    }
}

impl FromStr for SourceLocation {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AstError::MalformedSourceLocation { raw: s.into() };

        let mut parts = s.split(':');
        let offset = component(parts.next().ok_or_else(malformed)?).ok_or_else(malformed)?;
        let length = component(parts.next().ok_or_else(malformed)?).ok_or_else(malformed)?;
        let file = component(parts.next().ok_or_else(malformed)?).ok_or_else(malformed)?;

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self {
            offset,
            length,
            file,
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn signed(c: Option<usize>) -> i64 {
            c.map(|n| n as i64).unwrap_or(-1)
        }

        write!(
            f,
            "{}:{}:{}",
            signed(self.offset),
            signed(self.length),
            signed(self.file),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_solc_triple() {
        let loc: SourceLocation = "26:57:0".parse().unwrap();

        assert_eq!(loc, SourceLocation::new(26, 57, 0));
        assert_eq!(loc.to_string(), "26:57:0");
    }

    #[test]
    fn missing_components_round_trip() {
        let loc: SourceLocation = "-1:-1:0".parse().unwrap();

        assert_eq!(loc.offset, None);
        assert_eq!(loc.length, None);
        assert_eq!(loc.file, Some(0));
        assert_eq!(loc.to_string(), "-1:-1:0");
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<SourceLocation>().is_err());
        assert!("1:2".parse::<SourceLocation>().is_err());
        assert!("1:2:3:4".parse::<SourceLocation>().is_err());
        assert!("a:b:c".parse::<SourceLocation>().is_err());
    }
}
