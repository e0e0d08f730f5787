use std::fmt;
use std::str::FromStr;

use crate::error::IoError;

/// A file name template with one printf-style index placeholder.
///
/// Accepts `%d` or zero-padded `%0Nd`, e.g. `CbD_mask_%04d.png`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct IndexPattern {
    prefix: String,
    width: usize,
    suffix: String,
}

impl IndexPattern {
    /// Builds a pattern from its parts; `width` 0 means no padding.
    #[must_use]
    pub fn new(prefix: impl Into<String>, width: usize, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            width,
            suffix: suffix.into(),
        }
    }

    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error unless the pattern holds exactly one `%d` or `%0Nd`
    /// placeholder.
    pub fn parse(pattern: &str) -> Result<Self, IoError> {
        let invalid = |reason| IoError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason,
        };

        let start = pattern.find('%').ok_or_else(|| invalid("missing %d placeholder"))?;
        let rest = &pattern[start + 1..];
        let spec_len = rest
            .find('d')
            .ok_or_else(|| invalid("placeholder must end in 'd'"))?;
        let spec = &rest[..spec_len];
        let suffix = &rest[spec_len + 1..];

        let width = match spec {
            "" => 0,
            s if s.starts_with('0') && s.len() > 1 && s.bytes().all(|b| b.is_ascii_digit()) => s
                .parse()
                .map_err(|_| invalid("placeholder width is not a number"))?,
            _ => return Err(invalid("only %d and %0Nd placeholders are supported")),
        };
        if suffix.contains('%') {
            return Err(invalid("more than one placeholder"));
        }

        Ok(Self {
            prefix: pattern[..start].to_owned(),
            width,
            suffix: suffix.to_owned(),
        })
    }

    /// File name for index `i`.
    #[must_use]
    pub fn format(&self, i: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            i,
            self.suffix,
            width = self.width
        )
    }
}

impl FromStr for IndexPattern {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IndexPattern {
    type Error = IoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for IndexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            write!(f, "{}%d{}", self.prefix, self.suffix)
        } else {
            write!(f, "{}%0{}d{}", self.prefix, self.width, self.suffix)
        }
    }
}
