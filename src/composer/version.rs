//! # HTTP Protocol Versions
//!
//! The composer speaks HTTP/1.0 and HTTP/1.1 only; the version token of a
//! raw request must match one of the two exactly.

use std::fmt;

use crate::composer::error::ComposeError;

/// Protocol version of an outgoing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

impl HttpVersion {
    /// Parse a version token. The comparison is exact, no case folding.
    pub fn parse(token: &str) -> Result<Self, ComposeError> {
        match token {
            "HTTP/1.0" => Ok(HttpVersion::Http10),
            "HTTP/1.1" => Ok(HttpVersion::Http11),
            _ => Err(ComposeError::UnsupportedVersion(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
