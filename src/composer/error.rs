//! # Composer Errors
//!
//! Every validation and build failure is a [`ComposeError`] variant. The
//! rendered message doubles as the user-facing diagnostic, so messages are
//! written for humans rather than for logs.

use thiserror::Error;

/// Failure raised while validating or building a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The raw request text was empty or whitespace-only.
    #[error("request text cannot be empty")]
    EmptyInput,

    /// The request line did not split into exactly method, target and version.
    #[error("raw request format is invalid, error on line 1")]
    MalformedRequestLine,

    /// The method token is outside the supported set.
    #[error("request method `{0}` is not valid")]
    UnknownMethod(String),

    /// The target is neither an absolute http/https URL nor a relative reference.
    #[error("`{0}` is not a valid http or https URL")]
    InvalidTarget(String),

    /// A relative target needs a `Host` header to resolve against.
    #[error("a Host header is required when the request target is relative")]
    MissingHost,

    /// The version token is not `HTTP/1.0` or `HTTP/1.1`.
    #[error("HTTP version `{0}` is not supported, expected HTTP/1.0 or HTTP/1.1")]
    UnsupportedVersion(String),

    /// A header line is missing its `:` separator or has an empty name.
    /// `line` is the 1-based physical line number, the request line being 1.
    #[error("raw request format is invalid, error on line {line}")]
    MalformedHeaderLine { line: usize },

    /// `Content-Length` did not parse as a non-negative integer.
    #[error("Content-Length value `{0}` is not a valid length")]
    InvalidContentLength(String),

    /// `Date` or `If-Modified-Since` did not parse as an HTTP date.
    #[error("{header} value `{value}` is not a valid HTTP date")]
    InvalidDate { header: &'static str, value: String },

    /// Form submitted with neither a target URL nor a host.
    #[error("either a target URL or a host must be provided")]
    MissingTargetAndHost,

    /// Form host field is empty or fails the URL validity check.
    #[error("`{0}` is not a valid host for a relative target")]
    InvalidHost(String),

    /// Form submitted without a request method.
    #[error("a request method must be selected")]
    MissingMethod,
}
