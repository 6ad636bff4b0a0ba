//! # Target Classification
//!
//! Shared URL helpers for the validator and the builder. A request target is
//! either an absolute http/https URL, used verbatim, or a relative reference
//! that must later be resolved against a `Host` header.

use url::{ParseError, Url};

use crate::composer::error::ComposeError;

/// How a request target token should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Absolute URL with an `http` or `https` scheme; passed through verbatim.
    Absolute,
    /// Relative reference; resolved against a host before the model is built.
    Relative,
}

/// Classify a target token.
///
/// Absolute URLs with any scheme other than `http`/`https` are rejected, as
/// are strings that parse as neither an absolute URL nor a relative
/// reference. An empty target classifies as relative.
pub fn classify_target(target: &str) -> Result<Target, ComposeError> {
    match Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Target::Absolute),
        Ok(_) => Err(ComposeError::InvalidTarget(target.to_string())),
        Err(ParseError::RelativeUrlWithoutBase) if is_valid_relative(target) => {
            Ok(Target::Relative)
        }
        Err(_) => Err(ComposeError::InvalidTarget(target.to_string())),
    }
}

/// Check that a relative reference is syntactically resolvable.
fn is_valid_relative(target: &str) -> bool {
    Url::parse("http://placeholder.invalid/")
        .and_then(|base| base.join(target))
        .is_ok()
}

/// Prefix a relative target with a host value.
///
/// The host is used as authored: if it already starts with `http` it is
/// concatenated directly, otherwise `http://` is prepended.
pub fn resolve_with_host(host: &str, target: &str) -> String {
    if host.starts_with("http") {
        format!("{host}{target}")
    } else {
        format!("http://{host}{target}")
    }
}
