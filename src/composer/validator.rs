//! # Request Validation
//!
//! Grammar checks for raw HTTP/1.x request text and for form input. The
//! validator never builds anything and never touches a request model; it
//! only answers whether the input is well-formed enough to hand to the
//! builder. The first failure wins, with one exception: a relative target
//! without a `Host` header is advisory here and only becomes fatal when the
//! builder tries to resolve the URL.

use crate::composer::error::ComposeError;
use crate::composer::method::Method;
use crate::composer::url::{classify_target, Target};
use crate::composer::version::HttpVersion;

/// Validate a raw HTTP/1.x request text block.
///
/// Checks, in order: non-empty input, a three-token request line, method
/// membership, target shape, version token, and one `:` separator with a
/// non-empty name on every header line up to the first blank line. A blank
/// line (and a body after it) is permitted but not required.
pub fn validate_raw_request(raw: &str) -> Result<(), ComposeError> {
    if raw.trim().is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    let lines: Vec<&str> = raw.lines().collect();
    let parts: Vec<&str> = lines[0].split_whitespace().collect();
    if parts.len() != 3 {
        return Err(ComposeError::MalformedRequestLine);
    }

    Method::parse(parts[0])?;
    let target = classify_target(parts[1])?;

    // A relative target without a Host header is not fatal at this stage;
    // the remaining checks still run and the builder rejects the request
    // when it cannot resolve the URL.
    if target == Target::Relative && !has_host_header(&lines) {
        tracing::debug!("relative target without a Host header");
    }

    HttpVersion::parse(parts[2])?;

    let mut line_number = 2;
    for line in lines.iter().skip(1).take_while(|line| !line.is_empty()) {
        match line.split_once(':') {
            Some((name, _)) if !name.is_empty() => {}
            _ => return Err(ComposeError::MalformedHeaderLine { line: line_number }),
        }
        line_number += 1;
    }

    Ok(())
}

/// Validate discrete form fields before building a request from them.
///
/// The host field is checked with the same URL validity predicate as the
/// target, so a bare hostname passes (it classifies as a relative
/// reference). This mirrors the form's long-standing behavior.
pub fn validate_form(target: &str, host: &str, method: &str) -> Result<(), ComposeError> {
    if target.is_empty() && host.is_empty() {
        return Err(ComposeError::MissingTargetAndHost);
    }

    if classify_target(target)? == Target::Relative
        && (host.is_empty() || classify_target(host).is_err())
    {
        return Err(ComposeError::InvalidHost(host.to_string()));
    }

    if method.is_empty() {
        return Err(ComposeError::MissingMethod);
    }

    Ok(())
}

/// Look for a `Host:` line in the header block.
fn has_host_header(lines: &[&str]) -> bool {
    lines
        .iter()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .any(|line| line.starts_with("Host:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_request_validates() {
        let raw = "GET https://www.google.com/ HTTP/1.1\n\
                   Host: www.google.com\n\
                   Connection: keep-alive\n\
                   Accept: text/html,application/xhtml+xml";
        assert!(validate_raw_request(raw).is_ok());
    }

    #[test]
    fn relative_target_with_host_validates() {
        let raw = "GET /index.php HTTP/1.1\nHost: www.example.com.tr";
        assert!(validate_raw_request(raw).is_ok());
    }

    #[test]
    fn empty_and_whitespace_input_fail() {
        assert_eq!(validate_raw_request(""), Err(ComposeError::EmptyInput));
        assert_eq!(validate_raw_request("  \n \n"), Err(ComposeError::EmptyInput));
    }

    #[test]
    fn request_line_must_have_exactly_three_tokens() {
        // Missing space between method and target.
        let raw = "GEThttps://www.google.com/ HTTP/1.1\nHost: www.google.com";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedRequestLine)
        );

        // Version token missing entirely.
        let raw = "GET https://www.google.com/\nHost: www.google.com";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedRequestLine)
        );

        let raw = "GET https://www.google.com/ HTTP/1.1 extra";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedRequestLine)
        );
    }

    #[test]
    fn unknown_method_fails() {
        let raw = "FETCH https://www.google.com/ HTTP/1.1";
        assert!(matches!(
            validate_raw_request(raw),
            Err(ComposeError::UnknownMethod(_))
        ));
    }

    #[test]
    fn non_http_scheme_fails() {
        let raw = "GET ftp://example.com/file HTTP/1.1";
        assert!(matches!(
            validate_raw_request(raw),
            Err(ComposeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn version_must_be_1_0_or_1_1() {
        let raw = "GET https://www.google.com/ HTTP/2.0";
        assert!(matches!(
            validate_raw_request(raw),
            Err(ComposeError::UnsupportedVersion(_))
        ));
        assert!(validate_raw_request("GET https://www.google.com/ HTTP/1.0").is_ok());
    }

    #[test]
    fn header_line_without_colon_fails_with_its_line_number() {
        let raw = "GET https://www.google.com/ HTTP/1.1\n\
                   Host www.google.com\n\
                   Connection: keep-alive";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedHeaderLine { line: 2 })
        );

        let raw = "GET https://www.google.com/ HTTP/1.1\n\
                   Host: www.google.com\n\
                   Connection keep-alive";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedHeaderLine { line: 3 })
        );
    }

    #[test]
    fn header_name_must_be_non_empty() {
        let raw = "GET https://www.google.com/ HTTP/1.1\n: orphaned value";
        assert_eq!(
            validate_raw_request(raw),
            Err(ComposeError::MalformedHeaderLine { line: 2 })
        );
    }

    #[test]
    fn lines_after_the_blank_separator_are_not_header_checked() {
        let raw = "POST https://example.com/submit HTTP/1.1\n\
                   Content-Type: text/plain\n\
                   \n\
                   this body line has no colon";
        assert!(validate_raw_request(raw).is_ok());
    }

    // Pins the advisory behavior: a relative target with no Host header
    // still validates; the builder is the layer that rejects it.
    #[test]
    fn relative_target_without_host_still_validates() {
        let raw = "GET /index.php HTTP/1.1\nAccept: text/html";
        assert!(validate_raw_request(raw).is_ok());
    }

    #[test]
    fn later_checks_run_even_when_the_host_advisory_fires() {
        let raw = "GET /index.php HTTP/9.9\nAccept: text/html";
        assert!(matches!(
            validate_raw_request(raw),
            Err(ComposeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn form_requires_target_or_host() {
        assert_eq!(
            validate_form("", "", ""),
            Err(ComposeError::MissingTargetAndHost)
        );
    }

    #[test]
    fn form_relative_target_needs_a_host() {
        assert_eq!(
            validate_form("index.html", "", "GET"),
            Err(ComposeError::InvalidHost(String::new()))
        );
    }

    #[test]
    fn form_absolute_target_stands_alone() {
        assert!(validate_form("http://example.com/index.html", "", "GET").is_ok());
    }

    #[test]
    fn form_relative_target_with_host_url_passes() {
        assert!(validate_form("index.html", "http://example.com/", "GET").is_ok());
    }

    #[test]
    fn form_bare_hostname_passes_the_host_check() {
        assert!(validate_form("", "www.google.com", "GET").is_ok());
    }

    #[test]
    fn form_rejects_unparseable_target() {
        assert!(matches!(
            validate_form("http://some invalid url/", "", ""),
            Err(ComposeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn form_requires_a_method() {
        assert_eq!(
            validate_form("http://example.com/", "", ""),
            Err(ComposeError::MissingMethod)
        );
    }
}
