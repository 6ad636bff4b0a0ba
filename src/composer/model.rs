//! # Request Model
//!
//! The canonical parsed request: method, absolute URL, protocol version,
//! promoted well-known headers, the generic header mapping, and an optional
//! body. A model is built fresh for every send attempt, either from a raw
//! text block or from discrete form fields, and is never mutated afterwards.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::composer::error::ComposeError;
use crate::composer::method::Method;
use crate::composer::url::{classify_target, resolve_with_host, Target};
use crate::composer::validator;
use crate::composer::version::HttpVersion;

/// Connection handling requested via the `Connection` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionDirective {
    /// No directive, or an explicit `close`.
    #[default]
    Default,
    /// `keep-alive`, compared case-insensitively.
    KeepAlive,
    /// Any other value is passed through to the transport verbatim.
    Literal(String),
}

/// Well-known headers promoted out of the generic mapping into typed fields.
///
/// Once a name is promoted it no longer appears in [`RequestModel::headers`];
/// only unrecognized headers stay there to be replayed verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotedHeaders {
    pub connection: ConnectionDirective,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    pub expect: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub if_modified_since: Option<DateTime<FixedOffset>>,
    pub referer: Option<String>,
    /// Set when a `Transfer-Encoding` header is present; its value is not
    /// otherwise inspected.
    pub send_chunked: bool,
}

impl PromotedHeaders {
    /// Drain every recognized header out of `headers` into typed fields.
    fn promote(headers: &mut HashMap<String, String>) -> Result<Self, ComposeError> {
        let mut promoted = PromotedHeaders::default();

        if let Some(value) = headers.remove("Connection") {
            if value.eq_ignore_ascii_case("keep-alive") {
                promoted.connection = ConnectionDirective::KeepAlive;
            } else if !value.eq_ignore_ascii_case("close") {
                promoted.connection = ConnectionDirective::Literal(value);
            }
        }

        promoted.accept = headers.remove("Accept");
        promoted.user_agent = headers.remove("User-Agent");
        promoted.content_type = headers.remove("Content-Type");
        promoted.expect = headers.remove("Expect");
        promoted.referer = headers.remove("Referer");

        if let Some(value) = headers.remove("Content-Length") {
            promoted.content_length = Some(
                value
                    .parse::<u64>()
                    .map_err(|_| ComposeError::InvalidContentLength(value))?,
            );
        }

        if let Some(value) = headers.remove("Date") {
            promoted.date = Some(parse_http_date("Date", &value)?);
        }
        if let Some(value) = headers.remove("If-Modified-Since") {
            promoted.if_modified_since = Some(parse_http_date("If-Modified-Since", &value)?);
        }

        if headers.remove("Transfer-Encoding").is_some() {
            promoted.send_chunked = true;
        }

        Ok(promoted)
    }
}

/// A fully-specified outbound request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestModel {
    method: Method,
    url: String,
    version: HttpVersion,
    headers: HashMap<String, String>,
    promoted: PromotedHeaders,
    body: Option<String>,
}

impl RequestModel {
    /// Build a model from a raw HTTP/1.x text block.
    ///
    /// The text is re-validated defensively even though callers are expected
    /// to run [`validator::validate_raw_request`] first. Header names keep
    /// their authored case; a duplicate name silently overwrites the earlier
    /// value. The body is everything after the first blank line, with
    /// interior blank lines preserved; an empty remainder means no body.
    pub fn from_raw_text(raw: &str) -> Result<Self, ComposeError> {
        validator::validate_raw_request(raw)?;

        let lines: Vec<&str> = raw.lines().collect();
        let parts: Vec<&str> = lines[0].split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ComposeError::MalformedRequestLine);
        }

        let mut headers = HashMap::new();
        for (index, line) in lines.iter().enumerate().skip(1) {
            if line.is_empty() {
                break;
            }
            let Some((name, value)) = line.split_once(':') else {
                return Err(ComposeError::MalformedHeaderLine { line: index + 1 });
            };
            headers.insert(name.to_string(), value.trim().to_string());
        }

        let body = lines
            .iter()
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        let body = (!body.is_empty()).then_some(body);

        let method = Method::parse(parts[0])?;
        let version = HttpVersion::parse(parts[2])?;

        // The Host header is consumed for URL resolution and never replayed;
        // the transport derives its own Host from the final URL's authority.
        let host = headers.remove("Host");
        let url = match classify_target(parts[1])? {
            Target::Absolute => parts[1].to_string(),
            Target::Relative => {
                let host = host.ok_or(ComposeError::MissingHost)?;
                resolve_with_host(&host, parts[1])
            }
        };

        let promoted = PromotedHeaders::promote(&mut headers)?;

        Ok(Self {
            method,
            url,
            version,
            headers,
            promoted,
            body,
        })
    }

    /// Build a model from discrete form fields.
    ///
    /// No raw-text parsing happens here; form-level validation is expected
    /// to have run already. Optional fields are applied only when non-empty,
    /// and the version defaults to HTTP/1.1.
    pub fn from_form(
        target: &str,
        host: &str,
        method: &str,
        user_agent: &str,
        accept: &str,
        accept_encoding: &str,
        accept_language: &str,
    ) -> Result<Self, ComposeError> {
        let method = Method::parse(method)?;
        let url = match classify_target(target)? {
            Target::Absolute => target.to_string(),
            Target::Relative => resolve_with_host(host, target),
        };

        let mut headers = HashMap::new();
        if !accept_encoding.is_empty() {
            headers.insert("Accept-Encoding".to_string(), accept_encoding.to_string());
        }
        if !accept_language.is_empty() {
            headers.insert("Accept-Language".to_string(), accept_language.to_string());
        }

        let mut promoted = PromotedHeaders::default();
        if !user_agent.is_empty() {
            promoted.user_agent = Some(user_agent.to_string());
        }
        if !accept.is_empty() {
            promoted.accept = Some(accept.to_string());
        }

        Ok(Self {
            method,
            url,
            version: HttpVersion::default(),
            headers,
            promoted,
            body: None,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The fully-resolved absolute URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_version(&self) -> HttpVersion {
        self.version
    }

    /// Unrecognized headers, replayed verbatim by the transport.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn promoted(&self) -> &PromotedHeaders {
        &self.promoted
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Parse an HTTP date header value (the RFC 2822 shape emitted by servers).
fn parse_http_date(
    header: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, ComposeError> {
    DateTime::parse_from_rfc2822(value).map_err(|_| ComposeError::InvalidDate {
        header,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_target_is_used_verbatim() {
        let raw = "GET https://www.google.com/ HTTP/1.1\nHost: www.google.com";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.method(), Method::Get);
        assert_eq!(model.url(), "https://www.google.com/");
        assert_eq!(model.http_version(), HttpVersion::Http11);
        assert!(model.body().is_none());
    }

    #[test]
    fn relative_target_resolves_against_the_host_header() {
        let raw = "GET /index.php HTTP/1.1\nHost: www.example.com.tr";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.url(), "http://www.example.com.tr/index.php");
    }

    #[test]
    fn host_with_scheme_prefix_is_concatenated_directly() {
        let raw = "GET /index.php HTTP/1.1\nHost: http://example.com";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.url(), "http://example.com/index.php");
    }

    #[test]
    fn relative_target_without_host_fails_the_build() {
        let raw = "GET /index.php HTTP/1.1\nAccept: text/html";
        assert_eq!(
            RequestModel::from_raw_text(raw),
            Err(ComposeError::MissingHost)
        );
    }

    #[test]
    fn host_header_never_reaches_the_generic_mapping() {
        let raw = "GET https://www.google.com/ HTTP/1.1\nHost: www.google.com";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert!(!model.headers().contains_key("Host"));
    }

    #[test]
    fn embedded_colons_survive_with_boundary_trim_only() {
        let raw = "GET https://example.com/ HTTP/1.1\nX-Custom: a:b:c";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.headers().get("X-Custom").unwrap(), "a:b:c");
    }

    #[test]
    fn duplicate_header_names_overwrite_silently() {
        let raw = "GET https://example.com/ HTTP/1.1\n\
                   X-Token: first\n\
                   X-Token: second";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.headers().get("X-Token").unwrap(), "second");
    }

    #[test]
    fn content_length_promotes_to_a_number() {
        let raw = "POST https://example.com/ HTTP/1.1\nContent-Length: 10";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.promoted().content_length, Some(10));
        assert!(!model.headers().contains_key("Content-Length"));
    }

    #[test]
    fn unparseable_content_length_fails() {
        let raw = "POST https://example.com/ HTTP/1.1\nContent-Length: ten";
        assert!(matches!(
            RequestModel::from_raw_text(raw),
            Err(ComposeError::InvalidContentLength(_))
        ));
        let raw = "POST https://example.com/ HTTP/1.1\nContent-Length: -5";
        assert!(matches!(
            RequestModel::from_raw_text(raw),
            Err(ComposeError::InvalidContentLength(_))
        ));
    }

    #[test]
    fn recognized_headers_drain_out_of_the_mapping() {
        let raw = "GET https://example.com/ HTTP/1.1\n\
                   Connection: keep-alive\n\
                   Accept: text/html\n\
                   User-Agent: Mozilla/5.0\n\
                   Content-Type: text/plain\n\
                   Expect: 100-continue\n\
                   Referer: https://example.com/from\n\
                   Date: Tue, 15 Nov 1994 08:12:31 GMT\n\
                   If-Modified-Since: Sat, 29 Oct 1994 19:43:31 GMT\n\
                   Transfer-Encoding: chunked\n\
                   X-Trace-Id: abc123";
        let model = RequestModel::from_raw_text(raw).unwrap();
        let promoted = model.promoted();

        assert_eq!(promoted.connection, ConnectionDirective::KeepAlive);
        assert_eq!(promoted.accept.as_deref(), Some("text/html"));
        assert_eq!(promoted.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(promoted.content_type.as_deref(), Some("text/plain"));
        assert_eq!(promoted.expect.as_deref(), Some("100-continue"));
        assert_eq!(promoted.referer.as_deref(), Some("https://example.com/from"));
        assert!(promoted.date.is_some());
        assert!(promoted.if_modified_since.is_some());
        assert!(promoted.send_chunked);

        // Only the unrecognized header is left to replay.
        assert_eq!(model.headers().len(), 1);
        assert_eq!(model.headers().get("X-Trace-Id").unwrap(), "abc123");
    }

    #[test]
    fn connection_close_maps_to_the_default_directive() {
        let raw = "GET https://example.com/ HTTP/1.1\nConnection: Close";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.promoted().connection, ConnectionDirective::Default);
    }

    #[test]
    fn other_connection_values_pass_through_literally() {
        let raw = "GET https://example.com/ HTTP/1.1\nConnection: upgrade";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(
            model.promoted().connection,
            ConnectionDirective::Literal("upgrade".to_string())
        );
    }

    #[test]
    fn bad_date_header_fails_with_the_header_name() {
        let raw = "GET https://example.com/ HTTP/1.1\nDate: not a date";
        assert!(matches!(
            RequestModel::from_raw_text(raw),
            Err(ComposeError::InvalidDate { header: "Date", .. })
        ));
    }

    #[test]
    fn body_starts_after_the_first_blank_line() {
        let raw = "POST https://example.com/ HTTP/1.1\n\
                   Content-Type: application/json\n\
                   \n\
                   {\"name\": \"test\"}";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.body(), Some("{\"name\": \"test\"}"));
    }

    #[test]
    fn interior_blank_lines_stay_in_the_body() {
        let raw = "POST https://example.com/ HTTP/1.1\n\nfirst\n\nsecond";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert_eq!(model.body(), Some("first\n\nsecond"));
    }

    #[test]
    fn blank_line_with_nothing_after_it_means_no_body() {
        let raw = "GET https://example.com/ HTTP/1.1\nAccept: text/html\n";
        let model = RequestModel::from_raw_text(raw).unwrap();
        assert!(model.body().is_none());
    }

    #[test]
    fn form_path_builds_from_discrete_fields() {
        let model = RequestModel::from_form(
            "/search",
            "www.example.com",
            "GET",
            "reqforge-test",
            "text/html",
            "gzip, deflate",
            "en-US,en;q=0.8",
        )
        .unwrap();

        assert_eq!(model.url(), "http://www.example.com/search");
        assert_eq!(model.http_version(), HttpVersion::Http11);
        assert_eq!(model.promoted().user_agent.as_deref(), Some("reqforge-test"));
        assert_eq!(model.promoted().accept.as_deref(), Some("text/html"));
        assert_eq!(
            model.headers().get("Accept-Encoding").unwrap(),
            "gzip, deflate"
        );
        assert_eq!(
            model.headers().get("Accept-Language").unwrap(),
            "en-US,en;q=0.8"
        );
        assert!(model.body().is_none());
    }

    #[test]
    fn form_path_skips_empty_optional_fields() {
        let model =
            RequestModel::from_form("https://example.com/", "", "POST", "", "", "", "").unwrap();
        assert_eq!(model.method(), Method::Post);
        assert_eq!(model.url(), "https://example.com/");
        assert!(model.promoted().user_agent.is_none());
        assert!(model.promoted().accept.is_none());
        assert!(model.headers().is_empty());
    }

    #[test]
    fn form_path_passes_empty_target_through_host_resolution() {
        let model = RequestModel::from_form("", "www.google.com", "GET", "", "", "", "").unwrap();
        assert_eq!(model.url(), "http://www.google.com");
    }
}
