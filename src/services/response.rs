//! # Response Model
//!
//! What a completed request surfaces to the caller: status, the general
//! information the response carries (method, final URL, server, character
//! set), the header list in transmission order, the decoded body text, and
//! how long the round trip took.

use std::time::Instant;

use crate::composer::Method;
use crate::services::http::TransportError;

/// View model of a received HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseModel {
    status_code: u16,
    status_text: String,
    method: Method,
    url: String,
    server: Option<String>,
    charset: Option<String>,
    headers: Vec<(String, String)>,
    body: String,
    duration_ms: u64,
}

impl ResponseModel {
    /// Drain a `reqwest` response into an owned model.
    pub(crate) async fn read(
        method: Method,
        response: reqwest::Response,
        started: Instant,
    ) -> Result<Self, TransportError> {
        let status = response.status();
        let url = response.url().to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let server = header_value(&headers, "server").map(str::to_string);
        let charset = header_value(&headers, "content-type").and_then(charset_of);

        let body = response.text().await?;

        Ok(Self {
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            method,
            url,
            server,
            charset,
            headers,
            body,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Final URL after any redirects.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// All response headers, in the order they were transmitted.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

fn header_value<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Extract the charset parameter from a `Content-Type` value.
fn charset_of(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_is_extracted_from_content_type_parameters() {
        assert_eq!(
            charset_of("text/html; charset=utf-8").as_deref(),
            Some("utf-8")
        );
        assert_eq!(
            charset_of("text/html; boundary=x; charset=\"ISO-8859-9\"").as_deref(),
            Some("ISO-8859-9")
        );
    }

    #[test]
    fn charset_is_absent_when_not_declared() {
        assert_eq!(charset_of("text/html"), None);
        assert_eq!(charset_of("text/html; boundary=x"), None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let headers = vec![("Server".to_string(), "nginx".to_string())];
        assert_eq!(header_value(&headers, "server"), Some("nginx"));
        assert_eq!(header_value(&headers, "date"), None);
    }
}
