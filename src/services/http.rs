//! # HTTP Transport Service
//!
//! The one component that touches the network. `HttpService` owns a
//! configured `reqwest` client and executes fully built request models:
//! promoted header fields are laid back down as wire headers, unrecognized
//! headers are replayed verbatim, and the response is drained into a
//! [`ResponseModel`]. One outstanding request per call; no retries.

use std::time::Instant;

use chrono::{DateTime, FixedOffset, Utc};
use futures::{future, stream};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, DATE,
    EXPECT, IF_MODIFIED_SINCE, REFERER, USER_AGENT,
};
use thiserror::Error;

use crate::composer::{ConnectionDirective, HttpVersion, Method, RequestModel};
use crate::config::Profile;
use crate::services::response::ResponseModel;

/// Failure surfaced by the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A header could not be converted into its wire form.
    #[error("header `{name}` cannot be sent: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Connection, TLS, protocol or body-read failure from the client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Transport collaborator executing built requests.
pub struct HttpService {
    client: reqwest::Client,
}

impl HttpService {
    /// Build a client with automatic gzip/deflate decompression and the
    /// profile's defaults. Request-level headers override these defaults.
    pub fn new(profile: &Profile) -> Result<Self, TransportError> {
        let mut defaults = HeaderMap::new();
        if let Some(user_agent) = &profile.user_agent {
            defaults.insert(USER_AGENT, parse_value(&USER_AGENT, user_agent)?);
        }
        if let Some(accept) = &profile.accept {
            defaults.insert(ACCEPT, parse_value(&ACCEPT, accept)?);
        }

        let client = reqwest::Client::builder()
            .default_headers(defaults)
            .timeout(profile.timeout)
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self { client })
    }

    /// Send the request and wait for the full response.
    pub async fn execute(&self, model: &RequestModel) -> Result<ResponseModel, TransportError> {
        let started = Instant::now();
        tracing::info!(method = %model.method(), url = model.url(), "sending request");

        let mut request = self
            .client
            .request(wire_method(model.method()), model.url())
            .version(wire_version(model.http_version()))
            .headers(wire_headers(model)?);

        if let Some(body) = model.body() {
            request = if model.promoted().send_chunked {
                // A stream with no known length makes the client frame the
                // body with chunked transfer encoding.
                let bytes = body.as_bytes().to_vec();
                request.body(reqwest::Body::wrap_stream(stream::once(future::ready(
                    Ok::<_, std::convert::Infallible>(bytes),
                ))))
            } else {
                request.body(body.to_string())
            };
        }

        let response = request.send().await?;
        tracing::debug!(status = %response.status(), "response received");
        ResponseModel::read(model.method(), response, started).await
    }
}

/// Lay the model's promoted fields and generic mapping down as wire headers.
fn wire_headers(model: &RequestModel) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    let promoted = model.promoted();

    match &promoted.connection {
        ConnectionDirective::Default => {}
        ConnectionDirective::KeepAlive => {
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        }
        ConnectionDirective::Literal(value) => {
            headers.insert(CONNECTION, parse_value(&CONNECTION, value)?);
        }
    }

    set_named(&mut headers, ACCEPT, promoted.accept.as_deref())?;
    set_named(&mut headers, USER_AGENT, promoted.user_agent.as_deref())?;
    set_named(&mut headers, CONTENT_TYPE, promoted.content_type.as_deref())?;
    set_named(&mut headers, EXPECT, promoted.expect.as_deref())?;
    set_named(&mut headers, REFERER, promoted.referer.as_deref())?;

    if let Some(date) = &promoted.date {
        headers.insert(DATE, parse_value(&DATE, &format_http_date(date))?);
    }
    if let Some(date) = &promoted.if_modified_since {
        headers.insert(
            IF_MODIFIED_SINCE,
            parse_value(&IF_MODIFIED_SINCE, &format_http_date(date))?,
        );
    }

    // An explicit Content-Length is only forwarded for body-less requests;
    // a body derives its own length when it is attached.
    if let Some(length) = promoted.content_length {
        if model.body().is_none() {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        }
    }

    for (name, value) in model.headers() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            TransportError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            }
        })?;
        let value = parse_value(&name, value)?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn set_named(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: Option<&str>,
) -> Result<(), TransportError> {
    if let Some(value) = value {
        let value = parse_value(&name, value)?;
        headers.insert(name, value);
    }
    Ok(())
}

fn parse_value(name: &HeaderName, value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|err| TransportError::InvalidHeader {
        name: name.to_string(),
        reason: err.to_string(),
    })
}

fn wire_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Connect => reqwest::Method::CONNECT,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Trace => reqwest::Method::TRACE,
    }
}

fn wire_version(version: HttpVersion) -> reqwest::Version {
    match version {
        HttpVersion::Http10 => reqwest::Version::HTTP_10,
        HttpVersion::Http11 => reqwest::Version::HTTP_11,
    }
}

/// Serialize a date in the fixed form servers expect in HTTP date headers.
fn format_http_date(date: &DateTime<FixedOffset>) -> String {
    date.with_timezone(&Utc)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
