//! # Request Composer
//!
//! The composing pipeline: raw text or form fields go through validation,
//! become a [`RequestModel`], and are handed to the transport service. The
//! [`RequestComposer`] facade wraps the pipeline behind a boolean-plus-
//! diagnostic surface for callers that drive it interactively: every
//! validate/parse/initialize call resets the diagnostic, and the last error
//! message, response and response body stay readable until the next attempt.

mod error;
mod method;
mod model;
mod url;
pub mod validator;
mod version;

pub use error::ComposeError;
pub use method::Method;
pub use model::{ConnectionDirective, PromotedHeaders, RequestModel};
pub use version::HttpVersion;

use crate::services::{HttpService, ResponseModel};

/// Stateful facade over validation, model building and sending.
///
/// One composer handles one request at a time: parse or initialize, then
/// [`send`](RequestComposer::send). Failures never panic and never leave
/// partial state behind; the diagnostic string is the single user-visible
/// error channel.
pub struct RequestComposer {
    service: HttpService,
    model: Option<RequestModel>,
    response: Option<ResponseModel>,
    error_message: String,
}

impl RequestComposer {
    pub fn new(service: HttpService) -> Self {
        Self {
            service,
            model: None,
            response: None,
            error_message: String::new(),
        }
    }

    /// Validate and build from a raw request text block.
    ///
    /// Returns true when the request is ready to send; on false the
    /// diagnostic explains the first failure.
    pub fn parse_raw_request(&mut self, raw: &str) -> bool {
        self.error_message.clear();
        self.model = None;

        match RequestModel::from_raw_text(raw) {
            Ok(model) => {
                tracing::debug!(method = %model.method(), url = %model.url(), "raw request parsed");
                self.model = Some(model);
                true
            }
            Err(err) => {
                tracing::debug!("raw request rejected: {err}");
                self.error_message = err.to_string();
                false
            }
        }
    }

    /// Validate discrete form fields without building anything.
    pub fn validate_form(&mut self, target: &str, host: &str, method: &str) -> bool {
        self.error_message.clear();

        match validator::validate_form(target, host, method) {
            Ok(()) => true,
            Err(err) => {
                self.error_message = err.to_string();
                false
            }
        }
    }

    /// Build the request from form fields.
    ///
    /// Assumes [`validate_form`](RequestComposer::validate_form) already
    /// passed; failures are reported through the diagnostic only.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize_from_form(
        &mut self,
        target: &str,
        host: &str,
        method: &str,
        user_agent: &str,
        accept: &str,
        accept_encoding: &str,
        accept_language: &str,
    ) {
        self.error_message.clear();
        self.model = None;

        match RequestModel::from_form(
            target,
            host,
            method,
            user_agent,
            accept,
            accept_encoding,
            accept_language,
        ) {
            Ok(model) => self.model = Some(model),
            Err(err) => self.error_message = err.to_string(),
        }
    }

    /// Transmit the prepared request.
    ///
    /// True means a response was received, whatever its status code; false
    /// means a transport-level failure (or no prepared request), with the
    /// diagnostic populated.
    pub async fn send(&mut self) -> bool {
        self.response = None;

        let Some(model) = &self.model else {
            self.error_message = "no request has been prepared to send".to_string();
            return false;
        };

        match self.service.execute(model).await {
            Ok(response) => {
                self.response = Some(response);
                true
            }
            Err(err) => {
                tracing::error!("request failed: {err}");
                self.error_message = err.to_string();
                false
            }
        }
    }

    /// Last diagnostic; empty means no error.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// The request model built by the last successful parse/initialize.
    pub fn request(&self) -> Option<&RequestModel> {
        self.model.as_ref()
    }

    /// The response received by the last successful send.
    pub fn response(&self) -> Option<&ResponseModel> {
        self.response.as_ref()
    }

    /// Body text of the last response.
    pub fn response_body(&self) -> Option<&str> {
        self.response.as_ref().map(|response| response.body())
    }
}
