//! # ReqForge - HTTP/1.x Request Composer
//!
//! Paste a raw HTTP/1.x request or fill in a handful of form fields, and
//! reqforge validates the input, builds a fully-specified request model,
//! sends it, and surfaces the response.
//!
//! ## Architecture
//!
//! ```text
//! raw text ────► validator ──► RequestModel ──► HttpService ──► ResponseModel
//! form fields ─► form checks ──────┘
//! ```
//!
//! The composer core (validation, header promotion, model building) is
//! synchronous and pure; only the transport service performs I/O.

pub mod cmd_args;
pub mod composer;
pub mod config;
pub mod services;

// Re-export main types for easy access
pub use composer::{
    ComposeError, ConnectionDirective, HttpVersion, Method, PromotedHeaders, RequestComposer,
    RequestModel,
};
pub use config::Profile;
pub use services::{HttpService, ResponseModel, TransportError};
