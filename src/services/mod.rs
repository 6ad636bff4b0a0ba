//! # Transport Services
//!
//! Everything that performs I/O lives here; the composer core stays pure.

pub mod http;
pub mod response;

pub use http::{HttpService, TransportError};
pub use response::ResponseModel;
