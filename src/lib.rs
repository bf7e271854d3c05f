//! Typed HTTP headers for outgoing requests and pre-routing filters.
//!
//! [`client::RequestHeaders`] builds the headers of an outgoing request
//! through typed setters. [`filter::PreMatchContext`] gives filters a typed
//! view of a received request before it is routed, and lets any of them
//! answer the request directly.

pub mod client;
pub mod filter;
pub mod http;

mod error;

pub use error::{Error, ParseKind, Result};
