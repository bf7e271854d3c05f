//! Headers of outgoing requests.

mod headers;
mod template;

pub use headers::RequestHeaders;
pub use template::HeaderTemplate;
