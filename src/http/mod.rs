pub mod header;

mod body;
mod bytestr;
mod cache_control;
mod cookie;
mod locale;

pub use body::{Body, BoxError};
pub use bytestr::ByteStr;
pub use cache_control::CacheControl;
pub use cookie::Cookie;
pub use header::{HeaderMap, HeaderName, HeaderValue};
pub use locale::Locale;

pub use bytes::Bytes;
pub use ::http::{Method, StatusCode, Uri};

/// An internet media type, as used in `Content-Type` and `Accept`.
pub type MediaType = mime::Mime;

/// An HTTP response, used by filters to abort a request.
pub type Response = ::http::Response<Body>;

/// Builder for [`Response`].
pub type ResponseBuilder = ::http::response::Builder;
