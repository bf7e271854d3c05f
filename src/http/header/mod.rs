//! Header names, values and the multi-valued header map.

mod common;
mod convert;
mod map;
mod name;
mod value;

pub use common::IntoTyped;
pub use convert::{Converters, HeaderStringConverter};
pub use map::{HeaderMap, Iter};
pub use name::HeaderName;
pub use value::{HeaderValue, TypedHeader};

pub(crate) use common::{by_quality, join, parse_all, quality, set_allow, split_list};

/// Names of the headers this crate reads or writes.
pub mod names {
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
    pub const ALLOW: &str = "Allow";
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const CONTENT_LANGUAGE: &str = "Content-Language";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const COOKIE: &str = "Cookie";
    pub const DATE: &str = "Date";

    /// Written by [`RequestHeaders::set_language`](crate::client::RequestHeaders::set_language).
    ///
    /// This is not a registered header field. Servers read the content
    /// language from [`CONTENT_LANGUAGE`].
    pub const LANGUAGE: &str = "Language";
}
