use crate::http::{ByteStr, CacheControl, Cookie, Locale, MediaType};

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// A caller-defined typed header value.
///
/// Implemented for every `Display + Debug + Send + Sync` type. The
/// [`Display`](fmt::Display) form is used on the wire unless a delegate
/// is registered with [`Converters::register`](super::Converters::register).
pub trait TypedHeader: Any + fmt::Display + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> TypedHeader for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A stored header value.
///
/// Values are immutable once stored, so clones share their
/// underlying buffers where possible.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum HeaderValue {
    Text(ByteStr),
    MediaType(MediaType),
    Locale(Locale),
    Cookie(Cookie),
    CacheControl(Arc<CacheControl>),
    Date(SystemTime),
    Typed(Arc<dyn TypedHeader>),
}

impl HeaderValue {
    pub fn typed<T: TypedHeader>(value: T) -> HeaderValue {
        HeaderValue::Typed(Arc::new(value))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Downcasts a [`HeaderValue::Typed`] value.
    pub fn downcast_ref<T: TypedHeader>(&self) -> Option<&T> {
        match self {
            HeaderValue::Typed(value) => {
                let value: &dyn TypedHeader = &**value;
                value.as_any().downcast_ref()
            }
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(text) => f.write_str(text),
            HeaderValue::MediaType(media_type) => fmt::Display::fmt(media_type, f),
            HeaderValue::Locale(locale) => fmt::Display::fmt(locale, f),
            HeaderValue::Cookie(cookie) => fmt::Display::fmt(cookie, f),
            HeaderValue::CacheControl(cache_control) => fmt::Display::fmt(cache_control, f),
            HeaderValue::Date(date) => f.write_str(&httpdate::fmt_http_date(*date)),
            HeaderValue::Typed(value) => fmt::Display::fmt(&**value, f),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(text: &str) -> Self {
        HeaderValue::Text(text.into())
    }
}

impl From<String> for HeaderValue {
    fn from(text: String) -> Self {
        HeaderValue::Text(text.into())
    }
}

impl From<ByteStr> for HeaderValue {
    fn from(text: ByteStr) -> Self {
        HeaderValue::Text(text)
    }
}

impl From<MediaType> for HeaderValue {
    fn from(media_type: MediaType) -> Self {
        HeaderValue::MediaType(media_type)
    }
}

impl From<Locale> for HeaderValue {
    fn from(locale: Locale) -> Self {
        HeaderValue::Locale(locale)
    }
}

impl From<Cookie> for HeaderValue {
    fn from(cookie: Cookie) -> Self {
        HeaderValue::Cookie(cookie)
    }
}

impl From<CacheControl> for HeaderValue {
    fn from(cache_control: CacheControl) -> Self {
        HeaderValue::CacheControl(Arc::new(cache_control))
    }
}

impl From<SystemTime> for HeaderValue {
    fn from(date: SystemTime) -> Self {
        HeaderValue::Date(date)
    }
}
