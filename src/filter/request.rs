use crate::http::header::{self, names};
use crate::http::{Body, Cookie, HeaderMap, Locale, MediaType, Method, Uri};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

/// A request that has been received by the transport but not yet routed.
///
/// This is the seam between filters and the transport: filters only see
/// the request through this trait, so any transport (or a test double)
/// can back a [`PreMatchContext`](super::PreMatchContext).
pub trait ReceivedRequest: Send {
    fn method(&self) -> &Method;

    fn uri(&self) -> &Uri;

    /// The parsed request headers.
    fn http_headers(&self) -> &IncomingHeaders;

    fn http_headers_mut(&mut self) -> &mut IncomingHeaders;

    fn entity_stream(&mut self) -> &mut Body;

    /// Replaces the entity stream, returning the previous one.
    ///
    /// The returned stream is owned by the caller from then on.
    fn set_entity_stream(&mut self, stream: Body) -> Body;

    fn properties(&self) -> &Properties;

    fn properties_mut(&mut self) -> &mut Properties;

    fn security_context(&self) -> Option<&dyn SecurityContext> {
        None
    }
}

/// Security information about the current request.
pub trait SecurityContext: Send + Sync {
    fn user_principal(&self) -> Option<&str>;

    fn is_user_in_role(&self, role: &str) -> bool;

    /// Whether the request was received over a secure channel.
    fn is_secure(&self) -> bool;

    fn authentication_scheme(&self) -> Option<&str>;
}

/// Named, typed values attached to a request for the lifetime
/// of its processing.
#[derive(Default)]
pub struct Properties {
    map: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Properties {
    pub fn new() -> Properties {
        Properties::default()
    }

    /// Inserts a property, returning `true` if one with the same name was replaced.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.map.insert(name.into(), Box::new(value)).is_some()
    }

    /// Returns the property if it exists and has type `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.map.get(name).and_then(|value| value.downcast_ref())
    }

    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.map.get_mut(name).and_then(|value| value.downcast_mut())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.map.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// The headers of a received request, with typed views parsed on
/// first access.
///
/// Malformed values are skipped with a warning rather than failing
/// the request.
#[derive(Default)]
pub struct IncomingHeaders {
    headers: HeaderMap<String>,
    date: OnceCell<Option<SystemTime>>,
    language: OnceCell<Option<Locale>>,
    media_type: OnceCell<Option<MediaType>>,
    length: OnceCell<i64>,
    accepts: OnceCell<Vec<MediaType>>,
    acceptable_languages: OnceCell<Vec<Locale>>,
    cookies: OnceCell<IndexMap<String, Cookie>>,
}

impl IncomingHeaders {
    pub fn new(headers: HeaderMap<String>) -> IncomingHeaders {
        IncomingHeaders {
            headers,
            ..IncomingHeaders::default()
        }
    }

    pub fn request_headers(&self) -> &HeaderMap<String> {
        &self.headers
    }

    /// Mutable access to the raw headers.
    ///
    /// Discards every parsed view, they are parsed again on next access.
    pub fn request_headers_mut(&mut self) -> &mut HeaderMap<String> {
        self.date.take();
        self.language.take();
        self.media_type.take();
        self.length.take();
        self.accepts.take();
        self.acceptable_languages.take();
        self.cookies.take();
        &mut self.headers
    }

    /// Returns all values of a header joined by `,`.
    pub fn header_string(&self, name: &str) -> Option<String> {
        self.headers.get(name).map(|values| values.join(","))
    }

    pub fn date(&self) -> Option<SystemTime> {
        *self.date.get_or_init(|| {
            let value = self.headers.first(names::DATE)?;
            httpdate::parse_http_date(value)
                .map_err(|_| log::warn!("ignoring malformed Date header: {:?}", value))
                .ok()
        })
    }

    /// The `Content-Language` of the request.
    pub fn language(&self) -> Option<&Locale> {
        self.language
            .get_or_init(|| {
                let value = self.headers.first(names::CONTENT_LANGUAGE)?;
                Locale::parse(value)
                    .map_err(|err| log::warn!("ignoring Content-Language header: {}", err))
                    .ok()
            })
            .as_ref()
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type
            .get_or_init(|| {
                let value = self.headers.first(names::CONTENT_TYPE)?;
                value
                    .trim()
                    .parse()
                    .map_err(|_| log::warn!("ignoring malformed Content-Type header: {:?}", value))
                    .ok()
            })
            .as_ref()
    }

    /// The `Content-Length` of the request, or `-1` if it is absent or invalid.
    pub fn length(&self) -> i64 {
        *self.length.get_or_init(|| {
            self.headers
                .first(names::CONTENT_LENGTH)
                .and_then(|value| value.trim().parse::<i64>().ok())
                .filter(|length| *length >= 0)
                .unwrap_or(-1)
        })
    }

    /// The accepted media types, most preferred first.
    ///
    /// `*/*` when the request has no `Accept` header.
    pub fn acceptable_media_types(&self) -> &[MediaType] {
        self.accepts.get_or_init(|| {
            let mut accepts = Vec::new();

            for element in self.list(names::ACCEPT) {
                match element.parse::<MediaType>() {
                    Ok(media_type) => {
                        let q = header::quality(
                            media_type
                                .params()
                                .map(|(name, value)| (name.as_str(), value.as_str())),
                        );
                        match q {
                            Some(q) => accepts.push((media_type, q)),
                            None => log::warn!("ignoring Accept element with bad weight: {:?}", element),
                        }
                    }
                    Err(_) => log::warn!("ignoring malformed Accept element: {:?}", element),
                }
            }

            if accepts.is_empty() {
                return vec![mime::STAR_STAR];
            }

            header::by_quality(accepts)
        })
    }

    /// The accepted languages, most preferred first.
    ///
    /// `*` when the request has no `Accept-Language` header.
    pub fn acceptable_languages(&self) -> &[Locale] {
        self.acceptable_languages.get_or_init(|| {
            let mut languages = Vec::new();

            for element in self.list(names::ACCEPT_LANGUAGE) {
                let mut parts = element.split(';');
                let tag = parts.next().unwrap_or_default();

                match Locale::parse(tag) {
                    Ok(locale) => {
                        match header::quality(parts.filter_map(|param| param.split_once('='))) {
                            Some(q) => languages.push((locale, q)),
                            None => log::warn!(
                                "ignoring Accept-Language element with bad weight: {:?}",
                                element
                            ),
                        }
                    }
                    Err(err) => log::warn!("ignoring Accept-Language element: {}", err),
                }
            }

            if languages.is_empty() {
                return vec![Locale::wildcard()];
            }

            header::by_quality(languages)
        })
    }

    /// The request cookies by name. When a name repeats, the last cookie wins.
    pub fn cookies(&self) -> &IndexMap<String, Cookie> {
        self.cookies.get_or_init(|| {
            let mut cookies = IndexMap::new();

            for value in self.headers.get(names::COOKIE).unwrap_or_default() {
                match Cookie::parse_header(value) {
                    Ok(parsed) => {
                        for cookie in parsed {
                            cookies.insert(cookie.name().to_owned(), cookie);
                        }
                    }
                    Err(err) => log::warn!("ignoring Cookie header: {}", err),
                }
            }

            cookies
        })
    }

    fn list<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .get(name)
            .unwrap_or_default()
            .iter()
            .flat_map(|value| header::split_list(value))
    }
}

impl fmt::Debug for IncomingHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.headers, f)
    }
}

impl From<HeaderMap<String>> for IncomingHeaders {
    fn from(headers: HeaderMap<String>) -> Self {
        IncomingHeaders::new(headers)
    }
}

/// The stock [`ReceivedRequest`], built from an [`http::Request`].
pub struct IncomingRequest {
    method: Method,
    uri: Uri,
    headers: IncomingHeaders,
    body: Body,
    properties: Properties,
    security: Option<Box<dyn SecurityContext>>,
}

impl IncomingRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap<String>, body: Body) -> IncomingRequest {
        IncomingRequest {
            method,
            uri,
            headers: IncomingHeaders::new(headers),
            body,
            properties: Properties::new(),
            security: None,
        }
    }

    pub fn with_security_context(mut self, context: impl SecurityContext + 'static) -> Self {
        self.security = Some(Box::new(context));
        self
    }

    /// Consumes the request, returning its body.
    pub fn into_body(self) -> Body {
        self.body
    }
}

impl From<::http::Request<Body>> for IncomingRequest {
    fn from(request: ::http::Request<Body>) -> Self {
        let (parts, body) = request.into_parts();

        let mut headers = HeaderMap::new();
        for (name, value) in parts.headers.iter() {
            match value.to_str() {
                Ok(value) => headers.append(name.as_str(), value),
                Err(_) => log::warn!("dropping non-visible-ASCII value of header {}", name),
            }
        }

        IncomingRequest::new(parts.method, parts.uri, headers, body)
    }
}

impl ReceivedRequest for IncomingRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn http_headers(&self) -> &IncomingHeaders {
        &self.headers
    }

    fn http_headers_mut(&mut self) -> &mut IncomingHeaders {
        &mut self.headers
    }

    fn entity_stream(&mut self) -> &mut Body {
        &mut self.body
    }

    fn set_entity_stream(&mut self, stream: Body) -> Body {
        std::mem::replace(&mut self.body, stream)
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn security_context(&self) -> Option<&dyn SecurityContext> {
        self.security.as_deref()
    }
}

impl fmt::Debug for IncomingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomingRequest")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("properties", &self.properties)
            .finish()
    }
}
