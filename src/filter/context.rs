use super::request::{IncomingHeaders, Properties, ReceivedRequest, SecurityContext};
use crate::error::{Error, Result};
use crate::http::{Body, Cookie, HeaderMap, Locale, MediaType, Method, Response, Uri};

use std::fmt;
use std::time::SystemTime;

use indexmap::IndexMap;

/// The point in request processing at which a filter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Before the request is routed to a handler.
    PreMatch,
    /// After routing, once the handler is known.
    PostMatch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::PreMatch => "pre-match",
            Stage::PostMatch => "post-match",
        })
    }
}

/// A link from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    pub rel: String,
}

/// The request surface shared by filters of every stage.
///
/// Changing the identity of the request or reading its links is
/// only possible once the request has been matched. Stages that support
/// these operations override them; the defaults fail with
/// [`Error::Unsupported`].
pub trait ContainerRequestContext {
    const STAGE: Stage;

    fn method(&self) -> &Method;

    fn uri(&self) -> &Uri;

    fn headers(&self) -> &HeaderMap<String>;

    fn properties(&self) -> &Properties;

    fn properties_mut(&mut self) -> &mut Properties;

    /// Stops processing and responds with `response`.
    fn abort_with(&mut self, response: Response);

    fn set_request_uri(&mut self, _uri: Uri) -> Result<()> {
        Err(Error::unsupported("set_request_uri", Self::STAGE))
    }

    fn set_method(&mut self, _method: Method) -> Result<()> {
        Err(Error::unsupported("set_method", Self::STAGE))
    }

    fn set_security_context(&mut self, _context: Box<dyn SecurityContext>) -> Result<()> {
        Err(Error::unsupported("set_security_context", Self::STAGE))
    }

    fn links(&self) -> Result<Vec<Link>> {
        Err(Error::unsupported("links", Self::STAGE))
    }

    fn link(&self, _rel: &str) -> Result<Option<Link>> {
        Err(Error::unsupported("link", Self::STAGE))
    }

    fn has_link(&self, _rel: &str) -> Result<bool> {
        Err(Error::unsupported("has_link", Self::STAGE))
    }

    fn link_builder(&self, _rel: &str) -> Result<Link> {
        Err(Error::unsupported("link_builder", Self::STAGE))
    }
}

/// The view of a request given to pre-match filters.
///
/// Header accessors delegate to the underlying [`ReceivedRequest`].
/// A filter may call [`abort_with`](Self::abort_with) to skip routing
/// and respond directly; the [`Chain`](super::Chain) checks for this after
/// every filter and runs no further filters once it is set.
pub struct PreMatchContext<'req> {
    request: &'req mut dyn ReceivedRequest,
    aborted: Option<Response>,
}

impl<'req> PreMatchContext<'req> {
    pub fn new(request: &'req mut dyn ReceivedRequest) -> PreMatchContext<'req> {
        PreMatchContext {
            request,
            aborted: None,
        }
    }

    pub fn request(&self) -> &dyn ReceivedRequest {
        &*self.request
    }

    pub fn request_mut(&mut self) -> &mut dyn ReceivedRequest {
        &mut *self.request
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn properties(&self) -> &Properties {
        self.request.properties()
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        self.request.properties_mut()
    }

    fn http_headers(&self) -> &IncomingHeaders {
        self.request.http_headers()
    }

    pub fn headers(&self) -> &HeaderMap<String> {
        self.http_headers().request_headers()
    }

    /// Mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap<String> {
        self.request.http_headers_mut().request_headers_mut()
    }

    pub fn header_string(&self, name: &str) -> Option<String> {
        self.http_headers().header_string(name)
    }

    pub fn date(&self) -> Option<SystemTime> {
        self.http_headers().date()
    }

    pub fn language(&self) -> Option<&Locale> {
        self.http_headers().language()
    }

    pub fn length(&self) -> i64 {
        self.http_headers().length()
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.http_headers().media_type()
    }

    pub fn acceptable_media_types(&self) -> &[MediaType] {
        self.http_headers().acceptable_media_types()
    }

    pub fn acceptable_languages(&self) -> &[Locale] {
        self.http_headers().acceptable_languages()
    }

    pub fn cookies(&self) -> &IndexMap<String, Cookie> {
        self.http_headers().cookies()
    }

    /// Always `false`: whether a body is expected depends on the handler,
    /// which is not known before routing.
    pub fn has_entity(&self) -> bool {
        false
    }

    pub fn entity_stream(&mut self) -> &mut Body {
        self.request.entity_stream()
    }

    /// Replaces the request body, returning the previous one.
    ///
    /// Filters that wrap the body take the previous stream out with this
    /// call and put the wrapping stream in its place.
    pub fn set_entity_stream(&mut self, stream: Body) -> Body {
        self.request.set_entity_stream(stream)
    }

    pub fn security_context(&self) -> Option<&dyn SecurityContext> {
        self.request.security_context()
    }

    /// Aborts the request with `response`.
    ///
    /// This does not interrupt the calling filter. A filter should abort
    /// at most once; a second call replaces the first response.
    pub fn abort_with(&mut self, response: Response) {
        if self.aborted.is_some() {
            log::warn!("request already aborted, replacing abort response");
        }

        log::debug!(
            "aborting {} {} with status {}",
            self.request.method(),
            self.request.uri(),
            response.status()
        );

        self.aborted = Some(response);
    }

    /// The response a filter aborted with, if any.
    pub fn aborted_with(&self) -> Option<&Response> {
        self.aborted.as_ref()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    pub fn into_aborted(self) -> Option<Response> {
        self.aborted
    }
}

impl ContainerRequestContext for PreMatchContext<'_> {
    const STAGE: Stage = Stage::PreMatch;

    fn method(&self) -> &Method {
        PreMatchContext::method(self)
    }

    fn uri(&self) -> &Uri {
        PreMatchContext::uri(self)
    }

    fn headers(&self) -> &HeaderMap<String> {
        PreMatchContext::headers(self)
    }

    fn properties(&self) -> &Properties {
        PreMatchContext::properties(self)
    }

    fn properties_mut(&mut self) -> &mut Properties {
        PreMatchContext::properties_mut(self)
    }

    fn abort_with(&mut self, response: Response) {
        PreMatchContext::abort_with(self, response)
    }
}

impl fmt::Debug for PreMatchContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreMatchContext")
            .field("method", self.request.method())
            .field("uri", self.request.uri())
            .field("aborted", &self.aborted.as_ref().map(|r| r.status()))
            .finish()
    }
}
