use super::context::PreMatchContext;
use super::request::ReceivedRequest;
use crate::error::Result;
use crate::http::Response;

use std::fmt;
use std::sync::Arc;

/// A filter that runs before a request is routed.
///
/// ```rust
/// use courier::filter::{PreMatchContext, PreMatchFilter};
/// use courier::http::{Response, StatusCode};
///
/// struct RequireJson;
///
/// impl PreMatchFilter for RequireJson {
///     fn filter(&self, cx: &mut PreMatchContext<'_>) -> courier::Result<()> {
///         if cx.media_type() != Some(&mime::APPLICATION_JSON) {
///             let mut response = Response::default();
///             *response.status_mut() = StatusCode::UNSUPPORTED_MEDIA_TYPE;
///             cx.abort_with(response);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait PreMatchFilter: Send + Sync {
    /// Inspect or adapt the request, optionally aborting it.
    fn filter(&self, cx: &mut PreMatchContext<'_>) -> Result<()>;

    /// Runs `next` after this filter, unless this filter aborted.
    fn and<F>(self, next: F) -> And<Self, F>
    where
        F: PreMatchFilter,
        Self: Sized,
    {
        And { first: self, next }
    }
}

impl<F> PreMatchFilter for Box<F>
where
    F: PreMatchFilter + ?Sized,
{
    fn filter(&self, cx: &mut PreMatchContext<'_>) -> Result<()> {
        F::filter(self, cx)
    }
}

impl<F> PreMatchFilter for Arc<F>
where
    F: PreMatchFilter + ?Sized,
{
    fn filter(&self, cx: &mut PreMatchContext<'_>) -> Result<()> {
        F::filter(self, cx)
    }
}

/// Two filters run in sequence.
///
/// See [`PreMatchFilter::and`] for details.
#[derive(Clone)]
pub struct And<A, B> {
    first: A,
    next: B,
}

impl<A, B> PreMatchFilter for And<A, B>
where
    A: PreMatchFilter,
    B: PreMatchFilter,
{
    fn filter(&self, cx: &mut PreMatchContext<'_>) -> Result<()> {
        self.first.filter(cx)?;

        if cx.is_aborted() {
            return Ok(());
        }

        self.next.filter(cx)
    }
}

/// Create a filter from a closure.
pub fn filter_fn<F>(f: F) -> FilterFn<F>
where
    F: Fn(&mut PreMatchContext<'_>) -> Result<()> + Send + Sync,
{
    FilterFn(f)
}

/// A filter created by [`filter_fn`].
#[derive(Clone)]
pub struct FilterFn<F>(F);

impl<F> PreMatchFilter for FilterFn<F>
where
    F: Fn(&mut PreMatchContext<'_>) -> Result<()> + Send + Sync,
{
    fn filter(&self, cx: &mut PreMatchContext<'_>) -> Result<()> {
        (self.0)(cx)
    }
}

/// How a request left the pre-match chain.
#[derive(Debug)]
pub enum Outcome {
    /// Every filter ran without aborting; the request continues to routing.
    PassedThrough,
    /// A filter aborted the request with this response.
    Aborted(Response),
}

impl Outcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Outcome::Aborted(_))
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            Outcome::Aborted(response) => Some(response),
            Outcome::PassedThrough => None,
        }
    }
}

/// The pre-match filters of an application, in registration order.
#[derive(Default)]
pub struct Chain {
    filters: Vec<Box<dyn PreMatchFilter>>,
}

impl Chain {
    pub fn new() -> Chain {
        Chain::default()
    }

    /// Appends a filter to the chain.
    pub fn with<F>(mut self, filter: F) -> Chain
    where
        F: PreMatchFilter + 'static,
    {
        self.push(filter);
        self
    }

    pub fn push<F>(&mut self, filter: F)
    where
        F: PreMatchFilter + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs the filters over `request` one at a time.
    ///
    /// The abort state is checked after each filter, and no further
    /// filter runs once it is set. An error from a filter stops the chain
    /// and is returned as is.
    pub fn run(&self, request: &mut dyn ReceivedRequest) -> Result<Outcome> {
        let mut cx = PreMatchContext::new(request);

        for (index, filter) in self.filters.iter().enumerate() {
            filter.filter(&mut cx)?;

            if cx.is_aborted() {
                log::debug!(
                    "pre-match filter {} of {} aborted the request",
                    index + 1,
                    self.filters.len()
                );
                break;
            }

            log::trace!("pre-match filter {} of {} passed", index + 1, self.filters.len());
        }

        Ok(match cx.into_aborted() {
            Some(response) => Outcome::Aborted(response),
            None => Outcome::PassedThrough,
        })
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("filters", &self.filters.len())
            .finish()
    }
}
