//! Pre-routing request filters.

mod chain;
mod context;
mod request;

pub use chain::{filter_fn, And, Chain, FilterFn, Outcome, PreMatchFilter};
pub use context::{ContainerRequestContext, Link, PreMatchContext, Stage};
pub use request::{IncomingHeaders, IncomingRequest, Properties, ReceivedRequest, SecurityContext};
