use std::error::Error as StdError;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::{fmt, mem};

use bytes::Bytes;
use futures_core::Stream;

pub type BoxError = Box<dyn StdError + Send + Sync>;

type BoxStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// The entity stream of an HTTP message.
///
/// A `Body` has exactly one owner. Replacing a request's body hands
/// the previous one back to the caller, who becomes responsible for
/// draining or dropping it.
pub struct Body {
    kind: Kind,
}

enum Kind {
    Stream(BoxStream),
    Once(Bytes),
    Empty,
}

impl Body {
    /// Create a `Body` from a stream of bytes.
    pub fn stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        struct MapErr<S>(S);

        impl<T, E, S> Stream for MapErr<S>
        where
            E: StdError + Send + Sync + 'static,
            S: Stream<Item = Result<T, E>>,
        {
            type Item = Result<T, BoxError>;

            fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
                // SAFETY: the inner stream is never moved out of `MapErr`
                unsafe { self.map_unchecked_mut(|s| &mut s.0) }
                    .poll_next(cx)
                    .map(|item| item.map(|res| res.map_err(|err| Box::new(err) as BoxError)))
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        Body {
            kind: Kind::Stream(Box::pin(MapErr(stream))),
        }
    }

    /// Create a body directly from bytes.
    pub fn once(bytes: impl Into<Bytes>) -> Self {
        Body {
            kind: Kind::Once(bytes.into()),
        }
    }

    /// Create an empty `Body`.
    pub fn empty() -> Self {
        Body { kind: Kind::Empty }
    }

    /// Returns `true` if the body is known to hold no data.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            Kind::Empty => true,
            Kind::Once(bytes) => bytes.is_empty(),
            Kind::Stream(_) => false,
        }
    }

    /// Returns the buffered bytes, if the body is not a stream.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.kind {
            Kind::Once(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Takes the body, leaving an empty one in its place.
    pub fn take(&mut self) -> Body {
        mem::take(self)
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match &mut self.kind {
            Kind::Stream(stream) => stream.as_mut().poll_next(cx),
            Kind::Once(bytes) => {
                let bytes = mem::take(bytes);
                self.kind = Kind::Empty;
                Poll::Ready(Some(Ok(bytes)))
            }
            Kind::Empty => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.kind {
            Kind::Stream(stream) => stream.size_hint(),
            Kind::Once(bytes) => (bytes.len(), Some(bytes.len())),
            Kind::Empty => (0, Some(0)),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Stream(_) => "Stream",
            Kind::Once(_) => "Once",
            Kind::Empty => "Empty",
        };

        f.debug_tuple("Body").field(&kind).finish()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::once(bytes)
    }
}

impl From<&'static str> for Body {
    fn from(str: &'static str) -> Self {
        Body::once(Bytes::from_static(str.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(string: String) -> Self {
        Body::once(string)
    }
}
