use crate::http::ByteStr;

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

/// The name of an HTTP header.
///
/// Names compare and hash without regard to ASCII case, but
/// keep the casing they were created with for display.
#[derive(Clone)]
pub struct HeaderName(ByteStr);

impl HeaderName {
    pub fn new(name: impl Into<ByteStr>) -> HeaderName {
        HeaderName(name.into())
    }

    pub const fn from_static(name: &'static str) -> HeaderName {
        HeaderName(ByteStr::from_static(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn hash_caseless<H: Hasher>(name: &str, state: &mut H) {
    for byte in name.bytes() {
        state.write_u8(byte.to_ascii_lowercase());
    }
    state.write_u8(0xff);
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &HeaderName) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for HeaderName {}

impl Hash for HeaderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_caseless(&self.0, state);
    }
}

impl PartialEq<str> for HeaderName {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl<'a> PartialEq<&'a str> for HeaderName {
    fn eq(&self, other: &&'a str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HeaderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeaderName {
    fn from(name: &str) -> Self {
        HeaderName(name.into())
    }
}

impl From<String> for HeaderName {
    fn from(name: String) -> Self {
        HeaderName(name.into())
    }
}

impl From<ByteStr> for HeaderName {
    fn from(name: ByteStr) -> Self {
        HeaderName(name)
    }
}

/// A borrowed lookup key that matches a [`HeaderName`] regardless of case.
pub(crate) struct Caseless<'a>(pub &'a str);

impl Hash for Caseless<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_caseless(self.0, state);
    }
}

impl Equivalent<HeaderName> for Caseless<'_> {
    fn equivalent(&self, key: &HeaderName) -> bool {
        key.0.eq_ignore_ascii_case(self.0)
    }
}
