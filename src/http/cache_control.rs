use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The directives of a `Cache-Control` header.
///
/// Renders the set directives joined by `", "`, with extension
/// directives last in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CacheControl {
    pub private: bool,
    pub no_cache: bool,
    pub no_store: bool,
    pub no_transform: bool,
    pub must_revalidate: bool,
    pub proxy_revalidate: bool,
    pub max_age: Option<u32>,
    #[serde(rename = "s-maxage")]
    pub s_max_age: Option<u32>,
    pub extensions: IndexMap<String, Option<String>>,
}

impl CacheControl {
    pub fn new() -> CacheControl {
        CacheControl::default()
    }

    pub fn no_cache() -> CacheControl {
        CacheControl {
            no_cache: true,
            ..CacheControl::default()
        }
    }

    pub fn max_age(seconds: u32) -> CacheControl {
        CacheControl {
            max_age: Some(seconds),
            ..CacheControl::default()
        }
    }

    pub fn extension(mut self, name: impl Into<String>, value: Option<String>) -> CacheControl {
        self.extensions.insert(name.into(), value);
        self
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.private, "private"),
            (self.no_cache, "no-cache"),
            (self.no_store, "no-store"),
            (self.no_transform, "no-transform"),
            (self.must_revalidate, "must-revalidate"),
            (self.proxy_revalidate, "proxy-revalidate"),
        ];

        let mut directives: Vec<String> = flags
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| (*name).to_owned())
            .collect();

        if let Some(seconds) = self.max_age {
            directives.push(format!("max-age={}", seconds));
        }

        if let Some(seconds) = self.s_max_age {
            directives.push(format!("s-maxage={}", seconds));
        }

        for (name, value) in &self.extensions {
            directives.push(match value {
                Some(value) => format!("{}={}", name, value),
                None => name.clone(),
            });
        }

        f.write_str(&directives.join(", "))
    }
}
