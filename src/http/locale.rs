use crate::error::{Error, ParseKind, Result};

use std::fmt;
use std::str::FromStr;

/// A language tag such as `en`, `en-US` or `de-CH-1996`.
///
/// Both `-` and `_` are accepted as separators when parsing. The
/// language is stored lowercase and the region uppercase, and the tag
/// always renders with `-`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
    variant: Option<String>,
}

impl Locale {
    /// The `*` locale, matching any language.
    pub fn wildcard() -> Locale {
        Locale {
            language: "*".to_owned(),
            region: None,
            variant: None,
        }
    }

    pub fn parse(tag: &str) -> Result<Locale> {
        let invalid = || Error::parse(ParseKind::Locale, tag);

        let tag = tag.trim();
        if tag == "*" {
            return Ok(Locale::wildcard());
        }

        let mut subtags = tag.split(|c: char| c == '-' || c == '_');

        let language = subtags.next().ok_or_else(invalid)?;
        if !(1..=8).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut region = None;
        let mut variant: Vec<&str> = Vec::new();

        for (i, subtag) in subtags.enumerate() {
            if !(1..=8).contains(&subtag.len()) || !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(invalid());
            }

            let is_region = (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()));

            if i == 0 && is_region {
                region = Some(subtag.to_ascii_uppercase());
            } else {
                variant.push(subtag);
            }
        }

        Ok(Locale {
            language: language.to_ascii_lowercase(),
            region,
            variant: if variant.is_empty() {
                None
            } else {
                Some(variant.join("-"))
            },
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.language == "*"
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;

        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }

        if let Some(variant) = &self.variant {
            write!(f, "-{}", variant)?;
        }

        Ok(())
    }
}
