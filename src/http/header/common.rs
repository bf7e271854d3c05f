use super::{names, HeaderMap, HeaderValue};
use crate::error::{Error, ParseKind, Result};
use crate::http::{Locale, MediaType};

use std::fmt::{Display, Write};

use indexmap::IndexSet;

/// Values that can be turned into a typed header value, either
/// directly or by parsing.
pub trait IntoTyped<T> {
    fn into_typed(self) -> Result<T>;
}

impl IntoTyped<MediaType> for MediaType {
    fn into_typed(self) -> Result<MediaType> {
        Ok(self)
    }
}

impl IntoTyped<MediaType> for &MediaType {
    fn into_typed(self) -> Result<MediaType> {
        Ok(self.clone())
    }
}

impl IntoTyped<MediaType> for &str {
    fn into_typed(self) -> Result<MediaType> {
        self.trim()
            .parse()
            .map_err(|_| Error::parse(ParseKind::MediaType, self))
    }
}

impl IntoTyped<MediaType> for String {
    fn into_typed(self) -> Result<MediaType> {
        self.as_str().into_typed()
    }
}

impl IntoTyped<MediaType> for &String {
    fn into_typed(self) -> Result<MediaType> {
        self.as_str().into_typed()
    }
}

impl IntoTyped<Locale> for Locale {
    fn into_typed(self) -> Result<Locale> {
        Ok(self)
    }
}

impl IntoTyped<Locale> for &Locale {
    fn into_typed(self) -> Result<Locale> {
        Ok(self.clone())
    }
}

impl IntoTyped<Locale> for &str {
    fn into_typed(self) -> Result<Locale> {
        Locale::parse(self)
    }
}

impl IntoTyped<Locale> for String {
    fn into_typed(self) -> Result<Locale> {
        Locale::parse(&self)
    }
}

impl IntoTyped<Locale> for &String {
    fn into_typed(self) -> Result<Locale> {
        Locale::parse(self)
    }
}

/// Parses every value up front, so that a bad value leaves
/// the caller's state untouched.
pub(crate) fn parse_all<T, I>(values: I) -> Result<Vec<T>>
where
    I: IntoIterator,
    I::Item: IntoTyped<T>,
{
    values.into_iter().map(IntoTyped::into_typed).collect()
}

/// Joins values into a single header value separated by `", "`.
pub(crate) fn join<'a, T, I>(values: I) -> String
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut joined = String::new();

    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(", ");
        }
        // writing to a String cannot fail
        let _ = write!(joined, "{}", value);
    }

    joined
}

/// Writes the `Allow` header as a single comma-joined value.
///
/// Duplicate methods are dropped, keeping the first occurrence.
pub(crate) fn set_allow<I>(headers: &mut HeaderMap<HeaderValue>, methods: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let methods: IndexSet<String> = methods
        .into_iter()
        .map(|method| method.as_ref().trim().to_owned())
        .collect();

    headers.insert(names::ALLOW, join(&methods));
}

/// Splits a comma-separated header value into its trimmed, non-empty elements.
///
/// Commas inside quoted strings, such as `text/x; a="1,2"`, do not split.
pub(crate) fn split_list(value: &str) -> impl Iterator<Item = &str> {
    let mut quoted = false;
    let mut escaped = false;

    value
        .split(move |c: char| {
            if escaped {
                escaped = false;
                return false;
            }

            match c {
                '\\' if quoted => {
                    escaped = true;
                    false
                }
                '"' => {
                    quoted = !quoted;
                    false
                }
                ',' => !quoted,
                _ => false,
            }
        })
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Reads the `q` parameter of a list element, defaulting to `1`.
///
/// Returns `None` if the weight is not a number in `0..=1`.
pub(crate) fn quality<'a>(mut params: impl Iterator<Item = (&'a str, &'a str)>) -> Option<f32> {
    match params.find(|(name, _)| name.trim().eq_ignore_ascii_case("q")) {
        None => Some(1.0),
        Some((_, value)) => value
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|q| (0.0..=1.0).contains(q))
            // -0 sorts below 0 otherwise
            .map(f32::abs),
    }
}

/// Orders values by descending quality, keeping the header order among
/// values of equal quality.
pub(crate) fn by_quality<T>(mut values: Vec<(T, f32)>) -> Vec<T> {
    values.sort_by(|a, b| b.1.total_cmp(&a.1));
    values.into_iter().map(|(value, _)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_values() {
        assert_eq!(join(&["a", "b", "c"]), "a, b, c");
        assert_eq!(join::<&str, _>(&[]), "");
    }

    #[test]
    fn quality_order() {
        let values = vec![("a", 0.5), ("b", 1.0), ("c", 0.5), ("d", 0.9)];
        assert_eq!(by_quality(values), ["b", "d", "a", "c"]);
    }

    #[test]
    fn quality_param() {
        assert_eq!(quality([("level", "1"), ("Q", "0.3")].into_iter()), Some(0.3));
        assert_eq!(quality(std::iter::empty()), Some(1.0));
        assert_eq!(quality([("q", "-0")].into_iter()), Some(0.0));

        for bad in ["NaN", "inf", "-inf", "1.5", "-0.1", "high"] {
            assert_eq!(quality([("q", bad)].into_iter()), None, "{:?}", bad);
        }
    }

    #[test]
    fn quoted_commas() {
        let elements: Vec<&str> =
            split_list(r#"text/x; foo="a,b", text/y, text/z; q="\",", ,"#).collect();
        assert_eq!(elements, [r#"text/x; foo="a,b""#, "text/y", r#"text/z; q="\",""#]);
    }
}
