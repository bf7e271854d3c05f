use crate::error::{Error, ParseKind, Result};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cookie sent by the client in the `Cookie` header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Cookie {
        Cookie {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Cookie {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Cookie {
        self.domain = Some(domain.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Parses the value of a `Cookie` request header.
    ///
    /// Pairs are separated by `;` or `,`. The `$Path` and `$Domain`
    /// attributes apply to the cookie before them, other `$` attributes
    /// are ignored.
    pub fn parse_header(header: &str) -> Result<Vec<Cookie>> {
        let mut cookies: Vec<Cookie> = Vec::new();

        for pair in header.split(|c: char| c == ';' || c == ',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name.trim(), unquote(value.trim())),
                None => return Err(Error::parse(ParseKind::Cookie, header)),
            };

            if name.is_empty() {
                return Err(Error::parse(ParseKind::Cookie, header));
            }

            if let Some(attribute) = name.strip_prefix('$') {
                let last = cookies.last_mut();
                match (attribute.to_ascii_lowercase().as_str(), last) {
                    ("path", Some(cookie)) => cookie.path = Some(value.to_owned()),
                    ("domain", Some(cookie)) => cookie.domain = Some(value.to_owned()),
                    _ => {}
                }
                continue;
            }

            cookies.push(Cookie::new(name, value));
        }

        Ok(cookies)
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;

        if let Some(path) = &self.path {
            write!(f, "; $Path={}", path)?;
        }

        if let Some(domain) = &self.domain {
            write!(f, "; $Domain={}", domain)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Cookie;

    #[test]
    fn parse_header() {
        let cookies = Cookie::parse_header("$Version=1; session=abc; $Path=/app; theme=\"dark\"").unwrap();

        assert_eq!(
            cookies,
            vec![
                Cookie::new("session", "abc").with_path("/app"),
                Cookie::new("theme", "dark"),
            ]
        );
    }

    #[test]
    fn display() {
        let cookie = Cookie::new("a", "1").with_path("/").with_domain("example.com");
        assert_eq!(cookie.to_string(), "a=1; $Path=/; $Domain=example.com");
        assert_eq!(Cookie::new("b", "2").to_string(), "b=2");
    }

    #[test]
    fn malformed() {
        assert!(Cookie::parse_header("novalue").unwrap_err().is_parse());
        assert!(Cookie::parse_header("=x").unwrap_err().is_parse());
    }
}
