use super::RequestHeaders;
use crate::error::Result;
use crate::http::header::HeaderStringConverter;
use crate::http::{CacheControl, Cookie};

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default headers for outgoing requests, usually loaded from configuration.
///
/// ```json
/// {
///     "accept": ["application/json", "text/plain"],
///     "accept-language": ["en-US", "fr"],
///     "cache-control": { "no-cache": true },
///     "headers": { "User-Agent": ["courier/0.0"] }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeaderTemplate {
    pub accept: Vec<String>,
    pub accept_language: Vec<String>,
    pub content_type: Option<String>,
    pub language: Option<String>,
    pub cache_control: Option<CacheControl>,
    pub cookies: Vec<Cookie>,
    pub headers: IndexMap<String, Vec<String>>,
}

impl HeaderTemplate {
    /// Parses a template from JSON.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<HeaderTemplate> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RequestHeaders {
    /// Builds headers from a template, converting with [`Converters`](crate::http::header::Converters).
    pub fn from_template(template: &HeaderTemplate) -> Result<RequestHeaders> {
        let mut headers = RequestHeaders::new();
        headers.apply(template)?;
        Ok(headers)
    }

    pub fn from_template_with(
        template: &HeaderTemplate,
        converter: Arc<dyn HeaderStringConverter>,
    ) -> Result<RequestHeaders> {
        let mut headers = RequestHeaders::with_converter(converter);
        headers.apply(template)?;
        Ok(headers)
    }

    fn apply(&mut self, template: &HeaderTemplate) -> Result<()> {
        for (name, values) in &template.headers {
            for value in values {
                self.header(name.as_str(), Some(value.as_str()));
            }
        }

        if !template.accept.is_empty() {
            self.accept(&template.accept)?;
        }

        if !template.accept_language.is_empty() {
            self.accept_language(&template.accept_language)?;
        }

        if let Some(content_type) = &template.content_type {
            self.set_media_type(content_type)?;
        }

        if let Some(language) = &template.language {
            self.set_language(language)?;
        }

        if let Some(cache_control) = &template.cache_control {
            self.cache_control(cache_control.clone());
        }

        for cookie in &template.cookies {
            self.cookie(cookie.clone());
        }

        Ok(())
    }
}
