use crate::error::{Error, ParseKind, Result};
use crate::http::header::{self, names, Converters, HeaderStringConverter, IntoTyped};
use crate::http::{CacheControl, Cookie, HeaderMap, HeaderName, HeaderValue, Locale, MediaType};

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::IndexMap;

/// The headers of an outgoing request.
///
/// The header map is the value that goes on the wire. The typed views
/// (language, media type, accept lists and cookies) are derived from it:
/// every mutation, typed or not, goes through one update that re-reads
/// the view of the header it touched. Values are converted to strings
/// lazily by the configured [`HeaderStringConverter`].
///
/// Cloning produces an independent, unsent copy that shares only the
/// converter and the immutable stored values. Clone a configured
/// instance to reuse it as a template across concurrent requests.
#[derive(Clone)]
pub struct RequestHeaders {
    headers: HeaderMap<HeaderValue>,
    language: Option<Locale>,
    media_type: Option<MediaType>,
    accepts: Vec<MediaType>,
    acceptable_languages: Vec<Locale>,
    cookies: IndexMap<String, Cookie>,
    converter: Arc<dyn HeaderStringConverter>,
}

impl RequestHeaders {
    /// Creates empty headers that convert values with [`Converters`].
    pub fn new() -> RequestHeaders {
        RequestHeaders::with_converter(Arc::new(Converters::new()))
    }

    pub fn with_converter(converter: Arc<dyn HeaderStringConverter>) -> RequestHeaders {
        RequestHeaders {
            headers: HeaderMap::new(),
            language: None,
            media_type: None,
            accepts: Vec::new(),
            acceptable_languages: Vec::new(),
            cookies: IndexMap::new(),
            converter,
        }
    }

    /// The stored header values.
    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    /// Sets the `Language` header.
    ///
    /// The header name is written as-is for compatibility with existing
    /// peers, it is not `Content-Language`.
    pub fn set_language(&mut self, language: impl IntoTyped<Locale>) -> Result<()> {
        let language = language.into_typed()?;
        log::trace!("setting language to {}", language);

        self.update(names::LANGUAGE, |headers| {
            headers.insert(names::LANGUAGE, language);
        });
        Ok(())
    }

    /// Sets the `Content-Type` header.
    pub fn set_media_type(&mut self, media_type: impl IntoTyped<MediaType>) -> Result<()> {
        let media_type = media_type.into_typed()?;
        log::trace!("setting content type to {}", media_type);

        self.update(names::CONTENT_TYPE, |headers| {
            headers.insert(names::CONTENT_TYPE, media_type);
        });
        Ok(())
    }

    /// Replaces the `Accept-Language` header with the given locales, in
    /// order of preference.
    ///
    /// The locales are written as one value joined by `", "`. An empty
    /// list writes an empty value rather than removing the header.
    pub fn accept_language<I>(&mut self, locales: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoTyped<Locale>,
    {
        let locales: Vec<Locale> = header::parse_all(locales)?;
        self.replace_list(names::ACCEPT_LANGUAGE, header::join(&locales));
        Ok(())
    }

    /// Replaces the `Accept` header with the given media types, in order
    /// of preference.
    ///
    /// Same joining rules as [`accept_language`](Self::accept_language).
    pub fn accept<I>(&mut self, media_types: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoTyped<MediaType>,
    {
        let media_types: Vec<MediaType> = header::parse_all(media_types)?;
        self.replace_list(names::ACCEPT, header::join(&media_types));
        Ok(())
    }

    fn replace_list(&mut self, name: &'static str, joined: String) {
        log::trace!("setting {} to {:?}", name, joined);

        self.update(name, |headers| {
            headers.remove(name);
            headers.insert(name, joined);
        });
    }

    /// Adds a cookie.
    ///
    /// Every call appends a `Cookie` header value, while
    /// [`cookies`](Self::cookies) keeps only the latest cookie per name.
    pub fn cookie(&mut self, cookie: Cookie) {
        self.update(names::COOKIE, |headers| headers.append(names::COOKIE, cookie));
    }

    /// Sets the `Allow` header to the given methods, joined by `", "`.
    pub fn allow<I>(&mut self, methods: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.update(names::ALLOW, |headers| header::set_allow(headers, methods));
    }

    /// Removes the `Allow` header.
    pub fn clear_allow(&mut self) {
        self.update(names::ALLOW, |headers| {
            headers.remove(names::ALLOW);
        });
    }

    /// Sets the `Cache-Control` header.
    ///
    /// The directives are stored typed and only rendered when the
    /// headers are converted.
    pub fn cache_control(&mut self, cache_control: CacheControl) {
        self.update(names::CACHE_CONTROL, |headers| {
            headers.insert(names::CACHE_CONTROL, cache_control);
        });
    }

    /// Adds a value to a header, or removes the header when `value` is `None`.
    ///
    /// Repeated calls with the same name accumulate values, except for
    /// the single-valued `Content-Type` and `Language` headers, which are
    /// replaced. Naming a typed header updates its typed view; a value
    /// that does not parse leaves the view empty.
    pub fn header<N, V>(&mut self, name: N, value: Option<V>)
    where
        N: Into<HeaderName>,
        V: Into<HeaderValue>,
    {
        let name = name.into();
        let key = name.clone();

        self.update(key.as_str(), |headers| match value {
            Some(value) if is_single_valued(&name) => {
                headers.insert(name, value);
            }
            Some(value) => headers.append(name, value),
            None => {
                headers.remove(name.as_str());
            }
        });
    }

    /// Removes every value of a header.
    pub fn remove_header(&mut self, name: &str) {
        self.update(name, |headers| {
            headers.remove(name);
        });
    }

    /// Applies `edit` to the header map, then re-derives the typed view of
    /// `name` from it. This is the only place the header map is mutated.
    fn update<F>(&mut self, name: &str, edit: F)
    where
        F: FnOnce(&mut HeaderMap<HeaderValue>),
    {
        edit(&mut self.headers);

        let is = |known: &str| name.eq_ignore_ascii_case(known);

        if is(names::CONTENT_TYPE) {
            self.media_type = self.read_media_type();
        } else if is(names::LANGUAGE) {
            self.language = self.read_language();
        } else if is(names::ACCEPT) {
            self.accepts = self.read_accepts();
        } else if is(names::ACCEPT_LANGUAGE) {
            self.acceptable_languages = self.read_acceptable_languages();
        } else if is(names::COOKIE) {
            self.cookies = self.read_cookies();
        }
    }

    fn read_media_type(&self) -> Option<MediaType> {
        match self.headers.first(names::CONTENT_TYPE)? {
            HeaderValue::MediaType(media_type) => Some(media_type.clone()),
            value => IntoTyped::<MediaType>::into_typed(self.to_wire(value))
                .map_err(|err| log::warn!("Content-Type has no media type: {}", err))
                .ok(),
        }
    }

    fn read_language(&self) -> Option<Locale> {
        match self.headers.first(names::LANGUAGE)? {
            HeaderValue::Locale(locale) => Some(locale.clone()),
            value => Locale::parse(&self.to_wire(value))
                .map_err(|err| log::warn!("Language has no locale: {}", err))
                .ok(),
        }
    }

    fn read_accepts(&self) -> Vec<MediaType> {
        let mut accepts = Vec::new();

        for value in self.headers.get(names::ACCEPT).unwrap_or_default() {
            if let HeaderValue::MediaType(media_type) = value {
                accepts.push(media_type.clone());
                continue;
            }

            for element in header::split_list(&self.to_wire(value)) {
                match IntoTyped::<MediaType>::into_typed(element) {
                    Ok(media_type) => accepts.push(media_type),
                    Err(err) => log::warn!("skipping Accept element: {}", err),
                }
            }
        }

        accepts
    }

    fn read_acceptable_languages(&self) -> Vec<Locale> {
        let mut languages = Vec::new();

        for value in self.headers.get(names::ACCEPT_LANGUAGE).unwrap_or_default() {
            if let HeaderValue::Locale(locale) = value {
                languages.push(locale.clone());
                continue;
            }

            for element in header::split_list(&self.to_wire(value)) {
                let tag = element.split(';').next().unwrap_or_default();
                match Locale::parse(tag) {
                    Ok(locale) => languages.push(locale),
                    Err(err) => log::warn!("skipping Accept-Language element: {}", err),
                }
            }
        }

        languages
    }

    fn read_cookies(&self) -> IndexMap<String, Cookie> {
        let mut cookies = IndexMap::new();

        for value in self.headers.get(names::COOKIE).unwrap_or_default() {
            let parsed = match value {
                HeaderValue::Cookie(cookie) => vec![cookie.clone()],
                value => match Cookie::parse_header(&self.to_wire(value)) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        log::warn!("skipping Cookie value: {}", err);
                        continue;
                    }
                },
            };

            for cookie in parsed {
                cookies.insert(cookie.name().to_owned(), cookie);
            }
        }

        cookies
    }

    fn to_wire(&self, value: &HeaderValue) -> String {
        self.converter.to_header_string(value)
    }

    /// Returns the `Date` header.
    ///
    /// Text values are parsed as HTTP dates.
    pub fn date(&self) -> Result<Option<SystemTime>> {
        match self.headers.first(names::DATE) {
            None => Ok(None),
            Some(HeaderValue::Date(date)) => Ok(Some(*date)),
            Some(value) => {
                let value = self.converter.to_header_string(value);
                httpdate::parse_http_date(&value)
                    .map(Some)
                    .map_err(|_| Error::parse(ParseKind::Date, value))
            }
        }
    }

    /// Returns the first value of a header in its wire form.
    pub fn header_string(&self, name: &str) -> Option<String> {
        self.headers
            .first(name)
            .map(|value| self.converter.to_header_string(value))
    }

    /// Converts every stored value to its wire form.
    pub fn as_string_map(&self) -> HeaderMap<String> {
        self.headers
            .map_values(|value| self.converter.to_header_string(value))
    }

    /// Returns every value of a header in its wire form, or an empty
    /// list if the header is not set.
    pub fn header_values(&self, name: &str) -> Vec<String> {
        self.headers
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(|value| self.converter.to_header_string(value))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn language(&self) -> Option<&Locale> {
        self.language.as_ref()
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    pub fn acceptable_media_types(&self) -> &[MediaType] {
        &self.accepts
    }

    pub fn acceptable_languages(&self) -> &[Locale] {
        &self.acceptable_languages
    }

    /// The cookies added so far, keyed by name.
    pub fn cookies(&self) -> &IndexMap<String, Cookie> {
        &self.cookies
    }

    /// Always `-1`. The body length is tracked by the transport.
    pub fn length(&self) -> i64 {
        -1
    }
}

fn is_single_valued(name: &HeaderName) -> bool {
    *name == names::CONTENT_TYPE || *name == names::LANGUAGE
}

impl Default for RequestHeaders {
    fn default() -> Self {
        RequestHeaders::new()
    }
}

impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHeaders")
            .field("headers", &self.headers)
            .field("language", &self.language)
            .field("media_type", &self.media_type)
            .field("accepts", &self.accepts)
            .field("acceptable_languages", &self.acceptable_languages)
            .field("cookies", &self.cookies)
            .finish()
    }
}
