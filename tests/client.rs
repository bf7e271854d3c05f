use courier::client::{HeaderTemplate, RequestHeaders};
use courier::http::header::{Converters, HeaderValue};
use courier::http::{CacheControl, Cookie, Locale, MediaType};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

#[test]
fn accept() {
    let mut headers = RequestHeaders::new();
    headers.accept(["application/json", "text/plain"]).unwrap();

    assert_eq!(
        headers.header_string("Accept").as_deref(),
        Some("application/json, text/plain")
    );
    assert_eq!(
        headers.acceptable_media_types(),
        [mime::APPLICATION_JSON, mime::TEXT_PLAIN]
    );

    headers.accept([mime::TEXT_HTML]).unwrap();
    assert_eq!(headers.header_values("accept"), ["text/html"]);
    assert_eq!(headers.acceptable_media_types(), [mime::TEXT_HTML]);
}

#[test]
fn accept_empty() {
    let mut headers = RequestHeaders::new();
    headers.accept(["text/plain"]).unwrap();
    headers.accept(Vec::<MediaType>::new()).unwrap();

    assert_eq!(headers.header_values("Accept"), [""]);
    assert!(headers.acceptable_media_types().is_empty());
}

#[test]
fn accept_malformed() {
    let mut headers = RequestHeaders::new();
    headers.accept(["text/plain"]).unwrap();

    let err = headers.accept(["application/json", "not a media type"]).unwrap_err();
    assert!(err.is_parse());

    // nothing changes on failure
    assert_eq!(headers.header_values("Accept"), ["text/plain"]);
    assert_eq!(headers.acceptable_media_types(), [mime::TEXT_PLAIN]);
}

#[test]
fn accept_language() {
    let mut headers = RequestHeaders::new();
    headers.accept_language(["en_US", "fr"]).unwrap();

    assert_eq!(headers.header_values("Accept-Language"), ["en-US, fr"]);
    assert_eq!(
        headers.acceptable_languages(),
        [Locale::parse("en-US").unwrap(), Locale::parse("fr").unwrap()]
    );

    headers.accept_language([Locale::parse("de").unwrap()]).unwrap();
    assert_eq!(headers.header_values("accept-language"), ["de"]);

    assert!(headers.accept_language(["en-"]).unwrap_err().is_parse());
    assert_eq!(headers.header_values("accept-language"), ["de"]);
}

#[test]
fn language_and_media_type() {
    let mut headers = RequestHeaders::new();

    headers.set_language("en-GB").unwrap();
    headers.set_media_type("application/json").unwrap();

    assert_eq!(headers.language().unwrap().to_string(), "en-GB");
    assert_eq!(headers.media_type(), Some(&mime::APPLICATION_JSON));
    assert_eq!(headers.header_values("Language"), ["en-GB"]);
    assert_eq!(headers.header_values("content-type"), ["application/json"]);

    headers.set_media_type(mime::TEXT_PLAIN).unwrap();
    assert_eq!(headers.header_values("Content-Type"), ["text/plain"]);

    assert!(headers.set_media_type("json").unwrap_err().is_parse());
    assert_eq!(headers.media_type(), Some(&mime::TEXT_PLAIN));
}

#[test]
fn cookies() {
    let mut headers = RequestHeaders::new();

    headers.cookie(Cookie::new("session", "1"));
    headers.cookie(Cookie::new("theme", "dark"));
    headers.cookie(Cookie::new("session", "2"));

    assert_eq!(headers.cookies().len(), 2);
    assert_eq!(headers.cookies()["session"].value(), "2");
    assert_eq!(
        headers.header_values("Cookie"),
        ["session=1", "theme=dark", "session=2"]
    );
}

#[test]
fn allow() {
    let mut headers = RequestHeaders::new();

    headers.allow(["GET", "POST", "GET"]);
    assert_eq!(headers.header_values("Allow"), ["GET, POST"]);

    headers.allow(["DELETE"]);
    assert_eq!(headers.header_values("Allow"), ["DELETE"]);

    headers.clear_allow();
    assert!(headers.header_values("Allow").is_empty());
}

#[test]
fn cache_control() {
    let mut headers = RequestHeaders::new();

    headers.cache_control(CacheControl::no_cache());
    headers.cache_control(CacheControl {
        no_store: true,
        max_age: Some(60),
        ..CacheControl::default()
    });

    assert_eq!(headers.header_values("Cache-Control"), ["no-store, max-age=60"]);
    assert!(matches!(
        headers.headers().first("cache-control"),
        Some(HeaderValue::CacheControl(_))
    ));
}

#[test]
fn generic_header() {
    let mut headers = RequestHeaders::new();

    headers.header("X-Custom", Some("a"));
    headers.header("x-custom", Some("b"));
    assert_eq!(headers.header_values("X-Custom"), ["a", "b"]);
    assert_eq!(headers.header_string("X-CUSTOM").as_deref(), Some("a"));

    headers.header("X-Custom", None::<&str>);
    assert!(headers.header_values("X-Custom").is_empty());
    assert!(headers.header_string("X-Custom").is_none());

    headers.header("X-Other", Some("c"));
    headers.remove_header("x-other");
    assert!(headers.headers().is_empty());
}

#[test]
fn date() {
    let mut headers = RequestHeaders::new();
    assert!(headers.date().unwrap().is_none());

    let date = SystemTime::UNIX_EPOCH + Duration::from_secs(784111777);
    headers.header("Date", Some(date));
    assert_eq!(headers.date().unwrap(), Some(date));
    assert_eq!(headers.header_values("Date"), ["Sun, 06 Nov 1994 08:49:37 GMT"]);

    headers.remove_header("Date");
    headers.header("Date", Some("Sun, 06 Nov 1994 08:49:37 GMT"));
    assert_eq!(headers.date().unwrap(), Some(date));

    headers.remove_header("Date");
    headers.header("Date", Some("yesterday"));
    assert!(headers.date().unwrap_err().is_parse());
}

#[test]
fn length() {
    let mut headers = RequestHeaders::new();
    assert_eq!(headers.length(), -1);

    headers.header("Content-Length", Some("42"));
    assert_eq!(headers.length(), -1);
}

#[test]
fn clone_is_independent() {
    let mut original = RequestHeaders::new();
    original.accept(["text/plain"]).unwrap();
    original.accept_language(["en"]).unwrap();
    original.cookie(Cookie::new("a", "1"));

    let mut copy = original.clone();
    assert_eq!(copy.as_string_map(), original.as_string_map());
    assert_eq!(copy.acceptable_languages(), original.acceptable_languages());

    original.header("X-Original", Some("1"));
    original.cookie(Cookie::new("b", "2"));
    copy.header("X-Copy", Some("1"));
    copy.accept(["application/json"]).unwrap();

    let original_map = original.as_string_map();
    let copy_map = copy.as_string_map();

    assert!(original_map.contains("X-Original"));
    assert!(!original_map.contains("X-Copy"));
    assert!(copy_map.contains("X-Copy"));
    assert!(!copy_map.contains("X-Original"));

    assert_eq!(original.header_values("Accept"), ["text/plain"]);
    assert_eq!(copy.header_values("Accept"), ["application/json"]);
    assert_eq!(original.cookies().len(), 2);
    assert_eq!(copy.cookies().len(), 1);
    assert_eq!(copy.header_values("Cookie"), ["a=1"]);
}

#[test]
fn as_string_map() {
    let mut headers = RequestHeaders::new();
    headers.set_media_type("text/html; charset=utf-8").unwrap();
    headers.header("X-Number", Some("1"));
    headers.header("x-number", Some("2"));

    let map = headers.as_string_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("content-type").unwrap(), ["text/html; charset=utf-8"]);
    assert_eq!(map.get("X-NUMBER").unwrap(), ["1", "2"]);
}

#[derive(Debug)]
struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn typed_values() {
    let mut headers = RequestHeaders::new();
    headers.header("X-Request-Id", Some(HeaderValue::typed(RequestId(7))));
    assert_eq!(headers.header_values("X-Request-Id"), ["7"]);
    assert_eq!(
        headers
            .headers()
            .first("x-request-id")
            .and_then(|value| value.downcast_ref::<RequestId>())
            .map(|id| id.0),
        Some(7)
    );

    let converters = Converters::new().register(|id: &RequestId| format!("req-{:04}", id.0));
    let mut headers = RequestHeaders::with_converter(Arc::new(converters));
    headers.header("X-Request-Id", Some(HeaderValue::typed(RequestId(7))));
    headers.header("X-Plain", Some("text"));

    assert_eq!(headers.header_string("X-Request-Id").as_deref(), Some("req-0007"));
    assert_eq!(headers.header_string("X-Plain").as_deref(), Some("text"));
}

#[test]
fn template() {
    let template = HeaderTemplate::from_json(
        r#"{
            "accept": ["application/json", "text/plain"],
            "accept-language": ["en-US"],
            "content-type": "application/json",
            "cache-control": { "no-cache": true, "max-age": 10 },
            "cookies": [{ "name": "session", "value": "abc" }],
            "headers": { "User-Agent": ["courier"] }
        }"#,
    )
    .unwrap();

    let headers = RequestHeaders::from_template(&template).unwrap();

    assert_eq!(headers.header_values("accept"), ["application/json, text/plain"]);
    assert_eq!(headers.acceptable_languages(), [Locale::parse("en-US").unwrap()]);
    assert_eq!(headers.media_type(), Some(&mime::APPLICATION_JSON));
    assert_eq!(headers.header_values("cache-control"), ["no-cache, max-age=10"]);
    assert_eq!(headers.cookies()["session"].value(), "abc");
    assert_eq!(headers.header_values("user-agent"), ["courier"]);

    let bad = HeaderTemplate {
        content_type: Some("nonsense".to_owned()),
        ..HeaderTemplate::default()
    };
    assert!(RequestHeaders::from_template(&bad).unwrap_err().is_parse());
    assert!(HeaderTemplate::from_json("{ \"accept\": 1 }").is_err());
}

#[test]
fn generic_header_updates_accept() {
    let mut headers = RequestHeaders::new();
    headers.accept(["application/json"]).unwrap();

    headers.header("Accept", None::<&str>);
    assert!(headers.header_values("Accept").is_empty());
    assert!(headers.acceptable_media_types().is_empty());

    headers.header("accept", Some("text/html, text/plain;q=0.5"));
    headers.header("ACCEPT", Some(mime::IMAGE_PNG));
    assert_eq!(headers.acceptable_media_types().len(), 3);
    assert_eq!(headers.acceptable_media_types()[0], mime::TEXT_HTML);
    assert_eq!(headers.acceptable_media_types()[2], mime::IMAGE_PNG);

    headers.remove_header("Accept");
    assert!(headers.acceptable_media_types().is_empty());
}

#[test]
fn generic_header_updates_content_type() {
    let mut headers = RequestHeaders::new();
    headers.set_media_type("text/plain").unwrap();

    headers.header("Content-Type", Some("application/xml"));
    assert_eq!(headers.header_values("Content-Type"), ["application/xml"]);
    assert_eq!(headers.media_type().map(|m| m.essence_str()), Some("application/xml"));

    headers.header("content-type", Some("not a type"));
    assert_eq!(headers.header_values("Content-Type"), ["not a type"]);
    assert!(headers.media_type().is_none());

    headers.header("Content-Type", None::<&str>);
    assert!(headers.media_type().is_none());
    assert!(headers.header_values("Content-Type").is_empty());
}

#[test]
fn generic_header_updates_language() {
    let mut headers = RequestHeaders::new();
    headers.set_language("en").unwrap();

    headers.header("language", Some(Locale::parse("de_CH").unwrap()));
    assert_eq!(headers.header_values("Language"), ["de-CH"]);
    assert_eq!(headers.language().map(ToString::to_string).as_deref(), Some("de-CH"));

    headers.remove_header("LANGUAGE");
    assert!(headers.language().is_none());
}

#[test]
fn generic_header_updates_accept_language() {
    let mut headers = RequestHeaders::new();
    headers.accept_language(["en"]).unwrap();

    headers.header("Accept-Language", Some("fr;q=0.8, it"));
    let languages: Vec<String> = headers
        .acceptable_languages()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(languages, ["en", "fr", "it"]);

    headers.header("accept-language", None::<&str>);
    assert!(headers.acceptable_languages().is_empty());
}

#[test]
fn generic_header_updates_cookies() {
    let mut headers = RequestHeaders::new();
    headers.cookie(Cookie::new("session", "1"));

    headers.header("Cookie", Some("session=2; theme=dark"));
    assert_eq!(headers.cookies().len(), 2);
    assert_eq!(headers.cookies()["session"].value(), "2");
    assert_eq!(headers.header_values("cookie"), ["session=1", "session=2; theme=dark"]);

    headers.remove_header("cookie");
    assert!(headers.cookies().is_empty());

    headers.cookie(Cookie::new("a", "1"));
    assert_eq!(headers.cookies().len(), 1);
}
