mod common;

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use common::API_PATH;
use ratreader::api::{Api, ApiClient, ApiRequest};
use ratreader::domain::Session;
use ratreader::errors::RatReaderError;

fn logged_in() -> Session {
    Session {
        api_url: None,
        token: Some("abc".to_string()),
        username: Some("alice".to_string()),
    }
}

#[test]
fn test_returns_parsed_json() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(API_PATH).query_param("action", "feeds");
        then.status(200).json_body(json!({
            "feeds": [{"id": 1, "name": "LWN", "url": "https://lwn.net/headlines/rss"}]
        }));
    });

    let value = ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &logged_in(), &ApiRequest::get("feeds"))
        .unwrap();

    assert_eq!(value["feeds"][0]["name"], "LWN");
    mock.assert_hits(1);
}

#[test]
fn test_get_on_the_wire() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(API_PATH)
            .query_param("action", "live-articles")
            .query_param("feed_id", "4")
            .header("authorization", "Bearer abc")
            .header("content-type", "application/json")
            .matches(|req| req.body.as_ref().map_or(true, |body| body.is_empty()));
        then.status(200).json_body(json!({"articles": []}));
    });

    let request = ApiRequest::get("live-articles")
        .with_param("feed_id", "4")
        .with_body(json!({"ignored": true}));
    ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &logged_in(), &request)
        .unwrap();

    mock.assert_hits(1);
}

#[test]
fn test_delete_on_the_wire_carries_body() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path(API_PATH)
            .query_param("action", "feeds")
            .header("authorization", "Bearer abc")
            .json_body(json!({"feed_id": "7"}));
        then.status(200).json_body(json!({"success": true}));
    });

    let request = ApiRequest::delete("feeds").with_body(json!({"feed_id": "7"}));
    ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &logged_in(), &request)
        .unwrap();

    mock.assert_hits(1);
}

#[test]
fn test_anonymous_request_has_no_authorization() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .query_param("action", "login")
            .json_body(json!({"username": "alice", "password": "pw"}))
            .matches(|req| {
                req.headers.as_ref().map_or(true, |headers| {
                    headers
                        .iter()
                        .all(|(name, _)| !name.eq_ignore_ascii_case("authorization"))
                })
            });
        then.status(200)
            .json_body(json!({"token": "abc", "user": {"username": "alice"}}));
    });

    let request =
        ApiRequest::post("login").with_body(json!({"username": "alice", "password": "pw"}));
    ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &Session::default(), &request)
        .unwrap();

    mock.assert_hits(1);
}

#[test]
fn test_error_status_with_json_body_is_returned() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.path(API_PATH);
        then.status(401)
            .json_body(json!({"error": "Invalid or expired token"}));
    });

    let value = ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &logged_in(), &ApiRequest::get("feeds"))
        .unwrap();

    assert_eq!(value["error"], "Invalid or expired token");
    mock.assert_hits(1);
}

#[test]
fn test_connection_refused_is_unreachable() {
    let url = common::refused_url();
    let result = ApiClient::new()
        .unwrap()
        .request(&url, &logged_in(), &ApiRequest::get("feeds"));

    assert!(matches!(result, Err(RatReaderError::Unreachable(_))));
}

#[test]
fn test_slow_server_times_out_once() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.path(API_PATH);
        then.status(200)
            .json_body(json!({"feeds": []}))
            .delay(Duration::from_secs(3));
    });

    let client = ApiClient::with_timeout(Duration::from_millis(300)).unwrap();
    let result = client.request(
        &common::api_url(&server),
        &logged_in(),
        &ApiRequest::get("feeds"),
    );

    assert!(matches!(result, Err(RatReaderError::TimedOut)));
    mock.assert_hits(1);
}

#[test]
fn test_html_body_is_malformed() {
    let server = common::start_server();
    let mock = server.mock(|when, then| {
        when.path(API_PATH);
        then.status(500)
            .header("content-type", "text/html")
            .body("<html><body>Fatal error</body></html>");
    });

    let result = ApiClient::new()
        .unwrap()
        .request(&common::api_url(&server), &logged_in(), &ApiRequest::get("feeds"));

    assert!(matches!(result, Err(RatReaderError::MalformedResponse(_))));
    mock.assert_hits(1);
}

#[test]
fn test_failure_kinds_are_distinct() {
    let url = common::refused_url();
    let refused = ApiClient::new()
        .unwrap()
        .request(&url, &logged_in(), &ApiRequest::get("feeds"))
        .unwrap_err();

    let slow = common::start_server();
    slow.mock(|when, then| {
        when.path(API_PATH);
        then.status(200)
            .json_body(json!({}))
            .delay(Duration::from_secs(3));
    });
    let timed_out = ApiClient::with_timeout(Duration::from_millis(300))
        .unwrap()
        .request(&common::api_url(&slow), &logged_in(), &ApiRequest::get("feeds"))
        .unwrap_err();

    let garbage = common::start_server();
    garbage.mock(|when, then| {
        when.path(API_PATH);
        then.status(200).header("content-type", "text/plain").body("not json");
    });
    let malformed = ApiClient::new()
        .unwrap()
        .request(&common::api_url(&garbage), &logged_in(), &ApiRequest::get("feeds"))
        .unwrap_err();

    let messages = [refused.to_string(), timed_out.to_string(), malformed.to_string()];
    assert_ne!(messages[0], messages[1]);
    assert_ne!(messages[1], messages[2]);
    assert_ne!(messages[0], messages[2]);
    assert!(refused.is_fatal() && timed_out.is_fatal() && malformed.is_fatal());
}
