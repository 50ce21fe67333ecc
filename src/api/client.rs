use std::time::Duration;

use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::request::ApiRequest;
use crate::api::Api;
use crate::domain::Session;
use crate::errors::{RatReaderError, RatReaderResult};

/// Every call gives up after this long; there is no retry
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Rat Reader JSON endpoint
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> RatReaderResult<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> RatReaderResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Build the outbound request without sending it.
    ///
    /// GET requests never carry a body, even if `request.body` is set.
    pub fn build_request(
        &self,
        base_url: &str,
        session: &Session,
        request: &ApiRequest,
    ) -> RatReaderResult<Request> {
        let url = endpoint_url(base_url, request)?;

        let mut builder = self
            .client
            .request(request.method.into(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = session.token() {
            builder = builder.bearer_auth(token);
        }

        if request.method.carries_body() {
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        Ok(builder.build()?)
    }
}

impl Api for ApiClient {
    fn request(
        &self,
        base_url: &str,
        session: &Session,
        request: &ApiRequest,
    ) -> RatReaderResult<Value> {
        let http_request = self.build_request(base_url, session, request)?;

        debug!(
            method = %request.method,
            action = %request.action,
            url = %base_url,
            authenticated = session.is_logged_in(),
            "Sending API request"
        );

        let response = self.client.execute(http_request).map_err(classify)?;
        let status = response.status();
        let text = response.text().map_err(classify)?;

        debug!(status = %status, bytes = text.len(), "API response received");

        // Error replies come with 4xx/5xx statuses but still carry a JSON
        // body, so the status is not inspected here.
        serde_json::from_str(&text).map_err(|e| RatReaderError::MalformedResponse(e.to_string()))
    }
}

fn endpoint_url(base_url: &str, request: &ApiRequest) -> RatReaderResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| RatReaderError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    url.query_pairs_mut().extend_pairs(request.query());
    Ok(url)
}

/// Map transport failures onto the error kinds the operator sees
fn classify(err: reqwest::Error) -> RatReaderError {
    if err.is_timeout() {
        RatReaderError::TimedOut
    } else if err.is_connect() {
        RatReaderError::Unreachable(err.to_string())
    } else if err.is_decode() || err.is_body() {
        RatReaderError::MalformedResponse(err.to_string())
    } else {
        RatReaderError::Http(err)
    }
}
