pub mod client;
pub mod request;
pub mod response;

pub use client::{ApiClient, REQUEST_TIMEOUT};
pub use request::{ApiRequest, Method};

use serde_json::Value;

use crate::domain::Session;
use crate::errors::RatReaderResult;

/// One round trip to the API endpoint at `base_url`, authenticated with the
/// session token when there is one. Returns the parsed JSON body verbatim.
#[cfg_attr(test, mockall::automock)]
pub trait Api {
    fn request(
        &self,
        base_url: &str,
        session: &Session,
        request: &ApiRequest,
    ) -> RatReaderResult<Value>;
}
