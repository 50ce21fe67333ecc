use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{response, Api, ApiRequest};
use crate::domain::Session;
use crate::errors::{RatReaderError, RatReaderResult};
use crate::prompt::Prompter;
use crate::storage::{resolve_api_url, SessionStore};

/// Fail before any network traffic when there is no stored token
pub fn require_login(session: &Session) -> RatReaderResult<()> {
    if session.is_logged_in() {
        Ok(())
    } else {
        Err(RatReaderError::NotLoggedIn)
    }
}

/// The collaborators every command needs: the API, the session store and
/// the operator.
pub struct ApiContext<A: Api, S: SessionStore, P: Prompter> {
    pub api: A,
    pub store: S,
    pub prompter: P,
}

impl<A: Api, S: SessionStore, P: Prompter> ApiContext<A, S, P> {
    pub fn new(api: A, store: S, prompter: P) -> Self {
        Self {
            api,
            store,
            prompter,
        }
    }

    /// Perform one request and reject replies that carry an `error`
    pub fn send(&self, session: &mut Session, request: &ApiRequest) -> RatReaderResult<Value> {
        let base_url = resolve_api_url(&self.store, &self.prompter, session)?;
        let reply = self.api.request(&base_url, session, request)?;
        response::check(reply)
    }

    /// Like [`ApiContext::send`], deserializing the payload
    pub fn send_as<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        request: &ApiRequest,
    ) -> RatReaderResult<T> {
        let base_url = resolve_api_url(&self.store, &self.prompter, session)?;
        let reply = self.api.request(&base_url, session, request)?;
        response::parse(reply)
    }

    /// Like [`ApiContext::send_as`] for actions that need a logged-in user
    pub fn send_authorized<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        request: &ApiRequest,
    ) -> RatReaderResult<T> {
        require_login(session)?;
        self.send_as(session, request)
    }
}
