use serde_json::json;
use tracing::{info, warn};

use crate::api::{Api, ApiRequest};
use crate::domain::{LoginResponse, Session};
use crate::errors::{RatReaderError, RatReaderResult};
use crate::prompt::Prompter;
use crate::services::context::ApiContext;
use crate::storage::SessionStore;

/// What `status` reports, read from the local session only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub username: Option<String>,
    pub api_url: Option<String>,
}

pub struct AuthService<A: Api, S: SessionStore, P: Prompter> {
    ctx: ApiContext<A, S, P>,
}

impl<A: Api, S: SessionStore, P: Prompter> AuthService<A, S, P> {
    pub fn new(ctx: ApiContext<A, S, P>) -> Self {
        Self { ctx }
    }

    /// Log in and store the returned token. Missing credentials are asked
    /// for interactively. Returns the username the server knows us by.
    pub fn login(
        &self,
        session: &mut Session,
        username: Option<String>,
        password: Option<String>,
    ) -> RatReaderResult<String> {
        self.authenticate("login", session, username, password)
    }

    /// Create an account; the server logs the new user in directly
    pub fn register(
        &self,
        session: &mut Session,
        username: Option<String>,
        password: Option<String>,
    ) -> RatReaderResult<String> {
        self.authenticate("register", session, username, password)
    }

    fn authenticate(
        &self,
        action: &str,
        session: &mut Session,
        username: Option<String>,
        password: Option<String>,
    ) -> RatReaderResult<String> {
        let username = match username {
            Some(u) => u,
            None => self.ctx.prompter.username()?,
        };
        let password = match password {
            Some(p) => p,
            None => self.ctx.prompter.password()?,
        };

        let request = ApiRequest::post(action).with_body(json!({
            "username": username,
            "password": password,
        }));
        let reply: LoginResponse = self.ctx.send_as(session, &request)?;

        let token = reply
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                RatReaderError::MalformedResponse(format!("{} reply carries no token", action))
            })?;
        let name = reply.username_or(&username);

        session.sign_in(token, name.clone());
        self.ctx.store.save(session)?;

        info!(username = %name, action, "Authenticated");
        Ok(name)
    }

    /// Forget the local credentials, telling the server first when there
    /// are any. Safe to call when already logged out.
    pub fn logout(&self, session: &mut Session) -> RatReaderResult<()> {
        if session.is_logged_in() {
            match self.ctx.send(session, &ApiRequest::post("logout")) {
                Ok(_) => {}
                Err(RatReaderError::Api(message)) => {
                    warn!(error = %message, "Server refused logout, clearing local session anyway");
                }
                Err(e) => return Err(e),
            }
        }

        session.sign_out();
        self.ctx.store.save(session)
    }

    pub fn status(&self, session: &Session) -> SessionStatus {
        SessionStatus {
            username: session
                .is_logged_in()
                .then(|| session.username.clone().unwrap_or_else(|| "unknown".to_string())),
            api_url: session.api_url.clone(),
        }
    }
}
