use std::num::IntErrorKind;

use crate::api::{Api, ApiRequest};
use crate::domain::{Article, ArticlesResponse, Session};
use crate::errors::{RatReaderError, RatReaderResult};
use crate::prompt::Prompter;
use crate::services::context::{require_login, ApiContext};
use crate::storage::SessionStore;

/// Articles shown by `articles` when no limit is given
pub const DEFAULT_LIMIT: usize = 20;

pub struct ArticleService<A: Api, S: SessionStore, P: Prompter> {
    ctx: ApiContext<A, S, P>,
}

impl<A: Api, S: SessionStore, P: Prompter> ArticleService<A, S, P> {
    pub fn new(ctx: ApiContext<A, S, P>) -> Self {
        Self { ctx }
    }

    fn fetch(
        &self,
        session: &mut Session,
        feed_id: Option<&str>,
    ) -> RatReaderResult<Vec<Article>> {
        let mut request = ApiRequest::get("live-articles");
        if let Some(id) = feed_id {
            request = request.with_param("feed_id", id);
        }

        let reply: ArticlesResponse = self.ctx.send_authorized(session, &request)?;
        Ok(reply.articles)
    }

    /// The first `limit` articles in server order, optionally from one feed
    pub fn list(
        &self,
        session: &mut Session,
        feed_id: Option<&str>,
        limit: usize,
    ) -> RatReaderResult<Vec<Article>> {
        let mut articles = self.fetch(session, feed_id)?;
        articles.truncate(limit);
        Ok(articles)
    }

    /// The article at 1-based `number` in the same listing `list` shows.
    ///
    /// Positions are only stable while the server's ordering is.
    pub fn read(
        &self,
        session: &mut Session,
        number: &str,
        feed_id: Option<&str>,
    ) -> RatReaderResult<Article> {
        require_login(session)?;

        let not_found = || RatReaderError::ArticleNotFound(number.trim().to_string());

        // Well-formed numbers too large for any listing are simply absent
        let index = match number.trim().parse::<i64>() {
            Ok(n) if n >= 1 => usize::try_from(n - 1).map_err(|_| not_found())?,
            Ok(_) => return Err(not_found()),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(not_found())
            }
            Err(_) => {
                return Err(RatReaderError::InvalidInput(
                    "Please provide a valid article number".to_string(),
                ))
            }
        };

        self.fetch(session, feed_id)?
            .into_iter()
            .nth(index)
            .ok_or_else(not_found)
    }
}
