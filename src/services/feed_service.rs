use serde_json::{json, Value};

use crate::api::{Api, ApiRequest};
use crate::domain::{AddFeedResponse, AddedFeed, Feed, FeedsResponse, RefreshResponse, Session};
use crate::errors::RatReaderResult;
use crate::prompt::Prompter;
use crate::services::context::{require_login, ApiContext};
use crate::storage::SessionStore;

pub struct FeedService<A: Api, S: SessionStore, P: Prompter> {
    ctx: ApiContext<A, S, P>,
}

impl<A: Api, S: SessionStore, P: Prompter> FeedService<A, S, P> {
    pub fn new(ctx: ApiContext<A, S, P>) -> Self {
        Self { ctx }
    }

    /// List the user's subscribed feeds
    pub fn list(&self, session: &mut Session) -> RatReaderResult<Vec<Feed>> {
        let reply: FeedsResponse = self
            .ctx
            .send_authorized(session, &ApiRequest::get("feeds"))?;
        Ok(reply.feeds)
    }

    /// Subscribe to a feed. Without a name the server picks the feed's own
    /// title.
    pub fn add(
        &self,
        session: &mut Session,
        url: &str,
        name: Option<&str>,
    ) -> RatReaderResult<AddedFeed> {
        let request = ApiRequest::post("feeds").with_body(json!({
            "url": url,
            "name": name,
        }));
        let reply: AddFeedResponse = self.ctx.send_authorized(session, &request)?;
        Ok(reply.into_added(url))
    }

    /// Unsubscribe from a feed, asking first unless `skip_confirm`.
    /// Returns false when the operator declined.
    pub fn remove(
        &self,
        session: &mut Session,
        feed_id: &str,
        skip_confirm: bool,
    ) -> RatReaderResult<bool> {
        require_login(session)?;

        if !skip_confirm
            && !self
                .ctx
                .prompter
                .confirm(&format!("Remove feed {}?", feed_id))?
        {
            return Ok(false);
        }

        let request = ApiRequest::delete("feeds").with_body(json!({ "feed_id": feed_id }));
        let _: Value = self.ctx.send_authorized(session, &request)?;
        Ok(true)
    }

    /// Ask the server to poll every feed now. Returns how many it refreshed,
    /// if it says.
    pub fn refresh(&self, session: &mut Session) -> RatReaderResult<Option<u64>> {
        let reply: RefreshResponse = self
            .ctx
            .send_authorized(session, &ApiRequest::post("refresh"))?;
        Ok(reply.refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockApi, Method};
    use crate::errors::RatReaderError;
    use crate::prompt::MockPrompter;
    use crate::services::context::testing::*;
    use crate::storage::traits::MockSessionStore;
    use mockall::predicate::eq;

    #[test]
    fn test_list_feeds() {
        let mut api = MockApi::new();
        api.expect_request()
            .withf(|_, _, r| r.method == Method::Get && r.action == "feeds")
            .times(1)
            .returning(|_, _, _| {
                Ok(json!({"feeds": [
                    {"id": 1, "name": "Rust Blog", "url": "https://blog.rust-lang.org/feed.xml", "is_active": 1},
                    {"id": 2, "name": "LWN", "url": "https://lwn.net/headlines/rss", "is_active": 1}
                ]}))
            });

        let service = FeedService::new(context(api, MockSessionStore::new()));
        let feeds = service.list(&mut logged_in()).unwrap();

        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].name, "Rust Blog");
        assert_eq!(feeds[1].id, "2");
    }

    #[test]
    fn test_add_without_login_makes_no_call() {
        let service = FeedService::new(context(MockApi::new(), MockSessionStore::new()));
        let mut session = Session::default();

        let result = service.add(&mut session, "https://lwn.net/headlines/rss", None);

        assert!(matches!(result, Err(RatReaderError::NotLoggedIn)));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_add_sends_url_and_name() {
        let mut api = MockApi::new();
        api.expect_request()
            .withf(|_, _, r| {
                r.method == Method::Post
                    && r.action == "feeds"
                    && r.body == Some(json!({"url": "https://lwn.net/headlines/rss", "name": null}))
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({"success": true, "feedId": "5"})));

        let service = FeedService::new(context(api, MockSessionStore::new()));
        let added = service
            .add(&mut logged_in(), "https://lwn.net/headlines/rss", None)
            .unwrap();

        assert_eq!(added.name, "https://lwn.net/headlines/rss");
        assert_eq!(added.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_add_reports_server_error() {
        let mut api = MockApi::new();
        api.expect_request()
            .times(1)
            .returning(|_, _, _| Ok(json!({"error": "Feed URL is required"})));

        let service = FeedService::new(context(api, MockSessionStore::new()));
        let result = service.add(&mut logged_in(), "", Some("Empty"));

        assert!(matches!(result, Err(RatReaderError::Api(_))));
    }

    #[test]
    fn test_remove_confirmed() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .with(eq("Remove feed 7?"))
            .times(1)
            .returning(|_| Ok(true));

        let mut api = MockApi::new();
        api.expect_request()
            .withf(|_, _, r| r.method == Method::Delete && r.body == Some(json!({"feed_id": "7"})))
            .times(1)
            .returning(|_, _, _| Ok(json!({"success": true})));

        let service = FeedService::new(ApiContext::new(api, MockSessionStore::new(), prompter));
        assert!(service.remove(&mut logged_in(), "7", false).unwrap());
    }

    #[test]
    fn test_remove_declined_makes_no_call() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).returning(|_| Ok(false));

        let service = FeedService::new(ApiContext::new(
            MockApi::new(),
            MockSessionStore::new(),
            prompter,
        ));
        assert!(!service.remove(&mut logged_in(), "7", false).unwrap());
    }

    #[test]
    fn test_remove_with_yes_skips_prompt() {
        let mut api = MockApi::new();
        api.expect_request()
            .times(1)
            .returning(|_, _, _| Ok(json!({"success": true})));

        // MockPrompter without expectations panics if asked
        let service = FeedService::new(context(api, MockSessionStore::new()));
        assert!(service.remove(&mut logged_in(), "7", true).unwrap());
    }

    #[test]
    fn test_remove_without_login_does_not_ask() {
        let service = FeedService::new(context(MockApi::new(), MockSessionStore::new()));
        let result = service.remove(&mut configured(), "7", false);

        assert!(matches!(result, Err(RatReaderError::NotLoggedIn)));
    }

    #[test]
    fn test_refresh_count() {
        let mut api = MockApi::new();
        api.expect_request()
            .withf(|_, _, r| r.method == Method::Post && r.action == "refresh")
            .times(1)
            .returning(|_, _, _| Ok(json!({"success": true, "refreshed": 3})));

        let service = FeedService::new(context(api, MockSessionStore::new()));
        assert_eq!(service.refresh(&mut logged_in()).unwrap(), Some(3));
    }
}
