pub mod article_service;
pub mod auth_service;
pub mod context;
pub mod feed_service;

pub use article_service::{ArticleService, DEFAULT_LIMIT};
pub use auth_service::{AuthService, SessionStatus};
pub use context::{require_login, ApiContext};
pub use feed_service::FeedService;
