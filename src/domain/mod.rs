pub mod article;
pub mod auth;
pub mod feed;
pub mod session;

pub use article::{Article, ArticlesResponse};
pub use auth::{LoginResponse, UserInfo};
pub use feed::{AddFeedResponse, AddedFeed, Feed, FeedsResponse, RefreshResponse};
pub use session::{normalize_api_url, Session};
