pub mod api_url;
pub mod json_file;
pub mod traits;

pub use api_url::{configure_api_url, resolve_api_url, DEFAULT_API_URL};
pub use json_file::JsonSessionStore;
pub use traits::SessionStore;
