use crate::domain::Session;
use crate::errors::RatReaderResult;

/// Durable home of the [`Session`] between invocations
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// The stored session, or an empty one if nothing has been saved yet
    fn load(&self) -> RatReaderResult<Session>;
    /// Replace the stored session
    fn save(&self, session: &Session) -> RatReaderResult<()>;
}
