use tracing::debug;

use crate::domain::Session;
use crate::errors::RatReaderResult;
use crate::prompt::Prompter;
use crate::storage::traits::SessionStore;

/// Suggested when the operator is first asked for the endpoint
pub const DEFAULT_API_URL: &str = "https://yoursite.com/ratReader/api.php";

/// Return the configured API URL, asking the operator for one (and saving
/// it) when the session has none yet.
pub fn resolve_api_url<S, P>(
    store: &S,
    prompter: &P,
    session: &mut Session,
) -> RatReaderResult<String>
where
    S: SessionStore + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(url) = &session.api_url {
        return Ok(url.clone());
    }

    let entered = prompter.api_url(DEFAULT_API_URL)?;
    let url = session.set_api_url(&entered)?;
    store.save(session)?;

    debug!(url = %url, "API URL configured");
    Ok(url)
}

/// Set the API URL explicitly, replacing any previous one
pub fn configure_api_url<S>(store: &S, session: &mut Session, url: &str) -> RatReaderResult<String>
where
    S: SessionStore + ?Sized,
{
    let url = session.set_api_url(url)?;
    store.save(session)?;
    Ok(url)
}
