use dialoguer::{Confirm, Input, Password};

use crate::errors::RatReaderResult;

/// Interactive questions asked of the operator
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask for the API endpoint, offering `default`
    fn api_url(&self, default: &str) -> RatReaderResult<String>;
    fn username(&self) -> RatReaderResult<String>;
    fn password(&self) -> RatReaderResult<String>;
    fn confirm(&self, message: &str) -> RatReaderResult<bool>;
}

/// Prompts on the controlling terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn api_url(&self, default: &str) -> RatReaderResult<String> {
        eprintln!("No API URL configured.");
        let url: String = Input::new()
            .with_prompt("Enter your Rat Reader API URL")
            .default(default.to_string())
            .interact_text()?;
        Ok(url)
    }

    fn username(&self) -> RatReaderResult<String> {
        let username: String = Input::new().with_prompt("Username").interact_text()?;
        Ok(username)
    }

    fn password(&self) -> RatReaderResult<String> {
        Ok(Password::new().with_prompt("Password").interact()?)
    }

    fn confirm(&self, message: &str) -> RatReaderResult<bool> {
        Ok(Confirm::new().with_prompt(message).default(false).interact()?)
    }
}
