use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UserInfo {
    pub username: Option<String>,
}

/// Reply to `login` and `register`
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl LoginResponse {
    /// The username the server reports, else the one that was submitted
    pub fn username_or(&self, submitted: &str) -> String {
        self.user
            .as_ref()
            .and_then(|u| u.username.clone())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| submitted.to_string())
    }
}
