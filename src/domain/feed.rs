use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Feed ids arrive as JSON numbers or numeric strings depending on the
/// server's database driver.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_i64<E>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_str<E>(self, v: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Feed {
    /// URL shortened to `max_chars` characters for tabular listings
    pub fn short_url(&self, max_chars: usize) -> String {
        if self.url.chars().count() > max_chars {
            let head: String = self.url.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            self.url.clone()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedsResponse {
    #[serde(default)]
    pub feeds: Vec<Feed>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatedFeed {
    pub name: Option<String>,
}

/// Reply to a feed creation. Older servers echo the feed, newer ones only
/// its id.
#[derive(Debug, Default, Deserialize)]
pub struct AddFeedResponse {
    pub feed: Option<CreatedFeed>,
    #[serde(default, alias = "feedId")]
    pub feed_id: Option<serde_json::Value>,
}

impl AddFeedResponse {
    pub fn display_name(&self, fallback: &str) -> String {
        self.feed
            .as_ref()
            .and_then(|f| f.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// The new feed's id, whichever JSON type the server used
    pub fn id(&self) -> Option<String> {
        match self.feed_id.as_ref()? {
            serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn into_added(self, fallback: &str) -> AddedFeed {
        AddedFeed {
            name: self.display_name(fallback),
            id: self.id(),
        }
    }
}

/// A freshly subscribed feed as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedFeed {
    pub name: String,
    pub id: Option<String>,
}

impl fmt::Display for AddedFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} (id {})", self.name, id),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshResponse {
    pub refreshed: Option<u64>,
}
