use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::text::{html_to_paragraphs, html_to_text, truncate_chars};

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamp layouts the server has been seen to send besides RFC 3339
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub feed_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Article {
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or("No title")
    }

    pub fn feed_name(&self) -> &str {
        non_empty(&self.feed_name).unwrap_or("Unknown")
    }

    pub fn link(&self) -> &str {
        self.link.as_deref().unwrap_or("")
    }

    /// Publication date as `YYYY-MM-DD HH:MM`, or the raw value when it
    /// cannot be parsed.
    pub fn display_date(&self) -> String {
        match non_empty(&self.pub_date) {
            Some(raw) => format_pub_date(raw),
            None => String::new(),
        }
    }

    /// Full plain-text body: the description, else the content.
    pub fn body(&self) -> String {
        non_empty(&self.description)
            .or_else(|| non_empty(&self.content))
            .map(html_to_paragraphs)
            .unwrap_or_else(|| "No content".to_string())
    }

    /// Plain-text description shortened to `max_chars`, if there is one
    pub fn summary(&self, max_chars: usize) -> Option<String> {
        let text = html_to_text(non_empty(&self.description)?);
        if text.chars().count() > max_chars {
            Some(format!("{}...", truncate_chars(&text, max_chars)))
        } else {
            Some(text)
        }
    }
}

fn format_pub_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_DISPLAY_FORMAT).to_string();
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}
