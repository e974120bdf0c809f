//! aw-wiki: Wikipedia article fetching
//!
//! Pulls plain-text article extracts from the MediaWiki action API and
//! resolves article titles out of `/wiki/` URLs.

pub mod error;

use percent_encoding::percent_decode_str;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

pub use error::{Result, WikiError};

const USER_AGENT: &str = "airwave/0.1 (https://github.com/user/airwave)";

/// Wikipedia API client
pub struct WikiClient {
    client: Client,
    base_url: String,
}

impl WikiClient {
    /// Create a client against the English Wikipedia.
    pub fn new() -> Result<Self> {
        Self::with_base_url("https://en.wikipedia.org/w/api.php")
    }

    /// Create a client with a custom API endpoint (for testing or other
    /// language editions).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch an article's plain-text extract, truncated to `max_chars`
    /// characters (an ellipsis marks the cut).
    pub async fn fetch_article(&self, title: &str, max_chars: usize) -> Result<String> {
        debug!("Fetching Wikipedia article: {}", title);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(WikiError::Api {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let body: Value = serde_json::from_str(&body_text)?;
        let page = body["query"]["pages"]
            .as_array()
            .and_then(|pages| pages.first())
            .ok_or_else(|| WikiError::NotFound(title.to_string()))?;

        if page.get("missing").is_some() {
            return Err(WikiError::NotFound(title.to_string()));
        }

        let text = page
            .get("extract")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WikiError::NotFound(title.to_string()))?;

        let text = truncate_chars(text, max_chars);
        info!("Fetched article '{}': {} characters", title, text.chars().count());
        Ok(text)
    }
}

/// Cut a string to at most `max_chars` characters, appending an ellipsis
/// when anything was dropped.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Extract the article title from a Wikipedia URL.
///
/// Handles `https://en.wikipedia.org/wiki/Article_Title` with optional
/// query string or fragment; returns `None` for URLs without a `/wiki/`
/// path.
pub fn title_from_url(url: &str) -> Option<String> {
    let url = url.split(['?', '#']).next().unwrap_or(url);

    let raw_title = url.split_once("/wiki/").map(|(_, title)| title)?;
    if raw_title.is_empty() {
        return None;
    }

    let decoded = percent_decode_str(raw_title).decode_utf8_lossy();
    Some(decoded.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_title_from_url_basic() {
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/Mumbai_Indians").as_deref(),
            Some("Mumbai Indians")
        );
    }

    #[test]
    fn test_title_from_url_strips_query_and_fragment() {
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/Rust_(programming_language)?x=1#History")
                .as_deref(),
            Some("Rust (programming language)")
        );
    }

    #[test]
    fn test_title_from_url_percent_decoding() {
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/S%C3%A3o_Paulo").as_deref(),
            Some("São Paulo")
        );
    }

    #[test]
    fn test_title_from_url_not_a_wiki_link() {
        assert_eq!(title_from_url("https://example.com/article/42"), None);
        assert_eq!(title_from_url("https://en.wikipedia.org/wiki/"), None);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello...");
        // char-based, not byte-based
        assert_eq!(truncate_chars("ñññññ", 3), "ñññ...");
    }

    #[tokio::test]
    async fn test_fetch_article_truncates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("titles", "Mumbai Indians"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": { "pages": [{
                    "pageid": 1, "title": "Mumbai Indians",
                    "extract": "a".repeat(3000),
                }]}
            })))
            .mount(&server)
            .await;

        let client = WikiClient::with_base_url(server.uri()).unwrap();
        let text = client.fetch_article("Mumbai Indians", 2000).await.unwrap();
        assert_eq!(text.chars().count(), 2003);
        assert!(text.ends_with("..."));
    }

    #[tokio::test]
    async fn test_fetch_article_missing_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": { "pages": [{ "title": "Nope", "missing": true }]}
            })))
            .mount(&server)
            .await;

        let client = WikiClient::with_base_url(server.uri()).unwrap();
        let result = client.fetch_article("Nope", 2000).await;
        assert!(matches!(result, Err(WikiError::NotFound(_))));
    }
}
