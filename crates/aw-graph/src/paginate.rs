//! Cursor-following pagination for Graph collection endpoints
//!
//! Graph collection responses carry their records in a `value` array and,
//! when more pages remain, a full continuation URL in `@odata.nextLink`.
//! Fetching walks that chain until the field is absent.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{body_snippet, GraphError, Result};

/// Records carried by one page. A missing or non-array `value` field
/// yields an empty batch.
fn page_records(body: &Value) -> Vec<Value> {
    body.get("value")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Continuation URL for the next page.
///
/// A continuation field that is present but not a string is treated as
/// "no more pages" rather than an error.
fn next_link(body: &Value) -> Option<String> {
    body.get("@odata.nextLink")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Fetch every page of a Graph collection, concatenating the `value`
/// arrays in fetch order.
///
/// `first_page_query` is sent only with the first request; continuation
/// URLs already embed the original parameters, so they are never resent.
/// Any non-success status or transport failure aborts the whole fetch
/// with no partial result.
pub async fn fetch_all_pages(
    client: &Client,
    first_url: &str,
    access_token: &str,
    first_page_query: &[(&str, String)],
) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    let mut url = first_url.to_string();
    let mut first_query = Some(first_page_query);
    let mut pages = 0usize;

    loop {
        let mut request = client.get(&url).bearer_auth(access_token);
        if let Some(params) = first_query.take() {
            if !params.is_empty() {
                request = request.query(params);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("Graph request failed: {} - {}", status, body_text);
            return Err(GraphError::Transport {
                status: status.as_u16(),
                body: body_snippet(&body_text),
            });
        }

        let body: Value = serde_json::from_str(&body_text)?;
        let page = page_records(&body);
        pages += 1;
        debug!("Page {}: {} records", pages, page.len());
        records.extend(page);

        match next_link(&body) {
            Some(next) => url = next,
            None => break,
        }
    }

    debug!("Pagination complete: {} records over {} pages", records.len(), pages);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_records_preserves_order() {
        let body = json!({ "value": [{"id": "1"}, {"id": "2"}, {"id": "3"}] });
        let records = page_records(&body);
        let ids: Vec<&str> = records.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_page_records_missing_value() {
        assert!(page_records(&json!({})).is_empty());
    }

    #[test]
    fn test_page_records_non_array_value() {
        assert!(page_records(&json!({ "value": "oops" })).is_empty());
    }

    #[test]
    fn test_next_link_present() {
        let body = json!({ "@odata.nextLink": "https://graph.microsoft.com/v1.0/next" });
        assert_eq!(
            next_link(&body).as_deref(),
            Some("https://graph.microsoft.com/v1.0/next")
        );
    }

    #[test]
    fn test_next_link_absent() {
        assert_eq!(next_link(&json!({ "value": [] })), None);
    }

    #[test]
    fn test_next_link_null() {
        assert_eq!(next_link(&json!({ "@odata.nextLink": null })), None);
    }

    #[test]
    fn test_next_link_malformed_stops_pagination() {
        // A non-string continuation field means "no more pages", not an error.
        assert_eq!(next_link(&json!({ "@odata.nextLink": 42 })), None);
        assert_eq!(next_link(&json!({ "@odata.nextLink": ["a"] })), None);
    }
}
