//! Teams message extraction
//!
//! Resolves a Teams deep link to a team + channel and pages through the
//! channel's messages, or pulls a user's full chat history via the
//! `getAllMessages` endpoint.

use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use aw_core::GraphConfig;

use crate::deeplink::parse_channel_link;
use crate::error::{body_snippet, GraphError, Result};
use crate::paginate::fetch_all_pages;

/// Microsoft Graph client for Teams message extraction
pub struct GraphClient {
    client: Client,
    access_token: String,
    base_url: String,
    page_size: u32,
}

impl GraphClient {
    /// Create a new Graph client.
    ///
    /// Fails eagerly when no access token is configured; token validity
    /// itself is only checked by the server.
    pub fn new(config: &GraphConfig) -> Result<Self> {
        if config.access_token.is_empty() {
            return Err(GraphError::CredentialMissing);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Resolve the team backing an Azure AD group.
    ///
    /// Returns `None` when the group exists but has no provisioned team.
    pub async fn team_id_from_group(&self, group_id: &str) -> Result<Option<String>> {
        let url = format!("{}/groups/{}", self.base_url, group_id);

        debug!("Resolving team for group {}", group_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(GraphError::Transport {
                status: status.as_u16(),
                body: body_snippet(&body_text),
            });
        }

        let body: Value = serde_json::from_str(&body_text)?;
        let has_team = body
            .get("resourceProvisioningOptions")
            .and_then(Value::as_array)
            .map(|options| options.iter().any(|o| o.as_str() == Some("Team")))
            .unwrap_or(false);

        if !has_team {
            return Ok(None);
        }
        Ok(body.get("id").and_then(Value::as_str).map(str::to_string))
    }

    /// Fetch every message in a channel, newest first.
    pub async fn channel_messages(&self, team_id: &str, channel_id: &str) -> Result<Vec<Value>> {
        let url = format!(
            "{}/teams/{}/channels/{}/messages",
            self.base_url, team_id, channel_id
        );
        let query = [
            ("$top", self.page_size.to_string()),
            ("$orderby", "lastModifiedDateTime desc".to_string()),
        ];

        info!("Fetching channel messages: team={} channel={}", team_id, channel_id);
        fetch_all_pages(&self.client, &url, &self.access_token, &query).await
    }

    /// Fetch all chat messages for a user (`me` for the current user).
    pub async fn user_chat_messages(&self, user_id: &str) -> Result<Vec<Value>> {
        let url = format!("{}/users/{}/chats/getAllMessages", self.base_url, user_id);

        info!("Fetching chat messages for user {}", user_id);
        fetch_all_pages(&self.client, &url, &self.access_token, &[]).await
    }

    /// Extract every message behind a Teams channel deep link.
    pub async fn extract_from_channel_url(&self, channel_url: &str) -> Result<Vec<Value>> {
        let link = parse_channel_link(channel_url)?;

        let group_id = link.group_id.ok_or(GraphError::MissingField("groupId"))?;
        let channel_id = link.channel_id.ok_or(GraphError::MissingField("channelId"))?;

        let team_id = self
            .team_id_from_group(&group_id)
            .await?
            .ok_or(GraphError::TeamNotFound(group_id))?;

        self.channel_messages(&team_id, &channel_id).await
    }
}

/// Write the aggregated records as a pretty-printed UTF-8 JSON array,
/// preserving fetch order.
pub fn export_messages(path: &Path, messages: &[Value]) -> Result<()> {
    let json = serde_json::to_string_pretty(messages)?;
    std::fs::write(path, json)
        .map_err(|e| GraphError::Export(format!("{}: {}", path.display(), e)))?;

    info!("Wrote {} messages to {}", messages.len(), path.display());
    Ok(())
}
