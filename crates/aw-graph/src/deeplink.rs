//! Teams deep-link URL parsing
//!
//! Channel deep links look like:
//! `https://teams.microsoft.com/l/channel/{channelId}/{name}?groupId=...&tenantId=...`
//!
//! The channel id is the percent-encoded path segment that follows the
//! `channel` path marker.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{GraphError, Result};

/// Identifiers carried by a Teams channel deep link.
///
/// Any field may be absent; callers decide whether a missing field is
/// fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLink {
    pub group_id: Option<String>,
    pub tenant_id: Option<String>,
    pub channel_id: Option<String>,
}

/// Parse a Teams channel deep link.
///
/// Fails only when the URL itself cannot be parsed; missing identifiers
/// come back as `None`.
pub fn parse_channel_link(link: &str) -> Result<ChannelLink> {
    let url = Url::parse(link)
        .map_err(|e| GraphError::MalformedUrl(format!("{}: {}", link, e)))?;

    let mut group_id = None;
    let mut tenant_id = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "groupId" if group_id.is_none() => group_id = Some(value.into_owned()),
            "tenantId" if tenant_id.is_none() => tenant_id = Some(value.into_owned()),
            _ => {}
        }
    }

    let channel_id = url.path_segments().and_then(|mut segments| {
        segments
            .find(|segment| *segment == "channel")
            .and_then(|_| segments.next())
            .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
            .filter(|id| !id.is_empty())
    });

    Ok(ChannelLink {
        group_id,
        tenant_id,
        channel_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://teams.microsoft.com/l/channel/19%3Aabc123%40thread.tacv2/General?groupId=68e2d0f4-c57f-4d35-88fd-d4a80d670031&tenantId=fe1d95a9-4ce1-41a5-8eab-6dd43aa26d9f";

    #[test]
    fn test_parse_full_link() {
        let link = parse_channel_link(LINK).unwrap();
        assert_eq!(
            link.group_id.as_deref(),
            Some("68e2d0f4-c57f-4d35-88fd-d4a80d670031")
        );
        assert_eq!(
            link.tenant_id.as_deref(),
            Some("fe1d95a9-4ce1-41a5-8eab-6dd43aa26d9f")
        );
        assert_eq!(link.channel_id.as_deref(), Some("19:abc123@thread.tacv2"));
    }

    #[test]
    fn test_missing_tenant_is_none_not_error() {
        let link = parse_channel_link(
            "https://teams.microsoft.com/l/channel/19%3Aabc%40thread.tacv2/General?groupId=g-1",
        )
        .unwrap();
        assert_eq!(link.group_id.as_deref(), Some("g-1"));
        assert_eq!(link.tenant_id, None);
        assert_eq!(link.channel_id.as_deref(), Some("19:abc@thread.tacv2"));
    }

    #[test]
    fn test_no_channel_marker() {
        let link =
            parse_channel_link("https://teams.microsoft.com/l/team/General?groupId=g-1").unwrap();
        assert_eq!(link.channel_id, None);
        assert_eq!(link.group_id.as_deref(), Some("g-1"));
    }

    #[test]
    fn test_channel_marker_at_end_of_path() {
        let link = parse_channel_link("https://teams.microsoft.com/l/channel").unwrap();
        assert_eq!(link.channel_id, None);
    }

    #[test]
    fn test_unparsable_url_is_error() {
        let result = parse_channel_link("not a url at all");
        assert!(matches!(result, Err(GraphError::MalformedUrl(_))));
    }
}
