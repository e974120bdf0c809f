//! aw-graph: Microsoft Graph (Teams) message extraction
//!
//! Parses Teams channel deep links, follows `@odata.nextLink` pagination,
//! and aggregates channel or user chat messages into a JSON artifact.

pub mod deeplink;
pub mod error;
pub mod extractor;
pub mod paginate;

pub use deeplink::{parse_channel_link, ChannelLink};
pub use error::{GraphError, Result};
pub use extractor::{export_messages, GraphClient};
pub use paginate::fetch_all_pages;
