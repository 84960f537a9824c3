//! Post and engagement projections.
//!
//! Posts arrive from the graph API's `posts` edge. `created_time` on the
//! wire uses a numeric UTC offset without a colon (`2024-01-01T12:00:00+0000`),
//! which strict RFC 3339 parsing rejects, so deserialization accepts both.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One post from the authenticated user's feed.
///
/// `message` is absent for posts with no text body (shares, photo-only
/// posts); the keyword scan never evaluates those.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "graph_time")]
    pub created_time: DateTime<Utc>,
}

/// Aggregate reaction and comment counts for a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementSummary {
    pub reactions_count: u64,
    pub comments_count: u64,
}

mod graph_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .or_else(|_| DateTime::parse_from_str(&raw, WIRE_FORMAT))
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_post_deserialize_wire_offset() {
        let post: Post = serde_json::from_str(
            r#"{"id":"123_456","message":"hello world","created_time":"2024-01-01T12:00:00+0000"}"#,
        )
        .unwrap();
        assert_eq!(post.id, "123_456");
        assert_eq!(post.message.as_deref(), Some("hello world"));
        assert_eq!(
            post.created_time,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_post_deserialize_rfc3339() {
        let post: Post = serde_json::from_str(
            r#"{"id":"1","created_time":"2024-06-15T08:30:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            post.created_time,
            Utc.with_ymd_and_hms(2024, 6, 15, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_post_without_message() {
        let post: Post =
            serde_json::from_str(r#"{"id":"1","created_time":"2024-01-01T00:00:00+0000"}"#)
                .unwrap();
        assert!(post.message.is_none());
    }

    #[test]
    fn test_post_rejects_garbage_time() {
        let result: Result<Post, _> =
            serde_json::from_str(r#"{"id":"1","created_time":"yesterday"}"#);
        assert!(result.is_err());
    }
}
