//! AccountAgent -- stateful façade over the social graph API.
//!
//! Owns the current access token and the in-memory keyword set. Every
//! operation fails closed: a `GraphError` from the collaborator is logged
//! and converted to a sentinel result (`None` / `false` / empty) at the
//! operation boundary, so no error ever propagates to a presentation
//! shell. The token is wrapped in [`secrecy::SecretString`] and never
//! appears in logs.

use std::collections::BTreeSet;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use postwarden_types::error::GraphError;
use postwarden_types::post::{EngagementSummary, Post};
use postwarden_types::profile::Profile;

use crate::graph::GraphApi;

/// Default batch size for [`AccountAgent::recent_posts`].
pub const DEFAULT_POST_LIMIT: u32 = 10;

/// Fixed fetch window for the keyword scan.
pub const SCAN_WINDOW: u32 = 50;

/// Field selection for post fetches.
const POST_FIELDS: &str = "message,created_time,id";

/// Stateful façade over a [`GraphApi`] collaborator.
///
/// Created per connection attempt with a caller-supplied token and
/// discarded when the caller reconnects; nothing persists across runs.
/// Holding a token counts as "connected" -- it is not validated until
/// first use.
///
/// Keywords are normalized to lowercase on insertion and iterate in
/// sorted order for display.
pub struct AccountAgent<G: GraphApi> {
    graph: G,
    access_token: SecretString,
    keywords: BTreeSet<String>,
}

// No Debug derivation: the access token must not leak through formatting.

impl<G: GraphApi> AccountAgent<G> {
    /// Create an agent holding the given (possibly short-lived) token.
    pub fn new(graph: G, access_token: SecretString) -> Self {
        Self {
            graph,
            access_token,
            keywords: BTreeSet::new(),
        }
    }

    fn token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Fetch the authenticated user's `{name, id}` projection.
    pub async fn profile_info(&self) -> Option<Profile> {
        match self.fetch_profile().await {
            Ok(profile) => {
                tracing::info!(name = %profile.name, "fetched profile info");
                Some(profile)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch profile");
                None
            }
        }
    }

    /// Fetch up to `limit` most recent posts, in the order the API
    /// supplies them (typically reverse-chronological).
    pub async fn recent_posts(&self, limit: u32) -> Vec<Post> {
        match self.fetch_posts(limit).await {
            Ok(posts) => {
                tracing::info!(count = posts.len(), "fetched recent posts");
                posts
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch posts");
                Vec::new()
            }
        }
    }

    /// Publish a new post to the user's feed.
    pub async fn create_post(&self, message: &str) -> bool {
        let params = [("message", message.to_string())];
        match self.graph.put_object(self.token(), "me", "feed", &params).await {
            Ok(_) => {
                tracing::info!("created post");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create post");
                false
            }
        }
    }

    /// Delete one post by id.
    pub async fn delete_post(&self, post_id: &str) -> bool {
        match self.graph.delete_object(self.token(), post_id).await {
            Ok(()) => {
                tracing::info!(post_id, "deleted post");
                true
            }
            Err(e) => {
                tracing::error!(post_id, error = %e, "failed to delete post");
                false
            }
        }
    }

    /// Fetch reaction and comment totals for one post.
    pub async fn analyze_engagement(&self, post_id: &str) -> Option<EngagementSummary> {
        match self.fetch_engagement(post_id).await {
            Ok(summary) => {
                tracing::info!(post_id, "analyzed engagement");
                Some(summary)
            }
            Err(e) => {
                tracing::error!(post_id, error = %e, "failed to analyze engagement");
                None
            }
        }
    }

    /// Track a keyword for the scan. Stored lowercased.
    pub fn add_keyword(&mut self, keyword: &str) {
        self.keywords.insert(keyword.to_lowercase());
        tracing::info!(keyword, "added keyword");
    }

    /// Stop tracking a keyword. No-op if it was never tracked.
    pub fn remove_keyword(&mut self, keyword: &str) {
        self.keywords.remove(&keyword.to_lowercase());
        tracing::info!(keyword, "removed keyword");
    }

    /// Tracked keywords in sorted order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Scan the most recent [`SCAN_WINDOW`] posts and delete every one
    /// whose text body contains any tracked keyword (case-insensitive
    /// substring). Returns the number of confirmed deletions.
    ///
    /// Single linear pass in fetch order. Posts without a text body are
    /// never evaluated, and a failed deletion does not abort the scan.
    pub async fn scan_and_delete_posts(&self) -> usize {
        let posts = self.recent_posts(SCAN_WINDOW).await;
        let mut deleted = 0;

        for post in &posts {
            let Some(message) = &post.message else {
                continue;
            };
            let body = message.to_lowercase();
            if self.keywords.iter().any(|k| body.contains(k.as_str()))
                && self.delete_post(&post.id).await
            {
                deleted += 1;
            }
        }

        tracing::info!(deleted, "keyword scan complete");
        deleted
    }

    /// Trade the held short-lived token plus app credentials for a
    /// long-lived one. On success the held token is replaced in place;
    /// on failure it is left unchanged and still usable.
    pub async fn exchange_for_long_lived_token(&mut self, app_id: &str, app_secret: &str) -> bool {
        match self
            .graph
            .extend_access_token(self.token(), app_id, app_secret)
            .await
        {
            Ok(new_token) => {
                self.access_token = SecretString::from(new_token);
                tracing::info!("exchanged for long-lived access token");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to exchange token");
                false
            }
        }
    }

    async fn fetch_profile(&self) -> Result<Profile, GraphError> {
        let value = self.graph.get_object(self.token(), "me", "name,id").await?;
        serde_json::from_value(value).map_err(|e| GraphError::Deserialization(e.to_string()))
    }

    async fn fetch_posts(&self, limit: u32) -> Result<Vec<Post>, GraphError> {
        let params = [
            ("limit", limit.to_string()),
            ("fields", POST_FIELDS.to_string()),
        ];
        let value = self
            .graph
            .get_connections(self.token(), "me", "posts", &params)
            .await?;
        let data = value
            .get("data")
            .cloned()
            .ok_or_else(|| GraphError::Deserialization("missing 'data' in posts response".into()))?;
        serde_json::from_value(data).map_err(|e| GraphError::Deserialization(e.to_string()))
    }

    async fn fetch_engagement(&self, post_id: &str) -> Result<EngagementSummary, GraphError> {
        Ok(EngagementSummary {
            reactions_count: self.edge_total(post_id, "reactions").await?,
            comments_count: self.edge_total(post_id, "comments").await?,
        })
    }

    /// Read `summary.total_count` from an edge fetched with
    /// `summary=true&limit=0` (no edge items, just the aggregate).
    async fn edge_total(&self, id: &str, edge: &str) -> Result<u64, GraphError> {
        let params = [("summary", "true".to_string()), ("limit", "0".to_string())];
        let value = self
            .graph
            .get_connections(self.token(), id, edge, &params)
            .await?;
        value
            .pointer("/summary/total_count")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                GraphError::Deserialization(format!("missing summary.total_count on '{edge}' edge"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::Mutex;

    use serde_json::json;

    /// In-memory scripted collaborator. `None` payload fields make the
    /// corresponding call fail; call arguments are recorded for
    /// assertions.
    #[derive(Default)]
    struct ScriptedGraph {
        profile: Option<Value>,
        posts: Option<Value>,
        reactions_total: Option<u64>,
        comments_total: Option<u64>,
        put_ok: bool,
        failing_deletes: HashSet<String>,
        new_token: Option<String>,
        delete_attempts: Mutex<Vec<String>>,
        posts_limits: Mutex<Vec<String>>,
        tokens_seen: Mutex<Vec<String>>,
    }

    fn scripted_failure() -> GraphError {
        GraphError::Api {
            status: 500,
            message: "scripted failure".into(),
        }
    }

    impl GraphApi for ScriptedGraph {
        async fn get_object(&self, token: &str, _id: &str, _fields: &str) -> Result<Value, GraphError> {
            self.tokens_seen.lock().unwrap().push(token.to_string());
            self.profile.clone().ok_or_else(scripted_failure)
        }

        async fn get_connections(
            &self,
            token: &str,
            _id: &str,
            edge: &str,
            params: &[(&str, String)],
        ) -> Result<Value, GraphError> {
            self.tokens_seen.lock().unwrap().push(token.to_string());
            match edge {
                "posts" => {
                    if let Some((_, limit)) = params.iter().find(|(k, _)| *k == "limit") {
                        self.posts_limits.lock().unwrap().push(limit.clone());
                    }
                    self.posts.clone().ok_or_else(scripted_failure)
                }
                "reactions" => self
                    .reactions_total
                    .map(|n| json!({"data": [], "summary": {"total_count": n}}))
                    .ok_or_else(scripted_failure),
                "comments" => self
                    .comments_total
                    .map(|n| json!({"data": [], "summary": {"total_count": n}}))
                    .ok_or_else(scripted_failure),
                other => panic!("unexpected edge: {other}"),
            }
        }

        async fn put_object(
            &self,
            token: &str,
            _id: &str,
            _edge: &str,
            _params: &[(&str, String)],
        ) -> Result<Value, GraphError> {
            self.tokens_seen.lock().unwrap().push(token.to_string());
            if self.put_ok {
                Ok(json!({"id": "me_new"}))
            } else {
                Err(scripted_failure())
            }
        }

        async fn delete_object(&self, _token: &str, id: &str) -> Result<(), GraphError> {
            self.delete_attempts.lock().unwrap().push(id.to_string());
            if self.failing_deletes.contains(id) {
                Err(scripted_failure())
            } else {
                Ok(())
            }
        }

        async fn extend_access_token(
            &self,
            _token: &str,
            _app_id: &str,
            _app_secret: &str,
        ) -> Result<String, GraphError> {
            self.new_token.clone().ok_or_else(scripted_failure)
        }
    }

    fn agent(graph: ScriptedGraph) -> AccountAgent<ScriptedGraph> {
        AccountAgent::new(graph, SecretString::from("short-lived"))
    }

    fn posts_payload(posts: Value) -> Option<Value> {
        Some(json!({ "data": posts }))
    }

    #[tokio::test]
    async fn test_keyword_match_is_case_insensitive() {
        let graph = ScriptedGraph {
            posts: posts_payload(json!([
                {"id": "1", "message": "big SALE today", "created_time": "2024-01-01T00:00:00+0000"},
            ])),
            ..Default::default()
        };
        let mut agent = agent(graph);
        agent.add_keyword("Sale");

        assert_eq!(agent.scan_and_delete_posts().await, 1);
        assert_eq!(*agent.graph.delete_attempts.lock().unwrap(), vec!["1"]);
    }

    #[test]
    fn test_remove_absent_keyword_is_noop() {
        let mut agent = agent(ScriptedGraph::default());
        agent.add_keyword("SPAM");
        agent.remove_keyword("never-added");
        assert_eq!(agent.keywords().collect::<Vec<_>>(), vec!["spam"]);
    }

    #[test]
    fn test_keywords_iterate_sorted_lowercase() {
        let mut agent = agent(ScriptedGraph::default());
        agent.add_keyword("Zebra");
        agent.add_keyword("apple");
        assert_eq!(agent.keywords().collect::<Vec<_>>(), vec!["apple", "zebra"]);
    }

    #[tokio::test]
    async fn test_scan_skips_posts_without_message() {
        let graph = ScriptedGraph {
            posts: posts_payload(json!([
                {"id": "1", "message": "this is SPAM", "created_time": "2024-01-01T00:00:00+0000"},
                {"id": "2", "message": "hello", "created_time": "2024-01-02T00:00:00+0000"},
                {"id": "3", "created_time": "2024-01-03T00:00:00+0000"},
            ])),
            ..Default::default()
        };
        let mut agent = agent(graph);
        agent.add_keyword("spam");

        assert_eq!(agent.scan_and_delete_posts().await, 1);
        assert_eq!(*agent.graph.delete_attempts.lock().unwrap(), vec!["1"]);
    }

    #[tokio::test]
    async fn test_scan_continues_past_failed_delete() {
        let graph = ScriptedGraph {
            posts: posts_payload(json!([
                {"id": "1", "message": "spam one", "created_time": "2024-01-01T00:00:00+0000"},
                {"id": "2", "message": "spam two", "created_time": "2024-01-02T00:00:00+0000"},
            ])),
            failing_deletes: HashSet::from(["1".to_string()]),
            ..Default::default()
        };
        let mut agent = agent(graph);
        agent.add_keyword("spam");

        // First delete fails, second succeeds; both were attempted.
        assert_eq!(agent.scan_and_delete_posts().await, 1);
        assert_eq!(*agent.graph.delete_attempts.lock().unwrap(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_scan_fetches_fixed_window() {
        let graph = ScriptedGraph {
            posts: posts_payload(json!([])),
            ..Default::default()
        };
        let agent = agent(graph);
        assert_eq!(agent.scan_and_delete_posts().await, 0);
        assert_eq!(*agent.graph.posts_limits.lock().unwrap(), vec!["50"]);
    }

    #[tokio::test]
    async fn test_recent_posts_passes_limit_and_preserves_order() {
        let graph = ScriptedGraph {
            posts: posts_payload(json!([
                {"id": "b", "message": "second newest", "created_time": "2024-01-02T00:00:00+0000"},
                {"id": "a", "message": "newest", "created_time": "2024-01-03T00:00:00+0000"},
                {"id": "c", "created_time": "2024-01-01T00:00:00+0000"},
            ])),
            ..Default::default()
        };
        let agent = agent(graph);

        let posts = agent.recent_posts(5).await;
        assert_eq!(*agent.graph.posts_limits.lock().unwrap(), vec!["5"]);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_profile_info_success() {
        let graph = ScriptedGraph {
            profile: Some(json!({"name": "Jane Doe", "id": "42"})),
            ..Default::default()
        };
        let agent = agent(graph);
        let profile = agent.profile_info().await.unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.id, "42");
    }

    #[tokio::test]
    async fn test_analyze_engagement_pairs_edge_totals() {
        let graph = ScriptedGraph {
            reactions_total: Some(7),
            comments_total: Some(3),
            ..Default::default()
        };
        let agent = agent(graph);
        let summary = agent.analyze_engagement("123").await.unwrap();
        assert_eq!(summary.reactions_count, 7);
        assert_eq!(summary.comments_count, 3);
    }

    #[tokio::test]
    async fn test_collaborator_failures_yield_sentinels() {
        // Everything unscripted: every collaborator call fails.
        let agent = agent(ScriptedGraph::default());

        assert!(agent.profile_info().await.is_none());
        assert!(agent.recent_posts(10).await.is_empty());
        assert!(!agent.create_post("hello").await);
        assert!(!agent.delete_post("1").await);
        assert!(agent.analyze_engagement("1").await.is_none());
        assert_eq!(agent.scan_and_delete_posts().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_posts_payload_yields_empty() {
        let graph = ScriptedGraph {
            posts: Some(json!({"unexpected": true})),
            ..Default::default()
        };
        let agent = agent(graph);
        assert!(agent.recent_posts(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_token_exchange_replaces_held_token() {
        let graph = ScriptedGraph {
            profile: Some(json!({"name": "Jane", "id": "1"})),
            new_token: Some("long-lived".to_string()),
            ..Default::default()
        };
        let mut agent = agent(graph);

        assert!(agent.exchange_for_long_lived_token("app", "secret").await);
        agent.profile_info().await;
        assert_eq!(*agent.graph.tokens_seen.lock().unwrap(), vec!["long-lived"]);
    }

    #[tokio::test]
    async fn test_failed_exchange_keeps_previous_token() {
        let graph = ScriptedGraph {
            profile: Some(json!({"name": "Jane", "id": "1"})),
            ..Default::default()
        };
        let mut agent = agent(graph);

        assert!(!agent.exchange_for_long_lived_token("app", "secret").await);
        agent.profile_info().await;
        assert_eq!(*agent.graph.tokens_seen.lock().unwrap(), vec!["short-lived"]);
    }

    #[tokio::test]
    async fn test_create_post_reports_success() {
        let graph = ScriptedGraph {
            put_ok: true,
            ..Default::default()
        };
        let agent = agent(graph);
        assert!(agent.create_post("hello world").await);
    }
}
