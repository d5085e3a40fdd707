//! Hosted tabular store adapter (PostgREST-style REST API).
//!
//! Reads ticket rows over HTTP: one GET per snapshot with the filter,
//! ordering and limit expressed as query parameters, authenticated by an
//! API key header. The hosted service's push protocol is proprietary, so
//! [`RemoteStore::subscribe`] reports `SubscriptionUnsupported` and the
//! board falls back to its periodic poll with no user-visible error.

use std::time::Duration;

use reqwest::Client;
use reqwest::header;
use tokio::sync::broadcast;

use async_trait::async_trait;

use crate::error::{Result, TurnosError};
use crate::types::Ticket;

use super::{ChangeEvent, SNAPSHOT_LIMIT, TicketSource};

pub struct RemoteStore {
    client: Client,
    /// Full URL of the tickets relation, e.g.
    /// `https://example.supabase.co/rest/v1/tickets`
    table_url: String,
    /// Snapshot row limit sent with every read (`display.snapshot_limit`).
    limit: usize,
}

impl RemoteStore {
    /// Build an adapter for `base_url` (the REST root, without the table
    /// segment). The API key, when present, is sent as both `apikey` and
    /// bearer `Authorization` headers.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        table: &str,
        timeout: Duration,
        limit: usize,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = header::HeaderValue::from_str(key)
                .map_err(|_| TurnosError::Config("store API key is not a valid header".into()))?;
            value.set_sensitive(true);
            headers.insert("apikey", value.clone());
            let mut bearer = header::HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| TurnosError::Config("store API key is not a valid header".into()))?;
            bearer.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            table_url: format!("{}/{}", base_url.trim_end_matches('/'), table),
            limit,
        })
    }

    /// Query parameters for the snapshot read: displayable statuses only,
    /// acceptance time descending with nulls first, configured row limit.
    fn snapshot_query(&self) -> [(&'static str, String); 4] {
        [
            ("select", "*".to_string()),
            ("status", "in.(queued,accepted)".to_string()),
            ("order", "accepted_at.desc.nullsfirst".to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[async_trait]
impl TicketSource for RemoteStore {
    async fn fetch_snapshot(&self) -> Result<Vec<Ticket>> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&self.snapshot_query())
            .send()
            .await?
            .error_for_status()?;
        let rows: Vec<Ticket> = response.json().await?;
        Ok(rows)
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<ChangeEvent>> {
        Err(TurnosError::SubscriptionUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base_url: &str, api_key: Option<&str>, limit: usize) -> RemoteStore {
        RemoteStore::new(base_url, api_key, "tickets", Duration::from_secs(30), limit).unwrap()
    }

    #[test]
    fn test_snapshot_query_shape() {
        let query = store("https://example.supabase.co/rest/v1", None, SNAPSHOT_LIMIT)
            .snapshot_query();
        assert_eq!(query[1], ("status", "in.(queued,accepted)".to_string()));
        assert_eq!(
            query[2],
            ("order", "accepted_at.desc.nullsfirst".to_string())
        );
        assert_eq!(query[3], ("limit", "60".to_string()));
    }

    #[test]
    fn test_snapshot_query_uses_configured_limit() {
        let query = store("https://example.supabase.co/rest/v1", None, 2).snapshot_query();
        assert_eq!(query[3], ("limit", "2".to_string()));
    }

    #[test]
    fn test_table_url_joins_cleanly() {
        let store = store("https://example.supabase.co/rest/v1/", None, SNAPSHOT_LIMIT);
        assert_eq!(
            store.table_url,
            "https://example.supabase.co/rest/v1/tickets"
        );
    }

    #[test]
    fn test_subscribe_is_unsupported() {
        let store = store(
            "https://example.supabase.co/rest/v1",
            Some("sk_test"),
            SNAPSHOT_LIMIT,
        );
        assert!(matches!(
            store.subscribe(),
            Err(TurnosError::SubscriptionUnsupported)
        ));
    }
}
