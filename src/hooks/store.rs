use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store transport: {0}")]
    Transport(String),
    #[error("store rejected request ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("store reply decode: {0}")]
    Decode(String),
}

/// One row of the `trees` table: a wallet address and how many trees it
/// has planted. Rows are created lazily and never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRow {
    pub address: String,
    pub count: u64,
}

/// Client for the managed counter store (a Supabase/PostgREST table).
///
/// Writes are last-write-wins: two sessions for the same wallet can race
/// on the upsert and clobber each other, and the store offers no
/// transactional linkage with the chain.
#[derive(Clone)]
pub struct TreeStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl TreeStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/trees", self.base_url.trim_end_matches('/'))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch the tree count for a wallet, creating a zero record on first
    /// sight of the address.
    pub async fn fetch_count(&self, address: &str) -> Result<u64, StoreError> {
        let key = format!("eq.{address}");
        let response = self
            .request(self.http.get(self.table_url()))
            .query(&[("select", "count"), ("address", key.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        #[derive(Deserialize)]
        struct CountRow {
            count: u64,
        }

        let rows: Vec<CountRow> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        match rows.first() {
            Some(row) => Ok(row.count),
            None => {
                self.insert_zero(address).await?;
                Ok(0)
            }
        }
    }

    async fn insert_zero(&self, address: &str) -> Result<(), StoreError> {
        let row = TreeRow {
            address: address.to_string(),
            count: 0,
        };
        let response = self
            .request(self.http.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    /// Insert-or-update the count for a wallet. Last write wins; there is
    /// no optimistic-concurrency check.
    pub async fn upsert_count(&self, address: &str, count: u64) -> Result<(), StoreError> {
        let row = TreeRow {
            address: address.to_string(),
            count,
        };
        let response = self
            .request(self.http.post(self.table_url()))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    /// Top planters, ordered by count descending.
    pub async fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<TreeRow>, StoreError> {
        let limit = limit.to_string();
        let response = self
            .request(self.http.get(self.table_url()))
            .query(&[
                ("select", "address,count"),
                ("order", "count.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_row_round_trips_through_store_json() {
        let row: TreeRow =
            serde_json::from_str(r#"{"address":"9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin","count":7}"#)
                .unwrap();
        assert_eq!(row.count, 7);
        assert_eq!(row.address, "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["count"], 7);
    }

    #[test]
    fn trailing_slash_in_project_url_is_tolerated() {
        let store = TreeStore::new("https://project.supabase.co/", "anon");
        assert_eq!(store.table_url(), "https://project.supabase.co/rest/v1/trees");
    }
}
