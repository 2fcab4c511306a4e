use dioxus::prelude::*;

use super::store::{TreeRow, TreeStore};
use crate::WalletState;

/// Top-N cutoff. The store query already orders and limits, but the
/// ranking below re-sorts so the property holds regardless of the
/// endpoint's behavior.
pub const LEADERBOARD_LIMIT: usize = 10;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub address: String,
    pub count: u64,
}

#[derive(Clone, Default)]
pub struct LeaderboardState {
    pub entries: Vec<LeaderboardEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Leaderboard view state, refreshed on wallet connect. Every refresh is a
/// full re-query; nothing is updated incrementally.
pub fn use_leaderboard() -> Signal<LeaderboardState> {
    let state = use_context::<Signal<LeaderboardState>>();
    let wallet = use_context::<Signal<WalletState>>();
    let store = use_context::<TreeStore>();

    let connected = use_memo(move || wallet.read().connected);

    let _resource = use_resource(move || {
        let store = store.clone();
        async move {
            // Reruns on connect/disconnect.
            let _ = connected();
            refresh_leaderboard(&store, state).await;
        }
    });

    state
}

/// Re-query the top planters and replace the shared leaderboard state.
/// Also called from the garden after every successful plant.
pub async fn refresh_leaderboard(store: &TreeStore, mut state: Signal<LeaderboardState>) {
    state.write().loading = true;

    match store.fetch_leaderboard(LEADERBOARD_LIMIT).await {
        Ok(rows) => {
            let mut s = state.write();
            s.entries = rank_entries(rows);
            s.error = None;
            s.loading = false;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch leaderboard: {}", e);
            let mut s = state.write();
            s.error = Some(e.to_string());
            s.loading = false;
        }
    }
}

fn rank_entries(mut rows: Vec<TreeRow>) -> Vec<LeaderboardEntry> {
    // Sort by tree count descending
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    rows.into_iter()
        .take(LEADERBOARD_LIMIT)
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: i + 1,
            address: row.address,
            count: row.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(address: &str, count: u64) -> TreeRow {
        TreeRow {
            address: address.to_string(),
            count,
        }
    }

    #[test]
    fn entries_sorted_descending_with_ranks() {
        let ranked = rank_entries(vec![row("a", 3), row("b", 9), row("c", 6)]);

        assert_eq!(
            ranked.iter().map(|e| e.address.as_str()).collect::<Vec<_>>(),
            vec!["b", "c", "a"]
        );
        assert_eq!(
            ranked.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn capped_at_limit() {
        let rows = (0..25).map(|i| row(&format!("addr{i}"), i)).collect();
        let ranked = rank_entries(rows);

        assert_eq!(ranked.len(), LEADERBOARD_LIMIT);
        assert_eq!(ranked[0].count, 24);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn empty_store_gives_empty_board() {
        assert!(rank_entries(Vec::new()).is_empty());
    }
}
