use dioxus::prelude::*;

use super::store::TreeStore;
use crate::{TreeState, WalletState};

/// Keep the tree counter in sync with the remote store.
///
/// Refetches whenever the connected wallet changes. There is no polling:
/// the store is only re-read on connect and when a plant action reconciles
/// after a failed write.
pub fn use_tree_count() -> Signal<TreeState> {
    let mut tree = use_context::<Signal<TreeState>>();
    let wallet = use_context::<Signal<WalletState>>();
    let store = use_context::<TreeStore>();

    // Extract wallet pubkey as a memo to avoid borrow conflicts
    let wallet_pubkey = use_memo(move || wallet.read().pubkey.clone());

    let _resource = use_resource(move || {
        let store = store.clone();
        async move {
            let Some(address) = wallet_pubkey() else {
                return;
            };

            tree.write().loading = true;
            match store.fetch_count(&address).await {
                Ok(count) => {
                    let mut t = tree.write();
                    t.count = count;
                    t.loading = false;
                }
                Err(e) => {
                    // Not user-fatal. The garden renders with a zero count
                    // and the next successful plant re-syncs.
                    tracing::warn!("Failed to load tree count: {}", e);
                    tree.write().loading = false;
                }
            }
        }
    });

    tree
}
