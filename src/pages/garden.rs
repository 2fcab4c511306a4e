use dioxus::prelude::*;

use crate::components::PlanterStats;
use crate::hooks::{
    plant_transaction, refresh_leaderboard, use_tree_count, ChainClient, LeaderboardState,
    TreeStore,
};
use crate::{WalletState, PLANT_LAMPORTS};

#[component]
pub fn Garden() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let chain = use_context::<ChainClient>();
    let store = use_context::<TreeStore>();
    let leaderboard = use_context::<Signal<LeaderboardState>>();
    let mut tree = use_tree_count();

    let mut submitting = use_signal(|| false);
    let mut status = use_signal(String::new);
    let mut last_tx = use_signal(|| None::<String>);

    let wallet_read = wallet.read();
    let wallet_connected = wallet_read.connected;
    let wallet_pubkey = wallet_read.pubkey.clone();
    drop(wallet_read);

    let plant = {
        let wallet_pubkey = wallet_pubkey.clone();
        let chain = chain.clone();
        let store = store.clone();
        move |_| {
            // Debounced: the button is disabled while a plant is in
            // flight, and a second click is dropped here regardless.
            if *submitting.read() {
                return;
            }

            let Some(owner) = wallet_pubkey.clone() else {
                status.set("Connect your wallet first.".to_string());
                return;
            };

            submitting.set(true);
            status.set("Planting tree...".to_string());
            last_tx.set(None);

            let chain = chain.clone();
            let store = store.clone();
            spawn(async move {
                match plant_transaction(&chain, &owner, PLANT_LAMPORTS).await {
                    Ok(sig) => {
                        // One increment per confirmed transaction.
                        let new_count = tree.read().count + 1;
                        tree.write().count = new_count;

                        if let Err(e) = store.upsert_count(&owner, new_count).await {
                            // The tree is on chain but the counter write
                            // failed. Reconcile from the store instead of
                            // trusting the optimistic bump.
                            tracing::warn!("Failed to persist tree count: {}", e);
                            if let Ok(authoritative) = store.fetch_count(&owner).await {
                                tree.write().count = authoritative;
                            }
                        }

                        status.set(format!("🌳 Tree Planted! Total: {}", tree.read().count));
                        last_tx.set(Some(sig));

                        refresh_leaderboard(&store, leaderboard).await;
                    }
                    Err(e) => {
                        tracing::error!("Transaction failed: {}", e);
                        status.set("Transaction failed.".to_string());
                    }
                }
                submitting.set(false);
            });
        }
    };

    rsx! {
        div { class: "max-w-2xl mx-auto text-center",
            h1 { class: "text-4xl font-bold mb-8", "🌱 Plant a Tree Game" }

            if !wallet_connected {
                p { class: "text-gray-400 mt-8",
                    "Connect your wallet to start planting trees!"
                }
            } else {
                div { class: "space-y-6",
                    // Mission card
                    div { class: "card border-2 border-green-500/40 rounded-xl p-6 text-left",
                        h3 { class: "text-xl font-semibold text-green-400 mb-3", "🌳 Mission: Plant Trees" }
                        p { class: "text-gray-400 mb-2",
                            "Each tree you plant is tracked on-chain and stored in the garden database."
                        }
                        p { class: "text-gray-500 text-sm", "Connected wallet:" }
                        code { class: "text-green-300 text-sm break-all",
                            {wallet_pubkey.clone().unwrap_or_default()}
                        }
                    }

                    PlanterStats {}

                    // Plant controls
                    div { class: "card p-6",
                        button {
                            class: "w-full controls-primary py-3 rounded-lg font-semibold transition-all hover:scale-[1.02]",
                            disabled: *submitting.read() || tree.read().loading,
                            onclick: plant,
                            if *submitting.read() { "Planting..." } else { "Plant a Tree" }
                        }

                        // Single status line, overwritten on each attempt
                        if !status.read().is_empty() {
                            p { class: "mt-3 text-gray-300", "{status}" }
                        }

                        if let Some(sig) = last_tx.read().as_ref() {
                            {
                                let explorer_url = format!(
                                    "https://explorer.solana.com/tx/{}?cluster={}",
                                    sig,
                                    crate::EXPLORER_CLUSTER
                                );
                                rsx! {
                                    div { class: "mt-3 p-2 bg-green-500/10 border border-green-500/30 rounded text-sm",
                                        a {
                                            href: "{explorer_url}",
                                            target: "_blank",
                                            class: "text-green-400 underline",
                                            "View transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
