use dioxus::prelude::*;

use crate::hooks::use_leaderboard;

#[component]
pub fn Leaderboard() -> Element {
    let leaderboard = use_leaderboard();
    let state = leaderboard.read();

    rsx! {
        div { class: "max-w-4xl mx-auto",
            h1 { class: "text-3xl font-bold mb-8", "Top Planters" }

            div { class: "card",
                if state.loading {
                    div { class: "text-center py-12",
                        div { class: "animate-spin w-8 h-8 border-2 border-green-400 border-t-transparent rounded-full mx-auto mb-4" }
                        p { class: "text-gray-500", "Loading leaderboard..." }
                    }
                } else if let Some(error) = &state.error {
                    div { class: "text-center py-12",
                        p { class: "text-red-400", "Error: {error}" }
                    }
                } else if state.entries.is_empty() {
                    div { class: "text-center py-12",
                        p { class: "text-gray-500", "No trees planted yet. Be the first!" }
                    }
                } else {
                    // Header
                    div { class: "grid grid-cols-4 gap-4 pb-3 border-b border-gray-700 text-sm text-gray-500",
                        div { "Rank" }
                        div { class: "col-span-2", "Address" }
                        div { class: "text-right", "Trees" }
                    }

                    // Entries
                    div { class: "divide-y divide-gray-800",
                        for entry in state.entries.iter() {
                            div { class: "grid grid-cols-4 gap-4 py-3 items-center",
                                // Rank
                                div {
                                    if entry.rank <= 3 {
                                        span { class: "text-2xl",
                                            match entry.rank {
                                                1 => "🥇",
                                                2 => "🥈",
                                                3 => "🥉",
                                                _ => "",
                                            }
                                        }
                                    } else {
                                        span { class: "text-gray-400 font-mono", "#{entry.rank}" }
                                    }
                                }

                                // Address
                                div { class: "col-span-2 font-mono text-sm",
                                    {
                                        let addr = &entry.address;
                                        let short = if addr.len() > 16 {
                                            format!("{}...{}", &addr[..8], &addr[addr.len()-8..])
                                        } else {
                                            addr.clone()
                                        };
                                        let url = format!(
                                            "https://explorer.solana.com/address/{}?cluster={}",
                                            addr,
                                            crate::EXPLORER_CLUSTER
                                        );
                                        rsx! {
                                            a {
                                                href: "{url}",
                                                target: "_blank",
                                                class: "text-gray-300 hover:text-green-400 transition-colors",
                                                "{short}"
                                            }
                                        }
                                    }
                                }

                                // Trees planted
                                div { class: "text-right",
                                    span { class: "font-mono text-green-400", "{entry.count}" }
                                    span { class: "ml-1 text-xs", "🌳" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
