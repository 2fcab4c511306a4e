use dioxus::prelude::*;

use crate::components::planter_level;
use crate::route::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "max-w-4xl mx-auto text-center py-16",
            // Hero
            h1 { class: "text-5xl font-bold mb-6",
                span { class: "text-green-400", "Plant" }
                span { class: "text-gray-100", " a Tree" }
            }

            p { class: "text-xl text-gray-400 mb-8 max-w-2xl mx-auto",
                "A symbolic planting game on Solana devnet. Every tree is a "
                "confirmed transaction signed by your own wallet, and every "
                "planter grows a garden on the shared leaderboard."
            }

            // CTA buttons
            div { class: "flex justify-center gap-4 mb-16",
                Link {
                    to: Route::Garden {},
                    class: "btn btn-primary text-lg px-8 py-3",
                    "Start Planting"
                }
                Link {
                    to: Route::Leaderboard {},
                    class: "btn btn-secondary text-lg px-8 py-3",
                    "View Leaderboard"
                }
            }

            // How it works
            div { class: "grid md:grid-cols-3 gap-8 mt-16",
                FeatureCard {
                    title: "Connect",
                    description: "Link your Phantom wallet. The game runs entirely on the devnet cluster.",
                    icon: "👛",
                }
                FeatureCard {
                    title: "Plant",
                    description: "One click, one minimal transaction, one tree in your garden.",
                    icon: "🌱",
                }
                FeatureCard {
                    title: "Grow",
                    description: "Five trees per planter level. Top gardens make the leaderboard.",
                    icon: "🌳",
                }
            }

            // Level breakdown
            div { class: "mt-16 card max-w-xl mx-auto",
                h3 { class: "text-xl font-semibold text-green-400 mb-4", "Planter Levels" }
                div { class: "text-left space-y-2 text-gray-300",
                    p {
                        span { class: "text-gray-500", "Level: " }
                        "one per five trees planted"
                    }
                    p {
                        span { class: "text-gray-500", "Fresh garden: " }
                        {format!("level {}", planter_level(0))}
                    }
                    p {
                        span { class: "text-gray-500", "Five trees: " }
                        {format!("level {}", planter_level(5))}
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FeatureCardProps {
    title: &'static str,
    description: &'static str,
    icon: &'static str,
}

#[component]
fn FeatureCard(props: FeatureCardProps) -> Element {
    rsx! {
        div { class: "card text-center",
            div { class: "text-4xl mb-4", "{props.icon}" }
            h3 { class: "text-lg font-semibold text-green-400 mb-2", "{props.title}" }
            p { class: "text-gray-400", "{props.description}" }
        }
    }
}
