use dioxus::prelude::*;

use crate::TreeState;

pub const TREES_PER_LEVEL: u64 = 5;

#[component]
pub fn PlanterStats() -> Element {
    let tree = use_context::<Signal<TreeState>>();
    let tree_read = tree.read();

    let level = planter_level(tree_read.count);
    let to_next = trees_to_next_level(tree_read.count);

    rsx! {
        div { class: "card",
            h3 { class: "text-lg font-semibold text-green-400 mb-4", "Progress" }

            if tree_read.loading {
                div { class: "animate-pulse space-y-3",
                    div { class: "h-4 bg-gray-700 rounded w-3/4" }
                    div { class: "h-4 bg-gray-700 rounded w-1/2" }
                }
            } else {
                div { class: "space-y-3",
                    StatRow {
                        label: "Trees Planted",
                        value: format!("{}", tree_read.count),
                        highlight: tree_read.count > 0,
                    }
                    StatRow {
                        label: "Planter Level",
                        value: format!("{}", level),
                    }
                    StatRow {
                        label: "Next level in",
                        value: format!("{} trees", to_next),
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct StatRowProps {
    label: &'static str,
    value: String,
    #[props(default = false)]
    highlight: bool,
}

#[component]
fn StatRow(props: StatRowProps) -> Element {
    let value_class = if props.highlight {
        "text-green-400 font-semibold"
    } else {
        "text-gray-300"
    };

    rsx! {
        div { class: "flex justify-between items-center",
            span { class: "text-gray-500", "{props.label}" }
            span { class: "{value_class} font-mono", "{props.value}" }
        }
    }
}

/// Every five trees advances the planter one level; a fresh wallet starts
/// at level 1.
pub fn planter_level(count: u64) -> u64 {
    count / TREES_PER_LEVEL + 1
}

fn trees_to_next_level(count: u64) -> u64 {
    TREES_PER_LEVEL - count % TREES_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_wallet_is_level_one() {
        assert_eq!(planter_level(0), 1);
        assert_eq!(planter_level(4), 1);
    }

    #[test]
    fn fifth_tree_levels_up() {
        assert_eq!(planter_level(5), 2);
        assert_eq!(planter_level(9), 2);
        assert_eq!(planter_level(10), 3);
    }

    #[test]
    fn next_level_countdown() {
        assert_eq!(trees_to_next_level(0), 5);
        assert_eq!(trees_to_next_level(4), 1);
        assert_eq!(trees_to_next_level(5), 5);
    }
}
