use dioxus::prelude::*;

use crate::components::Layout;
use crate::pages::{Garden, Home, Leaderboard};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Garden {},  // Game first - planting is the whole point
    #[route("/about")]
    Home {},
    #[route("/leaderboard")]
    Leaderboard {},
}
