#![allow(non_snake_case)]

mod components;
mod hooks;
mod pages;
mod route;

use dioxus::prelude::*;
use hooks::{ChainClient, LeaderboardState, TreeStore};
use route::Route;

// Configuration
pub const RPC_URL: &str = "https://api.devnet.solana.com";
pub const EXPLORER_CLUSTER: &str = "devnet";

// Counter store credentials are baked in at build time, like the rest of
// the front-end configuration.
pub const SUPABASE_URL: &str = match option_env!("SUPABASE_URL") {
    Some(url) => url,
    None => "https://project.supabase.co",
};
pub const SUPABASE_ANON_KEY: &str = match option_env!("SUPABASE_ANON_KEY") {
    Some(key) => key,
    None => "",
};

/// Lamports moved by the symbolic self-transfer. 1 lamport is enough to
/// produce a verifiable signature on devnet.
pub const PLANT_LAMPORTS: u64 = 1;

fn main() {
    #[cfg(feature = "web")]
    {
        tracing_wasm::set_as_global_default();
        dioxus::launch(App);
    }

    #[cfg(feature = "desktop")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    // Global state providers
    use_context_provider(|| Signal::new(WalletState::default()));
    use_context_provider(|| Signal::new(TreeState::default()));
    use_context_provider(|| Signal::new(LeaderboardState::default()));

    // Clients are built once here and handed down, never reached for as
    // globals.
    use_context_provider(|| ChainClient::new(RPC_URL));
    use_context_provider(|| TreeStore::new(SUPABASE_URL, SUPABASE_ANON_KEY));

    rsx! {
        Router::<Route> {}
    }
}

// Global state types
#[derive(Clone, Default, Debug)]
pub struct WalletState {
    pub connected: bool,
    pub pubkey: Option<String>,
}

/// The connected wallet's tree counter, mirrored from the remote store.
#[derive(Clone, Debug)]
pub struct TreeState {
    pub count: u64,
    pub loading: bool,
}

impl Default for TreeState {
    fn default() -> Self {
        Self {
            count: 0,
            loading: true,
        }
    }
}
