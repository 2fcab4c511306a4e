mod layout;
mod planter_stats;
mod wallet_button;

pub use layout::Layout;
pub use planter_stats::{planter_level, PlanterStats};
pub use wallet_button::sign_and_send_transaction;
pub use wallet_button::{WalletButton, WalletError};
