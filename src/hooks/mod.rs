mod rpc;
mod store;
mod use_leaderboard;
mod use_plant;
mod use_tree_count;

pub use rpc::{ChainClient, RpcError};
pub use store::{StoreError, TreeRow, TreeStore};
pub use use_leaderboard::{refresh_leaderboard, use_leaderboard, LeaderboardState, LEADERBOARD_LIMIT};
pub use use_plant::{plant_transaction, PlantError};
pub use use_tree_count::use_tree_count;
