pub mod mint_burn;
pub mod pool;
pub mod position;
pub mod token;

// Re-export for easier access
pub use mint_burn::{MintBurnEvent, MintsAndBurns};
pub use pool::{PoolState, ShareValue};
pub use position::{MiningPositionSnapshot, PositionSnapshot, RawSnapshotEvent};
pub use token::PoolToken;
