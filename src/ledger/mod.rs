pub mod block;
pub mod model;

use std::time::Duration;

pub use block::Block;
pub use model::Ledger;

/// Marker used as `previous_hash` of the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Decorative difficulty reported by the mining status API. No work-search
/// runs against it; the simulation behavior of the source system is kept.
pub const DEFAULT_DIFFICULTY: u32 = 1;

/// Amount credited to the validator by the standing reward transaction.
pub const DEFAULT_REWARD: f64 = 1.0;

/// Continuous mining mines unconditionally on every tick.
pub const CONTINUOUS_MINE_INTERVAL: Duration = Duration::from_secs(10);

/// Discrete mining sweeps the pool and mines only when it is non-empty.
pub const DISCRETE_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Out-of-band confirmation delay after a point-of-sale submission when
/// discrete mining is enabled. Latency optimization only; the next sweep
/// would pick the transaction up regardless.
pub const POS_CONFIRM_DELAY: Duration = Duration::from_millis(500);

/// Origin recorded on point-of-sale transactions, keeping a missing
/// `from_address` exclusive to reward transactions.
pub const POS_ORIGIN_ADDRESS: &str = "pos";
