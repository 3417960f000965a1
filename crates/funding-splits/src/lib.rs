//! Allocation math for crowdfunding project payouts.
//!
//! Converts between fixed-point percents, wad amounts and fee-adjusted
//! amounts for payout splits and reserved-token mods, validates split
//! groups, rebalances splits when the distribution limit changes and
//! round-trips split lists through CSV.

pub mod amount;
pub mod config;
pub mod constants;
pub mod csv;
pub mod distributions;
pub mod errors;
pub mod funding_cycle;
pub mod payouts;
pub mod percent;
pub mod state;
mod utils;

pub use amount::Amount;
pub use config::AllocationConfig;
pub use errors::{ErrorCode, Result};
pub use percent::{FeePercent, FixedPercent, Permyriad, SplitPercent};
pub use state::{Address, Allocation, PayoutMod, Split, TicketMod};
pub use utils::{calculate_split_amount, sum_split_percents};
