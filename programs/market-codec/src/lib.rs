//! Client-side codec for the prediction market program: decodes market
//! accounts and encodes create-market instructions.

pub mod amount;
pub mod client;
pub mod config;
pub mod discriminator;
pub mod error;
pub mod instructions;
pub mod leaderboard;
pub mod pda;
pub mod profile;
pub mod session;
pub mod state;
pub mod summary;

// Market program ID
solana_program::declare_id!("6d5P8J92SyZFc1Cz3EHJzjySTkjzxaJDwizfQQUzXNev");

pub use crate::error::*;
pub use crate::instructions::{encode_create_market, CreateMarketAccounts, CreateMarketArgs};
pub use crate::state::{implied_price, Market, MarketStatus};

/// Decode one market account.
pub fn decode(data: &[u8]) -> Result<Market, DecodeError> {
    Market::unpack(data)
}
