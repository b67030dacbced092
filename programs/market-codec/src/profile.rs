//! Per-wallet profile statistics.

use rust_decimal::Decimal;
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

use crate::{
    amount::to_ui_amount_wide,
    leaderboard::percentage,
    state::{Market, MarketStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeResult {
    Win,
    Loss,
}

/// A resolved market created by the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub id: Pubkey,
    pub question: String,
    pub outcome: Outcome,
    pub result: TradeResult,
    /// Total pool in UI units
    pub amount: Decimal,
    pub created_at: UnixTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub wallet: Pubkey,
    pub total_markets: u32,
    pub resolved_markets: u32,
    pub total_volume: Decimal,
    pub history: Vec<ResolvedEntry>,
}

impl ProfileStats {
    /// Collect stats over `(address, market)` pairs for markets `wallet` created.
    pub fn for_wallet<'a, I>(wallet: &Pubkey, markets: I) -> Self
    where
        I: IntoIterator<Item = (&'a Pubkey, &'a Market)>,
    {
        let mut stats = Self {
            wallet: *wallet,
            total_markets: 0,
            resolved_markets: 0,
            total_volume: Decimal::ZERO,
            history: Vec::new(),
        };

        for (id, market) in markets {
            if market.question.is_empty() || market.creator != *wallet {
                continue;
            }

            let volume = to_ui_amount_wide(market.total_pool());
            stats.total_markets += 1;
            stats.total_volume += volume;

            let outcome = match market.status {
                MarketStatus::Open => continue,
                MarketStatus::ResolvedYes => Outcome::Yes,
                MarketStatus::ResolvedNo => Outcome::No,
            };
            stats.resolved_markets += 1;
            stats.history.push(ResolvedEntry {
                id: *id,
                question: market.question.clone(),
                outcome,
                result: if market.resolved_with_majority() {
                    TradeResult::Win
                } else {
                    TradeResult::Loss
                },
                amount: volume,
                created_at: market.created_at,
            });
        }

        stats
    }

    pub fn wins(&self) -> u32 {
        self.history
            .iter()
            .filter(|e| e.result == TradeResult::Win)
            .count() as u32
    }

    pub fn losses(&self) -> u32 {
        self.history.len() as u32 - self.wins()
    }

    /// Percentage of history entries won, one decimal place
    pub fn win_rate(&self) -> Decimal {
        percentage(self.wins(), self.history.len() as u32)
    }

    /// Flat 10% of volume
    pub fn estimated_pnl(&self) -> Decimal {
        self.total_volume * Decimal::new(1, 1)
    }
}
