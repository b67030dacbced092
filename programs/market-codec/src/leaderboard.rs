//! Creator leaderboard built from decoded markets.
//!
//! Volume is the sum of both pools in UI units. A resolved market counts as a
//! win for its creator when it resolved to the side with the larger pool.

use std::{cmp::Ordering, collections::BTreeMap};

use rust_decimal::{Decimal, RoundingStrategy};
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

use crate::{amount::to_ui_amount_wide, state::Market};

pub const WEEK_SECS: i64 = 7 * 24 * 60 * 60;
pub const MONTH_SECS: i64 = 30 * 24 * 60 * 60;

/// All-time and windowed statistics for one creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorStats {
    pub address: Pubkey,
    pub markets_created: u32,
    pub total_volume: Decimal,
    pub resolved_markets: u32,
    pub winning_markets: u32,
    pub markets_this_week: u32,
    pub markets_this_month: u32,
    pub volume_this_week: Decimal,
    pub volume_this_month: Decimal,
}

impl CreatorStats {
    fn new(address: Pubkey) -> Self {
        Self {
            address,
            markets_created: 0,
            total_volume: Decimal::ZERO,
            resolved_markets: 0,
            winning_markets: 0,
            markets_this_week: 0,
            markets_this_month: 0,
            volume_this_week: Decimal::ZERO,
            volume_this_month: Decimal::ZERO,
        }
    }

    fn record(&mut self, market: &Market, now: UnixTimestamp) {
        let volume = to_ui_amount_wide(market.total_pool());

        self.markets_created += 1;
        self.total_volume += volume;

        if market.status.is_resolved() {
            self.resolved_markets += 1;
            if market.resolved_with_majority() {
                self.winning_markets += 1;
            }
        }

        if market.created_at >= now.saturating_sub(WEEK_SECS) {
            self.markets_this_week += 1;
            self.volume_this_week += volume;
        }
        if market.created_at >= now.saturating_sub(MONTH_SECS) {
            self.markets_this_month += 1;
            self.volume_this_month += volume;
        }
    }

    /// Percentage of resolved markets won, one decimal place. Zero when
    /// nothing has resolved.
    pub fn win_rate(&self) -> Decimal {
        percentage(self.winning_markets, self.resolved_markets)
    }

    /// `total_volume * 10% * win_rate`
    pub fn estimated_pnl(&self) -> Decimal {
        self.total_volume * Decimal::new(1, 1) * self.win_rate() / Decimal::ONE_HUNDRED
    }
}

/// `part / whole * 100`, rounded half away from zero to one decimal
pub fn percentage(part: u32, whole: u32) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Same order as `Volume`
    #[default]
    Rank,
    Volume,
    Markets,
    WinRate,
    Pnl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub period: Period,
    /// Case-insensitive substring of the creator's base58 address
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

/// One ranked row. `markets_created` and `total_volume` reflect the queried
/// period; win rate and PnL are all-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub address: Pubkey,
    pub markets_created: u32,
    pub total_volume: Decimal,
    pub resolved_markets: u32,
    pub winning_markets: u32,
    pub win_rate: Decimal,
    pub estimated_pnl: Decimal,
}

pub struct Leaderboard {
    stats: Vec<CreatorStats>,
}

impl Leaderboard {
    pub fn from_markets<'a, I>(markets: I, now: UnixTimestamp) -> Self
    where
        I: IntoIterator<Item = &'a Market>,
    {
        let mut by_creator: BTreeMap<Pubkey, CreatorStats> = BTreeMap::new();
        for market in markets {
            if market.question.is_empty() {
                continue;
            }
            by_creator
                .entry(market.creator)
                .or_insert_with(|| CreatorStats::new(market.creator))
                .record(market, now);
        }

        Self {
            stats: by_creator.into_values().collect(),
        }
    }

    pub fn stats(&self) -> &[CreatorStats] {
        &self.stats
    }

    pub fn creator(&self, address: &Pubkey) -> Option<&CreatorStats> {
        self.stats.iter().find(|s| s.address == *address)
    }

    pub fn query(&self, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<LeaderboardEntry> = self
            .stats
            .iter()
            .filter_map(|s| {
                let (markets_created, total_volume) = match query.period {
                    Period::All => (s.markets_created, s.total_volume),
                    Period::Week => (s.markets_this_week, s.volume_this_week),
                    Period::Month => (s.markets_this_month, s.volume_this_month),
                };
                if markets_created == 0 {
                    return None;
                }
                if let Some(term) = &search {
                    if !s.address.to_string().to_lowercase().contains(term.as_str()) {
                        return None;
                    }
                }
                Some(LeaderboardEntry {
                    rank: 0,
                    address: s.address,
                    markets_created,
                    total_volume,
                    resolved_markets: s.resolved_markets,
                    winning_markets: s.winning_markets,
                    win_rate: s.win_rate(),
                    estimated_pnl: s.estimated_pnl(),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }
        rows
    }
}

fn compare(a: &LeaderboardEntry, b: &LeaderboardEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Rank | SortKey::Volume => a.total_volume.cmp(&b.total_volume),
        SortKey::Markets => a.markets_created.cmp(&b.markets_created),
        SortKey::WinRate => a.win_rate.cmp(&b.win_rate),
        SortKey::Pnl => a.estimated_pnl.cmp(&b.estimated_pnl),
    }
}
