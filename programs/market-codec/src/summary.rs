//! Listing view of decoded markets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

use crate::{
    amount::{to_ui_amount, to_ui_amount_wide},
    state::{Market, MarketStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub id: Pubkey,
    pub creator: Pubkey,
    pub question: String,
    pub status: MarketStatus,
    pub yes_price: f64,
    pub no_price: f64,
    pub yes_pool: Decimal,
    pub no_pool: Decimal,
    pub volume: Decimal,
    pub created_at: UnixTimestamp,
}

impl MarketSummary {
    pub fn from_market(id: Pubkey, market: &Market) -> Self {
        let yes_price = market.implied_price();
        Self {
            id,
            creator: market.creator,
            question: market.question.clone(),
            status: market.status,
            yes_price,
            no_price: 1.0 - yes_price,
            yes_pool: to_ui_amount(market.yes_pool_amount),
            no_pool: to_ui_amount(market.no_pool_amount),
            volume: to_ui_amount_wide(market.total_pool()),
            created_at: market.created_at,
        }
    }

    /// `None` if the stored timestamp is outside chrono's range.
    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

/// Which markets a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketFilter {
    All,
    /// Markets created by the connected wallet. `None` (no wallet) shows nothing.
    CreatedBy(Option<Pubkey>),
}

pub fn filter_summaries<'a>(
    summaries: &'a [MarketSummary],
    filter: MarketFilter,
) -> Vec<&'a MarketSummary> {
    match filter {
        MarketFilter::All => summaries.iter().collect(),
        MarketFilter::CreatedBy(None) => Vec::new(),
        MarketFilter::CreatedBy(Some(wallet)) => {
            summaries.iter().filter(|s| s.creator == wallet).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn market(creator: Pubkey, yes: u64, no: u64) -> Market {
        Market {
            creator,
            question: "Q?".to_string(),
            base_mint: Pubkey::new_unique(),
            yes_pool_amount: yes,
            no_pool_amount: no,
            total_yes_shares: 0,
            total_no_shares: 0,
            status: MarketStatus::Open,
            created_at: 10,
            resolve_at: 20,
            resolver: creator,
            fee_paid: false,
        }
    }

    #[test]
    fn test_summary_prices_and_volume() {
        let id = Pubkey::new_unique();
        let summary = MarketSummary::from_market(id, &market(Pubkey::new_unique(), 700_000_000_000, 300_000_000_000));

        assert_eq!(summary.id, id);
        assert_eq!(summary.yes_price, 0.7);
        assert!((summary.no_price - 0.3).abs() < 1e-12);
        assert_eq!(summary.yes_pool, Decimal::from(700));
        assert_eq!(summary.volume, Decimal::from_str("1000").unwrap());
        assert_eq!(summary.created_date().unwrap().timestamp(), 10);
    }

    #[test]
    fn test_filter() {
        let me = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let summaries = vec![
            MarketSummary::from_market(Pubkey::new_unique(), &market(me, 1, 1)),
            MarketSummary::from_market(Pubkey::new_unique(), &market(other, 1, 1)),
        ];

        assert_eq!(filter_summaries(&summaries, MarketFilter::All).len(), 2);
        assert!(filter_summaries(&summaries, MarketFilter::CreatedBy(None)).is_empty());

        let mine = filter_summaries(&summaries, MarketFilter::CreatedBy(Some(me)));
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].creator, me);
    }
}
