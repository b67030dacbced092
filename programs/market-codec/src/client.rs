//! Market client over the ledger collaborators.
//!
//! The crate performs no I/O. Account bytes come in through [`AccountSource`]
//! and signed submission goes out through [`TransactionSubmitter`]; both are
//! implemented by the embedding application (RPC client, wallet adapter).

use solana_program::{clock::UnixTimestamp, instruction::Instruction, pubkey::Pubkey};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, DecodeError},
    instructions::{create_market, CreateMarketAccounts},
    session::Session,
    state::Market,
    summary::MarketSummary,
};

type Result<T> = std::result::Result<T, ClientError>;

/// Ledger-query collaborator
pub trait AccountSource {
    /// Every account owned by `program_id`, as `(address, data)` pairs.
    fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<(Pubkey, Vec<u8>)>>;

    /// Data of a single account, `None` if it does not exist.
    fn account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;
}

/// Wallet / submission collaborator
pub trait TransactionSubmitter {
    /// Sign with `signers`, submit, and return the transaction signature.
    fn submit(&self, instruction: Instruction, signers: &[Pubkey]) -> Result<String>;
}

/// Current wall-clock unix time, for callers that do not carry their own clock.
pub fn unix_now() -> UnixTimestamp {
    chrono::Utc::now().timestamp()
}

/// A decoded market together with its account address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketInfo {
    pub pubkey: Pubkey,
    pub market: Market,
}

/// Decode a batch of program accounts.
///
/// Malformed accounts are skipped, as are markets with an empty question or
/// created before `cutoff`. The result is ordered newest first.
pub fn decode_accounts(
    accounts: Vec<(Pubkey, Vec<u8>)>,
    cutoff: UnixTimestamp,
    validate_discriminator: bool,
) -> Vec<MarketInfo> {
    let total = accounts.len();
    let mut markets = Vec::with_capacity(total);

    for (pubkey, data) in accounts {
        let market = match Market::unpack_with(&data, validate_discriminator) {
            Ok(market) => market,
            Err(DecodeError::WrongDiscriminator { .. }) => {
                // Other account types owned by the same program
                debug!(account = %pubkey, "Skipping non-market account");
                continue;
            }
            Err(e) => {
                warn!(account = %pubkey, error = %e, "Skipping malformed market account");
                continue;
            }
        };

        if market.question.is_empty() || market.created_at < cutoff {
            continue;
        }

        debug!(account = %pubkey, created_at = market.created_at, "Decoded market");
        markets.push(MarketInfo { pubkey, market });
    }

    markets.sort_by(|a, b| b.market.created_at.cmp(&a.market.created_at));

    info!(total, decoded = markets.len(), "Decoded market accounts");
    markets
}

pub struct MarketClient<S> {
    source: S,
}

impl<S: AccountSource> MarketClient<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all markets from the program
    pub fn list_markets(&self, session: &Session) -> Result<Vec<MarketInfo>> {
        let config = &session.config;
        let program_id = config.program_id()?;

        let accounts = self.source.program_accounts(&program_id)?;
        Ok(decode_accounts(
            accounts,
            config.market_cutoff_timestamp,
            config.validate_discriminator,
        ))
    }

    pub fn list_summaries(&self, session: &Session) -> Result<Vec<MarketSummary>> {
        Ok(self
            .list_markets(session)?
            .iter()
            .map(|info| MarketSummary::from_market(info.pubkey, &info.market))
            .collect())
    }

    /// Get a specific market
    pub fn get_market(&self, session: &Session, address: &Pubkey) -> Result<Market> {
        let data = self
            .source
            .account(address)?
            .ok_or(ClientError::AccountNotFound(*address))?;

        let market = Market::unpack_with(&data, session.config.validate_discriminator)?;
        Ok(market)
    }

    /// Markets created by `creator`, newest first
    pub fn markets_by_creator(&self, session: &Session, creator: &Pubkey) -> Result<Vec<MarketInfo>> {
        Ok(self
            .list_markets(session)?
            .into_iter()
            .filter(|info| info.market.creator == *creator)
            .collect())
    }

    /// Build and submit a create-market instruction for the connected wallet.
    ///
    /// `market` is the address of a fresh keypair the submitter can sign for.
    pub fn create_market<T: TransactionSubmitter>(
        &self,
        session: &Session,
        submitter: &T,
        market: Pubkey,
        question: &str,
        initial_liquidity_whole: u64,
        now: UnixTimestamp,
    ) -> Result<String> {
        let creator = session.require_wallet()?;
        let program_id = session.config.program_id()?;
        let base_mint = session.config.base_mint()?;

        let accounts = CreateMarketAccounts::derive(&program_id, market, creator, base_mint);
        let instruction = create_market(
            &program_id,
            &accounts,
            question,
            initial_liquidity_whole,
            now,
        )?;

        let signature = submitter.submit(instruction, &accounts.signers())?;
        info!(
            market = %market,
            creator = %creator,
            signature = %signature,
            "Market created"
        );
        Ok(signature)
    }
}
