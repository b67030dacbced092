use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

use crate::{
    discriminator::{DISCRIMINATOR_LEN, MARKET_ACCOUNT_DISCRIMINATOR},
    error::{DecodeError, Field},
};

/// Resolution state of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum MarketStatus {
    Open = 0,
    ResolvedYes = 1,
    ResolvedNo = 2,
}

impl MarketStatus {
    pub fn from_byte(value: u8) -> Result<Self, DecodeError> {
        Self::from_u8(value).ok_or(DecodeError::InvalidStatus(value))
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn is_resolved(self) -> bool {
        self != MarketStatus::Open
    }
}

/// Decoded market account.
///
/// A pure projection of the account bytes at decode time. Re-decode to observe
/// newer ledger state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub creator: Pubkey,
    pub question: String,
    pub base_mint: Pubkey,
    pub yes_pool_amount: u64,
    pub no_pool_amount: u64,
    pub total_yes_shares: u64,
    pub total_no_shares: u64,
    pub status: MarketStatus,
    pub created_at: UnixTimestamp,
    pub resolve_at: UnixTimestamp,
    pub resolver: Pubkey,
    pub fee_paid: bool,
}

/// Account length excluding the question bytes
pub const MARKET_FIXED_LEN: usize = DISCRIMINATOR_LEN +
    32 + // creator
    4 + // question length
    32 + // base_mint
    8 + // yes_pool_amount
    8 + // no_pool_amount
    8 + // total_yes_shares
    8 + // total_no_shares
    1 + // status
    8 + // created_at
    8 + // resolve_at
    32 + // resolver
    1; // fee_paid

/// Sequential reader over account bytes. Every read names the field it is
/// for so truncation errors say where the buffer ran out.
struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize, field: Field) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::TruncatedBuffer { field })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self, field: Field) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn read_u8(&mut self, field: Field) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u32(&mut self, field: Field) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array(field)?))
    }

    fn read_u64(&mut self, field: Field) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array(field)?))
    }

    fn read_i64(&mut self, field: Field) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.read_array(field)?))
    }

    fn read_pubkey(&mut self, field: Field) -> Result<Pubkey, DecodeError> {
        Ok(Pubkey::new_from_array(self.read_array(field)?))
    }

    fn read_bool(&mut self, field: Field) -> Result<bool, DecodeError> {
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }

    /// u32 LE length prefix followed by that many UTF-8 bytes
    fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u32(Field::QuestionLength)? as usize;
        let bytes = self.take(len, Field::Question)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::MalformedString)
    }
}

impl Market {
    /// Decode a market account, rejecting buffers that do not carry the
    /// market discriminator.
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Self::unpack_with(data, true)
    }

    /// Decode a market account without checking the discriminator.
    pub fn unpack_unchecked(data: &[u8]) -> Result<Self, DecodeError> {
        Self::unpack_with(data, false)
    }

    pub(crate) fn unpack_with(data: &[u8], check_discriminator: bool) -> Result<Self, DecodeError> {
        let mut reader = AccountReader::new(data);

        let discriminator: [u8; DISCRIMINATOR_LEN] = reader.read_array(Field::Discriminator)?;
        if check_discriminator && discriminator != MARKET_ACCOUNT_DISCRIMINATOR {
            return Err(DecodeError::WrongDiscriminator { found: discriminator });
        }

        let creator = reader.read_pubkey(Field::Creator)?;
        let question = reader.read_string()?;
        let base_mint = reader.read_pubkey(Field::BaseMint)?;

        // Pools and shares
        let yes_pool_amount = reader.read_u64(Field::YesPoolAmount)?;
        let no_pool_amount = reader.read_u64(Field::NoPoolAmount)?;
        let total_yes_shares = reader.read_u64(Field::TotalYesShares)?;
        let total_no_shares = reader.read_u64(Field::TotalNoShares)?;

        let status = MarketStatus::from_byte(reader.read_u8(Field::Status)?)?;

        let created_at = reader.read_i64(Field::CreatedAt)?;
        let resolve_at = reader.read_i64(Field::ResolveAt)?;

        let resolver = reader.read_pubkey(Field::Resolver)?;
        let fee_paid = reader.read_bool(Field::FeePaid)?;

        // Bytes past fee_paid are allocation slack and are ignored.
        Ok(Self {
            creator,
            question,
            base_mint,
            yes_pool_amount,
            no_pool_amount,
            total_yes_shares,
            total_no_shares,
            status,
            created_at,
            resolve_at,
            resolver,
            fee_paid,
        })
    }

    /// Exact number of bytes [`Market::pack`] writes.
    pub fn packed_len(&self) -> usize {
        MARKET_FIXED_LEN + self.question.len()
    }

    /// Write the account layout, market discriminator included.
    ///
    /// The owning program is the only production writer of these accounts;
    /// this exists for fixtures and round-trip checks. Questions longer than
    /// `u32::MAX` bytes cannot be represented and are not expected here.
    pub fn pack(&self) -> Vec<u8> {
        let mut dst = Vec::with_capacity(self.packed_len());

        dst.extend_from_slice(&MARKET_ACCOUNT_DISCRIMINATOR);
        dst.extend_from_slice(self.creator.as_ref());

        dst.extend_from_slice(&(self.question.len() as u32).to_le_bytes());
        dst.extend_from_slice(self.question.as_bytes());

        dst.extend_from_slice(self.base_mint.as_ref());

        dst.extend_from_slice(&self.yes_pool_amount.to_le_bytes());
        dst.extend_from_slice(&self.no_pool_amount.to_le_bytes());
        dst.extend_from_slice(&self.total_yes_shares.to_le_bytes());
        dst.extend_from_slice(&self.total_no_shares.to_le_bytes());

        dst.push(self.status.to_byte());

        dst.extend_from_slice(&self.created_at.to_le_bytes());
        dst.extend_from_slice(&self.resolve_at.to_le_bytes());

        dst.extend_from_slice(self.resolver.as_ref());
        dst.push(self.fee_paid as u8);

        dst
    }

    /// Combined YES + NO pool in raw units. Wider than u64 so two full pools
    /// cannot overflow.
    pub fn total_pool(&self) -> u128 {
        self.yes_pool_amount as u128 + self.no_pool_amount as u128
    }

    pub fn implied_price(&self) -> f64 {
        implied_price(self)
    }

    /// True when the market resolved to the side holding the larger pool.
    pub fn resolved_with_majority(&self) -> bool {
        match self.status {
            MarketStatus::Open => false,
            MarketStatus::ResolvedYes => self.yes_pool_amount > self.no_pool_amount,
            MarketStatus::ResolvedNo => self.no_pool_amount > self.yes_pool_amount,
        }
    }
}

/// Probability of YES implied by the pools: `yes / (yes + no)`, or exactly
/// 0.5 when both pools are empty.
pub fn implied_price(market: &Market) -> f64 {
    let total = market.total_pool();
    if total == 0 {
        return 0.5;
    }
    market.yes_pool_amount as f64 / total as f64
}
