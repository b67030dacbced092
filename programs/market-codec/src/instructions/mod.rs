use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    clock::UnixTimestamp,
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    amount::to_raw_amount,
    discriminator::{CREATE_MARKET_DISCRIMINATOR, DISCRIMINATOR_LEN},
    error::EncodeError,
    pda,
};

/// Markets resolve a fixed seven days after creation.
pub const RESOLUTION_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

/// Arguments of the create-market instruction, in wire order after the
/// discriminator.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketArgs {
    pub question: String,
    pub resolve_at: UnixTimestamp,
    /// Raw units (whole tokens * 10^9)
    pub initial_liquidity: u64,
}

impl CreateMarketArgs {
    /// Validate user input and fix the resolution time relative to `now`.
    pub fn new(
        question: &str,
        initial_liquidity_whole: u64,
        now: UnixTimestamp,
    ) -> Result<Self, EncodeError> {
        if u32::try_from(question.len()).is_err() {
            return Err(EncodeError::TextTooLarge(question.len()));
        }
        let initial_liquidity = to_raw_amount(initial_liquidity_whole)?;
        let resolve_at = now
            .checked_add(RESOLUTION_WINDOW_SECS)
            .ok_or(EncodeError::TimestampOverflow(now))?;

        Ok(Self {
            question: question.to_owned(),
            resolve_at,
            initial_liquidity,
        })
    }

    /// `8 + 4 + len(question) + 8 + 8`
    pub fn packed_len(&self) -> usize {
        DISCRIMINATOR_LEN + 4 + self.question.len() + 8 + 8
    }

    /// Discriminator followed by the borsh-encoded arguments
    pub fn pack(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(self.packed_len());
        buf.extend_from_slice(&CREATE_MARKET_DISCRIMINATOR);
        self.serialize(&mut buf)
            .map_err(|e| EncodeError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Parse instruction data produced by [`CreateMarketArgs::pack`]
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < DISCRIMINATOR_LEN || input[..DISCRIMINATOR_LEN] != CREATE_MARKET_DISCRIMINATOR {
            return Err(ProgramError::InvalidInstructionData);
        }
        Self::try_from_slice(&input[DISCRIMINATOR_LEN..])
            .map_err(|_| ProgramError::InvalidInstructionData)
    }
}

/// Encode the create-market instruction payload.
///
/// `now` is the caller's wall-clock unix time; the payload carries
/// `now + RESOLUTION_WINDOW_SECS` as the resolution deadline.
pub fn encode_create_market(
    question: &str,
    initial_liquidity_whole: u64,
    now: UnixTimestamp,
) -> Result<Vec<u8>, EncodeError> {
    CreateMarketArgs::new(question, initial_liquidity_whole, now)?.pack()
}

/// Accounts referenced by create-market, all already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateMarketAccounts {
    /// Fresh keypair address for the market account
    pub market: Pubkey,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub creator_token_account: Pubkey,
    pub escrow_token_account: Pubkey,
}

impl CreateMarketAccounts {
    /// Resolve the creator token account and escrow PDA.
    pub fn derive(program_id: &Pubkey, market: Pubkey, creator: Pubkey, base_mint: Pubkey) -> Self {
        let (escrow_token_account, _) = pda::escrow_address(program_id, &market);
        Self {
            market,
            creator,
            base_mint,
            creator_token_account: pda::creator_token_account(&creator, &base_mint),
            escrow_token_account,
        }
    }

    /// Accounts:
    /// 0. `[signer, writable]` Market
    /// 1. `[signer, writable]` Creator
    /// 2. `[]` Base mint
    /// 3. `[writable]` Creator token account
    /// 4. `[writable]` Escrow token account
    /// 5. `[]` Token program
    /// 6. `[]` System program
    /// 7. `[]` Rent sysvar
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.market, true),
            AccountMeta::new(self.creator, true),
            AccountMeta::new_readonly(self.base_mint, false),
            AccountMeta::new(self.creator_token_account, false),
            AccountMeta::new(self.escrow_token_account, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(solana_program::system_program::id(), false),
            AccountMeta::new_readonly(solana_program::sysvar::rent::id(), false),
        ]
    }

    /// Keys that must sign: the market keypair and the creator.
    pub fn signers(&self) -> [Pubkey; 2] {
        [self.market, self.creator]
    }
}

/// Create market instruction
pub fn create_market(
    program_id: &Pubkey,
    accounts: &CreateMarketAccounts,
    question: &str,
    initial_liquidity_whole: u64,
    now: UnixTimestamp,
) -> Result<Instruction, EncodeError> {
    let data = encode_create_market(question, initial_liquidity_whole, now)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data,
    })
}
