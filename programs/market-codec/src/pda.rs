//! Program Derived Address (PDA) utilities
//!
//! Addresses the create-market instruction references but the caller does not
//! hold a key for: the market's escrow token account (owned by the market
//! program) and the creator's associated token account for the base mint.

use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address_with_program_id;

/// PDA seeds
pub mod seeds {
    pub const ESCROW: &[u8] = b"escrow";
}

/// PDA generator bound to one market program
pub struct PdaGenerator {
    program_id: Pubkey,
}

impl PdaGenerator {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Escrow token account holding a market's pooled tokens
    pub fn get_escrow_pda(&self, market: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::ESCROW, market.as_ref()], &self.program_id)
    }

    /// Creator's associated token account for `base_mint`
    pub fn get_creator_token_account(&self, creator: &Pubkey, base_mint: &Pubkey) -> Pubkey {
        creator_token_account(creator, base_mint)
    }
}

pub fn escrow_address(program_id: &Pubkey, market: &Pubkey) -> (Pubkey, u8) {
    PdaGenerator::new(*program_id).get_escrow_pda(market)
}

/// Seeds `[creator, token_program, base_mint]` under the associated token
/// program.
pub fn creator_token_account(creator: &Pubkey, base_mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(creator, base_mint, &spl_token::id())
}
