use solana_program::pubkey::Pubkey;

use crate::{config::ClientConfig, error::ClientError};

/// Caller-owned context: configuration plus the currently connected wallet.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub config: ClientConfig,
    wallet: Option<Pubkey>,
}

impl Session {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, wallet: None }
    }

    pub fn connect(&mut self, wallet: Pubkey) {
        self.wallet = Some(wallet);
    }

    pub fn disconnect(&mut self) {
        self.wallet = None;
    }

    pub fn wallet(&self) -> Option<&Pubkey> {
        self.wallet.as_ref()
    }

    pub fn require_wallet(&self) -> Result<Pubkey, ClientError> {
        self.wallet.ok_or(ClientError::WalletNotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_lifecycle() {
        let mut session = Session::new(ClientConfig::default());
        assert!(matches!(session.require_wallet(), Err(ClientError::WalletNotConnected)));

        let wallet = Pubkey::new_unique();
        session.connect(wallet);
        assert_eq!(session.wallet(), Some(&wallet));
        assert_eq!(session.require_wallet().unwrap(), wallet);

        session.disconnect();
        assert!(session.wallet().is_none());
    }
}
