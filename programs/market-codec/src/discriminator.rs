//! 8-byte type tags carried at the head of every market account and
//! create-market instruction.
//!
//! The owning program follows the Anchor convention: the tag is the first
//! eight bytes of `sha256("<namespace>:<name>")`.

use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

/// `sha256("account:Market")[..8]`
pub const MARKET_ACCOUNT_DISCRIMINATOR: [u8; 8] = [0xdb, 0xbe, 0xd5, 0x37, 0x00, 0xe3, 0xc6, 0x9a];

/// `sha256("global:create_market")[..8]`
pub const CREATE_MARKET_DISCRIMINATOR: [u8; 8] = [0x67, 0xe2, 0x61, 0xeb, 0xc8, 0xbc, 0xfb, 0xfe];

/// Compute the tag for `name` in `namespace` ("account" or "global").
pub fn derive(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let hash = hasher.finalize();

    let mut tag = [0u8; DISCRIMINATOR_LEN];
    tag.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    tag
}

pub fn account(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    derive("account", name)
}

pub fn instruction(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    derive("global", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_derivation() {
        assert_eq!(account("Market"), MARKET_ACCOUNT_DISCRIMINATOR);
        assert_eq!(instruction("create_market"), CREATE_MARKET_DISCRIMINATOR);
    }

    #[test]
    fn test_namespaces_differ() {
        assert_ne!(account("create_market"), instruction("create_market"));
    }
}
