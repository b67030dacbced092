use solana_program::{program_error::ProgramError, pubkey::Pubkey};
use thiserror::Error;

/// Fields of the market account layout, in wire order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Discriminator,
    Creator,
    QuestionLength,
    Question,
    BaseMint,
    YesPoolAmount,
    NoPoolAmount,
    TotalYesShares,
    TotalNoShares,
    Status,
    CreatedAt,
    ResolveAt,
    Resolver,
    FeePaid,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Discriminator => "discriminator",
            Field::Creator => "creator",
            Field::QuestionLength => "question length",
            Field::Question => "question",
            Field::BaseMint => "base mint",
            Field::YesPoolAmount => "yes pool amount",
            Field::NoPoolAmount => "no pool amount",
            Field::TotalYesShares => "total yes shares",
            Field::TotalNoShares => "total no shares",
            Field::Status => "status",
            Field::CreatedAt => "created at",
            Field::ResolveAt => "resolve at",
            Field::Resolver => "resolver",
            Field::FeePaid => "fee paid",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated buffer while reading {field}")]
    TruncatedBuffer { field: Field },

    #[error("Question is not valid UTF-8")]
    MalformedString,

    #[error("Invalid market status {0}")]
    InvalidStatus(u8),

    #[error("Invalid bool representation {0}")]
    InvalidBool(u8),

    #[error("Account discriminator {found:02x?} is not a market account")]
    WrongDiscriminator { found: [u8; 8] },
}

impl DecodeError {
    fn code(&self) -> u32 {
        match self {
            DecodeError::TruncatedBuffer { .. } => 0,
            DecodeError::MalformedString => 1,
            DecodeError::InvalidStatus(_) => 2,
            DecodeError::InvalidBool(_) => 3,
            DecodeError::WrongDiscriminator { .. } => 4,
        }
    }
}

impl From<DecodeError> for ProgramError {
    fn from(e: DecodeError) -> Self {
        ProgramError::Custom(e.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Question of {0} bytes does not fit a 32-bit length prefix")]
    TextTooLarge(usize),

    #[error("Liquidity of {0} whole tokens overflows the raw amount")]
    AmountOverflow(u64),

    #[error("Resolution time overflows from {0}")]
    TimestampOverflow(i64),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl EncodeError {
    fn code(&self) -> u32 {
        match self {
            EncodeError::TextTooLarge(_) => 100,
            EncodeError::AmountOverflow(_) => 101,
            EncodeError::TimestampOverflow(_) => 102,
            EncodeError::Serialization(_) => 103,
        }
    }
}

impl From<EncodeError> for ProgramError {
    fn from(e: EncodeError) -> Self {
        ProgramError::Custom(e.code())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pubkey for {field}: {value}")]
    InvalidPubkey { field: &'static str, value: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Failures surfaced by [`crate::client::MarketClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Ledger query failed: {0}")]
    Source(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),
}
