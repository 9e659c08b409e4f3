use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Error conditions raised by the factory and pair engine.
///
/// Every failure aborts the current instruction; Solana's transaction
/// atomicity rolls back all state mutations the instruction performed, so
/// there is no explicit recovery path here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// Reentry attempted while a pair's `unlocked` latch is false.
    #[error("pair is locked")]
    Locked,

    /// A reserve or balance would exceed 2^112 - 1.
    #[error("reserve overflow")]
    Overflow,

    /// `mint` computed zero liquidity to issue.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// `burn` computed a zero amount for one of the two tokens.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// `swap` requested with both outputs zero.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// `swap` requested an output at or above the corresponding reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// `swap` recipient equals one of the pair's own reserve tokens.
    #[error("invalid to")]
    InvalidTo,

    /// `swap` settled with both inputs zero.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Post-swap constant-product invariant violated.
    #[error("k invariant violated")]
    K,

    /// A CPI token transfer did not return success.
    #[error("transfer failed")]
    TransferFailed,

    /// `create_pair` called with identical mints.
    #[error("identical addresses")]
    IdenticalAddresses,

    /// `create_pair` called with the default pubkey as a mint.
    #[error("zero address")]
    ZeroAddress,

    /// A pair already exists for this mint pair.
    #[error("pair exists")]
    PairExists,

    /// Caller is not the factory's `fee_to_setter`.
    #[error("forbidden")]
    Forbidden,

    /// `permit` deadline has passed.
    #[error("permit expired")]
    Expired,

    /// `permit` signature did not recover to the claimed owner.
    #[error("invalid signature")]
    InvalidSignature,

    /// An account passed to an instruction does not match the PDA the
    /// instruction derives from its other inputs.
    #[error("invalid account address")]
    InvalidAccountAddress,

    /// An account's on-chain owner is not this program.
    #[error("invalid account owner")]
    InvalidAccountOwner,

    /// A required signature is missing.
    #[error("missing required signature")]
    MissingSignature,
}

impl AmmError {
    /// Returns a stable numeric code for each error variant, used as the
    /// `ProgramError::Custom` payload so clients can match on it reliably.
    pub fn error_code(&self) -> u32 {
        match self {
            AmmError::Locked => 0,
            AmmError::Overflow => 1,
            AmmError::InsufficientLiquidityMinted => 2,
            AmmError::InsufficientLiquidityBurned => 3,
            AmmError::InsufficientOutputAmount => 4,
            AmmError::InsufficientLiquidity => 5,
            AmmError::InvalidTo => 6,
            AmmError::InsufficientInputAmount => 7,
            AmmError::K => 8,
            AmmError::TransferFailed => 9,
            AmmError::IdenticalAddresses => 10,
            AmmError::ZeroAddress => 11,
            AmmError::PairExists => 12,
            AmmError::Forbidden => 13,
            AmmError::Expired => 14,
            AmmError::InvalidSignature => 15,
            AmmError::InvalidAccountAddress => 16,
            AmmError::InvalidAccountOwner => 17,
            AmmError::MissingSignature => 18,
        }
    }
}

impl From<AmmError> for ProgramError {
    fn from(e: AmmError) -> Self {
        ProgramError::Custom(e.error_code())
    }
}
