//! Generic account-shape validation helpers shared by every processor.

use solana_program::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

use crate::error::AmmError;

/// Returns `Ok(())` iff `account` signed the transaction.
pub fn validate_signer(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_signer {
        return Err(AmmError::MissingSignature.into());
    }
    Ok(())
}

/// Returns `Ok(())` iff `account` is writable.
pub fn validate_writable(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_writable {
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Returns `Ok(())` iff `account` is owned by `program_id`.
pub fn validate_owner(account: &AccountInfo, program_id: &Pubkey) -> Result<(), ProgramError> {
    if account.owner != program_id {
        return Err(AmmError::InvalidAccountOwner.into());
    }
    Ok(())
}

/// Returns `Ok(())` iff `account.key` equals the expected derived address.
/// Every PDA passed into an instruction must be checked this way before its
/// data is trusted, since a client can otherwise substitute an attacker-owned
/// account at the same instruction slot.
pub fn validate_pda(account: &AccountInfo, expected: &Pubkey) -> Result<(), ProgramError> {
    if account.key != expected {
        return Err(AmmError::InvalidAccountAddress.into());
    }
    Ok(())
}
