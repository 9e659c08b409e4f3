//! Borsh (de)serialization helpers for account data.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{account_info::AccountInfo, program_error::ProgramError};

/// Deserializes the Borsh-encoded contents of `account` into `T`.
pub fn load_state<T: BorshDeserialize>(account: &AccountInfo) -> Result<T, ProgramError> {
    T::try_from_slice(&account.data.borrow()).map_err(|_| ProgramError::InvalidAccountData)
}

/// Serializes `state` into `account`'s data buffer in place.
///
/// Writes through a temporary buffer first rather than serializing directly
/// into the borrowed slice: a partially-written buffer left behind by a
/// serialization error must never become the account's persisted state.
pub fn save_state<T: BorshSerialize>(
    account: &AccountInfo,
    state: &T,
) -> Result<(), ProgramError> {
    let mut buf = Vec::with_capacity(account.data_len());
    state.serialize(&mut buf)?;
    if buf.len() > account.data_len() {
        return Err(ProgramError::AccountDataTooSmall);
    }
    let mut data = account.data.borrow_mut();
    data[..buf.len()].copy_from_slice(&buf);
    Ok(())
}
