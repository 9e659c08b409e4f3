//! Reentrancy latch for guarded pair instructions.
//!
//! Unlike a process-local guard, the bit that matters here is persisted
//! account data: a CPI that reenters this program mid-instruction (the
//! flash-swap callback calling back into `swap`) reads `PairState` fresh off
//! the account, not from this handler's in-memory copy. So `enter` writes
//! the locked bit to the account immediately, before the caller makes any
//! external call; `Drop` only flips the in-memory copy back so the
//! handler's final `save_state` call persists it unlocked again once the
//! guarded region completes.

use solana_program::account_info::AccountInfo;
use solana_program::program_error::ProgramError;

use crate::error::AmmError;
use crate::state::pair_state::PairState;
use crate::utils::serialization::save_state;

/// RAII guard mirroring the `unlocked = false` / `... / unlocked = true`
/// idiom: construct at entry to fail fast on reentrancy and persist the
/// locked bit, `Drop` restores the in-memory bit so the handler's final
/// `save_state` call persists it unlocked again.
pub struct PairGuard<'a> {
    pair: &'a mut PairState,
}

impl<'a> PairGuard<'a> {
    pub fn enter(account: &AccountInfo, pair: &'a mut PairState) -> Result<Self, ProgramError> {
        if !pair.unlocked {
            return Err(AmmError::Locked.into());
        }
        pair.unlocked = false;
        save_state(account, pair)?;
        Ok(PairGuard { pair })
    }
}

impl<'a> Drop for PairGuard<'a> {
    fn drop(&mut self) {
        self.pair.unlocked = true;
    }
}

impl<'a> std::ops::Deref for PairGuard<'a> {
    type Target = PairState;
    fn deref(&self) -> &PairState {
        self.pair
    }
}

impl<'a> std::ops::DerefMut for PairGuard<'a> {
    fn deref_mut(&mut self) -> &mut PairState {
        self.pair
    }
}
