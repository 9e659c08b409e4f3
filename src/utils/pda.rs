//! Program-derived-address helpers.
//!
//! Every account named in `state` is located by one of these derivations
//! rather than stored in a registry: a client can compute a pair's address
//! from its two mints alone, the same way the original design makes pool
//! addresses a deterministic function of the token pair.

use solana_program::pubkey::Pubkey;

use crate::constants::{ALLOWANCE_SEED, FACTORY_SEED, LP_ACCOUNT_SEED, PAIR_SEED, VAULT0_SEED, VAULT1_SEED};

/// Sorts two mints into `(token0, token1)` byte-ordered form.
pub fn sort_mints(a: &Pubkey, b: &Pubkey) -> (Pubkey, Pubkey) {
    if a < b {
        (*a, *b)
    } else {
        (*b, *a)
    }
}

pub fn factory_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FACTORY_SEED], program_id)
}

pub fn pair_address(token0: &Pubkey, token1: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PAIR_SEED, token0.as_ref(), token1.as_ref()], program_id)
}

pub fn vault0_address(pair: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT0_SEED, pair.as_ref()], program_id)
}

pub fn vault1_address(pair: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT1_SEED, pair.as_ref()], program_id)
}

pub fn lp_account_address(pair: &Pubkey, owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_ACCOUNT_SEED, pair.as_ref(), owner.as_ref()], program_id)
}

pub fn allowance_address(
    pair: &Pubkey,
    owner: &Pubkey,
    spender: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ALLOWANCE_SEED, pair.as_ref(), owner.as_ref(), spender.as_ref()],
        program_id,
    )
}
