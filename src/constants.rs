//! Constants for the constant-product AMM program
//!
//! This module contains the numeric constants, PDA seed prefixes, and token
//! metadata defaults used throughout the program.

/// Pool-share amount permanently locked on a pair's first `mint`, sent to a
/// balance no owner can ever spend from. Keeps the pro-rata division in
/// later mints/burns from degenerating when `total_supply` would otherwise
/// collapse to a tiny number.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Swap fee numerator: fee = amount_in * FEE_NUMERATOR / FEE_DENOMINATOR = 0.3%.
pub const FEE_NUMERATOR: u128 = 3;

/// Swap fee denominator.
pub const FEE_DENOMINATOR: u128 = 1000;

/// Protocol fee share: the minted amount solves
/// `total_supply * (root_k - root_k_last) / (PROTOCOL_FEE_DENOMINATOR_MULTIPLIER * root_k + root_k_last)`,
/// i.e. 1/6 of the growth in sqrt(k) since the last liquidity event.
pub const PROTOCOL_FEE_DENOMINATOR_MULTIPLIER: u128 = 5;

/// Largest value a reserve may hold (2^112 - 1).
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

/// Decimal precision of the pool-share token. Solana's native token precision;
/// the ERC-20 original uses 18.
pub const LP_TOKEN_DECIMALS: u8 = 9;

/// Domain-separator version string used in the permit typed-data hash.
pub const PERMIT_DOMAIN_VERSION: &str = "1";

/// Name embedded in a pair's permit domain separator. Every pair shares one
/// name; pairs are distinguished by `verifyingContract` (the pair's own
/// pubkey), not by name.
pub const PERMIT_DOMAIN_NAME: &str = "AMM Pool Share";

/// PDA seed prefix for the singleton factory account.
pub const FACTORY_SEED: &[u8] = b"factory";

/// PDA seed prefix for a pair account (combined with the two sorted mints).
pub const PAIR_SEED: &[u8] = b"pair";

/// PDA seed prefix for a pair's token0 vault.
pub const VAULT0_SEED: &[u8] = b"vault0";

/// PDA seed prefix for a pair's token1 vault.
pub const VAULT1_SEED: &[u8] = b"vault1";

/// PDA seed prefix for a pool-share ledger account (combined with pair + owner).
pub const LP_ACCOUNT_SEED: &[u8] = b"lp_account";

/// PDA seed prefix for an allowance record (combined with pair + owner + spender).
pub const ALLOWANCE_SEED: &[u8] = b"allowance";

/// Sentinel allowance value treated as infinite and never decremented on spend.
pub const INFINITE_ALLOWANCE: u64 = u64::MAX;
