//! Per-pair account: reserves, oracle accumulators, protocol-fee tracking,
//! the reentrancy latch, and the embedded pool-share mint record.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::constants::{MAX_RESERVE, PROTOCOL_FEE_DENOMINATOR_MULTIPLIER};
use crate::error::AmmError;
use crate::utils::fixed_point::{bytes_to_u256, fraction, u256_to_bytes, U256};
use crate::utils::math::sqrt_u256;

/// The pool-share mint record, embedded directly in `PairState` rather than
/// living in a separate account: the pair's own state doubles as its
/// pool-share mint.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LpTokenMint {
    pub total_supply: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct PairState {
    pub is_initialized: bool,
    pub factory: Pubkey,
    /// Sorted such that `token0 < token1` byte-ordered.
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub vault0: Pubkey,
    pub vault1: Pubkey,
    /// 112-bit counters stored widened to `u128`; every write is checked
    /// against `MAX_RESERVE`.
    pub reserve0: u128,
    pub reserve1: u128,
    /// Wrapping 32-bit wall-clock seconds of the last `_update`.
    pub block_timestamp_last: u32,
    /// UQ112.112 cumulative price accumulators, little-endian `U256` bytes.
    /// Wrap on overflow is intentional.
    pub price0_cumulative_last: [u8; 32],
    pub price1_cumulative_last: [u8; 32],
    /// `reserve0 * reserve1` immediately after the last liquidity event,
    /// while the protocol fee is enabled; zero otherwise. Widened to `U256`
    /// since the product of two 112-bit reserves needs up to 224 bits.
    pub k_last: [u8; 32],
    pub lp_mint: LpTokenMint,
    /// Reentrancy latch; `false` while a guarded handler is executing.
    pub unlocked: bool,
    /// Cluster genesis hash captured at `initialize`, used as the permit
    /// domain separator's chain id.
    pub chain_id: [u8; 32],
    pub bump: u8,
    pub vault0_bump: u8,
    pub vault1_bump: u8,
}

impl PairState {
    pub const LEN: usize = 1 + 32 + 32 + 32 + 32 + 32 + 16 + 16 + 4 + 32 + 32 + 32 + 8 + 1 + 32 + 1 + 1 + 1;

    pub fn new(
        factory: Pubkey,
        token0: Pubkey,
        token1: Pubkey,
        vault0: Pubkey,
        vault1: Pubkey,
        chain_id: [u8; 32],
        bump: u8,
        vault0_bump: u8,
        vault1_bump: u8,
    ) -> Self {
        PairState {
            is_initialized: true,
            factory,
            token0,
            token1,
            vault0,
            vault1,
            reserve0: 0,
            reserve1: 0,
            block_timestamp_last: 0,
            price0_cumulative_last: [0u8; 32],
            price1_cumulative_last: [0u8; 32],
            k_last: [0u8; 32],
            lp_mint: LpTokenMint::default(),
            unlocked: true,
            chain_id,
            bump,
            vault0_bump,
            vault1_bump,
        }
    }

    pub fn get_reserves(&self) -> (u128, u128, u32) {
        (self.reserve0, self.reserve1, self.block_timestamp_last)
    }

    pub fn price0_cumulative(&self) -> U256 {
        bytes_to_u256(&self.price0_cumulative_last)
    }

    pub fn price1_cumulative(&self) -> U256 {
        bytes_to_u256(&self.price1_cumulative_last)
    }

    pub fn k_last_value(&self) -> U256 {
        bytes_to_u256(&self.k_last)
    }

    pub fn set_k_last(&mut self, v: U256) {
        self.k_last = u256_to_bytes(v);
    }

    /// `_update`: advances the oracle accumulators using the pre-update
    /// reserves and elapsed time, then writes the new observed balances.
    pub fn update(&mut self, bal0: u128, bal1: u128, now32: u32) -> Result<(), AmmError> {
        if bal0 > MAX_RESERVE || bal1 > MAX_RESERVE {
            return Err(AmmError::Overflow);
        }
        let elapsed = now32.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && self.reserve0 != 0 && self.reserve1 != 0 {
            let delta0 = fraction(self.reserve1, self.reserve0) * U256::from(elapsed);
            let delta1 = fraction(self.reserve0, self.reserve1) * U256::from(elapsed);
            let new_price0 = self.price0_cumulative().overflowing_add(delta0).0;
            let new_price1 = self.price1_cumulative().overflowing_add(delta1).0;
            self.price0_cumulative_last = u256_to_bytes(new_price0);
            self.price1_cumulative_last = u256_to_bytes(new_price1);
        }
        self.reserve0 = bal0;
        self.reserve1 = bal1;
        self.block_timestamp_last = now32;
        Ok(())
    }

    /// `_mint_fee`: returns the pool-share amount to mint to the protocol fee
    /// recipient (zero if none is due) and updates `k_last`'s enabled/disabled
    /// bookkeeping. Does not itself credit any balance; the caller mints the
    /// returned amount to the fee recipient's ledger account.
    pub fn mint_fee(&mut self, fee_on: bool, total_supply: u64) -> u64 {
        let k_last = self.k_last_value();
        if fee_on {
            if k_last.is_zero() {
                return 0;
            }
            let root_k = sqrt_u256(U256::from(self.reserve0) * U256::from(self.reserve1));
            let root_k_last = sqrt_u256(k_last);
            if root_k <= root_k_last {
                return 0;
            }
            let numerator = U256::from(total_supply) * (root_k - root_k_last);
            let denominator = U256::from(PROTOCOL_FEE_DENOMINATOR_MULTIPLIER) * root_k + root_k_last;
            let liquidity = numerator / denominator;
            if liquidity.is_zero() {
                0
            } else if liquidity > U256::from(u64::MAX) {
                u64::MAX
            } else {
                liquidity.as_u64()
            }
        } else {
            if !k_last.is_zero() {
                self.set_k_last(U256::zero());
            }
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_pair() -> PairState {
        PairState::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            [0u8; 32],
            255,
            255,
            255,
        )
    }

    #[test]
    fn update_advances_cumulative_prices_by_elapsed_time() {
        let mut pair = blank_pair();
        pair.update(3_000_000_000_000_000_000u128, 3_000_000_000_000_000_000u128, 100)
            .unwrap();
        assert_eq!(pair.price0_cumulative(), U256::zero());

        pair.update(3_000_000_000_000_000_000u128, 3_000_000_000_000_000_000u128, 101)
            .unwrap();
        let expected = fraction(3_000_000_000_000_000_000u128, 3_000_000_000_000_000_000u128);
        assert_eq!(pair.price0_cumulative(), expected);
        assert_eq!(pair.price1_cumulative(), expected);
    }

    #[test]
    fn update_rejects_reserve_above_112_bits() {
        let mut pair = blank_pair();
        let too_big = MAX_RESERVE + 1;
        assert_eq!(pair.update(too_big, 1, 0), Err(AmmError::Overflow));
    }

    #[test]
    fn mint_fee_mints_one_sixth_of_sqrt_k_growth() {
        // prev k = 100*100 = 10000, root_k_last = 100.
        // new reserves 110*109 = 11990, root_k = floor(sqrt(11990)) = 109.
        // liquidity = total_supply*(109-100) / (5*109+100) = 1000*9/745 = 12.
        let mut pair = blank_pair();
        pair.reserve0 = 110;
        pair.reserve1 = 109;
        pair.set_k_last(U256::from(100u32) * U256::from(100u32));
        let minted = pair.mint_fee(true, 1000);
        assert_eq!(minted, 12);
    }

    #[test]
    fn mint_fee_resets_k_last_when_fee_disabled() {
        let mut pair = blank_pair();
        pair.set_k_last(U256::from(42u32));
        let minted = pair.mint_fee(false, 0);
        assert_eq!(minted, 0);
        assert!(pair.k_last_value().is_zero());
    }
}
