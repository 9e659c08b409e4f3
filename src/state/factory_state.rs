//! Singleton factory account: fee governance and pair-count registry.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// The factory's one on-chain account, located at `[FACTORY_SEED]`.
///
/// `all_pairs` enumeration does not need a growable on-chain vector: any
/// client can re-derive a pair's address from its two sorted mints, and
/// `pair_count` alone gives the cardinality a client needs to paginate.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct FactoryState {
    pub is_initialized: bool,
    /// Recipient of protocol fees. The default pubkey disables the fee.
    pub fee_to: Pubkey,
    /// Signer authorized to change `fee_to` and `fee_to_setter`.
    pub fee_to_setter: Pubkey,
    /// Number of pairs created so far; doubles as the next `PairCreated.index`.
    pub pair_count: u64,
    pub bump: u8,
}

impl FactoryState {
    pub const LEN: usize = 1 + 32 + 32 + 8 + 1;

    pub fn new(fee_to_setter: Pubkey, bump: u8) -> Self {
        FactoryState {
            is_initialized: true,
            fee_to: Pubkey::default(),
            fee_to_setter,
            pair_count: 0,
            bump,
        }
    }

    pub fn fee_on(&self) -> bool {
        self.fee_to != Pubkey::default()
    }
}
