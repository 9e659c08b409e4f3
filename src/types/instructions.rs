//! Instruction definitions dispatched by the program entrypoint.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// All instructions accepted by the program.
///
/// Account lists below follow the Solana convention: `[signer]` accounts
/// must sign, `[writable]` accounts are mutated, everything else is
/// read-only.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum AmmInstruction {
    /// Initializes the singleton factory.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` payer
    /// 1. `[writable]` factory PDA
    /// 2. `[]` system program
    InitializeFactory { fee_to_setter: Pubkey },

    /// Creates a pair for an unordered mint pair and wires up its two
    /// program-owned SPL vaults.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` payer
    /// 1. `[writable]` factory PDA
    /// 2. `[]` first mint (either order; the pair sorts them internally)
    /// 3. `[]` second mint (either order)
    /// 4. `[writable]` pair PDA
    /// 5. `[writable]` vault0 PDA (SPL token account owned by the pair PDA)
    /// 6. `[writable]` vault1 PDA
    /// 7. `[]` SPL Token program
    /// 8. `[]` system program
    /// 9. `[]` rent sysvar
    CreatePair {
        /// Cluster genesis hash, captured as the permit domain separator's
        /// chain id (no on-chain syscall exposes it, so the client supplies
        /// it from an RPC query).
        chain_id: [u8; 32],
    },

    /// Sets the protocol fee recipient. Signer must equal `fee_to_setter`.
    ///
    /// Accounts:
    /// 0. `[signer]` fee_to_setter
    /// 1. `[writable]` factory PDA
    SetFeeTo { fee_to: Pubkey },

    /// Transfers the `fee_to_setter` privilege. Signer must equal the
    /// current `fee_to_setter`.
    ///
    /// Accounts:
    /// 0. `[signer]` fee_to_setter
    /// 1. `[writable]` factory PDA
    SetFeeToSetter { new_fee_to_setter: Pubkey },

    /// Issues pool shares for tokens already transferred into the pair's
    /// vaults by the caller. Permissionless, like the rest of the pair
    /// engine; `sender` is carried only for event attribution.
    ///
    /// Accounts:
    /// 0. `[]` sender
    /// 1. `[writable]` pair PDA
    /// 2. `[]` factory PDA
    /// 3. `[writable]` vault0
    /// 4. `[writable]` vault1
    /// 5. `[writable]` recipient LP ledger PDA (`to`)
    /// 6. `[writable]` fee_to LP ledger PDA (required iff protocol fee is on)
    Mint,

    /// Redeems pool shares already transferred into the pair's own LP
    /// ledger slot back to the pair, against the pair's observed balances.
    ///
    /// Accounts:
    /// 0. `[]` sender
    /// 1. `[writable]` pair PDA
    /// 2. `[]` factory PDA
    /// 3. `[writable]` vault0
    /// 4. `[writable]` vault1
    /// 5. `[writable]` pair's own LP ledger PDA (shares awaiting burn)
    /// 6. `[writable]` destination token0 account (`to`)
    /// 7. `[writable]` destination token1 account (`to`)
    /// 8. `[]` token program
    /// 9. `[writable]` (optional) fee_to LP ledger PDA, present iff the
    ///    protocol fee is on; trailing so its absence doesn't shift any
    ///    other account's position
    Burn,

    /// Swaps, optionally invoking a flash-swap callback before the invariant
    /// recheck.
    ///
    /// Accounts:
    /// 0. `[]` sender
    /// 1. `[writable]` pair PDA
    /// 2. `[writable]` vault0
    /// 3. `[writable]` vault1
    /// 4. `[writable]` destination token0 account (`to`)
    /// 5. `[writable]` destination token1 account (`to`)
    /// 6. `[]` token program
    /// 7.. `[executable]` (optional) callback receiver program, iff
    ///     `callback_data` is nonempty; must equal account 4 or 5's owner
    Swap {
        amount0_out: u64,
        amount1_out: u64,
        callback_data: Vec<u8>,
    },

    /// Sweeps any vault balance above the cached reserves to `to`.
    ///
    /// Accounts:
    /// 0. `[writable]` pair PDA
    /// 1. `[writable]` vault0
    /// 2. `[writable]` vault1
    /// 3. `[writable]` destination token0 account (`to`)
    /// 4. `[writable]` destination token1 account (`to`)
    /// 5. `[]` token program
    Skim,

    /// Forces reserves to match the pair's current observed balances.
    ///
    /// Accounts:
    /// 0. `[writable]` pair PDA
    /// 1. `[]` vault0
    /// 2. `[]` vault1
    Sync,

    /// Creates a zero-balance pool-share ledger slot for `owner`, the
    /// Solana analogue of creating an associated token account: the ledger
    /// PDA must exist before it can receive `Mint`/`Transfer`/`TransferFrom`
    /// credits.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` payer
    /// 1. `[]` pair PDA
    /// 2. `[writable]` LP ledger PDA for `(pair, owner)`
    /// 3. `[]` system program
    InitializeLpAccount { owner: Pubkey },

    /// Transfers pool shares from the caller's ledger to another owner's.
    ///
    /// Accounts:
    /// 0. `[signer]` owner
    /// 1. `[]` pair PDA
    /// 2. `[writable]` owner's LP ledger PDA
    /// 3. `[writable]` recipient's LP ledger PDA
    Transfer { amount: u64 },

    /// Approves a spender allowance over the caller's pool shares. Creates
    /// the allowance PDA on first use, paid for by the owner.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` owner
    /// 1. `[]` pair PDA
    /// 2. `[writable]` allowance PDA
    /// 3. `[]` system program
    Approve { spender: Pubkey, amount: u64 },

    /// Spends an existing allowance, transferring shares from `owner` to
    /// `recipient`.
    ///
    /// Accounts:
    /// 0. `[signer]` spender
    /// 1. `[]` pair PDA
    /// 2. `[writable]` allowance PDA
    /// 3. `[writable]` owner's LP ledger PDA
    /// 4. `[writable]` recipient's LP ledger PDA
    TransferFrom { owner: Pubkey, amount: u64 },

    /// Approval-by-signature: grants an allowance without the owner signing
    /// this transaction, authorized instead by a preceding `Ed25519SigVerify`
    /// instruction in the same transaction. Creates the allowance PDA on
    /// first use, paid for by the relayer.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` relayer (pays fees; need not be `owner` or `spender`)
    /// 1. `[]` pair PDA
    /// 2. `[writable]` owner's LP ledger PDA (source of the replay-protecting nonce)
    /// 3. `[writable]` allowance PDA
    /// 4. `[]` instructions sysvar
    /// 5. `[]` system program
    Permit {
        owner: Pubkey,
        spender: Pubkey,
        value: u64,
        deadline: i64,
    },

    /// Read-only: logs the pair's `(reserve0, reserve1, block_timestamp_last)`
    /// triple for client consumption. Solana instructions cannot return a
    /// value directly, so this mirrors the teacher's view-function idiom of
    /// logging the result via `msg!` rather than exposing a getter call.
    ///
    /// Accounts:
    /// 0. `[]` pair PDA
    GetReserves,
}
