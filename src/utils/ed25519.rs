//! Permit signature verification.
//!
//! `permit` cannot rely on SPL Token's `Approve` (it requires the owner to
//! co-sign the transaction, defeating gasless approval-by-signature), so the
//! caller instead appends a separate `Ed25519SigVerify` native-program
//! instruction to the same transaction, ahead of the `permit` instruction.
//! This module introspects that prior instruction via the instructions
//! sysvar to confirm it signed exactly the digest this program expects.

use borsh::BorshSerialize;
use solana_program::{
    keccak,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::instructions::{get_instruction_relative, load_current_index_checked},
    account_info::AccountInfo,
};

use crate::constants::{PERMIT_DOMAIN_NAME, PERMIT_DOMAIN_VERSION};
use crate::error::AmmError;

/// `keccak256("Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)")`
/// bit-compatible struct-hash seed; computed at call time rather than as a
/// compile-time constant to keep the literal string visible at the call site.
fn permit_type_hash() -> [u8; 32] {
    keccak::hash(b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)").0
}

fn eip712_domain_type_hash() -> [u8; 32] {
    keccak::hash(b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)").0
}

/// Computes the domain separator for a pair's permit digest, binding the
/// signature to this program's name, a fixed version string, the cluster's
/// genesis hash (the closest Solana analogue of an EVM chain id), and the
/// pair's own pubkey (the "verifying contract").
pub fn domain_separator(chain_id: &[u8; 32], pair: &Pubkey) -> [u8; 32] {
    let name_hash = keccak::hash(PERMIT_DOMAIN_NAME.as_bytes()).0;
    let version_hash = keccak::hash(PERMIT_DOMAIN_VERSION.as_bytes()).0;
    let mut preimage = Vec::with_capacity(32 * 5);
    preimage.extend_from_slice(&eip712_domain_type_hash());
    preimage.extend_from_slice(&name_hash);
    preimage.extend_from_slice(&version_hash);
    preimage.extend_from_slice(chain_id);
    preimage.extend_from_slice(pair.as_ref());
    keccak::hash(&preimage).0
}

#[derive(BorshSerialize)]
struct PermitStruct {
    owner: Pubkey,
    spender: Pubkey,
    value: u64,
    nonce: u64,
    deadline: i64,
}

/// Computes the final signed digest: `0x19 0x01 || domain_separator || struct_hash`.
pub fn permit_digest(
    chain_id: &[u8; 32],
    pair: &Pubkey,
    owner: &Pubkey,
    spender: &Pubkey,
    value: u64,
    nonce: u64,
    deadline: i64,
) -> [u8; 32] {
    let mut struct_preimage = Vec::with_capacity(32 + 32 + 32 + 32 + 32 + 32);
    struct_preimage.extend_from_slice(&permit_type_hash());
    struct_preimage.extend_from_slice(owner.as_ref());
    struct_preimage.extend_from_slice(spender.as_ref());
    struct_preimage.extend_from_slice(&[0u8; 24]);
    struct_preimage.extend_from_slice(&value.to_be_bytes());
    struct_preimage.extend_from_slice(&[0u8; 24]);
    struct_preimage.extend_from_slice(&nonce.to_be_bytes());
    struct_preimage.extend_from_slice(&[0u8; 24]);
    struct_preimage.extend_from_slice(&(deadline as u64).to_be_bytes());
    let struct_hash = keccak::hash(&struct_preimage).0;

    let domain = domain_separator(chain_id, pair);
    let mut final_preimage = Vec::with_capacity(2 + 32 + 32);
    final_preimage.extend_from_slice(&[0x19, 0x01]);
    final_preimage.extend_from_slice(&domain);
    final_preimage.extend_from_slice(&struct_hash);
    keccak::hash(&final_preimage).0
}

/// Parsed fields of a native `Ed25519SigVerify` instruction, matching the
/// single-signature layout that instruction emits.
struct Ed25519Instruction {
    pubkey: [u8; 32],
    message: Vec<u8>,
}

/// Parses the instruction immediately preceding the current one in the same
/// transaction, verifying it targets the Ed25519 program and extracting its
/// signed pubkey and message.
fn parse_preceding_ed25519_instruction(
    instructions_sysvar: &AccountInfo,
) -> Result<Ed25519Instruction, ProgramError> {
    let current_index = load_current_index_checked(instructions_sysvar)?;
    if current_index == 0 {
        return Err(AmmError::InvalidSignature.into());
    }
    let ix = get_instruction_relative(-1, instructions_sysvar)?;
    if ix.program_id != solana_program::ed25519_program::id() {
        return Err(AmmError::InvalidSignature.into());
    }

    // Ed25519SigVerify instruction data layout (single signature, Solana SDK
    // convention): a fixed 2-byte header followed by one 14-byte offsets
    // struct, then the pubkey (32 bytes), the signature (64 bytes), and the
    // signed message.
    let data = &ix.data;
    if data.len() < 2 {
        return Err(AmmError::InvalidSignature.into());
    }
    let num_signatures = data[0];
    if num_signatures != 1 {
        return Err(AmmError::InvalidSignature.into());
    }
    const HEADER_LEN: usize = 2;
    const SIGNATURE_OFFSETS_LEN: usize = 14;
    const PUBKEY_LEN: usize = 32;
    const SIGNATURE_LEN: usize = 64;
    let pubkey_start = HEADER_LEN + SIGNATURE_OFFSETS_LEN;
    let pubkey_end = pubkey_start + PUBKEY_LEN;
    let message_start = pubkey_end + SIGNATURE_LEN;
    if data.len() < message_start {
        return Err(AmmError::InvalidSignature.into());
    }
    let mut pubkey = [0u8; 32];
    pubkey.copy_from_slice(&data[pubkey_start..pubkey_end]);
    let message = data[message_start..].to_vec();
    Ok(Ed25519Instruction { pubkey, message })
}

/// Confirms a preceding `Ed25519SigVerify` instruction signed `expected_digest`
/// on behalf of `expected_signer`.
pub fn verify_permit_signature(
    instructions_sysvar: &AccountInfo,
    expected_signer: &Pubkey,
    expected_digest: &[u8; 32],
) -> Result<(), ProgramError> {
    let parsed = parse_preceding_ed25519_instruction(instructions_sysvar)?;
    if parsed.pubkey != expected_signer.to_bytes() {
        return Err(AmmError::InvalidSignature.into());
    }
    if parsed.message != expected_digest {
        return Err(AmmError::InvalidSignature.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_separator_differs_per_pair_and_chain() {
        let pair_a = Pubkey::new_unique();
        let pair_b = Pubkey::new_unique();
        let chain_a = [1u8; 32];
        let chain_b = [2u8; 32];
        assert_ne!(domain_separator(&chain_a, &pair_a), domain_separator(&chain_a, &pair_b));
        assert_ne!(domain_separator(&chain_a, &pair_a), domain_separator(&chain_b, &pair_a));
    }

    #[test]
    fn permit_digest_is_deterministic_and_sensitive_to_every_field() {
        let chain_id = [7u8; 32];
        let pair = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();

        let base = permit_digest(&chain_id, &pair, &owner, &spender, 100, 0, 1_000);
        assert_eq!(base, permit_digest(&chain_id, &pair, &owner, &spender, 100, 0, 1_000));

        assert_ne!(base, permit_digest(&chain_id, &pair, &owner, &spender, 101, 0, 1_000));
        assert_ne!(base, permit_digest(&chain_id, &pair, &owner, &spender, 100, 1, 1_000));
        assert_ne!(base, permit_digest(&chain_id, &pair, &owner, &spender, 100, 0, 1_001));
        assert_ne!(base, permit_digest(&chain_id, &pair, &spender, &owner, 100, 0, 1_000));
    }
}
