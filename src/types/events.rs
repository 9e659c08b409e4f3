//! Structured event payloads emitted via `solana_program::log::sol_log_data`.
//!
//! This is the native Solana primitive for structured program logs (the
//! same mechanism Anchor's `emit!` wraps), used here in place of an EVM log
//! entry.

use borsh::BorshSerialize;
use solana_program::{log::sol_log_data, pubkey::Pubkey};

#[derive(BorshSerialize)]
pub struct MintEvent {
    pub sender: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
}

#[derive(BorshSerialize)]
pub struct BurnEvent {
    pub sender: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
    pub to: Pubkey,
}

#[derive(BorshSerialize)]
pub struct SwapEvent {
    pub sender: Pubkey,
    pub amount0_in: u64,
    pub amount1_in: u64,
    pub amount0_out: u64,
    pub amount1_out: u64,
    pub to: Pubkey,
}

#[derive(BorshSerialize)]
pub struct SyncEvent {
    pub reserve0: u128,
    pub reserve1: u128,
}

#[derive(BorshSerialize)]
pub struct TransferEvent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub value: u64,
}

#[derive(BorshSerialize)]
pub struct ApprovalEvent {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub value: u64,
}

#[derive(BorshSerialize)]
pub struct PairCreatedEvent {
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub pair: Pubkey,
    pub index_plus_one: u64,
}

macro_rules! emit_event {
    ($name:literal, $event:expr) => {{
        let mut buf = Vec::new();
        if $event.serialize(&mut buf).is_ok() {
            sol_log_data(&[$name.as_bytes(), &buf]);
        }
    }};
}

pub fn emit_mint(event: MintEvent) {
    emit_event!("Mint", event);
}

pub fn emit_burn(event: BurnEvent) {
    emit_event!("Burn", event);
}

pub fn emit_swap(event: SwapEvent) {
    emit_event!("Swap", event);
}

pub fn emit_sync(event: SyncEvent) {
    emit_event!("Sync", event);
}

pub fn emit_transfer(event: TransferEvent) {
    emit_event!("Transfer", event);
}

pub fn emit_approval(event: ApprovalEvent) {
    emit_event!("Approval", event);
}

pub fn emit_pair_created(event: PairCreatedEvent) {
    emit_event!("PairCreated", event);
}
