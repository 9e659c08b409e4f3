/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! End-to-end exercise of the instruction-dispatch happy path against
//! `solana-program-test`: factory init, pair creation, first liquidity
//! deposit, a swap, and a partial redemption.

use constant_product_amm::client_sdk::PairClient;
use constant_product_amm::{get_amount_out, mul_div_u128, FactoryState, LpTokenAccount, PairState};
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    account::Account,
    program_pack::Pack,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_token::state::{Account as SplTokenAccount, Mint as SplMint};

fn program_test() -> ProgramTest {
    ProgramTest::new(
        "constant_product_amm",
        constant_product_amm::id(),
        processor!(constant_product_amm::process_instruction),
    )
}

async fn send(banks: &mut BanksClient, payer: &Keypair, signers: &[&Keypair], ixs: &[solana_program::instruction::Instruction]) {
    let blockhash = banks.get_latest_blockhash().await.unwrap();
    let mut all_signers: Vec<&Keypair> = vec![payer];
    for s in signers {
        if s.pubkey() != payer.pubkey() {
            all_signers.push(s);
        }
    }
    let tx = Transaction::new_signed_with_payer(ixs, Some(&payer.pubkey()), &all_signers, blockhash);
    banks.process_transaction(tx).await.unwrap();
}

async fn create_mint(banks: &mut BanksClient, payer: &Keypair, mint: &Keypair, authority: &Keypair, decimals: u8) {
    let rent = banks.get_rent().await.unwrap();
    let lamports = rent.minimum_balance(SplMint::LEN);
    let ixs = [
        system_instruction::create_account(&payer.pubkey(), &mint.pubkey(), lamports, SplMint::LEN as u64, &spl_token::id()),
        spl_token::instruction::initialize_mint(&spl_token::id(), &mint.pubkey(), &authority.pubkey(), None, decimals).unwrap(),
    ];
    send(banks, payer, &[mint], &ixs).await;
}

async fn create_token_account(banks: &mut BanksClient, payer: &Keypair, account: &Keypair, mint: &Keypair, owner: &Keypair) {
    let rent = banks.get_rent().await.unwrap();
    let lamports = rent.minimum_balance(SplTokenAccount::LEN);
    let ixs = [
        system_instruction::create_account(&payer.pubkey(), &account.pubkey(), lamports, SplTokenAccount::LEN as u64, &spl_token::id()),
        spl_token::instruction::initialize_account(&spl_token::id(), &account.pubkey(), &mint.pubkey(), &owner.pubkey()).unwrap(),
    ];
    send(banks, payer, &[account], &ixs).await;
}

async fn mint_to(banks: &mut BanksClient, payer: &Keypair, mint: &Keypair, destination: &Keypair, authority: &Keypair, amount: u64) {
    let ix = spl_token::instruction::mint_to(&spl_token::id(), &mint.pubkey(), &destination.pubkey(), &authority.pubkey(), &[], amount).unwrap();
    send(banks, payer, &[authority], &[ix]).await;
}

async fn token_balance(banks: &mut BanksClient, account: &solana_program::pubkey::Pubkey) -> u64 {
    let raw = banks.get_account(*account).await.unwrap().unwrap();
    SplTokenAccount::unpack(&raw.data).unwrap().amount
}

async fn fetch<T: borsh::BorshDeserialize>(banks: &mut BanksClient, account: &solana_program::pubkey::Pubkey) -> T {
    let raw: Account = banks.get_account(*account).await.unwrap().unwrap();
    T::try_from_slice(&raw.data).unwrap()
}

#[tokio::test]
#[serial_test::serial]
async fn factory_pair_mint_swap_burn_round_trip() {
    let (mut banks, payer, _recent_blockhash) = program_test().start().await;

    let program_id = constant_product_amm::id();
    let client = PairClient::new(program_id);

    let mint_authority = Keypair::new();
    let fund_transfer = system_instruction::transfer(&payer.pubkey(), &mint_authority.pubkey(), 10_000_000_000);
    send(&mut banks, &payer, &[], &[fund_transfer]).await;

    let mint_a = Keypair::new();
    let mint_b = Keypair::new();
    create_mint(&mut banks, &payer, &mint_a, &mint_authority, 6).await;
    create_mint(&mut banks, &payer, &mint_b, &mint_authority, 6).await;

    // -- factory --
    let fee_to_setter = payer.pubkey();
    send(&mut banks, &payer, &[], &[client.initialize_factory_instruction(&payer.pubkey(), fee_to_setter)]).await;

    let (factory_addr, _) = client.factory_address();
    let factory: FactoryState = fetch(&mut banks, &factory_addr).await;
    assert!(factory.is_initialized);
    assert_eq!(factory.fee_to_setter, fee_to_setter);
    assert_eq!(factory.pair_count, 0);
    assert!(!factory.fee_on());

    // -- pair creation --
    let chain_id = [7u8; 32];
    send(
        &mut banks,
        &payer,
        &[],
        &[client.create_pair_instruction(&payer.pubkey(), &mint_a.pubkey(), &mint_b.pubkey(), chain_id)],
    )
    .await;

    let addrs = client.derive_pair_addresses(&mint_a.pubkey(), &mint_b.pubkey());
    let pair: PairState = fetch(&mut banks, &addrs.pair).await;
    assert!(pair.is_initialized);
    assert_eq!(pair.token0, addrs.token0);
    assert_eq!(pair.token1, addrs.token1);
    assert_eq!(pair.reserve0, 0);
    assert_eq!(pair.reserve1, 0);
    assert_eq!(pair.lp_mint.total_supply, 0);
    assert!(pair.unlocked);
    assert_eq!(pair.chain_id, chain_id);

    let factory_after_create: FactoryState = fetch(&mut banks, &factory_addr).await;
    assert_eq!(factory_after_create.pair_count, 1);

    // token0/token1 are whichever of mint_a/mint_b sorted first.
    let (mint0, mint1) = if addrs.token0 == mint_a.pubkey() { (&mint_a, &mint_b) } else { (&mint_b, &mint_a) };

    // -- fund a depositor and seed the pair's vaults --
    let depositor = Keypair::new();
    let transfer_to_depositor = system_instruction::transfer(&payer.pubkey(), &depositor.pubkey(), 10_000_000_000);
    send(&mut banks, &payer, &[], &[transfer_to_depositor]).await;

    let depositor_token0 = Keypair::new();
    let depositor_token1 = Keypair::new();
    create_token_account(&mut banks, &payer, &depositor_token0, mint0, &depositor).await;
    create_token_account(&mut banks, &payer, &depositor_token1, mint1, &depositor).await;

    let deposit0: u64 = 4_000_000_000;
    let deposit1: u64 = 9_000_000_000;
    mint_to(&mut banks, &payer, mint0, &depositor_token0, &mint_authority, deposit0 + 2_000_000_000).await;
    mint_to(&mut banks, &payer, mint1, &depositor_token1, &mint_authority, deposit1).await;

    let transfer_in0 = spl_token::instruction::transfer(
        &spl_token::id(),
        &depositor_token0.pubkey(),
        &addrs.vault0,
        &depositor.pubkey(),
        &[],
        deposit0,
    )
    .unwrap();
    let transfer_in1 = spl_token::instruction::transfer(
        &spl_token::id(),
        &depositor_token1.pubkey(),
        &addrs.vault1,
        &depositor.pubkey(),
        &[],
        deposit1,
    )
    .unwrap();
    send(&mut banks, &payer, &[&depositor], &[transfer_in0, transfer_in1]).await;

    // -- initial mint: depositor's pool-share ledger must exist first --
    send(
        &mut banks,
        &payer,
        &[],
        &[client.initialize_lp_account_instruction(&payer.pubkey(), &addrs.pair, depositor.pubkey())],
    )
    .await;
    let (depositor_ledger, _) = client.lp_account_address(&addrs.pair, &depositor.pubkey());

    send(
        &mut banks,
        &payer,
        &[],
        &[client.mint_instruction(&depositor.pubkey(), &addrs.pair, &addrs.vault0, &addrs.vault1, &depositor_ledger, None)],
    )
    .await;

    // 4_000_000_000 * 9_000_000_000 is a perfect square: sqrt == 6_000_000_000.
    let expected_total_supply: u64 = 6_000_000_000;
    let expected_minted: u64 = expected_total_supply - 1000;

    let pair_after_mint: PairState = fetch(&mut banks, &addrs.pair).await;
    assert_eq!(pair_after_mint.reserve0, deposit0 as u128);
    assert_eq!(pair_after_mint.reserve1, deposit1 as u128);
    assert_eq!(pair_after_mint.lp_mint.total_supply, expected_total_supply);

    let depositor_ledger_state: LpTokenAccount = fetch(&mut banks, &depositor_ledger).await;
    assert_eq!(depositor_ledger_state.balance, expected_minted);

    // -- swap: depositor sends more token0 in, receives token1 out --
    let amount0_in: u64 = 1_000_000_000;
    let amount1_out = get_amount_out(amount0_in as u128, deposit0 as u128, deposit1 as u128).unwrap() as u64;
    assert!(amount1_out > 0 && amount1_out < deposit1);

    let transfer_swap_in = spl_token::instruction::transfer(
        &spl_token::id(),
        &depositor_token0.pubkey(),
        &addrs.vault0,
        &depositor.pubkey(),
        &[],
        amount0_in,
    )
    .unwrap();
    send(&mut banks, &payer, &[&depositor], &[transfer_swap_in]).await;

    send(
        &mut banks,
        &payer,
        &[],
        &[client.swap_instruction(
            &depositor.pubkey(),
            &addrs.pair,
            &addrs.vault0,
            &addrs.vault1,
            &depositor_token0.pubkey(),
            &depositor_token1.pubkey(),
            0,
            amount1_out,
            vec![],
        )],
    )
    .await;

    let bal0_post_swap = deposit0 + amount0_in;
    let bal1_post_swap = deposit1 - amount1_out;

    let pair_after_swap: PairState = fetch(&mut banks, &addrs.pair).await;
    assert_eq!(pair_after_swap.reserve0, bal0_post_swap as u128);
    assert_eq!(pair_after_swap.reserve1, bal1_post_swap as u128);
    assert_eq!(pair_after_swap.lp_mint.total_supply, expected_total_supply);

    let depositor_token1_balance = token_balance(&mut banks, &depositor_token1.pubkey()).await;
    assert_eq!(depositor_token1_balance, amount1_out);

    // -- burn: redeem a third of the depositor's shares through the pair's own ledger slot --
    send(
        &mut banks,
        &payer,
        &[],
        &[client.initialize_lp_account_instruction(&payer.pubkey(), &addrs.pair, addrs.pair)],
    )
    .await;
    let (pair_ledger, _) = client.lp_account_address(&addrs.pair, &addrs.pair);

    let burn_liquidity = expected_minted / 3;
    send(
        &mut banks,
        &payer,
        &[&depositor],
        &[client.transfer_instruction(&depositor.pubkey(), &addrs.pair, &depositor_ledger, &pair_ledger, burn_liquidity)],
    )
    .await;

    let expected_amount0 = mul_div_u128(burn_liquidity as u128, bal0_post_swap as u128, expected_total_supply as u128).unwrap() as u64;
    let expected_amount1 = mul_div_u128(burn_liquidity as u128, bal1_post_swap as u128, expected_total_supply as u128).unwrap() as u64;
    assert!(expected_amount0 > 0 && expected_amount1 > 0);

    send(
        &mut banks,
        &payer,
        &[],
        &[client.burn_instruction(
            &depositor.pubkey(),
            &addrs.pair,
            &addrs.vault0,
            &addrs.vault1,
            &pair_ledger,
            None,
            &depositor_token0.pubkey(),
            &depositor_token1.pubkey(),
        )],
    )
    .await;

    let pair_after_burn: PairState = fetch(&mut banks, &addrs.pair).await;
    assert_eq!(pair_after_burn.reserve0, (bal0_post_swap - expected_amount0) as u128);
    assert_eq!(pair_after_burn.reserve1, (bal1_post_swap - expected_amount1) as u128);
    assert_eq!(pair_after_burn.lp_mint.total_supply, expected_total_supply - burn_liquidity);

    let pair_ledger_state: LpTokenAccount = fetch(&mut banks, &pair_ledger).await;
    assert_eq!(pair_ledger_state.balance, 0);
}
