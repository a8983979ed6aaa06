use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use messenger::{
    constants::{MESSENGER_SEED, POOL_SEED},
    transport::{MessengerTransport, ValueAccounts},
};
use yield_vault::{
    constants::{POSITION_SEED, RESERVE_SEED},
    program::YieldVault as YieldVaultProgram,
    state::{Position, YieldVault},
    venue::{YieldVaultAccounts, YieldVaultVenue},
};

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::RemoteStrategy,
};

/// Accounts struct for bridging funds back to the origin strategy.
/// The tokens and the accounting update travel in the same message. Keeper only.
#[derive(Accounts)]
pub struct ProcessWithdrawal<'info> {
    pub keeper: Signer<'info>,

    #[account(
        mut,
        seeds = [STRATEGY_SEED],
        bump,
        has_one = mint,
        has_one = vault,
    )]
    pub strategy: Account<'info, RemoteStrategy>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub vault: Account<'info, YieldVault>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault.key().as_ref(), strategy.key().as_ref()],
        bump,
        seeds::program = yield_vault::ID
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump,
        seeds::program = yield_vault::ID
    )]
    pub reserve: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, seeds = [MESSENGER_SEED], bump, seeds::program = messenger::ID)]
    pub messenger: Account<'info, messenger::state::Messenger>,

    /// Custody account the bridged amount is locked in.
    #[account(
        mut,
        seeds = [POOL_SEED, mint.key().as_ref()],
        bump,
        seeds::program = messenger::ID
    )]
    pub messenger_pool: InterfaceAccount<'info, TokenAccount>,

    pub messenger_program: Program<'info, messenger::program::Messenger>,

    pub yield_vault_program: Program<'info, YieldVaultProgram>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct WithdrawalProcessed {
    pub request_id: u64,
    pub requested: u64,
    pub pulled: u64,
    pub bridged: u64,
    pub total_assets: u64,
    pub delta: i128,
}

pub fn process_withdrawal_handler(ctx: Context<ProcessWithdrawal>, amount: u64) -> Result<()> {
    ctx.accounts
        .strategy
        .roles
        .require_keeper(&ctx.accounts.keeper.key())?;
    let now = Clock::get()?.unix_timestamp;

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let mut venue = YieldVaultVenue::new(
        YieldVaultAccounts {
            program: ctx.accounts.yield_vault_program.to_account_info(),
            vault: ctx.accounts.vault.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            reserve: ctx.accounts.reserve.to_account_info(),
            owner_token_account: ctx.accounts.strategy_token_account.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        ctx.accounts.strategy.to_account_info(),
        seeds,
    )?;
    let mut transport = MessengerTransport::new(
        ctx.accounts.messenger_program.to_account_info(),
        ctx.accounts.messenger.to_account_info(),
        ctx.accounts.strategy.to_account_info(),
        seeds,
        ctx.accounts.strategy.link,
        Some(ValueAccounts {
            mint: ctx.accounts.mint.to_account_info(),
            sender_token_account: ctx.accounts.strategy_token_account.to_account_info(),
            pool: ctx.accounts.messenger_pool.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        }),
    )?;

    let local_balance = ctx.accounts.strategy_token_account.amount;
    let outcome = ctx.accounts.strategy.accounting.process_withdrawal(
        &mut venue,
        &mut transport,
        amount,
        local_balance,
        now,
    )?;

    msg!(
        "Withdrawal {} bridged {} of {} requested",
        outcome.request_id,
        outcome.bridged,
        amount
    );

    emit!(WithdrawalProcessed {
        request_id: outcome.request_id,
        requested: outcome.requested,
        pulled: outcome.pulled,
        bridged: outcome.bridged,
        total_assets: outcome.total_assets,
        delta: outcome.delta,
    });

    Ok(())
}
