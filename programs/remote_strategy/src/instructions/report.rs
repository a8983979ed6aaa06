use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use messenger::{constants::MESSENGER_SEED, transport::MessengerTransport};
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

/// Accounts struct for sending a profit and loss report to the origin strategy.
/// Idle funds are deployed first unless the strategy is shut down. Keeper only.
#[derive(Accounts)]
pub struct Report<'info> {
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

    pub messenger_program: Program<'info, messenger::program::Messenger>,

    pub yield_vault_program: Program<'info, YieldVaultProgram>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Reported {
    pub request_id: u64,
    pub total_assets: u64,
    pub delta: i128,
    pub deployed: u64,
}

pub fn report_handler(ctx: Context<Report>) -> Result<()> {
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
        None,
    )?;

    let local_balance = ctx.accounts.strategy_token_account.amount;
    let strategy = &mut ctx.accounts.strategy;
    let shutdown = strategy.shutdown;
    let outcome = strategy.accounting.report(
        &mut venue,
        &mut transport,
        local_balance,
        now,
        shutdown,
    )?;

    msg!("Reported {} with delta {}", outcome.request_id, outcome.delta);

    emit!(Reported {
        request_id: outcome.request_id,
        total_assets: outcome.total_assets,
        delta: outcome.delta,
        deployed: outcome.deployed,
    });

    Ok(())
}
