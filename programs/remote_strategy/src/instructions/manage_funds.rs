use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use common::remote::{pull_funds, push_funds, tend_trigger, RemoteError};
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

/// Accounts for moving funds between the idle balance and the yield vault. Keeper only.
#[derive(Accounts)]
pub struct ManageFunds<'info> {
    pub keeper: Signer<'info>,

    #[account(
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

    pub yield_vault_program: Program<'info, YieldVaultProgram>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ManageFunds<'info> {
    fn venue<'a>(
        &self,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Result<YieldVaultVenue<'a, 'info>> {
        YieldVaultVenue::new(
            YieldVaultAccounts {
                program: self.yield_vault_program.to_account_info(),
                vault: self.vault.to_account_info(),
                position: self.position.to_account_info(),
                mint: self.mint.to_account_info(),
                reserve: self.reserve.to_account_info(),
                owner_token_account: self.strategy_token_account.to_account_info(),
                token_program: self.token_program.to_account_info(),
            },
            self.strategy.to_account_info(),
            signer_seeds,
        )
    }
}

#[event]
pub struct FundsPushed {
    pub requested: u64,
    pub deployed: u64,
}

#[event]
pub struct FundsPulled {
    pub requested: u64,
    pub received: u64,
}

#[event]
pub struct Tended {
    pub deployed: u64,
}

/// Deposits up to `amount` of the idle balance into the vault.
pub fn push_funds_handler(ctx: Context<ManageFunds>, amount: u64) -> Result<()> {
    let strategy = &ctx.accounts.strategy;
    strategy.roles.require_keeper(&ctx.accounts.keeper.key())?;
    require!(!strategy.shutdown, ManageFundsError::StrategyShutdown);

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let mut venue = ctx.accounts.venue(seeds)?;
    let deployed = push_funds(
        &mut venue,
        amount,
        ctx.accounts.strategy_token_account.amount,
    )?;

    emit!(FundsPushed {
        requested: amount,
        deployed,
    });

    Ok(())
}

/// Redeems up to `amount` from the vault into the idle balance. Allowed while shut down.
pub fn pull_funds_handler(ctx: Context<ManageFunds>, amount: u64) -> Result<()> {
    ctx.accounts
        .strategy
        .roles
        .require_keeper(&ctx.accounts.keeper.key())?;

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let mut venue = ctx.accounts.venue(seeds)?;
    let received = pull_funds(&mut venue, amount)?;

    emit!(FundsPulled {
        requested: amount,
        received,
    });

    Ok(())
}

/// Deploys the whole idle balance once it reaches the tend threshold.
pub fn tend_handler(ctx: Context<ManageFunds>) -> Result<()> {
    let strategy = &ctx.accounts.strategy;
    strategy.roles.require_keeper(&ctx.accounts.keeper.key())?;

    let local_balance = ctx.accounts.strategy_token_account.amount;
    require!(
        tend_trigger(local_balance, strategy.tend_threshold, strategy.shutdown),
        RemoteError::TendNotTriggered
    );

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let mut venue = ctx.accounts.venue(seeds)?;
    let deployed = push_funds(&mut venue, local_balance, local_balance)?;

    emit!(Tended { deployed });

    Ok(())
}

#[error_code]
pub enum ManageFundsError {
    #[msg("Strategy is shut down")]
    StrategyShutdown = 4100,
}
