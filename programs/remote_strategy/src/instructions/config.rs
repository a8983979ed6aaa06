use anchor_lang::prelude::*;

use crate::{constants::STRATEGY_SEED, state::RemoteStrategy};

/// Accounts for strategy configuration setters. Only governance can update them.
#[derive(Accounts)]
pub struct SetStrategyConfig<'info> {
    #[account(
        mut,
        constraint = strategy.roles.is_governance(&governance.key())
            @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [STRATEGY_SEED],
        bump
    )]
    pub strategy: Account<'info, RemoteStrategy>,

    pub governance: Signer<'info>,
}

pub fn set_keeper_handler(
    ctx: Context<SetStrategyConfig>,
    keeper: Pubkey,
    allowed: bool,
) -> Result<()> {
    ctx.accounts.strategy.roles.set_keeper(keeper, allowed)?;
    emit!(KeeperUpdated { keeper, allowed });
    Ok(())
}

pub fn set_shutdown_handler(ctx: Context<SetStrategyConfig>, shutdown: bool) -> Result<()> {
    ctx.accounts.strategy.shutdown = shutdown;
    emit!(ShutdownUpdated { shutdown });
    Ok(())
}

/// `u64::MAX` disables tending.
pub fn set_tend_threshold_handler(
    ctx: Context<SetStrategyConfig>,
    tend_threshold: u64,
) -> Result<()> {
    ctx.accounts.strategy.tend_threshold = tend_threshold;
    Ok(())
}

pub fn set_min_finality_handler(ctx: Context<SetStrategyConfig>, min_finality: u32) -> Result<()> {
    ctx.accounts.strategy.min_finality = min_finality;
    Ok(())
}

/// Abandons the next inbound deposit credit and adds `correction` to the tracked total.
///
/// The tokens of an unrelayed credit stay in the messenger pool. Passing the credit's amount
/// keeps the tracked total in line with the origin, and the next report writes it off there.
pub fn skip_request_handler(ctx: Context<SetStrategyConfig>, correction: i128) -> Result<()> {
    let skipped = ctx.accounts.strategy.accounting.skip_request(correction)?;
    msg!(
        "Skipped request {} with correction {}",
        skipped.request_id,
        correction
    );
    emit!(RequestSkipped {
        request_id: skipped.request_id,
        correction,
    });
    Ok(())
}

pub fn transfer_governance_handler(
    ctx: Context<SetStrategyConfig>,
    new_governance: Pubkey,
) -> Result<()> {
    let old_governance = ctx.accounts.strategy.roles.governance;
    ctx.accounts.strategy.roles.governance = new_governance;

    emit!(GovernanceTransferred {
        old_governance,
        new_governance,
    });

    Ok(())
}

#[event]
pub struct KeeperUpdated {
    pub keeper: Pubkey,
    pub allowed: bool,
}

#[event]
pub struct ShutdownUpdated {
    pub shutdown: bool,
}

#[event]
pub struct RequestSkipped {
    pub request_id: u64,
    pub correction: i128,
}

/// Event for monitoring governance transfers
#[event]
pub struct GovernanceTransferred {
    pub old_governance: Pubkey,
    pub new_governance: Pubkey,
}

#[error_code]
pub enum ConfigError {
    #[msg("Unauthorized to update configuration")]
    UnauthorizedConfigUpdate = 4200,
}
