use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use common::{
    origin::{HealthCheck, OriginAccounting},
    Roles,
};

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::{OriginConfig, OriginStrategy},
};

/// Accounts struct for the initialize instruction that creates the origin strategy.
/// The strategy PDA owns the idle-funds token account and is the sender identity of every
/// message it emits, so the remote strategy must be linked to this PDA.
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Becomes the strategy's governance.
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [STRATEGY_SEED],
        bump,
        space = 8 + OriginStrategy::INIT_SPACE
    )]
    pub strategy: Account<'info, OriginStrategy>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [STRATEGY_TOKEN_SEED],
        bump,
        token::mint = mint,
        token::authority = strategy,
        token::token_program = token_program,
    )]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>, config: OriginConfig) -> Result<()> {
    let OriginConfig {
        depositor,
        link,
        min_finality,
        profit_limit_bps,
        loss_limit_bps,
    } = config;

    *ctx.accounts.strategy = OriginStrategy {
        roles: Roles::new(ctx.accounts.governance.key()),
        depositor,
        link,
        mint: ctx.accounts.mint.key(),
        min_finality,
        shutdown: false,
        health_check: HealthCheck::new(profit_limit_bps, loss_limit_bps, true)?,
        accounting: OriginAccounting::default(),
    };

    msg!(
        "Origin strategy linked to {} on chain {}",
        link.remote_counterpart,
        link.remote_id
    );

    Ok(())
}
