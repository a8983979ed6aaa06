use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use common::remote;

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::RemoteStrategy,
};

#[derive(Accounts)]
pub struct TendTrigger<'info> {
    #[account(seeds = [STRATEGY_SEED], bump)]
    pub strategy: Account<'info, RemoteStrategy>,

    #[account(seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,
}

pub fn tend_trigger_handler(ctx: Context<TendTrigger>) -> Result<bool> {
    let strategy = &ctx.accounts.strategy;
    Ok(remote::tend_trigger(
        ctx.accounts.strategy_token_account.amount,
        strategy.tend_threshold,
        strategy.shutdown,
    ))
}
