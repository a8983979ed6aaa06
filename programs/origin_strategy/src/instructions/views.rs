use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use common::origin::available_deposit_limit;

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::OriginStrategy,
};

/// Read-only accounts for the limit views.
#[derive(Accounts)]
pub struct Limits<'info> {
    #[account(seeds = [STRATEGY_SEED], bump)]
    pub strategy: Account<'info, OriginStrategy>,

    #[account(seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,
}

pub fn available_deposit_limit_handler(ctx: Context<Limits>, caller: Pubkey) -> Result<u64> {
    let strategy = &ctx.accounts.strategy;
    Ok(available_deposit_limit(
        &caller,
        &strategy.depositor,
        strategy.shutdown,
    ))
}

pub fn available_withdraw_limit_handler(ctx: Context<Limits>) -> Result<u64> {
    Ok(ctx
        .accounts
        .strategy
        .accounting
        .available_withdraw_limit(ctx.accounts.strategy_token_account.amount))
}
