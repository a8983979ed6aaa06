use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::OriginStrategy,
};

#[derive(Accounts)]
pub struct HarvestAndReport<'info> {
    pub keeper: Signer<'info>,

    #[account(mut, seeds = [STRATEGY_SEED], bump)]
    pub strategy: Account<'info, OriginStrategy>,

    #[account(seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,
}

#[event]
pub struct Harvested {
    pub total_assets: u64,
    pub profit: u64,
    pub loss: u64,
}

pub fn harvest_and_report_handler(ctx: Context<HarvestAndReport>) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    strategy.roles.require_keeper(&ctx.accounts.keeper.key())?;

    let local_balance = ctx.accounts.strategy_token_account.amount;
    let OriginStrategy {
        accounting,
        health_check,
        ..
    } = &mut **strategy;
    let harvest = accounting.harvest_and_report(local_balance, health_check)?;

    emit!(Harvested {
        total_assets: harvest.total_assets,
        profit: harvest.profit,
        loss: harvest.loss,
    });

    Ok(())
}
