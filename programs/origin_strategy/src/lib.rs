#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::OriginConfig;

declare_id!("UNbywGsMaYPM2jzEJT7oi3qpLbTE8uppFX7qfqVKCDx");

#[program]
pub mod origin_strategy {
    use super::*;

    /// Creates the strategy and its idle-funds token account.
    ///
    /// # Arguments
    /// * `ctx`    - The context containing the payer, governance, mint and the strategy PDAs
    /// * `config` - Depositor, remote link, finality floor and health check limits
    pub fn initialize(ctx: Context<Initialize>, config: OriginConfig) -> Result<()> {
        initialize_handler(ctx, config)
    }

    /// Takes `amount` from the depositor and bridges as much of it as the messenger allows
    /// to the remote strategy. The remainder stays idle on this chain.
    ///
    /// # Arguments
    /// * `ctx`    - The context containing the depositor, the strategy and messenger accounts
    /// * `amount` - Amount of the strategy asset to deposit
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        deposit_handler(ctx, amount)
    }

    /// Returns idle funds to the depositor. Remote capital is not withdrawable here.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        withdraw_handler(ctx, amount)
    }

    /// Entry point for reports relayed by the messenger.
    pub fn handle_message(
        ctx: Context<HandleMessage>,
        source_chain_id: u64,
        sender: Pubkey,
        finality: u32,
        payload: Vec<u8>,
    ) -> Result<()> {
        handle_message_handler(ctx, source_chain_id, sender, finality, payload)
    }

    /// Recomputes total assets from the local balance and believed remote capital. Keeper only.
    pub fn harvest_and_report(ctx: Context<HarvestAndReport>) -> Result<()> {
        harvest_and_report_handler(ctx)
    }

    // Views

    pub fn available_deposit_limit(ctx: Context<Limits>, caller: Pubkey) -> Result<u64> {
        available_deposit_limit_handler(ctx, caller)
    }

    pub fn available_withdraw_limit(ctx: Context<Limits>) -> Result<u64> {
        available_withdraw_limit_handler(ctx)
    }

    // Config

    pub fn set_keeper(
        ctx: Context<SetStrategyConfig>,
        keeper: Pubkey,
        allowed: bool,
    ) -> Result<()> {
        set_keeper_handler(ctx, keeper, allowed)
    }

    pub fn set_depositor(ctx: Context<SetStrategyConfig>, depositor: Pubkey) -> Result<()> {
        set_depositor_handler(ctx, depositor)
    }

    pub fn set_shutdown(ctx: Context<SetStrategyConfig>, shutdown: bool) -> Result<()> {
        set_shutdown_handler(ctx, shutdown)
    }

    pub fn set_health_check(
        ctx: Context<SetStrategyConfig>,
        profit_limit_bps: u16,
        loss_limit_bps: u16,
        enabled: bool,
    ) -> Result<()> {
        set_health_check_handler(ctx, profit_limit_bps, loss_limit_bps, enabled)
    }

    pub fn set_min_finality(ctx: Context<SetStrategyConfig>, min_finality: u32) -> Result<()> {
        set_min_finality_handler(ctx, min_finality)
    }

    pub fn skip_request(ctx: Context<SetStrategyConfig>, correction: i128) -> Result<()> {
        skip_request_handler(ctx, correction)
    }

    pub fn transfer_governance(
        ctx: Context<SetStrategyConfig>,
        new_governance: Pubkey,
    ) -> Result<()> {
        transfer_governance_handler(ctx, new_governance)
    }
}
