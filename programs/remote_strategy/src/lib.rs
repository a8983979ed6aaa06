#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::RemoteConfig;

declare_id!("Doe9bqhCuuC8TUjhstbvV4DpsZRRiLdJcQPCxRBD8GY1");

/// Deploys capital bridged from the origin strategy into a yield vault and reports the results
/// back.
#[program]
pub mod remote_strategy {
    use super::*;

    /// Creates the strategy, its idle-funds token account and its vault position.
    ///
    /// # Arguments
    /// * `ctx`    - The context containing the payer, governance, mint, vault and strategy PDAs
    /// * `config` - Origin link, finality floor and optional tend threshold
    pub fn initialize(ctx: Context<Initialize>, config: RemoteConfig) -> Result<()> {
        initialize_handler(ctx, config)
    }

    /// Entry point for deposit credits relayed by the messenger.
    pub fn handle_message(
        ctx: Context<HandleMessage>,
        source_chain_id: u64,
        sender: Pubkey,
        finality: u32,
        payload: Vec<u8>,
    ) -> Result<()> {
        handle_message_handler(ctx, source_chain_id, sender, finality, payload)
    }

    // Keeper

    pub fn push_funds(ctx: Context<ManageFunds>, amount: u64) -> Result<()> {
        push_funds_handler(ctx, amount)
    }

    pub fn pull_funds(ctx: Context<ManageFunds>, amount: u64) -> Result<()> {
        pull_funds_handler(ctx, amount)
    }

    pub fn tend(ctx: Context<ManageFunds>) -> Result<()> {
        tend_handler(ctx)
    }

    /// Sends the change in total assets since the previous report. At most one per second.
    pub fn report(ctx: Context<Report>) -> Result<()> {
        report_handler(ctx)
    }

    /// Bridges up to `amount` back to the origin strategy, pulling from the vault as needed.
    ///
    /// # Arguments
    /// * `ctx`    - The context containing the keeper, strategy, vault and messenger accounts
    /// * `amount` - Amount requested. Capped to what is obtainable instead of failing
    pub fn process_withdrawal(ctx: Context<ProcessWithdrawal>, amount: u64) -> Result<()> {
        process_withdrawal_handler(ctx, amount)
    }

    // Views

    pub fn tend_trigger(ctx: Context<TendTrigger>) -> Result<bool> {
        tend_trigger_handler(ctx)
    }

    // Config

    pub fn set_keeper(
        ctx: Context<SetStrategyConfig>,
        keeper: Pubkey,
        allowed: bool,
    ) -> Result<()> {
        set_keeper_handler(ctx, keeper, allowed)
    }

    pub fn set_shutdown(ctx: Context<SetStrategyConfig>, shutdown: bool) -> Result<()> {
        set_shutdown_handler(ctx, shutdown)
    }

    pub fn set_tend_threshold(ctx: Context<SetStrategyConfig>, tend_threshold: u64) -> Result<()> {
        set_tend_threshold_handler(ctx, tend_threshold)
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
