use anchor_lang::prelude::*;

use crate::{constants::MESSENGER_SEED, state::Messenger};

/// Accounts for messenger configuration setters. Only the guardian can update them.
#[derive(Accounts)]
pub struct SetMessengerConfig<'info> {
    #[account(
        mut,
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [MESSENGER_SEED],
        bump
    )]
    pub messenger: Account<'info, Messenger>,

    pub guardian: Signer<'info>,
}

pub fn set_relayer_handler(ctx: Context<SetMessengerConfig>, relayer: Pubkey) -> Result<()> {
    ctx.accounts.messenger.relayer = relayer;
    Ok(())
}

pub fn set_max_transfer_per_message_handler(
    ctx: Context<SetMessengerConfig>,
    max_transfer_per_message: u64,
) -> Result<()> {
    ctx.accounts.messenger.max_transfer_per_message = max_transfer_per_message;
    Ok(())
}

pub fn set_paused_handler(ctx: Context<SetMessengerConfig>, paused: bool) -> Result<()> {
    ctx.accounts.messenger.paused = paused;
    Ok(())
}

pub fn transfer_guardian_handler(
    ctx: Context<SetMessengerConfig>,
    new_guardian: Pubkey,
) -> Result<()> {
    let old_guardian = ctx.accounts.messenger.guardian;
    ctx.accounts.messenger.guardian = new_guardian;

    emit!(GuardianTransferred {
        old_guardian,
        new_guardian,
    });

    Ok(())
}

/// Event for monitoring guardian transfers
#[event]
pub struct GuardianTransferred {
    pub old_guardian: Pubkey,
    pub new_guardian: Pubkey,
}

#[error_code]
pub enum ConfigError {
    #[msg("Unauthorized to update configuration")]
    UnauthorizedConfigUpdate = 1100,
    #[msg("Mints with a transfer fee are not supported")]
    TransferFeeMint,
}
