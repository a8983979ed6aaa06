use anchor_lang::prelude::*;

use crate::{constants::MESSENGER_SEED, state::Messenger};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [MESSENGER_SEED],
        bump,
        space = 8 + Messenger::INIT_SPACE
    )]
    pub messenger: Account<'info, Messenger>,

    /// Administrative authority over the messenger configuration.
    pub guardian: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<Initialize>,
    chain_id: u64,
    relayer: Pubkey,
    max_transfer_per_message: u64,
) -> Result<()> {
    *ctx.accounts.messenger = Messenger {
        guardian: ctx.accounts.guardian.key(),
        relayer,
        chain_id,
        nonce: 1, // Starts at 1 so 0 never identifies a real message
        max_transfer_per_message,
        paused: false,
    };

    msg!("Messenger initialized on chain {}", chain_id);

    Ok(())
}
