use anchor_lang::prelude::*;

use crate::{
    constants::{POSITION_SEED, VAULT_SEED},
    state::{Position, YieldVault},
};

#[derive(Accounts)]
pub struct OpenPosition<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub owner: Signer<'info>,

    #[account(seeds = [VAULT_SEED, vault.mint.as_ref()], bump)]
    pub vault: Account<'info, YieldVault>,

    #[account(
        init,
        payer = payer,
        seeds = [POSITION_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump,
        space = 8 + Position::INIT_SPACE
    )]
    pub position: Account<'info, Position>,

    pub system_program: Program<'info, System>,
}

pub fn open_position_handler(ctx: Context<OpenPosition>) -> Result<()> {
    *ctx.accounts.position = Position {
        vault: ctx.accounts.vault.key(),
        owner: ctx.accounts.owner.key(),
        shares: 0,
    };
    Ok(())
}
