use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{RESERVE_SEED, VAULT_SEED},
    state::YieldVault,
};

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Can update the deposit cap.
    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump,
        space = 8 + YieldVault::INIT_SPACE
    )]
    pub vault: Account<'info, YieldVault>,

    /// Holds every asset of the vault.
    #[account(
        init,
        payer = payer,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = reserve,
        token::token_program = token_program,
    )]
    pub reserve: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_vault_handler(ctx: Context<InitializeVault>, deposit_cap: u64) -> Result<()> {
    *ctx.accounts.vault = YieldVault {
        authority: ctx.accounts.authority.key(),
        mint: ctx.accounts.mint.key(),
        total_shares: 0,
        deposit_cap,
    };
    Ok(())
}
