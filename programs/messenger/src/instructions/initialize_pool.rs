use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{MESSENGER_SEED, POOL_SEED},
    instructions::ConfigError,
    internal::has_transfer_fee,
    state::Messenger,
};

/// Creates the custody pool for `mint`. Value sent from this chain is locked here and value
/// arriving on this chain is released from here.
///
/// Mints with a transfer fee are refused, since every message must deliver exactly the amount it
/// names.
#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [MESSENGER_SEED],
        bump
    )]
    pub messenger: Account<'info, Messenger>,

    pub guardian: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [POOL_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = pool,
        token::token_program = token_program,
    )]
    pub pool: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_pool_handler(ctx: Context<InitializePool>) -> Result<()> {
    let mint_info = ctx.accounts.mint.to_account_info();
    require!(
        !has_transfer_fee(&mint_info.try_borrow_data()?)?,
        ConfigError::TransferFeeMint
    );

    msg!("Pool created for mint {}", ctx.accounts.mint.key());
    Ok(())
}
