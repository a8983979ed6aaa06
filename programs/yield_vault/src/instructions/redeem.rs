use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{POSITION_SEED, RESERVE_SEED, VAULT_SEED},
    state::{Position, YieldVault},
};

#[derive(Accounts)]
pub struct Redeem<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        has_one = mint,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, YieldVault>,

    #[account(
        mut,
        has_one = owner,
        has_one = vault,
        seeds = [POSITION_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, seeds = [RESERVE_SEED, vault.key().as_ref()], bump)]
    pub reserve: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Redeemed {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

pub fn redeem_handler(ctx: Context<Redeem>, shares: u64) -> Result<()> {
    require!(
        shares <= ctx.accounts.position.shares,
        RedeemError::InsufficientShares
    );

    let assets = ctx
        .accounts
        .vault
        .convert_to_assets(shares, ctx.accounts.reserve.amount)?;

    let vault_key = ctx.accounts.vault.key();
    let seeds: &[&[&[u8]]] = &[&[RESERVE_SEED, vault_key.as_ref(), &[ctx.bumps.reserve]]];

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.reserve.to_account_info(),
            to: ctx.accounts.receiver_token_account.to_account_info(),
            authority: ctx.accounts.reserve.to_account_info(),
        },
        seeds,
    );
    transfer_checked(cpi_ctx, assets, ctx.accounts.mint.decimals)?;

    ctx.accounts.position.shares -= shares;
    ctx.accounts.vault.total_shares -= shares;

    emit!(Redeemed {
        vault: vault_key,
        owner: ctx.accounts.owner.key(),
        assets,
        shares,
    });

    Ok(())
}

#[error_code]
pub enum RedeemError {
    #[msg("Position does not hold enough shares")]
    InsufficientShares = 2300,
}
