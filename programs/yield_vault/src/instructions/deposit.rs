use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{POSITION_SEED, RESERVE_SEED, VAULT_SEED},
    state::{Position, YieldVault},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

pub fn deposit_handler(ctx: Context<Deposit>, assets: u64) -> Result<()> {
    let total_assets = ctx.accounts.reserve.amount;

    require!(
        assets <= ctx.accounts.vault.max_deposit(total_assets),
        DepositError::DepositCapExceeded
    );

    let shares = ctx.accounts.vault.convert_to_shares(assets, total_assets)?;
    require!(shares > 0, DepositError::ZeroShares);

    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.owner_token_account.to_account_info(),
            to: ctx.accounts.reserve.to_account_info(),
            authority: ctx.accounts.owner.to_account_info(),
        },
    );
    transfer_checked(cpi_ctx, assets, ctx.accounts.mint.decimals)?;

    ctx.accounts.vault.total_shares = ctx
        .accounts
        .vault
        .total_shares
        .checked_add(shares)
        .ok_or(DepositError::SharesOverflow)?;
    ctx.accounts.position.shares += shares;

    emit!(Deposited {
        vault: ctx.accounts.vault.key(),
        owner: ctx.accounts.owner.key(),
        assets,
        shares,
    });

    Ok(())
}

#[error_code]
pub enum DepositError {
    #[msg("Deposit exceeds the vault cap")]
    DepositCapExceeded = 2200,
    #[msg("Deposit is too small to mint a share")]
    ZeroShares,
    #[msg("Share supply overflow")]
    SharesOverflow,
}
