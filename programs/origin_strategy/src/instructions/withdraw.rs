use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::OriginStrategy,
};

/// Accounts struct for withdrawing idle funds back to the depositor.
/// Only the local balance can be withdrawn; capital deployed on the remote chain has to be
/// bridged back first.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [STRATEGY_SEED],
        bump,
        has_one = depositor @ WithdrawError::Unauthorized,
        has_one = mint @ WithdrawError::IncorrectMint,
    )]
    pub strategy: Account<'info, OriginStrategy>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Withdrawn {
    pub receiver: Pubkey,
    pub amount: u64,
    pub total_assets: u64,
}

pub fn withdraw_handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(amount > 0, WithdrawError::ZeroAmount);

    let local_balance = ctx.accounts.strategy_token_account.amount;
    ctx.accounts.strategy.accounting.withdraw(amount, local_balance)?;

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.strategy_token_account.to_account_info(),
            to: ctx.accounts.receiver_token_account.to_account_info(),
            authority: ctx.accounts.strategy.to_account_info(),
        },
        seeds,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    emit!(Withdrawn {
        receiver: ctx.accounts.receiver_token_account.key(),
        amount,
        total_assets: ctx.accounts.strategy.accounting.total_assets,
    });

    Ok(())
}

#[error_code]
pub enum WithdrawError {
    #[msg("Only the depositor can withdraw")]
    Unauthorized = 3100,
    #[msg("Mint does not match the strategy asset")]
    IncorrectMint,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
}
