use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{MESSENGER_SEED, POOL_SEED},
    internal::{dispatch, Outbound},
    state::Messenger,
};

#[derive(Accounts)]
pub struct SendMessage<'info> {
    /// Identity the message is attributed to on the destination chain.
    pub sender: Signer<'info>,

    #[account(mut, seeds = [MESSENGER_SEED], bump)]
    pub messenger: Account<'info, Messenger>,
}

pub fn send_message_handler(
    ctx: Context<SendMessage>,
    destination_chain_id: u64,
    target_program: Pubkey,
    recipient: Pubkey,
    payload: Vec<u8>,
) -> Result<()> {
    dispatch(
        &mut ctx.accounts.messenger,
        Outbound {
            sender: ctx.accounts.sender.key(),
            destination_chain_id,
            target_program,
            recipient,
            mint: Pubkey::default(),
            amount: 0,
            payload,
        },
    )?;
    Ok(())
}

/// Accounts for sending a message that carries tokens.
/// The tokens are locked in the pool for `mint` and released to the recipient on the
/// destination chain when the message is relayed.
#[derive(Accounts)]
pub struct SendMessageWithValue<'info> {
    /// Identity the message is attributed to and owner of `sender_token_account`.
    pub sender: Signer<'info>,

    #[account(mut, seeds = [MESSENGER_SEED], bump)]
    pub messenger: Account<'info, Messenger>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = sender,
        token::token_program = token_program,
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, seeds = [POOL_SEED, mint.key().as_ref()], bump)]
    pub pool: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn send_message_with_value_handler(
    ctx: Context<SendMessageWithValue>,
    destination_chain_id: u64,
    target_program: Pubkey,
    recipient: Pubkey,
    amount: u64,
    payload: Vec<u8>,
) -> Result<()> {
    require!(amount > 0, SendMessageError::ZeroAmount);
    require!(
        amount <= ctx.accounts.messenger.max_transfer_per_message,
        SendMessageError::TransferLimitExceeded
    );

    let pool_balance = ctx.accounts.pool.amount;

    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.sender_token_account.to_account_info(),
            to: ctx.accounts.pool.to_account_info(),
            authority: ctx.accounts.sender.to_account_info(),
        },
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    // The destination releases exactly `amount`, so the pool must have received all of it.
    ctx.accounts.pool.reload()?;
    let received_amount = ctx.accounts.pool.amount - pool_balance;
    require!(
        received_amount == amount,
        SendMessageError::AmountNotPreserved
    );

    dispatch(
        &mut ctx.accounts.messenger,
        Outbound {
            sender: ctx.accounts.sender.key(),
            destination_chain_id,
            target_program,
            recipient,
            mint: ctx.accounts.mint.key(),
            amount,
            payload,
        },
    )?;
    Ok(())
}

#[error_code]
pub enum SendMessageError {
    #[msg("Amount must be positive")]
    ZeroAmount = 1200,
    #[msg("Amount exceeds the per-message transfer limit")]
    TransferLimitExceeded,
    #[msg("Pool received less than the amount sent")]
    AmountNotPreserved,
}
