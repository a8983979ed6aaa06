use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{MESSENGER_AUTHORITY_SEED, MESSENGER_SEED, POOL_SEED},
    internal::invoke_handle_message,
    state::{Messenger, ReceivedMessage},
};

/// Delivers a posted message without value to its target program.
///
/// The accounts the target's `handle_message` expects, after the messenger authority, are
/// passed as remaining accounts.
#[derive(Accounts)]
pub struct RelayMessage<'info> {
    #[account(seeds = [MESSENGER_SEED], bump)]
    pub messenger: Account<'info, Messenger>,

    #[account(mut)]
    pub received_message: Account<'info, ReceivedMessage>,

    /// CHECK: Signs the target call on behalf of the remote sender.
    #[account(
        seeds = [
            MESSENGER_AUTHORITY_SEED,
            received_message.envelope.source_chain_id.to_le_bytes().as_ref(),
            received_message.envelope.sender.as_ref(),
        ],
        bump
    )]
    pub messenger_authority: AccountInfo<'info>,

    /// CHECK: Must be the program the message targets.
    #[account(
        executable,
        address = received_message.envelope.target_program @ RelayMessageError::IncorrectTargetProgram
    )]
    pub target_program: AccountInfo<'info>,
}

pub fn relay_message_handler<'a, 'info>(
    ctx: Context<'a, '_, 'info, 'info, RelayMessage<'info>>,
) -> Result<()> {
    require!(
        !ctx.accounts.messenger.paused,
        RelayMessageError::MessengerPaused
    );
    require!(
        !ctx.accounts.received_message.executed,
        RelayMessageError::AlreadyExecuted
    );
    require!(
        ctx.accounts.received_message.envelope.amount == 0,
        RelayMessageError::ValueNotReleased
    );

    invoke_handle_message(
        &ctx.accounts.received_message.envelope,
        &ctx.accounts.messenger_authority,
        ctx.bumps.messenger_authority,
        &ctx.accounts.target_program,
        ctx.remaining_accounts,
    )?;

    ctx.accounts.received_message.executed = true;

    Ok(())
}

/// Delivers a posted message that carries value: releases the tokens from the local pool to
/// the recipient, then calls the target program.
#[derive(Accounts)]
pub struct RelayMessageWithValue<'info> {
    #[account(seeds = [MESSENGER_SEED], bump)]
    pub messenger: Account<'info, Messenger>,

    #[account(mut)]
    pub received_message: Account<'info, ReceivedMessage>,

    /// CHECK: Signs the target call on behalf of the remote sender.
    #[account(
        seeds = [
            MESSENGER_AUTHORITY_SEED,
            received_message.envelope.source_chain_id.to_le_bytes().as_ref(),
            received_message.envelope.sender.as_ref(),
        ],
        bump
    )]
    pub messenger_authority: AccountInfo<'info>,

    /// CHECK: Must be the program the message targets.
    #[account(
        executable,
        address = received_message.envelope.target_program @ RelayMessageError::IncorrectTargetProgram
    )]
    pub target_program: AccountInfo<'info>,

    #[account(address = received_message.envelope.mint @ RelayMessageError::IncorrectMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, mint.key().as_ref()], bump)]
    pub pool: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = received_message.envelope.recipient,
        token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn relay_message_with_value_handler<'a, 'info>(
    ctx: Context<'a, '_, 'info, 'info, RelayMessageWithValue<'info>>,
) -> Result<()> {
    require!(
        !ctx.accounts.messenger.paused,
        RelayMessageError::MessengerPaused
    );
    require!(
        !ctx.accounts.received_message.executed,
        RelayMessageError::AlreadyExecuted
    );

    let amount = ctx.accounts.received_message.envelope.amount;
    require!(amount > 0, RelayMessageError::NoValue);
    require!(
        ctx.accounts.pool.amount >= amount,
        RelayMessageError::InsufficientBridgeLiquidity
    );

    let mint_key = ctx.accounts.mint.key();
    let seeds: &[&[&[u8]]] = &[&[POOL_SEED, mint_key.as_ref(), &[ctx.bumps.pool]]];

    // Release the tokens before the target runs so it sees them in its balance.
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.pool.to_account_info(),
            to: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.pool.to_account_info(),
        },
        seeds,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    invoke_handle_message(
        &ctx.accounts.received_message.envelope,
        &ctx.accounts.messenger_authority,
        ctx.bumps.messenger_authority,
        &ctx.accounts.target_program,
        ctx.remaining_accounts,
    )?;

    ctx.accounts.received_message.executed = true;

    Ok(())
}

#[error_code]
pub enum RelayMessageError {
    #[msg("Already executed")]
    AlreadyExecuted = 1400,
    #[msg("Messenger is paused")]
    MessengerPaused,
    #[msg("Incorrect target program")]
    IncorrectTargetProgram,
    #[msg("Incorrect mint")]
    IncorrectMint,
    #[msg("Message carries value and must be relayed with it")]
    ValueNotReleased,
    #[msg("Message carries no value")]
    NoValue,
    #[msg("Pool does not hold enough tokens to release the carried value")]
    InsufficientBridgeLiquidity,
}
