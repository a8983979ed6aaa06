use anchor_lang::prelude::*;

use crate::{
    constants::{MESSENGER_SEED, RECEIVED_MESSAGE_SEED},
    state::{Envelope, Messenger, ReceivedMessage},
};

/// Records a message observed on its source chain so it can be relayed here.
///
/// The received message PDA is keyed by source chain and nonce, so each message can be posted
/// at most once.
#[derive(Accounts)]
#[instruction(envelope: Envelope)]
pub struct PostMessage<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub relayer: Signer<'info>,

    #[account(
        has_one = relayer @ PostMessageError::UnauthorizedRelayer,
        seeds = [MESSENGER_SEED],
        bump
    )]
    pub messenger: Account<'info, Messenger>,

    #[account(
        init,
        payer = payer,
        seeds = [
            RECEIVED_MESSAGE_SEED,
            envelope.source_chain_id.to_le_bytes().as_ref(),
            envelope.nonce.to_le_bytes().as_ref(),
        ],
        bump,
        space = 8 + ReceivedMessage::space(envelope.payload.len()),
    )]
    pub received_message: Account<'info, ReceivedMessage>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct MessagePosted {
    pub source_chain_id: u64,
    pub nonce: u64,
    pub sender: Pubkey,
    pub target_program: Pubkey,
    pub amount: u64,
}

pub fn post_message_handler(ctx: Context<PostMessage>, envelope: Envelope) -> Result<()> {
    require!(
        envelope.destination_chain_id == ctx.accounts.messenger.chain_id,
        PostMessageError::WrongDestination
    );
    require!(!envelope.payload.is_empty(), PostMessageError::EmptyPayload);

    emit!(MessagePosted {
        source_chain_id: envelope.source_chain_id,
        nonce: envelope.nonce,
        sender: envelope.sender,
        target_program: envelope.target_program,
        amount: envelope.amount,
    });

    *ctx.accounts.received_message = ReceivedMessage {
        envelope,
        executed: false,
    };

    Ok(())
}

#[error_code]
pub enum PostMessageError {
    #[msg("Only the relayer can post messages")]
    UnauthorizedRelayer = 1300,
    #[msg("Message is addressed to another chain")]
    WrongDestination,
    #[msg("Empty payload")]
    EmptyPayload,
}
