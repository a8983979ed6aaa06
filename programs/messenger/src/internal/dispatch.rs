use anchor_lang::prelude::*;

use crate::{constants::MAX_PAYLOAD_SIZE, state::Messenger};

/// Emitted for every outbound message. Relayers pick these up and post them on the
/// destination chain.
#[event]
pub struct MessageSent {
    pub nonce: u64,
    pub source_chain_id: u64,
    pub destination_chain_id: u64,
    pub sender: Pubkey,
    pub target_program: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub payload: Vec<u8>,
}

pub struct Outbound {
    pub sender: Pubkey,
    pub destination_chain_id: u64,
    pub target_program: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub payload: Vec<u8>,
}

/// Validates and emits an outbound message, returning its nonce.
pub fn dispatch(messenger: &mut Messenger, outbound: Outbound) -> Result<u64> {
    let Outbound {
        sender,
        destination_chain_id,
        target_program,
        recipient,
        mint,
        amount,
        payload,
    } = outbound;

    require!(!messenger.paused, DispatchError::MessengerPaused);
    require!(!payload.is_empty(), DispatchError::EmptyPayload);
    require!(
        payload.len() <= MAX_PAYLOAD_SIZE,
        DispatchError::PayloadTooLarge
    );
    require!(
        destination_chain_id != messenger.chain_id,
        DispatchError::InvalidDestination
    );

    let nonce = messenger.nonce;
    messenger.nonce = nonce.checked_add(1).ok_or(DispatchError::NonceOverflow)?;

    emit!(MessageSent {
        nonce,
        source_chain_id: messenger.chain_id,
        destination_chain_id,
        sender,
        target_program,
        recipient,
        mint,
        amount,
        payload,
    });

    Ok(nonce)
}

#[error_code]
pub enum DispatchError {
    #[msg("Messenger is paused")]
    MessengerPaused = 1000,
    #[msg("Empty payload")]
    EmptyPayload,
    #[msg("Payload too large")]
    PayloadTooLarge,
    #[msg("Destination is the local chain")]
    InvalidDestination,
    #[msg("Nonce overflow")]
    NonceOverflow,
}
