#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod internal;
pub mod state;
pub mod transport;

use instructions::*;
use state::Envelope;

pub use internal::{handle_message_data, HandleMessageArgs};

declare_id!("GWDZ1kbAja4c5aU7aKBniNbSmC6hvmpsvNYx4ykKf2Vz");

#[program]
pub mod messenger {
    use super::*;

    /// Creates the messenger configuration for this chain.
    ///
    /// # Arguments
    /// * `ctx`                      - The context containing the guardian and the config PDA
    /// * `chain_id`                 - Identifier of the local chain
    /// * `relayer`                  - Account allowed to post inbound messages
    /// * `max_transfer_per_message` - Cap on the value a single message may carry
    pub fn initialize(
        ctx: Context<Initialize>,
        chain_id: u64,
        relayer: Pubkey,
        max_transfer_per_message: u64,
    ) -> Result<()> {
        initialize_handler(ctx, chain_id, relayer, max_transfer_per_message)
    }

    pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
        initialize_pool_handler(ctx)
    }

    // Outbound

    pub fn send_message(
        ctx: Context<SendMessage>,
        destination_chain_id: u64,
        target_program: Pubkey,
        recipient: Pubkey,
        payload: Vec<u8>,
    ) -> Result<()> {
        send_message_handler(ctx, destination_chain_id, target_program, recipient, payload)
    }

    /// Sends a message and locks `amount` tokens in the pool. The same amount is released to
    /// `recipient` on the destination chain when the message is relayed there.
    pub fn send_message_with_value(
        ctx: Context<SendMessageWithValue>,
        destination_chain_id: u64,
        target_program: Pubkey,
        recipient: Pubkey,
        amount: u64,
        payload: Vec<u8>,
    ) -> Result<()> {
        send_message_with_value_handler(
            ctx,
            destination_chain_id,
            target_program,
            recipient,
            amount,
            payload,
        )
    }

    // Inbound

    /// Records a message sent on another chain. Relayer only.
    pub fn post_message(ctx: Context<PostMessage>, envelope: Envelope) -> Result<()> {
        post_message_handler(ctx, envelope)
    }

    pub fn relay_message<'a, 'info>(
        ctx: Context<'a, '_, 'info, 'info, RelayMessage<'info>>,
    ) -> Result<()> {
        relay_message_handler(ctx)
    }

    pub fn relay_message_with_value<'a, 'info>(
        ctx: Context<'a, '_, 'info, 'info, RelayMessageWithValue<'info>>,
    ) -> Result<()> {
        relay_message_with_value_handler(ctx)
    }

    // Config

    pub fn set_relayer(ctx: Context<SetMessengerConfig>, relayer: Pubkey) -> Result<()> {
        set_relayer_handler(ctx, relayer)
    }

    pub fn set_max_transfer_per_message(
        ctx: Context<SetMessengerConfig>,
        max_transfer_per_message: u64,
    ) -> Result<()> {
        set_max_transfer_per_message_handler(ctx, max_transfer_per_message)
    }

    pub fn set_paused(ctx: Context<SetMessengerConfig>, paused: bool) -> Result<()> {
        set_paused_handler(ctx, paused)
    }

    pub fn transfer_guardian(ctx: Context<SetMessengerConfig>, new_guardian: Pubkey) -> Result<()> {
        transfer_guardian_handler(ctx, new_guardian)
    }
}
