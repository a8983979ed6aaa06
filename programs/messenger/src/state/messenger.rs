use anchor_lang::prelude::*;

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Messenger {
    /// Authority allowed to update the configuration below.
    pub guardian: Pubkey,
    /// Only account allowed to post inbound messages.
    pub relayer: Pubkey,
    /// Identifier of the chain this messenger runs on.
    pub chain_id: u64,
    /// Nonce of the next outbound message.
    pub nonce: u64,
    /// Upper bound on the amount a single message can carry.
    pub max_transfer_per_message: u64,
    pub paused: bool,
}
