use anchor_lang::prelude::*;

/// A message as emitted by the messenger on its source chain.
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct Envelope {
    pub nonce: u64,
    pub source_chain_id: u64,
    pub destination_chain_id: u64,
    pub sender: Pubkey,
    pub target_program: Pubkey,
    /// Owner of the token account credited on delivery.
    pub recipient: Pubkey,
    /// Mint of the carried value on the destination chain. Ignored when `amount` is zero.
    pub mint: Pubkey,
    pub amount: u64,
    /// Confidence level the relayer observed the source block at.
    pub finality: u32,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn space(payload_len: usize) -> usize {
        8 + 8 + 8 + 32 + 32 + 32 + 32 + 8 + 4 + (4 + payload_len)
    }
}

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub envelope: Envelope,
    pub executed: bool,
}

impl ReceivedMessage {
    pub fn space(payload_len: usize) -> usize {
        Envelope::space(payload_len) + 1
    }
}
