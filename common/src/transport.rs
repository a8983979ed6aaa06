use anchor_lang::prelude::*;

/// Finality level attached to messages relayed after soft confirmation.
pub const FINALITY_THRESHOLD_CONFIRMED: u32 = 1000;
/// Finality level attached to messages relayed after the source block is finalized.
pub const FINALITY_THRESHOLD_FINALIZED: u32 = 2000;

/// A message as handed to a strategy by the transport.
///
/// `source_chain_id` and `sender` are attested by the transport. The payload is opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InboundMessage<'a> {
    pub source_chain_id: u64,
    pub sender: Pubkey,
    pub finality: u32,
    pub payload: &'a [u8],
}

/// Outbound side of the messaging layer.
///
/// Delivery is asynchronous and at-least-once with no ordering across messages. Implementations
/// address the counterpart recorded in the strategy's link, so callers only supply the payload.
pub trait Transport {
    /// Largest amount a single asset-bearing message can carry.
    fn max_transfer(&self) -> u64;

    fn send(&mut self, payload: Vec<u8>) -> Result<()>;

    /// Sends `payload` together with `amount` of the strategy's asset.
    fn send_with_value(&mut self, payload: Vec<u8>, amount: u64) -> Result<()>;
}

#[error_code]
pub enum TransportError {
    #[msg("Message does not come from the linked chain")]
    InvalidSourceChain = 400,
    #[msg("Message does not come from the linked counterpart")]
    InvalidSender,
    #[msg("Empty payload")]
    EmptyPayload,
    #[msg("Message finality is below the configured minimum")]
    InsufficientFinality,
    #[msg("Transfer exceeds the per-message limit")]
    TransferLimitExceeded,
}
