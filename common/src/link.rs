use anchor_lang::prelude::*;

use crate::transport::{InboundMessage, TransportError};

/// Identity of the counterpart strategy. Written once at initialization and never updated.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RemoteLink {
    /// Chain id of the counterpart as assigned by the messenger.
    pub remote_id: u64,
    /// Address the counterpart sends from (its strategy account).
    pub remote_counterpart: Pubkey,
    /// Program the messenger invokes on the counterpart chain.
    pub remote_program: Pubkey,
}

impl RemoteLink {
    /// Rejects anything not attested as coming from the counterpart with enough finality.
    pub fn verify_inbound(&self, inbound: &InboundMessage, min_finality: u32) -> Result<()> {
        require!(
            inbound.source_chain_id == self.remote_id,
            TransportError::InvalidSourceChain
        );
        require!(
            inbound.sender == self.remote_counterpart,
            TransportError::InvalidSender
        );
        require!(!inbound.payload.is_empty(), TransportError::EmptyPayload);
        require!(
            inbound.finality >= min_finality,
            TransportError::InsufficientFinality
        );
        Ok(())
    }
}
