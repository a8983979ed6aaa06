use anchor_lang::prelude::*;

/// Application-level ordering on top of an unordered, at-least-once transport.
///
/// Each side numbers only the messages it originates (`next_request_id`) and tracks the
/// highest id it has applied from its counterpart (`last_processed_request_id`). Because ids
/// are applied strictly in sequence, "id N has been processed" is exactly
/// `N <= last_processed_request_id`, so the processed set collapses into a single counter.
/// Id 0 is the pre-processed sentinel.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct MessageOrdering {
    /// Id attached to the next outbound message.
    pub next_request_id: u64,
    /// Highest inbound id applied so far.
    pub last_processed_request_id: u64,
}

impl Default for MessageOrdering {
    fn default() -> Self {
        Self {
            next_request_id: 1,
            last_processed_request_id: 0,
        }
    }
}

impl MessageOrdering {
    /// Returns the id for a new outbound message and advances the counter.
    pub fn assign_request_id(&mut self) -> Result<u64> {
        let request_id = self.next_request_id;
        self.next_request_id = request_id
            .checked_add(1)
            .ok_or(OrderingError::RequestIdOverflow)?;
        Ok(request_id)
    }

    pub fn is_processed(&self, request_id: u64) -> bool {
        request_id <= self.last_processed_request_id
    }

    /// Checks that `request_id` is the next inbound id to apply without recording anything.
    pub fn ensure_next(&self, request_id: u64) -> Result<()> {
        require!(
            !self.is_processed(request_id),
            OrderingError::AlreadyProcessed
        );
        require!(self.is_processed(request_id - 1), OrderingError::OutOfOrder);
        Ok(())
    }

    /// Records `request_id` as applied. Must follow a successful [`Self::ensure_next`].
    pub fn mark_processed(&mut self, request_id: u64) -> Result<()> {
        self.ensure_next(request_id)?;
        self.last_processed_request_id = request_id;
        Ok(())
    }

    /// Marks the next inbound id as processed without applying it and returns that id.
    pub fn force_advance(&mut self) -> Result<u64> {
        let skipped = self
            .last_processed_request_id
            .checked_add(1)
            .ok_or(OrderingError::RequestIdOverflow)?;
        self.last_processed_request_id = skipped;
        Ok(skipped)
    }
}

#[error_code]
pub enum OrderingError {
    #[msg("Request id has already been processed")]
    AlreadyProcessed = 200,
    #[msg("Previous request id has not been processed yet")]
    OutOfOrder,
    #[msg("Request id counter overflow")]
    RequestIdOverflow,
}
