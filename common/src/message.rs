use alloy_primitives::{I256, U256};
use alloy_sol_types::{sol, SolValue};
use anchor_lang::prelude::*;

sol! {
    /// Accounting message exchanged between the two strategies.
    ///
    /// Encoded as the standard ABI tuple `(uint256 requestId, int256 delta)` so the
    /// counterpart can be deployed on an EVM chain unchanged.
    #[derive(Debug, PartialEq, Eq)]
    struct AccountingReport {
        uint256 requestId;
        int256 delta;
    }
}

/// Two 32-byte words.
pub const REPORT_ENCODED_LEN: usize = 64;

/// Decoded form of [`AccountingReport`] with native integer types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub request_id: u64,
    pub delta: i128,
}

impl Report {
    pub fn new(request_id: u64, delta: i128) -> Self {
        Self { request_id, delta }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let delta =
            I256::try_from(self.delta).map_err(|_| error!(MessageError::ValueOutOfRange))?;

        Ok(AccountingReport {
            requestId: U256::from(self.request_id),
            delta,
        }
        .abi_encode())
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        require!(
            payload.len() == REPORT_ENCODED_LEN,
            MessageError::MalformedPayload
        );

        let report = AccountingReport::abi_decode(payload, true)
            .map_err(|_| error!(MessageError::MalformedPayload))?;

        Ok(Self {
            request_id: u64::try_from(report.requestId)
                .map_err(|_| error!(MessageError::ValueOutOfRange))?,
            delta: i128::try_from(report.delta)
                .map_err(|_| error!(MessageError::ValueOutOfRange))?,
        })
    }
}

#[error_code]
pub enum MessageError {
    #[msg("Payload is not a valid accounting report")]
    MalformedPayload = 300,
    #[msg("Value does not fit the local integer type")]
    ValueOutOfRange,
}
