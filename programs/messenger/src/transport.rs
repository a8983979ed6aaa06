//! [`Transport`] implementation that sends through this program via CPI.
//!
//! Sender programs build a [`MessengerTransport`] from the accounts of their instruction and
//! hand it to the accounting core, which stays unaware of the messenger.

use anchor_lang::prelude::*;
use common::{RemoteLink, Transport};

use crate::{cpi, state::Messenger};

/// Token accounts needed to attach value to a message.
pub struct ValueAccounts<'info> {
    pub mint: AccountInfo<'info>,
    pub sender_token_account: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub struct MessengerTransport<'a, 'info> {
    messenger_program: AccountInfo<'info>,
    messenger: AccountInfo<'info>,
    /// PDA of the sending program, signed for with `signer_seeds`.
    sender: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    link: RemoteLink,
    value_accounts: Option<ValueAccounts<'info>>,
    max_transfer: u64,
}

impl<'a, 'info> MessengerTransport<'a, 'info> {
    pub fn new(
        messenger_program: AccountInfo<'info>,
        messenger: AccountInfo<'info>,
        sender: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
        link: RemoteLink,
        value_accounts: Option<ValueAccounts<'info>>,
    ) -> Result<Self> {
        require_keys_eq!(
            messenger_program.key(),
            crate::ID,
            MessengerTransportError::IncorrectMessengerProgram
        );

        // Without token accounts nothing can be carried.
        let max_transfer = if value_accounts.is_some() {
            let config = Messenger::try_deserialize(&mut &messenger.try_borrow_data()?[..])?;
            config.max_transfer_per_message
        } else {
            0
        };

        Ok(Self {
            messenger_program,
            messenger,
            sender,
            signer_seeds,
            link,
            value_accounts,
            max_transfer,
        })
    }
}

impl Transport for MessengerTransport<'_, '_> {
    fn max_transfer(&self) -> u64 {
        self.max_transfer
    }

    fn send(&mut self, payload: Vec<u8>) -> Result<()> {
        let cpi_ctx = CpiContext::new_with_signer(
            self.messenger_program.clone(),
            cpi::accounts::SendMessage {
                sender: self.sender.clone(),
                messenger: self.messenger.clone(),
            },
            self.signer_seeds,
        );

        cpi::send_message(
            cpi_ctx,
            self.link.remote_id,
            self.link.remote_program,
            self.link.remote_counterpart,
            payload,
        )
    }

    fn send_with_value(&mut self, payload: Vec<u8>, amount: u64) -> Result<()> {
        let value_accounts = self
            .value_accounts
            .as_ref()
            .ok_or(MessengerTransportError::MissingValueAccounts)?;

        let cpi_ctx = CpiContext::new_with_signer(
            self.messenger_program.clone(),
            cpi::accounts::SendMessageWithValue {
                sender: self.sender.clone(),
                messenger: self.messenger.clone(),
                mint: value_accounts.mint.clone(),
                sender_token_account: value_accounts.sender_token_account.clone(),
                pool: value_accounts.pool.clone(),
                token_program: value_accounts.token_program.clone(),
            },
            self.signer_seeds,
        );

        cpi::send_message_with_value(
            cpi_ctx,
            self.link.remote_id,
            self.link.remote_program,
            self.link.remote_counterpart,
            amount,
            payload,
        )
    }
}

#[error_code]
pub enum MessengerTransportError {
    #[msg("Incorrect messenger program")]
    IncorrectMessengerProgram = 1500,
    #[msg("Token accounts are required to send value")]
    MissingValueAccounts,
}
