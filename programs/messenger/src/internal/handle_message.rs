use anchor_lang::{
    prelude::*,
    solana_program::{self, hash::hash, instruction::Instruction},
};

use crate::{
    constants::{HANDLE_MESSAGE_IX_NAME, MESSENGER_AUTHORITY_SEED},
    state::Envelope,
};

/// Arguments of the `handle_message` instruction every receiver exposes.
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct HandleMessageArgs {
    pub source_chain_id: u64,
    pub sender: Pubkey,
    pub finality: u32,
    pub payload: Vec<u8>,
}

impl From<&Envelope> for HandleMessageArgs {
    fn from(envelope: &Envelope) -> Self {
        Self {
            source_chain_id: envelope.source_chain_id,
            sender: envelope.sender,
            finality: envelope.finality,
            payload: envelope.payload.clone(),
        }
    }
}

pub fn handle_message_discriminator() -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(HANDLE_MESSAGE_IX_NAME.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Instruction data for `handle_message`: the Anchor discriminator followed by the
/// borsh-encoded arguments.
pub fn handle_message_data(args: &HandleMessageArgs) -> Result<Vec<u8>> {
    let mut data = handle_message_discriminator().to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

/// Invokes `handle_message` on the envelope's target program, signed by the messenger
/// authority derived for the envelope's source chain and sender.
///
/// `remaining_accounts` are forwarded after the authority with their original signer and
/// writable flags. The target program account must be among them.
pub fn invoke_handle_message<'info>(
    envelope: &Envelope,
    messenger_authority: &AccountInfo<'info>,
    messenger_authority_bump: u8,
    target_program: &AccountInfo<'info>,
    remaining_accounts: &[AccountInfo<'info>],
) -> Result<()> {
    let mut accounts = vec![AccountMeta::new_readonly(messenger_authority.key(), true)];
    accounts.extend(remaining_accounts.iter().map(|account| AccountMeta {
        pubkey: account.key(),
        is_signer: account.is_signer,
        is_writable: account.is_writable,
    }));

    let ix = Instruction {
        program_id: envelope.target_program,
        accounts,
        data: handle_message_data(&HandleMessageArgs::from(envelope))?,
    };

    let mut account_infos = vec![messenger_authority.clone()];
    account_infos.extend_from_slice(remaining_accounts);
    account_infos.push(target_program.clone());

    let source_chain_id = envelope.source_chain_id.to_le_bytes();
    let seeds: &[&[u8]] = &[
        MESSENGER_AUTHORITY_SEED,
        source_chain_id.as_ref(),
        envelope.sender.as_ref(),
        &[messenger_authority_bump],
    ];

    solana_program::program::invoke_signed(&ix, &account_infos, &[seeds])?;

    Ok(())
}
