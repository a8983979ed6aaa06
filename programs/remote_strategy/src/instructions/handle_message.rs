use anchor_lang::prelude::*;
use common::{remote::delta_to_amount, InboundMessage};
use messenger::constants::MESSENGER_AUTHORITY_SEED;

use crate::{constants::STRATEGY_SEED, state::RemoteStrategy};

/// Accounts struct for the entry point the messenger calls when relaying a deposit.
/// The bridged tokens have already been released to the strategy token account when this runs.
#[derive(Accounts)]
#[instruction(source_chain_id: u64, sender: Pubkey)]
pub struct HandleMessage<'info> {
    #[account(
        seeds = [
            MESSENGER_AUTHORITY_SEED,
            source_chain_id.to_le_bytes().as_ref(),
            sender.as_ref(),
        ],
        bump,
        seeds::program = messenger::ID
    )]
    pub messenger_authority: Signer<'info>,

    #[account(mut, seeds = [STRATEGY_SEED], bump)]
    pub strategy: Account<'info, RemoteStrategy>,
}

#[event]
pub struct DepositCredited {
    pub request_id: u64,
    pub amount: u64,
    pub tracked_total_assets: u64,
}

pub fn handle_message_handler(
    ctx: Context<HandleMessage>,
    source_chain_id: u64,
    sender: Pubkey,
    finality: u32,
    payload: Vec<u8>,
) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    let link = strategy.link;
    let min_finality = strategy.min_finality;

    let credit = strategy.accounting.credit_deposit(
        &link,
        min_finality,
        &InboundMessage {
            source_chain_id,
            sender,
            finality,
            payload: &payload,
        },
    )?;
    let amount = delta_to_amount(credit.delta)?;

    msg!("Credited deposit {} of {}", credit.request_id, amount);

    emit!(DepositCredited {
        request_id: credit.request_id,
        amount,
        tracked_total_assets: strategy.accounting.tracked_total_assets,
    });

    Ok(())
}
