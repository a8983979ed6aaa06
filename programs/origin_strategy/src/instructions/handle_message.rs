use anchor_lang::prelude::*;
use common::InboundMessage;
use messenger::constants::MESSENGER_AUTHORITY_SEED;

use crate::{constants::STRATEGY_SEED, state::OriginStrategy};

/// Accounts struct for the entry point the messenger calls when relaying a report.
/// The messenger authority PDA is derived from the source chain and the sender, so a valid
/// signature proves the messenger attested both.
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
    pub strategy: Account<'info, OriginStrategy>,
}

#[event]
pub struct ReportApplied {
    pub request_id: u64,
    pub delta: i128,
    pub believed_remote_capital: u64,
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

    let applied = strategy.accounting.receive_message(
        &link,
        min_finality,
        &InboundMessage {
            source_chain_id,
            sender,
            finality,
            payload: &payload,
        },
    )?;

    msg!(
        "Applied report {} with delta {}",
        applied.request_id,
        applied.delta
    );

    emit!(ReportApplied {
        request_id: applied.request_id,
        delta: applied.delta,
        believed_remote_capital: applied.believed_remote_capital,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use anchor_lang::{solana_program::instruction::Instruction, InstructionData};
    use common::{Report, FINALITY_THRESHOLD_FINALIZED};
    use messenger::state::{Envelope, ReceivedMessage};
    use solana_keypair::Keypair;
    use solana_message::Message;
    use solana_signer::Signer;
    use solana_transaction::Transaction;

    use crate::{
        accounts, instruction,
        test_utils::{
            post_message, setup_messenger, setup_strategy_and_svm, TestMessenger, TestStrategy,
            TEST_LOCAL_CHAIN_ID, TEST_REMOTE_CHAIN_ID,
        },
        ID,
    };

    fn relay_message_ix(
        test: &TestStrategy,
        test_messenger: &TestMessenger,
        received_message: Pubkey,
    ) -> Instruction {
        let messenger_authority = Pubkey::find_program_address(
            &[
                MESSENGER_AUTHORITY_SEED,
                TEST_REMOTE_CHAIN_ID.to_le_bytes().as_ref(),
                test.config.link.remote_counterpart.as_ref(),
            ],
            &messenger::ID,
        )
        .0;

        let mut accounts = messenger::accounts::RelayMessage {
            messenger: test_messenger.messenger,
            received_message,
            messenger_authority,
            target_program: ID,
        }
        .to_account_metas(None);
        // Accounts of this program's handle_message after the authority
        accounts.push(AccountMeta::new(test.strategy, false));

        Instruction {
            program_id: messenger::ID,
            accounts,
            data: messenger::instruction::RelayMessage {}.data(),
        }
    }

    #[test]
    fn test_relayed_report_is_applied_once() {
        let mut test = setup_strategy_and_svm();
        let test_messenger = setup_messenger(&mut test);
        let payer_pk = test.payer.pubkey();

        let envelope = Envelope {
            nonce: 1,
            source_chain_id: TEST_REMOTE_CHAIN_ID,
            destination_chain_id: TEST_LOCAL_CHAIN_ID,
            sender: test.config.link.remote_counterpart,
            target_program: ID,
            recipient: test.strategy,
            mint: Pubkey::default(),
            amount: 0,
            finality: FINALITY_THRESHOLD_FINALIZED,
            payload: Report::new(1, 500).encode().unwrap(),
        };
        let received_message = post_message(&mut test, &test_messenger, envelope);

        let tx = Transaction::new(
            &[&test.payer],
            Message::new(
                &[relay_message_ix(&test, &test_messenger, received_message)],
                Some(&payer_pk),
            ),
            test.svm.latest_blockhash(),
        );
        test.svm.send_transaction(tx).unwrap();

        let account = test.svm.get_account(&test.strategy).unwrap();
        let strategy = OriginStrategy::try_deserialize(&mut &account.data[..]).unwrap();
        assert_eq!(strategy.accounting.believed_remote_capital, 500);
        assert_eq!(strategy.accounting.ordering.last_processed_request_id, 1);

        let account = test.svm.get_account(&received_message).unwrap();
        let message = ReceivedMessage::try_deserialize(&mut &account.data[..]).unwrap();
        assert!(message.executed);

        test.svm.expire_blockhash();
        let tx = Transaction::new(
            &[&test.payer],
            Message::new(
                &[relay_message_ix(&test, &test_messenger, received_message)],
                Some(&payer_pk),
            ),
            test.svm.latest_blockhash(),
        );
        let err = test.svm.send_transaction(tx).unwrap_err();
        assert!(
            err.meta
                .logs
                .iter()
                .any(|log| log.contains("Error Code: AlreadyExecuted")),
            "Replay should be rejected by the messenger"
        );

        let account = test.svm.get_account(&test.strategy).unwrap();
        let strategy = OriginStrategy::try_deserialize(&mut &account.data[..]).unwrap();
        assert_eq!(strategy.accounting.believed_remote_capital, 500);
    }

    #[test]
    fn test_handle_message_rejects_non_messenger_signer() {
        let mut test = setup_strategy_and_svm();

        let impostor = Keypair::new();
        let source_chain_id = test.config.link.remote_id;
        let sender = test.config.link.remote_counterpart;

        let ix = Instruction {
            program_id: ID,
            accounts: accounts::HandleMessage {
                messenger_authority: impostor.pubkey(),
                strategy: test.strategy,
            }
            .to_account_metas(None),
            data: instruction::HandleMessage {
                source_chain_id,
                sender,
                finality: 2000,
                payload: Report::new(1, 500).encode().unwrap(),
            }
            .data(),
        };

        let tx = Transaction::new(
            &[&test.payer, &impostor],
            Message::new(&[ix], Some(&test.payer.pubkey())),
            test.svm.latest_blockhash(),
        );
        let result = test.svm.send_transaction(tx);
        assert!(result.is_err());

        let account = test.svm.get_account(&test.strategy).unwrap();
        let strategy = OriginStrategy::try_deserialize(&mut &account.data[..]).unwrap();
        assert_eq!(strategy.accounting.believed_remote_capital, 0);
        assert_eq!(strategy.accounting.ordering.last_processed_request_id, 0);
    }
}
