use anchor_lang::{
    prelude::*,
    solana_program::{instruction::Instruction, native_token::LAMPORTS_PER_SOL},
    system_program, InstructionData,
};
use anchor_spl::token_interface::spl_token_2022::{
    self,
    solana_program::{program_option::COption, program_pack::Pack},
    state::{Account as TokenAccount, AccountState, Mint},
};
use common::{RemoteLink, FINALITY_THRESHOLD_FINALIZED};
use litesvm::LiteSVM;
use messenger::{
    constants::{MESSENGER_SEED, POOL_SEED, RECEIVED_MESSAGE_SEED},
    state::Envelope,
};
use solana_account::Account;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::{
    accounts,
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    instruction::Initialize,
    state::OriginConfig,
    ID,
};

pub const TEST_REMOTE_CHAIN_ID: u64 = 747474;
pub const TEST_LOCAL_CHAIN_ID: u64 = 1;

impl OriginConfig {
    pub fn test_new(depositor: Pubkey) -> Self {
        Self {
            depositor,
            link: RemoteLink {
                remote_id: TEST_REMOTE_CHAIN_ID,
                remote_counterpart: Pubkey::new_unique(),
                remote_program: Pubkey::new_unique(),
            },
            min_finality: FINALITY_THRESHOLD_FINALIZED,
            profit_limit_bps: 10_000,
            loss_limit_bps: 0,
        }
    }
}

pub struct TestStrategy {
    pub svm: LiteSVM,
    pub payer: Keypair,
    pub governance: Keypair,
    pub depositor: Keypair,
    pub config: OriginConfig,
    pub strategy: Pubkey,
    pub strategy_token_account: Pubkey,
    pub mint: Pubkey,
}

pub fn setup_strategy_and_svm() -> TestStrategy {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(ID, "../../target/deploy/origin_strategy.so")
        .unwrap();

    let payer = Keypair::new();
    let payer_pk = payer.pubkey();
    svm.airdrop(&payer_pk, LAMPORTS_PER_SOL * 10).unwrap();

    let mint = Pubkey::new_unique();
    create_mock_mint(&mut svm, mint, 6, spl_token_2022::ID);

    let governance = Keypair::new();
    let depositor = Keypair::new();
    let config = OriginConfig::test_new(depositor.pubkey());
    let strategy = Pubkey::find_program_address(&[STRATEGY_SEED], &ID).0;
    let strategy_token_account = Pubkey::find_program_address(&[STRATEGY_TOKEN_SEED], &ID).0;

    let ix = Instruction {
        program_id: ID,
        accounts: accounts::Initialize {
            payer: payer_pk,
            governance: governance.pubkey(),
            strategy,
            mint,
            strategy_token_account,
            token_program: spl_token_2022::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: Initialize {
            config: config.clone(),
        }
        .data(),
    };

    let tx = Transaction::new(
        &[&payer, &governance],
        Message::new(&[ix], Some(&payer_pk)),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx).unwrap();

    TestStrategy {
        svm,
        payer,
        governance,
        depositor,
        config,
        strategy,
        strategy_token_account,
        mint,
    }
}

pub struct TestMessenger {
    pub relayer: Keypair,
    pub messenger: Pubkey,
    pub pool: Pubkey,
}

/// Deploys the messenger for this chain with a pool for the strategy mint.
pub fn setup_messenger(test: &mut TestStrategy) -> TestMessenger {
    test.svm
        .add_program_from_file(messenger::ID, "../../target/deploy/messenger.so")
        .unwrap();

    let payer_pk = test.payer.pubkey();
    let guardian = Keypair::new();
    let relayer = Keypair::new();
    let messenger_pda = Pubkey::find_program_address(&[MESSENGER_SEED], &messenger::ID).0;
    let pool =
        Pubkey::find_program_address(&[POOL_SEED, test.mint.as_ref()], &messenger::ID).0;

    let initialize_ix = Instruction {
        program_id: messenger::ID,
        accounts: messenger::accounts::Initialize {
            payer: payer_pk,
            messenger: messenger_pda,
            guardian: guardian.pubkey(),
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: messenger::instruction::Initialize {
            chain_id: TEST_LOCAL_CHAIN_ID,
            relayer: relayer.pubkey(),
            max_transfer_per_message: 1_000_000,
        }
        .data(),
    };

    let initialize_pool_ix = Instruction {
        program_id: messenger::ID,
        accounts: messenger::accounts::InitializePool {
            payer: payer_pk,
            messenger: messenger_pda,
            guardian: guardian.pubkey(),
            mint: test.mint,
            pool,
            token_program: spl_token_2022::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: messenger::instruction::InitializePool {}.data(),
    };

    let tx = Transaction::new(
        &[&test.payer, &guardian],
        Message::new(&[initialize_ix, initialize_pool_ix], Some(&payer_pk)),
        test.svm.latest_blockhash(),
    );
    test.svm.send_transaction(tx).unwrap();

    TestMessenger {
        relayer,
        messenger: messenger_pda,
        pool,
    }
}

/// Posts `envelope` as the relayer and returns the received message account.
pub fn post_message(
    test: &mut TestStrategy,
    messenger: &TestMessenger,
    envelope: Envelope,
) -> Pubkey {
    let received_message = Pubkey::find_program_address(
        &[
            RECEIVED_MESSAGE_SEED,
            envelope.source_chain_id.to_le_bytes().as_ref(),
            envelope.nonce.to_le_bytes().as_ref(),
        ],
        &messenger::ID,
    )
    .0;

    let ix = Instruction {
        program_id: messenger::ID,
        accounts: messenger::accounts::PostMessage {
            payer: test.payer.pubkey(),
            relayer: messenger.relayer.pubkey(),
            messenger: messenger.messenger,
            received_message,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: messenger::instruction::PostMessage { envelope }.data(),
    };

    let tx = Transaction::new(
        &[&test.payer, &messenger.relayer],
        Message::new(&[ix], Some(&test.payer.pubkey())),
        test.svm.latest_blockhash(),
    );
    test.svm.send_transaction(tx).unwrap();

    received_message
}

pub fn token_amount(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm.get_account(token_account).unwrap();
    anchor_spl::token_interface::TokenAccount::try_deserialize(&mut &account.data[..])
        .unwrap()
        .amount
}

pub fn create_mock_mint(svm: &mut LiteSVM, mint: Pubkey, decimals: u8, token_program: Pubkey) {
    let mut mint_data = vec![0u8; Mint::LEN];
    Mint {
        mint_authority: COption::Some(mint),
        supply: 1_000_000 * 10_u64.pow(decimals as u32),
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    }
    .pack_into_slice(&mut mint_data);

    svm.set_account(
        mint,
        Account {
            lamports: LAMPORTS_PER_SOL,
            data: mint_data,
            owner: token_program,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
}

pub fn create_mock_token_account(
    svm: &mut LiteSVM,
    token_account: Pubkey,
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
) {
    let mut token_account_data = vec![0u8; TokenAccount::LEN];
    TokenAccount {
        mint,
        owner,
        amount,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    }
    .pack_into_slice(&mut token_account_data);

    svm.set_account(
        token_account,
        Account {
            lamports: LAMPORTS_PER_SOL,
            data: token_account_data,
            owner: spl_token_2022::ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
}
