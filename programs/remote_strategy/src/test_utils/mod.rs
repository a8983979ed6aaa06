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
use common::{Report, RemoteLink, FINALITY_THRESHOLD_FINALIZED};
use litesvm::LiteSVM;
use messenger::{
    constants::{MESSENGER_AUTHORITY_SEED, MESSENGER_SEED, POOL_SEED, RECEIVED_MESSAGE_SEED},
    state::Envelope,
};
use solana_account::Account;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_signer::Signer;
use solana_transaction::Transaction;
use yield_vault::constants::{POSITION_SEED, RESERVE_SEED, VAULT_SEED};

use crate::{
    accounts,
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    instruction::Initialize,
    state::RemoteConfig,
    ID,
};

pub const TEST_ORIGIN_CHAIN_ID: u64 = 1;
pub const TEST_LOCAL_CHAIN_ID: u64 = 747474;

impl RemoteConfig {
    pub fn test_new() -> Self {
        Self {
            link: RemoteLink {
                remote_id: TEST_ORIGIN_CHAIN_ID,
                remote_counterpart: Pubkey::new_unique(),
                remote_program: Pubkey::new_unique(),
            },
            min_finality: FINALITY_THRESHOLD_FINALIZED,
            tend_threshold: None,
        }
    }
}

pub struct TestStrategy {
    pub svm: LiteSVM,
    pub payer: Keypair,
    pub governance: Keypair,
    pub config: RemoteConfig,
    pub strategy: Pubkey,
    pub strategy_token_account: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub position: Pubkey,
    pub reserve: Pubkey,
}

pub fn setup_strategy_and_svm() -> TestStrategy {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(ID, "../../target/deploy/remote_strategy.so")
        .unwrap();
    svm.add_program_from_file(yield_vault::ID, "../../target/deploy/yield_vault.so")
        .unwrap();

    let payer = Keypair::new();
    let payer_pk = payer.pubkey();
    svm.airdrop(&payer_pk, LAMPORTS_PER_SOL * 10).unwrap();

    let mint = Pubkey::new_unique();
    create_mock_mint(&mut svm, mint, 6, spl_token_2022::ID);

    let vault = Pubkey::find_program_address(&[VAULT_SEED, mint.as_ref()], &yield_vault::ID).0;
    let reserve =
        Pubkey::find_program_address(&[RESERVE_SEED, vault.as_ref()], &yield_vault::ID).0;
    let vault_authority = Keypair::new();

    let initialize_vault_ix = Instruction {
        program_id: yield_vault::ID,
        accounts: yield_vault::accounts::InitializeVault {
            payer: payer_pk,
            authority: vault_authority.pubkey(),
            mint,
            vault,
            reserve,
            token_program: spl_token_2022::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: yield_vault::instruction::InitializeVault {
            deposit_cap: u64::MAX,
        }
        .data(),
    };

    let governance = Keypair::new();
    let config = RemoteConfig::test_new();
    let strategy = Pubkey::find_program_address(&[STRATEGY_SEED], &ID).0;
    let strategy_token_account = Pubkey::find_program_address(&[STRATEGY_TOKEN_SEED], &ID).0;
    let position = Pubkey::find_program_address(
        &[POSITION_SEED, vault.as_ref(), strategy.as_ref()],
        &yield_vault::ID,
    )
    .0;

    let initialize_ix = Instruction {
        program_id: ID,
        accounts: accounts::Initialize {
            payer: payer_pk,
            governance: governance.pubkey(),
            strategy,
            mint,
            strategy_token_account,
            vault,
            position,
            yield_vault_program: yield_vault::ID,
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
        &[&payer, &vault_authority, &governance],
        Message::new(&[initialize_vault_ix, initialize_ix], Some(&payer_pk)),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx).unwrap();

    TestStrategy {
        svm,
        payer,
        governance,
        config,
        strategy,
        strategy_token_account,
        mint,
        vault,
        position,
        reserve,
    }
}

pub struct TestMessenger {
    pub relayer: Keypair,
    pub messenger: Pubkey,
    pub pool: Pubkey,
}

/// Deploys the messenger for this chain with a pool for the strategy mint holding
/// `pool_balance`, as if that much had been bridged in from the origin.
pub fn setup_messenger(test: &mut TestStrategy, pool_balance: u64) -> TestMessenger {
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

    create_mock_token_account(&mut test.svm, pool, test.mint, pool, pool_balance);

    TestMessenger {
        relayer,
        messenger: messenger_pda,
        pool,
    }
}

/// Envelope of the origin deposit numbered `request_id`, carrying `amount` to the strategy.
pub fn deposit_envelope(test: &TestStrategy, request_id: u64, amount: u64) -> Envelope {
    Envelope {
        nonce: request_id,
        source_chain_id: TEST_ORIGIN_CHAIN_ID,
        destination_chain_id: TEST_LOCAL_CHAIN_ID,
        sender: test.config.link.remote_counterpart,
        target_program: ID,
        recipient: test.strategy,
        mint: test.mint,
        amount,
        finality: FINALITY_THRESHOLD_FINALIZED,
        payload: Report::new(request_id, i128::from(amount))
            .encode()
            .unwrap(),
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

/// Messenger instruction releasing a posted deposit to the strategy and crediting it.
pub fn relay_deposit_ix(
    test: &TestStrategy,
    messenger: &TestMessenger,
    received_message: Pubkey,
) -> Instruction {
    let messenger_authority = Pubkey::find_program_address(
        &[
            MESSENGER_AUTHORITY_SEED,
            TEST_ORIGIN_CHAIN_ID.to_le_bytes().as_ref(),
            test.config.link.remote_counterpart.as_ref(),
        ],
        &messenger::ID,
    )
    .0;

    let mut accounts = messenger::accounts::RelayMessageWithValue {
        messenger: messenger.messenger,
        received_message,
        messenger_authority,
        target_program: ID,
        mint: test.mint,
        pool: messenger.pool,
        recipient_token_account: test.strategy_token_account,
        token_program: spl_token_2022::ID,
    }
    .to_account_metas(None);
    // Accounts of the strategy's handle_message after the authority
    accounts.push(AccountMeta::new(test.strategy, false));

    Instruction {
        program_id: messenger::ID,
        accounts,
        data: messenger::instruction::RelayMessageWithValue {}.data(),
    }
}

/// Posts and relays the deposit numbered `request_id`.
pub fn relay_deposit(
    test: &mut TestStrategy,
    messenger: &TestMessenger,
    request_id: u64,
    amount: u64,
) {
    let envelope = deposit_envelope(test, request_id, amount);
    let received_message = post_message(test, messenger, envelope);

    let tx = Transaction::new(
        &[&test.payer],
        Message::new(
            &[relay_deposit_ix(test, messenger, received_message)],
            Some(&test.payer.pubkey()),
        ),
        test.svm.latest_blockhash(),
    );
    test.svm.send_transaction(tx).unwrap();
}

/// Keeper report signed by governance.
pub fn report_ix(test: &TestStrategy, messenger: &TestMessenger) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::Report {
            keeper: test.governance.pubkey(),
            strategy: test.strategy,
            mint: test.mint,
            strategy_token_account: test.strategy_token_account,
            vault: test.vault,
            position: test.position,
            reserve: test.reserve,
            messenger: messenger.messenger,
            messenger_program: messenger::ID,
            yield_vault_program: yield_vault::ID,
            token_program: spl_token_2022::ID,
        }
        .to_account_metas(None),
        data: crate::instruction::Report {}.data(),
    }
}

pub fn mock_clock(svm: &mut LiteSVM, timestamp: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp = timestamp;
    svm.set_sysvar::<Clock>(&clock);
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
