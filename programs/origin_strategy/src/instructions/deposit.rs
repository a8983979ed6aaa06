use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use common::origin::available_deposit_limit;
use messenger::{
    constants::{MESSENGER_SEED, POOL_SEED},
    transport::{MessengerTransport, ValueAccounts},
};

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::OriginStrategy,
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    pub depositor: Signer<'info>,

    #[account(mut, seeds = [STRATEGY_SEED], bump)]
    pub strategy: Account<'info, OriginStrategy>,

    #[account(address = strategy.mint @ DepositError::IncorrectMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = depositor,
        token::token_program = token_program,
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, seeds = [STRATEGY_TOKEN_SEED], bump)]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, seeds = [MESSENGER_SEED], bump, seeds::program = messenger::ID)]
    pub messenger: Account<'info, messenger::state::Messenger>,

    /// Custody account the bridged amount is locked in.
    #[account(
        mut,
        seeds = [POOL_SEED, mint.key().as_ref()],
        bump,
        seeds::program = messenger::ID
    )]
    pub messenger_pool: InterfaceAccount<'info, TokenAccount>,

    pub messenger_program: Program<'info, messenger::program::Messenger>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Deposited {
    pub depositor: Pubkey,
    pub amount: u64,
    pub bridged: u64,
    pub request_id: Option<u64>,
    pub believed_remote_capital: u64,
}

pub fn deposit_handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, DepositError::ZeroAmount);
    require!(!ctx.accounts.strategy.shutdown, DepositError::StrategyShutdown);
    require!(
        amount
            <= available_deposit_limit(
                &ctx.accounts.depositor.key(),
                &ctx.accounts.strategy.depositor,
                ctx.accounts.strategy.shutdown,
            ),
        DepositError::DepositLimitExceeded
    );

    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.depositor_token_account.to_account_info(),
            to: ctx.accounts.strategy_token_account.to_account_info(),
            authority: ctx.accounts.depositor.to_account_info(),
        },
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let mut transport = MessengerTransport::new(
        ctx.accounts.messenger_program.to_account_info(),
        ctx.accounts.messenger.to_account_info(),
        ctx.accounts.strategy.to_account_info(),
        seeds,
        ctx.accounts.strategy.link,
        Some(ValueAccounts {
            mint: ctx.accounts.mint.to_account_info(),
            sender_token_account: ctx.accounts.strategy_token_account.to_account_info(),
            pool: ctx.accounts.messenger_pool.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        }),
    )?;

    let strategy = &mut ctx.accounts.strategy;
    let deposit = strategy.accounting.deposit(amount, &mut transport)?;

    emit!(Deposited {
        depositor: ctx.accounts.depositor.key(),
        amount,
        bridged: deposit.bridged,
        request_id: deposit.request_id,
        believed_remote_capital: strategy.accounting.believed_remote_capital,
    });

    Ok(())
}

#[error_code]
pub enum DepositError {
    #[msg("Mint does not match the strategy asset")]
    IncorrectMint = 3000,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Strategy is shut down")]
    StrategyShutdown,
    #[msg("Amount exceeds the available deposit limit")]
    DepositLimitExceeded,
}
