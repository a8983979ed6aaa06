use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use common::{remote::RemoteAccounting, Roles};
use yield_vault::{
    cpi::{self, accounts::OpenPosition},
    program::YieldVault as YieldVaultProgram,
    state::YieldVault,
};

use crate::{
    constants::{STRATEGY_SEED, STRATEGY_TOKEN_SEED},
    state::{RemoteConfig, RemoteStrategy},
};

/// Accounts struct for the initialize instruction that creates the remote strategy.
/// Also opens the strategy's position in `vault`, owned by the strategy PDA.
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Becomes the strategy's governance.
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [STRATEGY_SEED],
        bump,
        space = 8 + RemoteStrategy::INIT_SPACE
    )]
    pub strategy: Account<'info, RemoteStrategy>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [STRATEGY_TOKEN_SEED],
        bump,
        token::mint = mint,
        token::authority = strategy,
        token::token_program = token_program,
    )]
    pub strategy_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(has_one = mint @ InitializeError::IncorrectVaultMint)]
    pub vault: Account<'info, YieldVault>,

    /// CHECK: Created by the yield vault program.
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    pub yield_vault_program: Program<'info, YieldVaultProgram>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>, config: RemoteConfig) -> Result<()> {
    let RemoteConfig {
        link,
        min_finality,
        tend_threshold,
    } = config;

    *ctx.accounts.strategy = RemoteStrategy {
        roles: Roles::new(ctx.accounts.governance.key()),
        link,
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        min_finality,
        tend_threshold: tend_threshold.unwrap_or(u64::MAX),
        shutdown: false,
        accounting: RemoteAccounting::default(),
    };

    let seeds: &[&[&[u8]]] = &[&[STRATEGY_SEED, &[ctx.bumps.strategy]]];
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.yield_vault_program.to_account_info(),
        OpenPosition {
            payer: ctx.accounts.payer.to_account_info(),
            owner: ctx.accounts.strategy.to_account_info(),
            vault: ctx.accounts.vault.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
        seeds,
    );
    cpi::open_position(cpi_ctx)?;

    msg!(
        "Remote strategy linked to {} on chain {}",
        link.remote_counterpart,
        link.remote_id
    );

    Ok(())
}

#[error_code]
pub enum InitializeError {
    #[msg("Vault does not hold the strategy asset")]
    IncorrectVaultMint = 4000,
}
