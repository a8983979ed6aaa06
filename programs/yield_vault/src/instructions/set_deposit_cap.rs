use anchor_lang::prelude::*;

use crate::{constants::VAULT_SEED, state::YieldVault};

#[derive(Accounts)]
pub struct SetDepositCap<'info> {
    #[account(
        mut,
        has_one = authority @ SetDepositCapError::Unauthorized,
        seeds = [VAULT_SEED, vault.mint.as_ref()],
        bump
    )]
    pub vault: Account<'info, YieldVault>,

    pub authority: Signer<'info>,
}

pub fn set_deposit_cap_handler(ctx: Context<SetDepositCap>, deposit_cap: u64) -> Result<()> {
    ctx.accounts.vault.deposit_cap = deposit_cap;
    Ok(())
}

#[error_code]
pub enum SetDepositCapError {
    #[msg("Only the vault authority can update the deposit cap")]
    Unauthorized = 2100,
}
