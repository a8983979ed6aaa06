#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;
pub mod venue;

use instructions::*;

declare_id!("2CpnxfPwsVhvqBn4aGofJ4WuqhSADmXG5j6jCGViUE9G");

/// Single-asset share vault used as the deployment venue of the remote strategy.
#[program]
pub mod yield_vault {
    use super::*;

    pub fn initialize_vault(ctx: Context<InitializeVault>, deposit_cap: u64) -> Result<()> {
        initialize_vault_handler(ctx, deposit_cap)
    }

    pub fn open_position(ctx: Context<OpenPosition>) -> Result<()> {
        open_position_handler(ctx)
    }

    /// Deposits `assets` from the owner's token account and mints shares, rounded down.
    pub fn deposit(ctx: Context<Deposit>, assets: u64) -> Result<()> {
        deposit_handler(ctx, assets)
    }

    /// Burns `shares` and pays out their value, rounded down.
    pub fn redeem(ctx: Context<Redeem>, shares: u64) -> Result<()> {
        redeem_handler(ctx, shares)
    }

    pub fn set_deposit_cap(ctx: Context<SetDepositCap>, deposit_cap: u64) -> Result<()> {
        set_deposit_cap_handler(ctx, deposit_cap)
    }
}
