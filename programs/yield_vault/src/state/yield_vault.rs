use anchor_lang::prelude::*;

/// Share accounting of a single-asset vault.
///
/// The vault's assets are the balance of its reserve token account, so tokens sent to the
/// reserve directly count as yield for every position. Conversions use a virtual offset of
/// one share and one asset, so the first depositor cannot be diluted through donations and
/// no conversion divides by zero.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct YieldVault {
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub total_shares: u64,
    /// Deposits are refused once the reserve holds this much.
    pub deposit_cap: u64,
}

impl YieldVault {
    /// Shares minted for `assets`, rounded down.
    pub fn convert_to_shares(&self, assets: u64, total_assets: u64) -> Result<u64> {
        mul_div(assets, self.total_shares, total_assets, Rounding::Down)
    }

    /// Shares to burn to receive at least `assets`, rounded up.
    pub fn preview_withdraw(&self, assets: u64, total_assets: u64) -> Result<u64> {
        mul_div(assets, self.total_shares, total_assets, Rounding::Up)
    }

    /// Assets paid out for `shares`, rounded down.
    pub fn convert_to_assets(&self, shares: u64, total_assets: u64) -> Result<u64> {
        mul_div(shares, total_assets, self.total_shares, Rounding::Down)
    }

    pub fn max_deposit(&self, total_assets: u64) -> u64 {
        self.deposit_cap.saturating_sub(total_assets)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// `value * (numerator + 1) / (denominator + 1)` in 128-bit arithmetic.
fn mul_div(value: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    let numerator = u128::from(value) * (u128::from(numerator) + 1);
    let denominator = u128::from(denominator) + 1;

    let mut result = numerator / denominator;
    if rounding == Rounding::Up && numerator % denominator != 0 {
        result += 1;
    }

    u64::try_from(result).map_err(|_| error!(YieldVaultError::MathOverflow))
}

#[error_code]
pub enum YieldVaultError {
    #[msg("Math overflow")]
    MathOverflow = 2000,
}
