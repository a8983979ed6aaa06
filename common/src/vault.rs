use anchor_lang::prelude::*;

/// ERC-4626-like venue the remote strategy deploys into.
///
/// Amounts are in the underlying asset. Implementations report what actually moved, which
/// may be less than requested because of rounding or limited liquidity.
pub trait Vault {
    /// Current value of the strategy's position.
    fn valuation(&self) -> Result<u64>;

    fn max_deposit(&self) -> Result<u64>;

    fn max_redeem(&self) -> Result<u64>;

    /// Deposits `assets` and returns the amount credited to the position.
    fn deposit(&mut self, assets: u64) -> Result<u64>;

    /// Redeems a position worth `assets` and returns the amount received.
    fn redeem(&mut self, assets: u64) -> Result<u64>;
}
