use anchor_lang::prelude::*;
use common::{remote::RemoteAccounting, RemoteLink, Roles};

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct RemoteStrategy {
    pub roles: Roles,
    /// Origin strategy this one deploys for. Never updated after initialization.
    pub link: RemoteLink,
    pub mint: Pubkey,
    /// Yield vault the funds are deployed into.
    pub vault: Pubkey,
    pub min_finality: u32,
    /// Idle balance at which `tend` deploys. `u64::MAX` disables tending.
    pub tend_threshold: u64,
    /// Stops new deployments. Pulls, reports and withdrawals keep working.
    pub shutdown: bool,
    pub accounting: RemoteAccounting,
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct RemoteConfig {
    pub link: RemoteLink,
    pub min_finality: u32,
    pub tend_threshold: Option<u64>,
}
