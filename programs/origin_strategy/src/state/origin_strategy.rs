use anchor_lang::prelude::*;
use common::{
    origin::{HealthCheck, OriginAccounting},
    RemoteLink, Roles,
};

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct OriginStrategy {
    pub roles: Roles,
    /// Only account allowed to deposit.
    pub depositor: Pubkey,
    /// Remote strategy this one deploys through. Never updated after initialization.
    pub link: RemoteLink,
    pub mint: Pubkey,
    /// Messages relayed below this finality level are rejected.
    pub min_finality: u32,
    /// Blocks deposits. Withdrawals, reports and inbound messages keep working.
    pub shutdown: bool,
    pub health_check: HealthCheck,
    pub accounting: OriginAccounting,
}

/// Deployment parameters supplied at initialization.
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct OriginConfig {
    pub depositor: Pubkey,
    pub link: RemoteLink,
    pub min_finality: u32,
    pub profit_limit_bps: u16,
    pub loss_limit_bps: u16,
}
