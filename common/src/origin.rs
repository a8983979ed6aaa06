//! Origin side of the protocol: user-facing deposits and withdrawals plus the believed value
//! of capital deployed on the remote chain.

use anchor_lang::prelude::*;

use crate::{
    ledger::{apply_delta, compute_delta, LedgerError},
    link::RemoteLink,
    message::Report,
    ordering::MessageOrdering,
    transport::{InboundMessage, Transport},
};

pub const MAX_BPS: u64 = 10_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct HealthCheck {
    /// Largest profit accepted by one report, relative to the prior total.
    pub profit_limit_bps: u16,
    /// Largest loss accepted by one report, relative to the prior total.
    pub loss_limit_bps: u16,
    /// When disabled the next report is accepted unchecked and the check turns itself back on.
    pub enabled: bool,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            profit_limit_bps: MAX_BPS as u16,
            loss_limit_bps: 0,
            enabled: true,
        }
    }
}

impl HealthCheck {
    pub fn new(profit_limit_bps: u16, loss_limit_bps: u16, enabled: bool) -> Result<Self> {
        require!(profit_limit_bps > 0, OriginError::InvalidHealthCheckLimit);
        require!(
            u64::from(loss_limit_bps) < MAX_BPS,
            OriginError::InvalidHealthCheckLimit
        );

        Ok(Self {
            profit_limit_bps,
            loss_limit_bps,
            enabled,
        })
    }

    pub fn check(&mut self, prior_total: u64, new_total: u64) -> Result<()> {
        if !self.enabled {
            self.enabled = true;
            return Ok(());
        }

        let limit = |bps: u16| u128::from(prior_total) * u128::from(bps) / u128::from(MAX_BPS);

        if new_total > prior_total {
            let profit = u128::from(new_total - prior_total);
            require!(
                profit <= limit(self.profit_limit_bps),
                OriginError::HealthCheckFailed
            );
        } else {
            let loss = u128::from(prior_total - new_total);
            require!(
                loss <= limit(self.loss_limit_bps),
                OriginError::HealthCheckFailed
            );
        }

        Ok(())
    }
}

/// Accounting state of the origin strategy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct OriginAccounting {
    /// Best estimate of the value currently held by the remote strategy.
    pub believed_remote_capital: u64,
    /// Total assets as of the last harvest, adjusted by deposits and withdrawals since.
    pub total_assets: u64,
    pub ordering: MessageOrdering,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deposit {
    /// `None` when nothing could be bridged.
    pub request_id: Option<u64>,
    pub bridged: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedReport {
    pub request_id: u64,
    pub delta: i128,
    pub believed_remote_capital: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Harvest {
    pub total_assets: u64,
    pub profit: u64,
    pub loss: u64,
}

impl OriginAccounting {
    /// Accounts for `amount` entering the strategy and bridges as much of it as the transport
    /// accepts in one message. Whatever is not bridged stays idle locally.
    pub fn deposit<T: Transport>(&mut self, amount: u64, transport: &mut T) -> Result<Deposit> {
        let total_assets = self
            .total_assets
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let bridged = amount.min(transport.max_transfer());
        if bridged == 0 {
            self.total_assets = total_assets;
            return Ok(Deposit {
                request_id: None,
                bridged: 0,
            });
        }

        let believed_remote_capital =
            apply_delta(self.believed_remote_capital, i128::from(bridged))?;

        let mut ordering = self.ordering;
        let request_id = ordering.assign_request_id()?;
        let payload = Report::new(request_id, i128::from(bridged)).encode()?;
        transport.send_with_value(payload, bridged)?;

        self.ordering = ordering;
        self.believed_remote_capital = believed_remote_capital;
        self.total_assets = total_assets;

        Ok(Deposit {
            request_id: Some(request_id),
            bridged,
        })
    }

    /// Applies a report from the remote strategy exactly once and in order.
    ///
    /// State is only written once every check has passed.
    pub fn receive_message(
        &mut self,
        link: &RemoteLink,
        min_finality: u32,
        inbound: &InboundMessage,
    ) -> Result<AppliedReport> {
        link.verify_inbound(inbound, min_finality)?;
        let report = Report::decode(inbound.payload)?;

        self.ordering.ensure_next(report.request_id)?;
        let believed_remote_capital = apply_delta(self.believed_remote_capital, report.delta)?;

        self.ordering.mark_processed(report.request_id)?;
        self.believed_remote_capital = believed_remote_capital;

        Ok(AppliedReport {
            request_id: report.request_id,
            delta: report.delta,
            believed_remote_capital,
        })
    }

    /// Capital on the remote chain is never available for instant withdrawal.
    pub fn available_withdraw_limit(&self, local_balance: u64) -> u64 {
        local_balance
    }

    pub fn withdraw(&mut self, amount: u64, local_balance: u64) -> Result<()> {
        require!(
            amount <= self.available_withdraw_limit(local_balance),
            OriginError::InsufficientLocalBalance
        );
        // Unharvested profit bridged back can push the local balance above the recorded total.
        self.total_assets = self.total_assets.saturating_sub(amount);
        Ok(())
    }

    /// Recomputes total assets as local balance plus believed remote capital.
    pub fn harvest_and_report(
        &mut self,
        local_balance: u64,
        health_check: &mut HealthCheck,
    ) -> Result<Harvest> {
        let total_assets = local_balance
            .checked_add(self.believed_remote_capital)
            .ok_or(LedgerError::Overflow)?;

        health_check.check(self.total_assets, total_assets)?;

        let delta = compute_delta(total_assets, self.total_assets);
        self.total_assets = total_assets;

        Ok(Harvest {
            total_assets,
            profit: u64::try_from(delta.max(0)).map_err(|_| error!(LedgerError::Overflow))?,
            loss: u64::try_from(-delta.min(0)).map_err(|_| error!(LedgerError::Overflow))?,
        })
    }

    /// Gives up on the next inbound report and applies `correction` in its place.
    ///
    /// Later reports are measured against the remote's own tracked total, which already includes
    /// the skipped change, so nothing else ever restores it.
    pub fn skip_request(&mut self, correction: i128) -> Result<AppliedReport> {
        let mut ordering = self.ordering;
        let request_id = ordering.force_advance()?;
        let believed_remote_capital = apply_delta(self.believed_remote_capital, correction)?;

        self.ordering = ordering;
        self.believed_remote_capital = believed_remote_capital;

        Ok(AppliedReport {
            request_id,
            delta: correction,
            believed_remote_capital,
        })
    }
}

/// Only the designated depositor may deposit, and only while the strategy is live.
pub fn available_deposit_limit(caller: &Pubkey, depositor: &Pubkey, shutdown: bool) -> u64 {
    if shutdown || caller != depositor {
        return 0;
    }
    u64::MAX
}

#[error_code]
pub enum OriginError {
    #[msg("Amount exceeds the locally available balance")]
    InsufficientLocalBalance = 500,
    #[msg("Reported profit or loss is outside the health check limits")]
    HealthCheckFailed,
    #[msg("Invalid health check limit")]
    InvalidHealthCheckLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_limits() {
        let mut check = HealthCheck::new(1_000, 500, true).unwrap();

        // 10% profit and 5% loss are the edges.
        check.check(10_000, 11_000).unwrap();
        check.check(10_000, 9_500).unwrap();

        assert_eq!(
            check.check(10_000, 11_001).unwrap_err(),
            error!(OriginError::HealthCheckFailed)
        );
        assert_eq!(
            check.check(10_000, 9_499).unwrap_err(),
            error!(OriginError::HealthCheckFailed)
        );
    }

    #[test]
    fn test_disabled_health_check_reenables() {
        let mut check = HealthCheck::new(1, 0, false).unwrap();
        check.check(10_000, 0).unwrap();
        assert!(check.enabled);
        assert!(check.check(10_000, 0).is_err());
    }

    #[test]
    fn test_health_check_rejects_invalid_limits() {
        assert!(HealthCheck::new(0, 0, true).is_err());
        assert!(HealthCheck::new(1, 10_000, true).is_err());
    }

    #[test]
    fn test_deposit_limit() {
        let depositor = Pubkey::new_unique();
        assert_eq!(available_deposit_limit(&depositor, &depositor, false), u64::MAX);
        assert_eq!(available_deposit_limit(&depositor, &depositor, true), 0);
        assert_eq!(
            available_deposit_limit(&Pubkey::new_unique(), &depositor, false),
            0
        );
    }

    #[test]
    fn test_withdraw_limited_to_local_balance() {
        let mut accounting = OriginAccounting {
            believed_remote_capital: 9_000,
            total_assets: 10_000,
            ..Default::default()
        };

        assert_eq!(accounting.available_withdraw_limit(1_000), 1_000);
        assert_eq!(
            accounting.withdraw(1_001, 1_000).unwrap_err(),
            error!(OriginError::InsufficientLocalBalance)
        );

        accounting.withdraw(1_000, 1_000).unwrap();
        assert_eq!(accounting.total_assets, 9_000);
        assert_eq!(accounting.believed_remote_capital, 9_000);
    }

    #[test]
    fn test_harvest_reports_profit_and_loss() {
        let mut accounting = OriginAccounting {
            believed_remote_capital: 10_500,
            total_assets: 10_000,
            ..Default::default()
        };
        let mut check = HealthCheck::default();

        let harvest = accounting.harvest_and_report(0, &mut check).unwrap();
        assert_eq!(
            harvest,
            Harvest {
                total_assets: 10_500,
                profit: 500,
                loss: 0
            }
        );

        accounting.believed_remote_capital = 9_000;
        check.enabled = false;
        let harvest = accounting.harvest_and_report(0, &mut check).unwrap();
        assert_eq!(
            harvest,
            Harvest {
                total_assets: 9_000,
                profit: 0,
                loss: 1_500
            }
        );
    }

    #[test]
    fn test_skip_request_applies_correction() {
        let mut accounting = OriginAccounting {
            believed_remote_capital: 10_000,
            total_assets: 10_000,
            ..Default::default()
        };

        let skipped = accounting.skip_request(-1_000).unwrap();
        assert_eq!(
            skipped,
            AppliedReport {
                request_id: 1,
                delta: -1_000,
                believed_remote_capital: 9_000
            }
        );
        assert_eq!(accounting.ordering.last_processed_request_id, 1);

        // A correction that would drive the capital negative leaves the ordering alone.
        let before = accounting;
        assert_eq!(
            accounting.skip_request(-9_001).unwrap_err(),
            error!(LedgerError::NegativeBalance)
        );
        assert_eq!(accounting, before);
    }
}
