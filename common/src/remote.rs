//! Remote side of the protocol: deploys bridged capital into a vault and reports the result
//! back to the origin strategy.

use anchor_lang::prelude::*;

use crate::{
    ledger::{apply_delta, compute_delta, LedgerError},
    link::RemoteLink,
    message::{MessageError, Report},
    ordering::MessageOrdering,
    transport::{InboundMessage, Transport},
    vault::Vault,
};

/// Accounting state of the remote strategy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RemoteAccounting {
    /// Total assets the origin currently believes this side holds.
    pub tracked_total_assets: u64,
    /// Unix timestamp of the last report or withdrawal.
    pub last_report: i64,
    pub ordering: MessageOrdering,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOutcome {
    pub request_id: u64,
    pub total_assets: u64,
    pub delta: i128,
    /// Idle balance deployed before valuing the position.
    pub deployed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    pub request_id: u64,
    pub requested: u64,
    /// Amount pulled out of the vault to cover the request.
    pub pulled: u64,
    pub bridged: u64,
    pub total_assets: u64,
    pub delta: i128,
}

impl RemoteAccounting {
    /// Credits capital bridged over by the origin strategy.
    ///
    /// Deposit credits are ordered by the origin's request ids. They never move funds.
    pub fn credit_deposit(
        &mut self,
        link: &RemoteLink,
        min_finality: u32,
        inbound: &InboundMessage,
    ) -> Result<Report> {
        link.verify_inbound(inbound, min_finality)?;
        let report = Report::decode(inbound.payload)?;

        require!(report.delta > 0, RemoteError::InvalidDepositCredit);
        self.ordering.ensure_next(report.request_id)?;
        let tracked_total_assets = apply_delta(self.tracked_total_assets, report.delta)?;

        self.ordering.mark_processed(report.request_id)?;
        self.tracked_total_assets = tracked_total_assets;

        Ok(report)
    }

    pub fn ensure_report_ready(&self, now: i64) -> Result<()> {
        require!(now > self.last_report, RemoteError::NotReady);
        Ok(())
    }

    /// Deploys idle funds unless shut down, values the position and reports the change since the
    /// previous report to the origin strategy.
    pub fn report<V: Vault, T: Transport>(
        &mut self,
        vault: &mut V,
        transport: &mut T,
        local_balance: u64,
        now: i64,
        shutdown: bool,
    ) -> Result<ReportOutcome> {
        self.ensure_report_ready(now)?;

        // A vault refusing the deposit leaves the balance idle. It is still reported below.
        let deployed = if shutdown {
            0
        } else {
            match push_funds(vault, local_balance, local_balance) {
                Ok(deployed) => deployed,
                Err(err) => {
                    msg!("Vault deposit failed, funds stay idle: {}", err);
                    0
                }
            }
        };
        let idle = local_balance.saturating_sub(deployed);

        let total_assets = vault
            .valuation()?
            .checked_add(idle)
            .ok_or(LedgerError::Overflow)?;
        let delta = compute_delta(total_assets, self.tracked_total_assets);

        let request_id = self.send_report(transport, delta, 0)?;
        self.tracked_total_assets = total_assets;
        self.last_report = now;

        Ok(ReportOutcome {
            request_id,
            total_assets,
            delta,
            deployed,
        })
    }

    /// Serves a withdrawal of up to `amount`, pulling from the vault if idle funds are short,
    /// and bridges the result back together with the updated accounting.
    ///
    /// Over-requests are capped to what is obtainable. This never fails because of a shortfall.
    pub fn process_withdrawal<V: Vault, T: Transport>(
        &mut self,
        vault: &mut V,
        transport: &mut T,
        amount: u64,
        local_balance: u64,
        now: i64,
    ) -> Result<WithdrawalOutcome> {
        let available = vault
            .valuation()?
            .checked_add(local_balance)
            .ok_or(LedgerError::Overflow)?;
        let target = amount.min(available);

        let pulled = if target > local_balance {
            pull_funds(vault, target - local_balance)?
        } else {
            0
        };
        let idle = local_balance
            .checked_add(pulled)
            .ok_or(LedgerError::Overflow)?;

        let bridged = target.min(idle).min(transport.max_transfer());

        let total_assets = vault
            .valuation()?
            .checked_add(idle - bridged)
            .ok_or(LedgerError::Overflow)?;
        let delta = compute_delta(total_assets, self.tracked_total_assets);

        let request_id = self.send_report(transport, delta, bridged)?;
        self.tracked_total_assets = total_assets;
        self.last_report = self.last_report.max(now);

        Ok(WithdrawalOutcome {
            request_id,
            requested: amount,
            pulled,
            bridged,
            total_assets,
            delta,
        })
    }

    /// Gives up on the next inbound deposit credit and adds `correction` to the tracked total
    /// in its place.
    ///
    /// The tokens of a credit that is never relayed stay in the messenger pool. Passing their
    /// amount as `correction` makes the next report write them off at the origin.
    pub fn skip_request(&mut self, correction: i128) -> Result<Report> {
        let mut ordering = self.ordering;
        let request_id = ordering.force_advance()?;
        let tracked_total_assets = apply_delta(self.tracked_total_assets, correction)?;

        self.ordering = ordering;
        self.tracked_total_assets = tracked_total_assets;

        Ok(Report::new(request_id, correction))
    }

    fn send_report<T: Transport>(
        &mut self,
        transport: &mut T,
        delta: i128,
        value: u64,
    ) -> Result<u64> {
        let mut ordering = self.ordering;
        let request_id = ordering.assign_request_id()?;
        let payload = Report::new(request_id, delta).encode()?;

        if value == 0 {
            transport.send(payload)?;
        } else {
            transport.send_with_value(payload, value)?;
        }

        self.ordering = ordering;
        Ok(request_id)
    }
}

/// Deposits up to `amount` of the idle balance into the vault, bounded by its deposit cap.
/// Returns the amount that left the idle balance.
pub fn push_funds<V: Vault>(vault: &mut V, amount: u64, local_balance: u64) -> Result<u64> {
    let to_deposit = amount.min(local_balance).min(vault.max_deposit()?);
    if to_deposit == 0 {
        return Ok(0);
    }
    vault.deposit(to_deposit)
}

/// Redeems up to `amount` from the vault, bounded by what it allows to redeem.
/// Returns the amount received.
pub fn pull_funds<V: Vault>(vault: &mut V, amount: u64) -> Result<u64> {
    let to_redeem = amount.min(vault.max_redeem()?);
    if to_redeem == 0 {
        return Ok(0);
    }
    vault.redeem(to_redeem)
}

/// Whether an idle-fund sweep is due. Disabled while the threshold is `u64::MAX`.
pub fn tend_trigger(local_balance: u64, threshold: u64, shutdown: bool) -> bool {
    !shutdown && threshold != u64::MAX && local_balance > 0 && local_balance >= threshold
}

/// Checked narrowing used when a credited delta has to be expressed as an amount.
pub fn delta_to_amount(delta: i128) -> Result<u64> {
    u64::try_from(delta).map_err(|_| error!(MessageError::ValueOutOfRange))
}

#[error_code]
pub enum RemoteError {
    #[msg("A report was already sent at this timestamp")]
    NotReady = 600,
    #[msg("Deposit credit must be positive")]
    InvalidDepositCredit,
    #[msg("Idle balance is below the tend threshold")]
    TendNotTriggered,
}
