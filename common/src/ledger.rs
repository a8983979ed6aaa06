use anchor_lang::prelude::*;

/// Applies a signed delta to an unsigned running balance.
///
/// Underflow is rejected with [`LedgerError::NegativeBalance`]. The input is never mutated so a
/// failed application leaves the caller's state untouched.
pub fn apply_delta(current: u64, delta: i128) -> Result<u64> {
    let next = i128::from(current)
        .checked_add(delta)
        .ok_or(LedgerError::Overflow)?;

    require!(next >= 0, LedgerError::NegativeBalance);

    u64::try_from(next).map_err(|_| error!(LedgerError::Overflow))
}

/// Unconditionally overwrites the running balance with an absolute value.
pub fn apply_snapshot(_current: u64, absolute: u64) -> u64 {
    absolute
}

/// Overwrites the running balance only if `version` is strictly newer than `current_version`.
///
/// Returns the new `(balance, version)` pair.
pub fn apply_versioned_snapshot(
    current: u64,
    current_version: u64,
    absolute: u64,
    version: u64,
) -> Result<(u64, u64)> {
    require!(version > current_version, LedgerError::StaleSnapshot);
    Ok((apply_snapshot(current, absolute), version))
}

/// Signed difference `new_total - tracked`. A shrinking total yields a negative delta.
pub fn compute_delta(new_total: u64, tracked: u64) -> i128 {
    i128::from(new_total) - i128::from(tracked)
}

#[error_code]
pub enum LedgerError {
    #[msg("Delta would drive the balance negative")]
    NegativeBalance = 100,
    #[msg("Balance overflow")]
    Overflow,
    #[msg("Snapshot is not newer than the applied one")]
    StaleSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta_profit_and_loss() {
        assert_eq!(apply_delta(10_000, 500).unwrap(), 10_500);
        assert_eq!(apply_delta(10_000, -1_000).unwrap(), 9_000);
        assert_eq!(apply_delta(10_000, -10_000).unwrap(), 0);
    }

    #[test]
    fn test_apply_delta_rejects_underflow() {
        let err = apply_delta(100, -101).unwrap_err();
        assert_eq!(err, error!(LedgerError::NegativeBalance));
    }

    #[test]
    fn test_apply_delta_rejects_overflow() {
        let err = apply_delta(u64::MAX, 1).unwrap_err();
        assert_eq!(err, error!(LedgerError::Overflow));
    }

    #[test]
    fn test_compute_delta_sign() {
        assert_eq!(compute_delta(11_000, 10_000), 1_000);
        assert_eq!(compute_delta(9_000, 10_000), -1_000);
        assert_eq!(compute_delta(0, u64::MAX), -i128::from(u64::MAX));
    }

    #[test]
    fn test_snapshot_overwrites() {
        assert_eq!(apply_snapshot(7, 3), 3);
        assert_eq!(apply_snapshot(apply_snapshot(7, 3), 3), 3);
    }

    #[test]
    fn test_versioned_snapshot_rejects_stale() {
        let (value, version) = apply_versioned_snapshot(0, 0, 500, 1).unwrap();
        assert_eq!((value, version), (500, 1));

        let (value, version) = apply_versioned_snapshot(value, version, 800, 3).unwrap();
        assert_eq!((value, version), (800, 3));

        let err = apply_versioned_snapshot(value, version, 600, 2).unwrap_err();
        assert_eq!(err, error!(LedgerError::StaleSnapshot));

        let err = apply_versioned_snapshot(value, version, 800, 3).unwrap_err();
        assert_eq!(err, error!(LedgerError::StaleSnapshot));
    }
}
