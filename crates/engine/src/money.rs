use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Signed money amount represented as **integer centavos**.
///
/// Every monetary value in the ledger (entry amounts, partner balances,
/// report totals) uses this type to avoid floating-point drift.
///
/// The sign of an entry amount is kept as recorded; whether it counts as
/// income or expense is decided by the entry's natureza, not by the sign.
///
/// There are no arithmetic operators: sums go through [`MoneyCents::checked_add`]
/// and friends so that an overflow surfaces as an error.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "R$ 12,34");
/// assert_eq!(MoneyCents::new(i64::MAX).checked_add(MoneyCents::new(1)), None);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest absolute amount a single entry may carry (R$ 1 trillion).
    pub const MAX_ENTRY: MoneyCents = MoneyCents(100_000_000_000_000);

    /// Creates a new amount from integer centavos.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in centavos.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// `self + rhs`, or `InvalidAmount` on overflow.
    pub(crate) fn try_add(self, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
        self.checked_add(rhs).ok_or_else(overflow)
    }

    /// `self - rhs`, or `InvalidAmount` on overflow.
    pub(crate) fn try_sub(self, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
        self.checked_sub(rhs).ok_or_else(overflow)
    }

    /// Rejects amounts outside `-MAX_ENTRY..=MAX_ENTRY`.
    pub(crate) fn check_entry_bounds(self) -> ResultEngine<()> {
        if self.0.unsigned_abs() > Self::MAX_ENTRY.0.unsigned_abs() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be within ±{}",
                Self::MAX_ENTRY
            )));
        }
        Ok(())
    }
}

fn overflow() -> EngineError {
    EngineError::InvalidAmount("amount overflow".to_string())
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let reais = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}R$ {reais},{cents:02}")
    }
}
