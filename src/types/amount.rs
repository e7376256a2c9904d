use crate::types::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DISPLAY_PLACES: usize = 2;

/// A transaction amount read from the `amount` column.
///
/// Amounts stay as text on the record and are only parsed when totals are needed. An empty
/// cell counts as zero, anything else must be a plain decimal number.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl AddAssign<Amount> for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Amount AddAssign error: Overflow")
        }
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp_with_strategy(DISPLAY_PLACES as u32, RoundingStrategy::MidpointAwayFromZero);
        write!(formatter, "{:.width$}", rounded, width = DISPLAY_PLACES)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Ok(Amount::new());
        }

        if value.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(AmountError::InvalidFormat(format!("'{value}' is not a decimal number")));
        }

        let parsed = Decimal::from_str(value).map_err(|error| match error {
            rust_decimal::Error::ExceedsMaximumPossibleValue
            | rust_decimal::Error::LessThanMinimumPossibleValue => AmountError::Overflow,
            other => AmountError::Decimal(other)
        })?;

        Ok(Amount(parsed))
    }
}
