//! Currency amounts as whole cents.
//!
//! The banking UI renders balances as strings like `$1,000.50`, the REST
//! surface takes bare two-decimal amounts in paths, and the transaction
//! records carry floats. [`Money`] owns all three renderings so flow code
//! never does string or float arithmetic on balances.

use crate::error::BadCurrency;
use std::fmt;
use std::ops::{Add, Sub};

/// An exact currency amount, held as whole cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Construct an amount from whole cents.
    pub const fn from_cents(cents: i64) -> Money {
        Money { cents }
    }

    /// The amount in whole cents.
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Parse a rendered amount, losslessly, into cents.
    ///
    /// Accepts the forms the banking UI and REST surface produce: an optional
    /// `$` marker, an optional sign before or after the marker, thousands
    /// separators in the whole part, and at most two fraction digits.
    /// Anything that cannot be represented exactly in cents is rejected.
    pub fn parse(text: &str) -> Result<Money, BadCurrency> {
        let bad = || BadCurrency::new(text);

        let mut rest = text.trim();
        if rest.is_empty() {
            return Err(bad());
        }

        let mut negative = false;
        if let Some(r) = rest.strip_prefix('-') {
            negative = true;
            rest = r;
        }
        if let Some(r) = rest.strip_prefix('$') {
            rest = r;
        }
        // some screens render negative amounts as `$-10.00`
        if !negative {
            if let Some(r) = rest.strip_prefix('-') {
                negative = true;
                rest = r;
            }
        }

        let (whole, frac) = match rest.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (rest, None),
        };

        let whole: String = whole.chars().filter(|&c| c != ',').collect();
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let whole: i64 = whole.parse().map_err(|_| bad())?;

        let frac_cents = match frac {
            None => 0,
            Some(f) if f.len() == 1 && f.as_bytes()[0].is_ascii_digit() => {
                i64::from(f.as_bytes()[0] - b'0') * 10
            }
            Some(f) if f.len() == 2 && f.bytes().all(|b| b.is_ascii_digit()) => {
                f.parse().map_err(|_| bad())?
            }
            Some(_) => return Err(bad()),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac_cents))
            .ok_or_else(bad)?;
        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }

    /// The bare two-decimal rendering the REST surface takes in paths,
    /// e.g. `20.00`.
    pub fn api_repr(self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Whether a float amount, as reported in transaction records, is within
    /// half a cent of this amount.
    pub fn close_to(self, amount: f64) -> bool {
        (amount * 100.0 - self.cents as f64).abs() <= 0.5
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents + rhs.cents)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::from_cents(self.cents - rhs.cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}
