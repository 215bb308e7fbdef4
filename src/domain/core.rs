mod catalog;
mod client;
mod hotel;
mod reservation;
mod room_type;

use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, Mul};

use derive_more::From;
use num_format::{Locale, ToFormattedString};
use serde::Deserialize;
use serde::Serialize;

pub use self::catalog::*;
pub use self::client::*;
pub use self::hotel::*;
pub use self::reservation::*;
pub use self::room_type::*;

/// Monetary amount in the hotel's local currency.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize, From)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Greater than zero and finite.
    pub fn is_positive(&self) -> bool {
        self.is_finite() && self.0 > 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * f64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cents = (self.0 * 100.0).round() as i64;
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        write!(
            f,
            "{}${}.{:02}",
            sign,
            (cents / 100).to_formatted_string(&Locale::en),
            cents % 100
        )
    }
}
