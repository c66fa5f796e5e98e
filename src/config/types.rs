//! Value types shared across the crate (Immutable Blueprints)

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Sub};

/// A behavioral contract for anything that behaves like a price.
pub trait PriceLike {
    fn value(&self) -> f64;

    const MIN_EPSILON: f64 = 1e-12;

    fn is_positive(&self) -> bool {
        self.value() > Self::MIN_EPSILON
    }

    /// Formats a price with adaptive decimals.
    fn format_price(&self) -> String {
        let price = self.value();
        if price == 0.0 {
            return "0.00".to_string();
        }

        let abs_price = price.abs();
        if abs_price >= 1000.0 {
            format!("{:.2}", price)
        } else if abs_price >= 1.0 {
            format!("{:.4}", price)
        } else {
            format!("{:.6}", price)
        }
    }
}

macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name::new(v)
            }
        }

        impl $name {
            pub const fn new(val: f64) -> Self {
                // Absolute prices should not be negative
                let v = if val < 0.0 { 0.0 } else { val };
                Self(v)
            }
        }

        impl Add for $name {
            type Output = f64;

            fn add(self, rhs: Self) -> Self::Output {
                self.value() + rhs.value()
            }
        }

        impl Sub for $name {
            type Output = f64;

            fn sub(self, rhs: Self) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl Div for $name {
            type Output = f64;

            fn div(self, rhs: Self) -> Self::Output {
                self.value() / rhs.value()
            }
        }

        impl PriceLike for $name {
            fn value(&self) -> f64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.format_price())
            }
        }
    };
}

macro_rules! impl_price_ops {
    ($a:ty, $b:ty) => {
        impl Sub<$b> for $a {
            type Output = f64;

            fn sub(self, rhs: $b) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl PartialEq<$b> for $a {
            fn eq(&self, other: &$b) -> bool {
                self.value() == other.value()
            }
        }

        impl PartialOrd<$b> for $a {
            fn partial_cmp(&self, other: &$b) -> Option<std::cmp::Ordering> {
                self.value().partial_cmp(&other.value())
            }
        }
    };
}

// Generate the Price Hierarchy
define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);

impl_price_ops!(ClosePrice, OpenPrice);
impl_price_ops!(HighPrice, LowPrice);

/// Signed percentage return, already scaled to percent units (1.0 = 1%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ReturnPct(f64);

impl ReturnPct {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// (to - from) / from * 100. Zero when `from` is not a usable divisor.
    pub fn between(from: f64, to: f64) -> Self {
        if from.abs() > f64::EPSILON {
            Self::new((to - from) / from * 100.0)
        } else {
            Self::new(0.0)
        }
    }
}

impl std::fmt::Display for ReturnPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.3}%", self.0)
    }
}

/// High minus low, in price points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RangePoints(f64);

impl RangePoints {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for RangePoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Probability in percent units, clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProbPct(f64);

impl ProbPct {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 100.0 {
            100.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ProbPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_types_clamp_negative_values() {
        assert_eq!(OpenPrice::new(-3.0).value(), 0.0);
        assert_eq!(ClosePrice::from(12.5).value(), 12.5);
    }

    #[test]
    fn cross_price_subtraction() {
        let close = ClosePrice::new(105.0);
        let open = OpenPrice::new(100.0);
        assert_eq!(close - open, 5.0);
        assert!(close > open);
        assert_eq!(HighPrice::new(10.0) - LowPrice::new(7.5), 2.5);
    }

    #[test]
    fn return_pct_guards_zero_divisor() {
        assert_eq!(ReturnPct::between(0.0, 10.0).value(), 0.0);
        assert!((ReturnPct::between(100.0, 101.0).value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prob_pct_is_clamped() {
        assert_eq!(ProbPct::new(120.0).value(), 100.0);
        assert_eq!(ProbPct::new(-1.0).value(), 0.0);
        assert_eq!(format!("{}", ProbPct::new(62.5)), "62.5%");
    }
}
