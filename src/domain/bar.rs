use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::{
    ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike, RangePoints, ReturnPct,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Red,
}

/// One OHLC bar. `timestamp` is UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,

    pub open_price: OpenPrice,
    pub high_price: HighPrice,
    pub low_price: LowPrice,
    pub close_price: ClosePrice,
}

impl PriceBar {
    pub fn new(timestamp: NaiveDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        PriceBar {
            timestamp,
            open_price: OpenPrice::new(open),
            high_price: HighPrice::new(high),
            low_price: LowPrice::new(low),
            close_price: ClosePrice::new(close),
        }
    }

    /// Green only on a strictly higher close; unchanged bars count as red.
    pub fn color(&self) -> BarColor {
        if self.close_price > self.open_price {
            BarColor::Green
        } else {
            BarColor::Red
        }
    }

    pub fn up_flag(&self) -> f64 {
        match self.color() {
            BarColor::Green => 1.0,
            BarColor::Red => 0.0,
        }
    }

    /// Open-to-close return.
    pub fn return_pct(&self) -> ReturnPct {
        ReturnPct::between(self.open_price.value(), self.close_price.value())
    }

    pub fn range_points(&self) -> RangePoints {
        RangePoints::new(self.high_price - self.low_price)
    }

    /// A % return needs a positive open.
    pub fn is_valid(&self) -> bool {
        self.open_price.is_positive()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn flat_bar_is_red() {
        let bar = PriceBar::new(ts("2024-01-02 00:00"), 100.0, 101.0, 99.0, 100.0);
        assert_eq!(bar.color(), BarColor::Red);
        assert_eq!(bar.up_flag(), 0.0);
    }

    #[test]
    fn metrics_of_a_green_bar() {
        let bar = PriceBar::new(ts("2024-01-02 00:00"), 200.0, 210.0, 195.0, 204.0);
        assert_eq!(bar.up_flag(), 1.0);
        assert!((bar.return_pct().value() - 2.0).abs() < 1e-12);
        assert_eq!(bar.range_points().value(), 15.0);
    }

    #[test]
    fn zero_open_is_invalid() {
        let bar = PriceBar::new(ts("2024-01-02 00:00"), 0.0, 1.0, 0.0, 1.0);
        assert!(!bar.is_valid());
    }
}
