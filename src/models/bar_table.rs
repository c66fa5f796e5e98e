use std::collections::BTreeMap;

use crate::config::DF;
use crate::domain::PriceBar;
use crate::error::{ProfileError, Result};
use crate::models::PriceSeries;
use crate::utils::parse_timestamp;

/// Header names accepted for the timestamp column, in preference order.
const TIME_COLUMNS: [&str; 2] = ["date", "timestamp"];
const PRICE_COLUMNS: [&str; 4] = ["open", "high", "low", "close"];

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<String>),
    Numeric(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text_at(&self, idx: usize) -> Option<&str> {
        match self {
            Column::Text(v) => v.get(idx).map(String::as_str),
            Column::Numeric(_) => None,
        }
    }

    /// Numeric view of a cell. Text cells are parsed after stripping thousands separators.
    fn number_at(&self, idx: usize) -> Option<f64> {
        match self {
            Column::Numeric(v) => v.get(idx).copied(),
            Column::Text(v) => v.get(idx).and_then(|s| s.trim().replace(',', "").parse().ok()),
        }
    }
}

/// Rectangular, column-oriented bar table as handed over by a loader.
/// Header lookup is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarTable {
    columns: BTreeMap<String, Column>,
}

impl BarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_column(mut self, name: &str, values: Vec<String>) -> Self {
        self.insert(name, Column::Text(values));
        self
    }

    pub fn with_numeric_column(mut self, name: &str, values: Vec<f64>) -> Self {
        self.insert(name, Column::Numeric(values));
        self
    }

    pub fn insert(&mut self, name: &str, column: Column) {
        self.columns.insert(name.trim().to_lowercase(), column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(&name.trim().to_lowercase())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Validates the required columns and converts every usable row into a bar.
    ///
    /// Missing columns are fatal. Rows with an unparseable timestamp or price, or with
    /// `Open <= 0`, are dropped; the rest of the batch still converts.
    pub fn to_series(&self) -> Result<PriceSeries> {
        let time = TIME_COLUMNS
            .iter()
            .find_map(|name| self.column(name).filter(|c| matches!(c, Column::Text(_))))
            .ok_or_else(|| ProfileError::MissingColumn {
                column: "Date".to_string(),
            })?;
        let expected = time.len();

        let mut prices = Vec::with_capacity(PRICE_COLUMNS.len());
        for name in PRICE_COLUMNS {
            let column = self.column(name).ok_or_else(|| ProfileError::MissingColumn {
                column: title_case(name),
            })?;
            if column.len() != expected {
                return Err(ProfileError::ColumnLengthMismatch {
                    column: title_case(name),
                    expected,
                    got: column.len(),
                });
            }
            prices.push(column);
        }
        let [open, high, low, close] = [prices[0], prices[1], prices[2], prices[3]];

        let mut bars = Vec::with_capacity(expected);
        let mut bad_time = 0usize;
        let mut bad_price = 0usize;

        for idx in 0..expected {
            let Some(ts) = time.text_at(idx).and_then(parse_timestamp) else {
                bad_time += 1;
                continue;
            };
            let values = (
                open.number_at(idx),
                high.number_at(idx),
                low.number_at(idx),
                close.number_at(idx),
            );
            let (Some(o), Some(h), Some(l), Some(c)) = values else {
                bad_price += 1;
                continue;
            };
            bars.push(PriceBar::new(ts, o, h, l, c));
        }

        if DF.log_loader && (bad_time > 0 || bad_price > 0) {
            log::debug!(
                "BarTable: dropped {} rows with unparseable timestamps and {} with unparseable prices (of {})",
                bad_time,
                bad_price,
                expected
            );
        }

        Ok(PriceSeries::from_bars(bars))
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
