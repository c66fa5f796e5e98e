use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, PriceBar};

/// Immutable bar series, sorted ascending by timestamp. Bars with a non-positive
/// open never make it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Self {
        let before = bars.len();
        bars.retain(|b| b.is_valid());
        if crate::config::DF.log_loader && bars.len() < before {
            log::debug!(
                "PriceSeries: dropped {} bars with non-positive open",
                before - bars.len()
            );
        }
        // Stable, so duplicate timestamps keep their input order
        bars.sort_by_key(|b| b.timestamp);
        Self { bars }
    }

    #[inline]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars whose UTC date falls inside `range`, in timestamp order.
    pub fn within(&self, range: DateRange) -> impl Iterator<Item = &PriceBar> + '_ {
        self.bars.iter().filter(move |b| range.contains(b.timestamp))
    }

    /// True when every bar sits at midnight, i.e. the series carries calendar dates
    /// only and no intraday clock. Empty series are not date-only.
    pub fn is_date_only(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|b| b.timestamp.time() == NaiveTime::MIN)
    }

    /// Drops every bar on the first and on the last calendar day of the series.
    /// Downloads usually start and end mid-session, which skews per-day statistics.
    pub fn trim_partial_days(&self) -> PriceSeries {
        let (Some(first), Some(last)) = (self.bars.first(), self.bars.last()) else {
            return PriceSeries::default();
        };
        let first_day: NaiveDate = first.date();
        let last_day: NaiveDate = last.date();

        let bars = self
            .bars
            .iter()
            .filter(|b| b.date() != first_day && b.date() != last_day)
            .copied()
            .collect();
        Self { bars }
    }
}
