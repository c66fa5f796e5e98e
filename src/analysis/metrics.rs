//! Per-bar metric primitives and their per-bucket aggregation.

use crate::config::{PriceLike, ProbPct, RangePoints, ReturnPct};
use crate::domain::PriceBar;
use crate::models::{MetricValues, ReturnMethod};
use crate::utils::mean;

/// (ProbGreen, ProbRed) in percent from 0/1 up flags.
/// Empty input gives (0, 0), never a division by zero.
pub fn probability(flags: &[f64]) -> (ProbPct, ProbPct) {
    if flags.is_empty() {
        return (ProbPct::ZERO, ProbPct::ZERO);
    }
    let green = mean(flags) * 100.0;
    (ProbPct::new(green), ProbPct::new(100.0 - green))
}

/// Same as `probability` for pre-counted flags.
pub fn probability_from_counts(up: usize, total: usize) -> (ProbPct, ProbPct) {
    if total == 0 {
        return (ProbPct::ZERO, ProbPct::ZERO);
    }
    let green = up as f64 / total as f64 * 100.0;
    (ProbPct::new(green), ProbPct::new(100.0 - green))
}

/// Per-row returns of an ordered bar slice under `method`.
///
/// OpenClose yields one return per bar. CloseClose yields one fewer: the first bar
/// has no previous close and is dropped, so the result pairs with `bars[1..]`.
pub fn bar_returns(bars: &[PriceBar], method: ReturnMethod) -> Vec<ReturnPct> {
    match method {
        ReturnMethod::OpenClose => bars.iter().map(PriceBar::return_pct).collect(),
        ReturnMethod::CloseClose => bars
            .windows(2)
            .map(|w| ReturnPct::between(w[0].close_price.value(), w[1].close_price.value()))
            .collect(),
    }
}

/// Running sums for one bucket. `finish` turns them into averages.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricAccumulator {
    return_sum: f64,
    range_sum: f64,
    up_count: usize,
    count: usize,
}

impl MetricAccumulator {
    pub fn push(&mut self, bar: &PriceBar) {
        self.return_sum += bar.return_pct().value();
        self.range_sum += bar.range_points().value();
        if bar.up_flag() > 0.0 {
            self.up_count += 1;
        }
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn finish(&self) -> MetricValues {
        if self.count == 0 {
            return MetricValues::EMPTY;
        }
        let n = self.count as f64;
        let (prob_green, prob_red) = probability_from_counts(self.up_count, self.count);
        MetricValues {
            avg_return: ReturnPct::new(self.return_sum / n),
            avg_range: RangePoints::new(self.range_sum / n),
            prob_green,
            prob_red,
            observations: self.count,
        }
    }
}

impl<'a> FromIterator<&'a PriceBar> for MetricAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a PriceBar>>(iter: I) -> Self {
        let mut acc = MetricAccumulator::default();
        iter.into_iter().for_each(|bar| acc.push(bar));
        acc
    }
}
