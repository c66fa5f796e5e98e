use itertools::Itertools;

use crate::models::{Metric, ProfileRow};

/// The `n` rows with the largest (or smallest) `metric`. Ties keep bucket order.
pub fn top_buckets(rows: &[ProfileRow], metric: Metric, n: usize, largest: bool) -> Vec<ProfileRow> {
    // Stable sort, so equal values stay in domain order
    rows.iter()
        .sorted_by(|a, b| {
            let ord = a.metrics.get(metric).total_cmp(&b.metrics.get(metric));
            if largest { ord.reverse() } else { ord }
        })
        .take(n)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bucket;
    use crate::models::MetricValues;

    fn row(hour: u32, range: f64) -> ProfileRow {
        let mut metrics = MetricValues::EMPTY;
        metrics.set(Metric::AvgRange, range);
        ProfileRow {
            bucket: Bucket::Index(hour),
            label: format!("{:02}:00", hour),
            metrics,
        }
    }

    #[test]
    fn picks_most_volatile_hours() {
        let rows = vec![row(0, 1.0), row(1, 5.0), row(2, 3.0), row(3, 5.0)];
        let top = top_buckets(&rows, Metric::AvgRange, 2, true);
        assert_eq!(top[0].bucket, Bucket::Index(1));
        assert_eq!(top[1].bucket, Bucket::Index(3));

        let quiet = top_buckets(&rows, Metric::AvgRange, 1, false);
        assert_eq!(quiet[0].bucket, Bucket::Index(0));
        assert_eq!(top_buckets(&rows, Metric::AvgRange, 10, true).len(), 4);
    }
}
