/// Arithmetic mean. Returns 0.0 for empty input instead of NaN.
#[inline]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Running total: out[i] = data[0] + ... + data[i].
#[inline]
pub fn cumulative_sum(data: &[f64]) -> Vec<f64> {
    data.iter()
        .scan(0.0, |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Shifts every value so the first one becomes 0.0.
#[inline]
pub fn rebase_to_zero(data: &mut [f64]) {
    if let Some(&first) = data.first() {
        data.iter_mut().for_each(|v| *v -= first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn cumulative_sum_accumulates() {
        assert_eq!(cumulative_sum(&[1.0, -2.0, 0.5]), vec![1.0, -1.0, -0.5]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    #[test]
    fn rebase_shifts_first_to_zero() {
        let mut v = vec![1.5, 2.0, 0.5];
        rebase_to_zero(&mut v);
        assert_eq!(v, vec![0.0, 0.5, -1.0]);
    }
}
