//! Descriptive statistics over slices: percentages, means, medians and maxima.
//!
//! Every function here treats an empty input or a zero denominator as an undefined result and
//! returns [None], never zero or NaN.

/// Rounds to two decimal places, resolving ties to the nearest even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `numerator / denominator × 100`, rounded to two decimal places.
pub fn percentage(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(round2(numerator as f64 / denominator as f64 * 100.0))
    }
}

pub trait SliceExt {
    fn mean(&self) -> Option<f64>;
    fn median(&self) -> Option<f64>;
}

impl SliceExt for [u32] {
    fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            let sum: u64 = self.iter().map(|&value| value as u64).sum();
            Some(sum as f64 / self.len() as f64)
        }
    }

    fn median(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let mut sorted = self.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
        } else {
            Some(sorted[mid] as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_values() {
        assert_eq!(0.5, round2(0.5));
        assert_eq!(33.33, round2(100.0 / 3.0));
        assert_eq!(66.67, round2(200.0 / 3.0));
        assert_eq!(-1.24, round2(-1.2361));
        assert_eq!(0.0, round2(0.0));
    }

    #[test]
    fn percentage_zero_denominator() {
        assert_eq!(None, percentage(0, 0));
        assert_eq!(None, percentage(5, 0));
    }

    #[test]
    fn percentage_defined() {
        assert_eq!(Some(100.0), percentage(1, 1));
        assert_eq!(Some(0.0), percentage(0, 1));
        assert_eq!(Some(33.33), percentage(1, 3));
        assert_eq!(Some(62.5), percentage(10, 16));
    }

    #[test]
    fn mean_and_median_of_u32() {
        let empty: [u32; 0] = [];
        assert_eq!(None, empty.mean());
        assert_eq!(None, empty.median());

        let odd: [u32; 3] = [7, 1, 4];
        assert_eq!(Some(4.0), odd.mean());
        assert_eq!(Some(4.0), odd.median());

        let even: [u32; 4] = [10, 2, 8, 4];
        assert_eq!(Some(6.0), even.mean());
        assert_eq!(Some(6.0), even.median());

        let skewed: [u32; 3] = [1, 2, 90];
        assert_eq!(Some(31.0), skewed.mean());
        assert_eq!(Some(2.0), skewed.median());
    }
}
