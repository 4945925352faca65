//! Small numeric helpers shared by the series and classification pipelines.

use crate::core::errors::{Error, Result};

/// Arithmetic mean of a non-empty slice.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// q-th quantile of `values` by linear interpolation between order statistics.
///
/// Accepts the closed interval [0, 1]; callers that require an open interval
/// (the quantile classification rules) validate before calling. A slice of
/// one element yields that element for every q.
pub fn quantile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidQuantile(q));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    if below == above {
        return Ok(sorted[below]);
    }

    let weight = rank - below as f64;
    Ok(sorted[below] * (1.0 - weight) + sorted[above] * weight)
}

#[cfg(test)]
mod tests {
    use super::{mean, quantile};
    use crate::core::errors::Error;

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn mean_of_empty_slice_fails() {
        assert!(matches!(mean(&[]), Err(Error::EmptyDataset)));
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        assert_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile(&[42.0], 0.2).unwrap(), 42.0);
        assert_eq!(quantile(&[42.0], 0.95).unwrap(), 42.0);
    }

    #[test]
    fn quantile_ignores_input_order() {
        let shuffled = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&shuffled, 0.5).unwrap(), 2.5);
    }

    #[test]
    fn quantile_rejects_out_of_range_q() {
        assert!(matches!(
            quantile(&[1.0], -0.1),
            Err(Error::InvalidQuantile(_))
        ));
        assert!(matches!(
            quantile(&[1.0], 1.5),
            Err(Error::InvalidQuantile(_))
        ));
    }

    #[test]
    fn quantile_of_empty_slice_fails() {
        assert!(matches!(quantile(&[], 0.5), Err(Error::EmptyDataset)));
    }
}
