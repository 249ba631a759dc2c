//! Elementwise transforms over scaling columns.
//!
//! All transforms are pure and return a series of the same length as their
//! input. None of them guard against division by zero; callers that need a
//! sane baseline run [`check_baseline`] first.

use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransformError {
    #[error("cannot compute efficiency of an empty series")]
    Empty,

    #[error("efficiency baseline must be finite and non-zero, got x[0] = {x0}, y[0] = {y0}")]
    ZeroBaseline { x0: f64, y0: f64 },
}

/// How the normalization reference is picked from a series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    /// Smallest value of the series.
    #[default]
    Min,
    /// First value of the series.
    First,
    /// Fixed value, independent of the data.
    Value(f64),
}

impl Reference {
    /// Resolve against `values`; `None` when the series is empty.
    pub fn resolve(&self, values: &[f64]) -> Option<f64> {
        match *self {
            Reference::Min => values.iter().copied().reduce(f64::min),
            Reference::First => values.first().copied(),
            Reference::Value(v) => Some(v),
        }
    }
}

/// `y[i] / reference`.
pub fn normalize(y: &[f64], reference: f64) -> Vec<f64> {
    y.iter().map(|v| v / reference).collect()
}

/// `x[i] * rate`.
pub fn cost_scale(x: &[f64], rate: f64) -> Vec<f64> {
    x.iter().map(|v| v * rate).collect()
}

/// Parallel efficiency in percent, relative to the first point:
/// `100 * y[i] * x[0] / (y[0] * x[i])`.
pub fn efficiency(x: &[f64], y: &[f64]) -> Vec<f64> {
    debug_assert_eq!(x.len(), y.len());
    let (Some(&x0), Some(&y0)) = (x.first(), y.first()) else {
        return Vec::new();
    };
    // Grouped so the first point divides a product by itself: exactly 100.
    x.iter()
        .zip(y)
        .map(|(&xi, &yi)| 100.0 * ((yi * x0) / (y0 * xi)))
        .collect()
}

/// Perfect linear scaling through the first point: `y[0] * x[i] / x[0]`.
pub fn ideal_scaling(x: &[f64], y: &[f64]) -> Vec<f64> {
    let (Some(&x0), Some(&y0)) = (x.first(), y.first()) else {
        return Vec::new();
    };
    x.iter().map(|&xi| y0 * (xi / x0)).collect()
}

/// Reject baselines that would make [`efficiency`] non-finite.
pub fn check_baseline(x: &[f64], y: &[f64]) -> Result<(), TransformError> {
    let (Some(&x0), Some(&y0)) = (x.first(), y.first()) else {
        return Err(TransformError::Empty);
    };
    let usable = |v: f64| v.is_finite() && v != 0.0;
    if !usable(x0) || !usable(y0) {
        return Err(TransformError::ZeroBaseline { x0, y0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn normalize_divides_every_element() {
        let y = [3.0, 6.0, 7.5, 0.0];
        assert_eq!(normalize(&y, 1.5), vec![2.0, 4.0, 5.0, 0.0]);
    }

    #[test]
    fn normalize_by_zero_is_unguarded() {
        let out = normalize(&[1.0, 0.0], 0.0);
        assert_eq!(out[0], f64::INFINITY);
        assert!(out[1].is_nan());
    }

    #[test]
    fn cost_scale_multiplies_every_element() {
        let x = [1.0, 2.0, 4.0, 8.0];
        let rate = 325.0 / 24.0;
        let out = cost_scale(&x, rate);

        assert_eq!(out.len(), x.len());
        for (o, v) in out.iter().zip(x) {
            assert_eq!(*o, v * rate);
        }
    }

    #[test]
    fn efficiency_of_two_runs() {
        assert_eq!(efficiency(&[1.0, 2.0], &[100.0, 150.0]), vec![100.0, 75.0]);
    }

    #[test]
    fn efficiency_first_point_is_exactly_one_hundred() {
        let cases: [(&[f64], &[f64]); 3] = [
            (&[3.0, 6.0], &[0.1, 0.19]),
            (&[7.0, 14.0, 28.0], &[1234.567, 2400.0, 4500.0]),
            (&[0.3, 0.6], &[1e-7, 2e-7]),
        ];
        for (x, y) in cases {
            assert_eq!(efficiency(x, y)[0], 100.0);
        }
    }

    #[test]
    fn efficiency_matches_formula() {
        let x = [2.0, 4.0, 8.0, 16.0];
        let y = [310.0, 600.0, 1150.0, 2100.0];
        let out = efficiency(&x, &y);

        for i in 0..x.len() {
            let expected = 100.0 * y[i] * x[0] / (y[0] * x[i]);
            assert!(close(out[i], expected), "i={i}: {} vs {}", out[i], expected);
        }
    }

    #[test]
    fn efficiency_of_empty_input_is_empty() {
        assert!(efficiency(&[], &[]).is_empty());
    }

    #[test]
    fn efficiency_with_zero_baseline_is_unguarded() {
        // x0 = 0 zeroes every numerator; only the first row divides by zero.
        let out = efficiency(&[0.0, 2.0], &[100.0, 150.0]);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 0.0);

        // y0 = 0 divides every row by zero.
        let out = efficiency(&[1.0, 2.0], &[0.0, 150.0]);
        assert!(out[0].is_nan());
        assert_eq!(out[1], f64::INFINITY);
    }

    #[test]
    fn ideal_scaling_is_linear_through_first_point() {
        assert_eq!(ideal_scaling(&[2.0, 4.0, 8.0], &[50.0, 90.0, 170.0]), vec![50.0, 100.0, 200.0]);
    }

    #[test]
    fn reference_resolution() {
        let y = [5.0, 2.0, 9.0];
        assert_eq!(Reference::Min.resolve(&y), Some(2.0));
        assert_eq!(Reference::First.resolve(&y), Some(5.0));
        assert_eq!(Reference::Value(4.0).resolve(&y), Some(4.0));
        assert_eq!(Reference::Min.resolve(&[]), None);
    }

    #[test]
    fn baseline_check() {
        assert_eq!(check_baseline(&[1.0, 2.0], &[10.0, 20.0]), Ok(()));
        assert_eq!(check_baseline(&[], &[]), Err(TransformError::Empty));
        assert_eq!(
            check_baseline(&[1.0], &[0.0]),
            Err(TransformError::ZeroBaseline { x0: 1.0, y0: 0.0 })
        );
        assert!(check_baseline(&[f64::NAN], &[1.0]).is_err());
    }

    #[test]
    fn reference_from_config_json() {
        let r: Vec<Reference> = serde_json::from_str(r#"["min", "first", {"value": 2.5}]"#).unwrap();
        assert_eq!(r, vec![Reference::Min, Reference::First, Reference::Value(2.5)]);
    }
}
