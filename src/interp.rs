use crate::error::{CatalogError, Result};

// ---------------------------------------------------------------------------
// Natural cubic spline with clamped fill
// ---------------------------------------------------------------------------

/// A natural cubic spline over sorted sample points. Queries outside the
/// sampled range on either side return a fixed fill value instead of
/// extrapolating; with exactly two points the spline degenerates to a line.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at the knots (natural boundary: zero at the ends).
    y2: Vec<f64>,
    fill: f64,
}

impl CubicSpline {
    /// Build from strictly increasing `xs` and matching `ys`; requires at
    /// least two points.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, fill: f64) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(CatalogError::Input(format!(
                "spline sample mismatch: {} x-values, {} y-values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(CatalogError::Input(
                "spline needs at least two sample points".to_string(),
            ));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CatalogError::Input(
                "spline sample x-values must be strictly increasing".to_string(),
            ));
        }

        let n = xs.len();
        let mut y2 = vec![0.0; n];
        let mut u = vec![0.0; n];

        // Tridiagonal sweep for the second derivatives.
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2[i - 1] + 2.0;
            y2[i] = (sig - 1.0) / p;
            let d = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * d / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }
        for i in (0..n - 1).rev() {
            y2[i] = y2[i] * y2[i + 1] + u[i];
        }

        Ok(CubicSpline { xs, ys, y2, fill })
    }

    /// Evaluate at `x`; out-of-range queries return the fill value.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if x < self.xs[0] || x > self.xs[n - 1] {
            return self.fill;
        }
        // Knot interval via binary search.
        let hi = match self.xs.partition_point(|&k| k < x) {
            0 => 1,
            i if i >= n => n - 1,
            i => i,
        };
        let lo = hi - 1;
        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;
        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a.powi(3) - a) * self.y2[lo] + (b.powi(3) - b) * self.y2[hi]) * h * h / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_knot_values() {
        let xs = vec![1.0, 2.0, 4.0, 8.0];
        let ys = vec![3.0, 1.0, 4.0, 1.5];
        let s = CubicSpline::new(xs.clone(), ys.clone(), 0.0).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert!((s.eval(*x) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_data_stays_linear() {
        let xs: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let s = CubicSpline::new(xs, ys, 0.0).unwrap();
        assert!((s.eval(2.5) - 6.0).abs() < 1e-10);
        assert!((s.eval(4.75) - 10.5).abs() < 1e-10);
    }

    #[test]
    fn two_points_fall_back_to_a_line() {
        let s = CubicSpline::new(vec![0.0, 10.0], vec![0.0, 5.0], -1.0).unwrap();
        assert!((s.eval(4.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_is_clamped_to_fill() {
        let s = CubicSpline::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0], 30.0).unwrap();
        assert_eq!(s.eval(0.5), 30.0);
        assert_eq!(s.eval(1000.0), 30.0);
    }

    #[test]
    fn rejects_bad_samples() {
        assert!(CubicSpline::new(vec![1.0], vec![1.0], 0.0).is_err());
        assert!(CubicSpline::new(vec![1.0, 1.0], vec![1.0, 2.0], 0.0).is_err());
        assert!(CubicSpline::new(vec![1.0, 2.0], vec![1.0], 0.0).is_err());
    }
}
