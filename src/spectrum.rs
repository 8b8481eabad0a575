use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Spectrum – an accumulated intensity grid
// ---------------------------------------------------------------------------

/// A simulated spectrum: a shared frequency grid `x` and the accumulated
/// intensities `y` (same length).
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Spectrum {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Spectrum { x, y }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Grid spacing, assuming an evenly spaced axis.
    pub fn step(&self) -> f64 {
        if self.x.len() < 2 {
            return 0.0;
        }
        (self.x[self.x.len() - 1] - self.x[0]) / (self.x.len() - 1) as f64
    }

    /// First and last grid frequencies.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.x.first(), self.x.last()) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        }
    }

    /// Save as two whitespace-separated columns (frequency, intensity).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        for (x, y) in self.x.iter().zip(&self.y) {
            writeln!(w, "{x:.6}  {y:.6e}")?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_from_grid() {
        let s = Spectrum::new(vec![10.0, 10.5, 11.0], vec![0.0; 3]);
        assert!((s.step() - 0.5).abs() < 1e-12);
        assert_eq!(s.bounds(), Some((10.0, 11.0)));
    }

    #[test]
    fn save_writes_two_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.txt");
        let s = Spectrum::new(vec![1.0, 2.0], vec![0.5, 0.25]);
        s.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("1.000000  "));
    }
}
