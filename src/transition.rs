use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::lineshape::{Lineshape, MHZ2WVN, WVN2MHZ};
use crate::qn::QuantumNumbers;
use crate::spectrum::Spectrum;

// ---------------------------------------------------------------------------
// Frequency unit
// ---------------------------------------------------------------------------

/// Frequency/energy unit of a transition record. The on-disk encoding (sign
/// of the uncertainty field) is resolved into this at parse time; in-memory
/// uncertainties are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Megahertz.
    #[default]
    MHz,
    /// Wavenumbers (cm^-1).
    Wvn,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::MHz => write!(f, "MHz"),
            Unit::Wvn => write!(f, "wvn"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition – one spectroscopic line
// ---------------------------------------------------------------------------

/// A single spectroscopic transition: predicted frequency plus optional
/// experimental assignment, intensity, lower-state energy, and the
/// bookkeeping tags carried through from the fit programs.
#[derive(Debug, Clone)]
pub struct Transition {
    pub calc_freq: f64,
    pub calc_unc: f64,
    pub exp_freq: Option<f64>,
    pub exp_unc: Option<f64>,
    /// Linear intensity (already converted from the log10 stored on disk).
    pub intensity: f64,
    /// Lower-state energy in cm^-1.
    pub egy_low: f64,
    /// Upper-state degeneracy.
    pub gup: i32,
    pub tag: i32,
    pub qntag: i32,
    pub qn_up: QuantumNumbers,
    pub qn_low: QuantumNumbers,
    pub unit: Unit,
    pub comment: Option<String>,
}

impl Default for Transition {
    fn default() -> Self {
        Transition {
            calc_freq: 0.0,
            calc_unc: 0.0,
            exp_freq: None,
            exp_unc: None,
            intensity: 1.0,
            egy_low: 0.0,
            gup: 1,
            tag: 0,
            qntag: 0,
            qn_up: QuantumNumbers::new(Vec::new()),
            qn_low: QuantumNumbers::new(Vec::new()),
            unit: Unit::MHz,
            comment: None,
        }
    }
}

impl Transition {
    /// Cat-file line (no trailing newline). The uncertainty is written with
    /// a negative sign when the record is in wavenumbers, which is how the
    /// format encodes the unit.
    pub fn cat_str(&self) -> String {
        let unc = match self.unit {
            Unit::Wvn => -self.calc_unc,
            Unit::MHz => self.calc_unc,
        };
        format!(
            "{:13.4}{:8.4}{:8.4}{:2}{:10.4}{:3}{:7}{:4}{:>12}{:>12}",
            self.calc_freq,
            unc,
            self.intensity.log10(),
            3,
            self.egy_low,
            self.gup,
            self.tag,
            self.qntag,
            self.qn_up.cat_str(),
            self.qn_low.cat_str(),
        )
    }

    /// Merged-file line: prefers the experimental frequency/uncertainty and
    /// flips the tag sign to mark the experimental provenance, falling back
    /// to the calculated values otherwise.
    pub fn mrg_str(&self) -> String {
        let (freq, unc, tag) = match (self.exp_freq, self.exp_unc) {
            (Some(f), Some(u)) => (f, u, -self.tag),
            _ => (self.calc_freq, self.calc_unc, self.tag),
        };
        format!(
            "{:13.4}{:8.4}{:8.4}{:2}{:10.4}{:3}{:7}{:4}{:>12}{:>12}",
            freq,
            unc,
            self.intensity.log10(),
            3,
            self.egy_low,
            self.gup,
            tag,
            self.qntag,
            self.qn_up.cat_str(),
            self.qn_low.cat_str(),
        )
    }

    /// Lin-file line, or `None` when the transition has no experimental
    /// assignment (such transitions produce no output at all).
    pub fn lin_str(&self) -> Option<String> {
        let exp_freq = self.exp_freq?;
        let exp_unc = self.exp_unc.unwrap_or(0.0);
        Some(format!(
            "{:>18}{:>18}{:36.6}{:10.6}{:10.6}     {}",
            self.qn_up.lin_str(),
            self.qn_low.lin_str(),
            exp_freq,
            exp_unc,
            self.intensity,
            self.comment.as_deref().unwrap_or(""),
        ))
    }
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Optional predicates over transitions, combined with AND semantics.
/// Absent predicates are not checked; quantum-number patterns are
/// wildcard-aware (see [`QuantumNumbers::matches`]).
#[derive(Debug, Clone, Default)]
pub struct TransitionFilter {
    pub qn_up: Option<QuantumNumbers>,
    pub qn_low: Option<QuantumNumbers>,
    pub freq_min: Option<f64>,
    pub freq_max: Option<f64>,
    pub intensity_min: Option<f64>,
}

impl TransitionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qn_up(mut self, pattern: impl Into<QuantumNumbers>) -> Self {
        self.qn_up = Some(pattern.into());
        self
    }

    pub fn qn_low(mut self, pattern: impl Into<QuantumNumbers>) -> Self {
        self.qn_low = Some(pattern.into());
        self
    }

    pub fn freq_min(mut self, f: f64) -> Self {
        self.freq_min = Some(f);
        self
    }

    pub fn freq_max(mut self, f: f64) -> Self {
        self.freq_max = Some(f);
        self
    }

    pub fn intensity_min(mut self, i: f64) -> Self {
        self.intensity_min = Some(i);
        self
    }

    /// Whether a single transition passes every supplied predicate.
    pub fn accepts(&self, t: &Transition) -> bool {
        if let Some(pattern) = &self.qn_up {
            if !t.qn_up.matches(pattern) {
                return false;
            }
        }
        if let Some(pattern) = &self.qn_low {
            if !t.qn_low.matches(pattern) {
                return false;
            }
        }
        if let Some(min) = self.freq_min {
            if t.calc_freq < min {
                return false;
            }
        }
        if let Some(max) = self.freq_max {
            if t.calc_freq > max {
                return false;
            }
        }
        if let Some(min) = self.intensity_min {
            if t.intensity < min {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Save format
// ---------------------------------------------------------------------------

/// Output formats understood by [`TransitionCollection::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionFormat {
    Cat,
    Lin,
    Mrg,
}

// ---------------------------------------------------------------------------
// TransitionCollection
// ---------------------------------------------------------------------------

/// An ordered, insertion-order-preserving list of transitions. Owns its
/// records; after any bulk operation all records share the same unit.
#[derive(Debug, Clone, Default)]
pub struct TransitionCollection {
    pub transitions: Vec<Transition>,
}

impl TransitionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    /// Convert every record to `unit`, scaling frequencies and
    /// uncertainties by the MHz <-> cm^-1 factor. Records already in the
    /// target unit are left untouched, so the call is idempotent.
    pub fn convert_unit(&mut self, unit: Unit) {
        for t in &mut self.transitions {
            if t.unit == unit {
                continue;
            }
            let factor = match unit {
                Unit::Wvn => MHZ2WVN,
                Unit::MHz => WVN2MHZ,
            };
            t.calc_freq *= factor;
            t.calc_unc *= factor;
            if let Some(f) = t.exp_freq.as_mut() {
                *f *= factor;
            }
            if let Some(u) = t.exp_unc.as_mut() {
                *u *= factor;
            }
            t.unit = unit;
        }
    }

    /// Indices of transitions passing all predicates of `filter`,
    /// in insertion order.
    pub fn filter(&self, filter: &TransitionFilter) -> Vec<usize> {
        self.transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| filter.accepts(t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Write one fixed-width line per transition. Lin output silently skips
    /// transitions without an experimental assignment.
    pub fn save(&self, path: impl AsRef<Path>, format: TransitionFormat) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        for t in &self.transitions {
            match format {
                TransitionFormat::Cat => writeln!(w, "{}", t.cat_str())?,
                TransitionFormat::Mrg => writeln!(w, "{}", t.mrg_str())?,
                TransitionFormat::Lin => {
                    if let Some(line) = t.lin_str() {
                        writeln!(w, "{line}")?;
                    }
                }
            }
        }
        w.flush()?;
        Ok(())
    }

    /// Simulate a stick-convolved spectrum over `[freq_min, freq_max)`.
    ///
    /// One lineshape kernel is sampled over +/-100x the line width and
    /// accumulated (scaled by each line's intensity) onto the shared grid at
    /// the offset of the line's calculated frequency; kernel windows
    /// overflowing either grid edge are truncated. The kernel is sampled
    /// once and added slice-wise, so the cost per line is the kernel length,
    /// not a per-gridpoint profile evaluation.
    pub fn simulate_spectrum(
        &self,
        freq_min: f64,
        freq_max: f64,
        line_width: f64,
        step_size: f64,
        lineshape: Lineshape,
    ) -> Spectrum {
        let selected = self.filter(
            &TransitionFilter::new()
                .freq_min(freq_min)
                .freq_max(freq_max),
        );

        let x = arange(freq_min, freq_max, step_size);
        let mut y = vec![0.0; x.len()];
        log::debug!(
            "simulating {} lines on {} grid points",
            selected.len(),
            x.len()
        );

        let xg = arange(-100.0 * line_width, 100.0 * line_width, step_size);
        let yg: Vec<f64> = xg
            .iter()
            .map(|&v| lineshape.eval(v, 0.0, 1.0, line_width))
            .collect();
        let glength = yg.len() as i64;
        let gcenter = glength / 2;

        for idx in selected {
            let t = &self.transitions[idx];
            let start = ((t.calc_freq - freq_min) / step_size).round() as i64 - gcenter;
            let stop = (start + glength).min(y.len() as i64);
            if stop <= 0 || start >= y.len() as i64 {
                continue;
            }
            let (dst0, src0) = if start < 0 {
                (0usize, (-start) as usize)
            } else {
                (start as usize, 0usize)
            };
            let n = stop as usize - dst0;
            for (d, s) in y[dst0..dst0 + n].iter_mut().zip(&yg[src0..src0 + n]) {
                *d += t.intensity * *s;
            }
        }

        Spectrum::new(x, y)
    }
}

/// Half-open evenly spaced grid, numpy-`arange` style: the end point is
/// excluded and the length is `ceil((stop - start) / step)`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}
