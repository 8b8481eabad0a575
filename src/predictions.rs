use std::collections::{HashMap, HashSet};

use crate::error::{CatalogError, Result};
use crate::interp::CubicSpline;
use crate::lineshape::{catescale, MHZ2WVN, WVN2MHZ};
use crate::state::{State, StateCollection};
use crate::transition::{Transition, TransitionCollection, TransitionFilter, Unit};

/// Fixed temperature grid (K) sampled when tabulating the partition
/// function; 2.725 K is the CMB, the rest doubles up to room temperature
/// plus two hot-band points.
pub const PARTITION_TEMPERATURES: [f64; 11] = [
    2.725, 5.0, 9.375, 18.75, 37.5, 75.0, 150.0, 225.0, 300.0, 500.0, 1000.0,
];

// ---------------------------------------------------------------------------
// PartitionTable – tabulated Q(T) plus its interpolant
// ---------------------------------------------------------------------------

/// Q(T) samples over [`PARTITION_TEMPERATURES`] (minus any that failed to
/// evaluate) and a cubic-spline interpolant through them. Out-of-range
/// temperatures are clamped to the value at the highest surviving sample,
/// deliberately avoiding unphysical extrapolation.
#[derive(Debug, Clone)]
pub struct PartitionTable {
    pub samples: Vec<(f64, f64)>,
    spline: CubicSpline,
}

impl PartitionTable {
    /// Tabulate the partition function of `states` over the fixed
    /// temperature grid. Temperatures whose evaluation fails are skipped
    /// with a warning; at least two must survive.
    pub fn from_states(states: &StateCollection) -> Result<Self> {
        let mut samples = Vec::new();
        for &t in &PARTITION_TEMPERATURES {
            match states.partition_function(t) {
                Ok(q) => samples.push((t, q)),
                Err(e) => log::warn!("skipping partition-function sample at {t} K: {e}"),
            }
        }
        if samples.len() < 2 {
            return Err(CatalogError::PartitionFunction(format!(
                "only {} of {} temperature samples evaluated",
                samples.len(),
                PARTITION_TEMPERATURES.len()
            )));
        }
        let fill = samples[samples.len() - 1].1;
        let spline = CubicSpline::new(
            samples.iter().map(|(t, _)| *t).collect(),
            samples.iter().map(|(_, q)| *q).collect(),
            fill,
        )?;
        Ok(PartitionTable { samples, spline })
    }

    /// Interpolated Q(T), clamped outside the sampled range.
    pub fn eval(&self, temperature: f64) -> f64 {
        self.spline.eval(temperature)
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// A predicted line list (typically one loaded cat-file) with the derived
/// quantities a simulation needs: the set of distinct upper states, a
/// tabulated partition function, and temperature-rescaled intensities.
///
/// The frequency index, upper-state set, and partition table are computed
/// lazily and cached; mutating `transitions` afterwards leaves them stale
/// until [`Predictions::invalidate_caches`] (a documented limitation of the
/// cat-file workflow, where catalogs are loaded once and only read).
#[derive(Debug, Clone, Default)]
pub struct Predictions {
    pub transitions: TransitionCollection,
    f2idx: HashMap<String, usize>,
    partition: Option<PartitionTable>,
}

impl Predictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_collection(transitions: TransitionCollection) -> Self {
        Predictions {
            transitions,
            ..Default::default()
        }
    }

    pub fn add(&mut self, transition: Transition) {
        self.transitions.add(transition);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drop every derived cache; call after mutating `transitions`.
    pub fn invalidate_caches(&mut self) {
        self.f2idx.clear();
        self.partition = None;
    }

    /// Lowest and highest calculated frequency among the transitions.
    pub fn freq_range(&self) -> Result<(f64, f64)> {
        let mut sorted: Vec<f64> = self
            .transitions
            .iter()
            .map(|t| t.calc_freq)
            .collect();
        if sorted.is_empty() {
            return Err(CatalogError::Input(
                "no transitions to take a frequency range from".to_string(),
            ));
        }
        sorted.sort_by(|a, b| a.total_cmp(b));
        Ok((sorted[0], sorted[sorted.len() - 1]))
    }

    /// Index of the transition with this exact calculated frequency.
    ///
    /// Backed by a lazily built map keyed on the printed frequency value,
    /// rebuilt whenever transitions were added since the last build; O(1)
    /// after that.
    pub fn index_from_freq(&mut self, freq: f64) -> Option<usize> {
        self.index_from_freq_key(&format!("{freq}"))
    }

    /// String-keyed variant of [`Predictions::index_from_freq`]; the key
    /// must match the default float formatting exactly.
    pub fn index_from_freq_key(&mut self, key: &str) -> Option<usize> {
        if self.f2idx.len() < self.transitions.len() {
            self.f2idx = self
                .transitions
                .iter()
                .enumerate()
                .map(|(i, t)| (format!("{}", t.calc_freq), i))
                .collect();
        }
        self.f2idx.get(key).copied()
    }

    /// Distinct upper states referenced by the transitions, deduplicated by
    /// the printed quantum-number tuple (an approximate but fast key; hash
    /// membership keeps the scan linear). Upper-state energies come from
    /// the lower-state energy plus the transition frequency.
    pub fn upper_states(&self) -> StateCollection {
        let mut states = StateCollection::new();
        let mut seen: HashSet<String> = HashSet::new();
        for t in self.transitions.iter() {
            let key = t.qn_up.to_string();
            if seen.contains(&key) {
                continue;
            }
            let egy_up = match t.unit {
                Unit::MHz => t.egy_low + t.calc_freq * MHZ2WVN,
                Unit::Wvn => t.egy_low + t.calc_freq,
            };
            states.add_state(State::new(t.qn_up.clone(), egy_up, Some(t.gup)));
            seen.insert(key);
        }
        states
    }

    /// Build (or rebuild) the partition-function table from the derived
    /// upper-state set.
    pub fn generate_partition_function_table(&mut self) -> Result<&PartitionTable> {
        let table = PartitionTable::from_states(&self.upper_states())?;
        Ok(self.partition.insert(table))
    }

    /// Interpolated Q(T), building the table on first use.
    pub fn partition_function(&mut self, temperature: f64) -> Result<f64> {
        match &self.partition {
            Some(table) => Ok(table.eval(temperature)),
            None => Ok(self.generate_partition_function_table()?.eval(temperature)),
        }
    }

    /// Intensities rescaled from the 300 K catalog values to `trot`,
    /// together with the indices of the transitions they belong to.
    ///
    /// At exactly 300 K the stored intensities are returned untouched (no
    /// interpolation, bit-exact). The frequency window defaults to the full
    /// range of the catalog.
    pub fn temperature_rescaled_intensities(
        &mut self,
        trot: f64,
        freq_min: Option<f64>,
        freq_max: Option<f64>,
    ) -> Result<(Vec<usize>, Vec<f64>)> {
        if !trot.is_finite() || trot <= 0.0 {
            return Err(CatalogError::Input(format!(
                "temperature must be a positive number, got {trot}"
            )));
        }
        let freq_min = match freq_min {
            Some(f) => f,
            None => self.freq_range()?.0,
        };
        let freq_max = match freq_max {
            Some(f) => f,
            None => self.freq_range()?.1,
        };

        let rescale = trot != 300.0;
        if rescale && self.partition.is_none() {
            self.generate_partition_function_table()?;
        }

        let indices = self.transitions.filter(
            &TransitionFilter::new()
                .freq_min(freq_min)
                .freq_max(freq_max),
        );
        let mut intensities = Vec::with_capacity(indices.len());
        if rescale {
            let table = self.partition.as_ref().ok_or_else(|| {
                CatalogError::PartitionFunction("table unavailable".to_string())
            })?;
            let q_ratio = table.eval(300.0) / table.eval(trot);
            for &i in &indices {
                let t = &self.transitions.transitions[i];
                let freq_mhz = match t.unit {
                    Unit::MHz => t.calc_freq,
                    Unit::Wvn => t.calc_freq * WVN2MHZ,
                };
                intensities.push(t.intensity * catescale(freq_mhz, trot, t.egy_low) * q_ratio);
            }
        } else {
            for &i in &indices {
                intensities.push(self.transitions.transitions[i].intensity);
            }
        }
        Ok((indices, intensities))
    }
}
