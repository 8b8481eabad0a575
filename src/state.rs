use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::qn::QuantumNumbers;

/// hc/kB in cm * K: converts cm^-1 energies into Boltzmann exponents.
pub const CM_K: f64 = 1.43878;

// ---------------------------------------------------------------------------
// State – one energy level
// ---------------------------------------------------------------------------

/// An energy-level record. Block, index, accuracy, and mixing coefficient
/// are egy-file metadata kept only for display formatting.
#[derive(Debug, Clone)]
pub struct State {
    pub qn: QuantumNumbers,
    /// Level energy in cm^-1.
    pub energy: f64,
    pub degeneracy: Option<i32>,
    pub block: Option<i32>,
    pub index: Option<i32>,
    pub accuracy: Option<f64>,
    pub mixing: Option<f64>,
}

impl State {
    pub fn new(qn: QuantumNumbers, energy: f64, degeneracy: Option<i32>) -> Self {
        State {
            qn,
            energy,
            degeneracy,
            block: None,
            index: None,
            accuracy: None,
            mixing: None,
        }
    }

    /// Egy-file line (no trailing newline); absent metadata fields render as
    /// blanks of the same width.
    pub fn egy_str(&self) -> String {
        let blk = match self.block {
            Some(b) => format!("{b:6}"),
            None => " ".repeat(6),
        };
        let idx = match self.index {
            Some(i) => format!("{i:5}"),
            None => " ".repeat(5),
        };
        let acc = match self.accuracy {
            Some(a) => format!("{a:18.6}"),
            None => " ".repeat(18),
        };
        let mix = match self.mixing {
            Some(m) => format!("{m:11.6}"),
            None => " ".repeat(11),
        };
        let deg = match self.degeneracy {
            Some(d) => format!("{d:5}"),
            None => " ".repeat(5),
        };
        format!(
            "{blk}{idx}{:18.6}{acc}{mix}{deg}:{}",
            self.energy,
            self.qn.egy_str()
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.egy_str())
    }
}

// ---------------------------------------------------------------------------
// StateCollection
// ---------------------------------------------------------------------------

/// An ordered list of energy levels plus a derived key -> position index.
/// The index is rebuilt lazily whenever it has fewer entries than the state
/// list, so plain `add_state` calls never pay for it.
#[derive(Debug, Clone, Default)]
pub struct StateCollection {
    pub states: Vec<State>,
    /// Zero-point energy, when a loader could determine it.
    pub zero_point_energy: Option<f64>,
    qn_index: HashMap<String, usize>,
}

/// Lookup key: quantum-number values joined by underscores.
fn qn_key(qn: &QuantumNumbers) -> String {
    qn.values()
        .map(|v| match v {
            Some(v) => v.to_string(),
            None => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join("_")
}

impl StateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, state: State) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    /// Indices of states whose quantum numbers match the wildcard pattern.
    pub fn filter(&self, pattern: &QuantumNumbers) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.qn.matches(pattern))
            .map(|(i, _)| i)
            .collect()
    }

    /// Position of the state with exactly these quantum numbers, rebuilding
    /// the lookup index first if states were added since the last build.
    pub fn index_of(&mut self, qn: &QuantumNumbers) -> Option<usize> {
        if self.qn_index.len() < self.states.len() {
            self.qn_index = self
                .states
                .iter()
                .enumerate()
                .map(|(i, s)| (qn_key(&s.qn), i))
                .collect();
        }
        self.qn_index.get(&qn_key(qn)).copied()
    }

    /// Partition function Q(T) = sum g_i * exp(-hc E_i / kB T). Fails when
    /// any state lacks a degeneracy.
    pub fn partition_function(&self, temperature: f64) -> Result<f64> {
        let mut q = 0.0;
        for s in &self.states {
            let g = s.degeneracy.ok_or_else(|| {
                CatalogError::PartitionFunction(format!("state {} has no degeneracy", s.qn))
            })?;
            q += g as f64 * (-CM_K * s.energy / temperature).exp();
        }
        Ok(q)
    }

    /// Write one egy-format line per state.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        for s in &self.states {
            writeln!(w, "{}", s.egy_str())?;
        }
        w.flush()?;
        Ok(())
    }
}
