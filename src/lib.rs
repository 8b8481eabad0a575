//! Spectral catalog engine: calpgm (SPFIT/SPCAT) file formats, catalog
//! queries, partition functions, and synthetic spectra.
//!
//! Architecture:
//! ```text
//!  .cat / .lin / .egy / CDMS
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fixed-width parse → Transition / State records
//!   └──────────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//!   ┌───────────────┐    ┌───────────────┐
//!   │ TransitionColl.│    │ StateCollection│  energies, degeneracies
//!   └───────────────┘    └───────────────┘
//!        │                      │
//!        ▼                      ▼
//!   ┌──────────────┐     ┌──────────────┐
//!   │ Predictions   │◄───│ partition fn  │  spline over fixed T grid
//!   └──────────────┘     └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ simulate      │  lineshape kernels → Spectrum (x, y)
//!   └──────────────┘
//! ```
pub mod error;
pub mod interp;
pub mod lineshape;
pub mod loader;
pub mod predictions;
pub mod qn;
pub mod spectrum;
pub mod state;
pub mod transition;

pub use error::{CatalogError, Result};
pub use interp::CubicSpline;
pub use lineshape::{Lineshape, MHZ2WVN, WVN2MHZ};
pub use loader::{load_egy, load_lin, load_predictions, load_predictions_pamc2v, load_xu_states, read_predictions};
#[cfg(feature = "fetch")]
pub use loader::load_predictions_from_cdms;
pub use predictions::{PartitionTable, Predictions, PARTITION_TEMPERATURES};
pub use qn::{decode_calpgm_int, encode_qn, QuantumNumbers};
pub use spectrum::Spectrum;
pub use state::{State, StateCollection, CM_K};
pub use transition::{
    Transition, TransitionCollection, TransitionFilter, TransitionFormat, Unit,
};
