//! Line-profile kernels and Boltzmann intensity helpers.

// ---------------------------------------------------------------------------
// Unit / physics constants
// ---------------------------------------------------------------------------

/// Wavenumber (cm^-1) to MHz.
pub const WVN2MHZ: f64 = 29979.2458;

/// MHz to wavenumber (cm^-1).
pub const MHZ2WVN: f64 = 1.0 / WVN2MHZ;

/// FWHM-to-Gaussian-width factor: 1 / (2 sqrt(ln 2)).
const FWHM_FACTOR: f64 = 0.600561204393225;

// ---------------------------------------------------------------------------
// Lineshape kernels
// ---------------------------------------------------------------------------

/// Gaussian profile with peak `intensity` at `f` and the given FWHM.
pub fn gaussian(x: f64, f: f64, intensity: f64, fwhm: f64) -> f64 {
    let w = fwhm * FWHM_FACTOR;
    intensity * (-(f - x).powi(2) / (w * w)).exp()
}

/// Second-derivative-like Gaussian used for 2f-demodulated spectra. The
/// normalization is kept exactly as the lab tooling defines it.
pub fn gaussian2f(x: f64, f: f64, intensity: f64, fwhm: f64) -> f64 {
    let w = fwhm * FWHM_FACTOR;
    gaussian(x, f, intensity, fwhm) * (w * w - (f - x).powi(2)) / w.powi(4)
}

/// Lorentzian profile with peak `intensity` at `f` and the given FWHM.
pub fn lorentzian(x: f64, f: f64, intensity: f64, fwhm: f64) -> f64 {
    let hw = fwhm / 2.0;
    intensity * hw * hw / (hw * hw + (f - x).powi(2))
}

/// The closed set of line profiles understood by the spectrum simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lineshape {
    #[default]
    Gaussian,
    /// Second-derivative Gaussian (2f-demodulation plotting mode).
    Gaussian2f,
    Lorentzian,
}

impl Lineshape {
    /// Evaluate the profile at `x` for a line centred at `f`.
    pub fn eval(self, x: f64, f: f64, intensity: f64, fwhm: f64) -> f64 {
        match self {
            Lineshape::Gaussian => gaussian(x, f, intensity, fwhm),
            Lineshape::Gaussian2f => gaussian2f(x, f, intensity, fwhm),
            Lineshape::Lorentzian => lorentzian(x, f, intensity, fwhm),
        }
    }
}

// ---------------------------------------------------------------------------
// Boltzmann population helpers
// ---------------------------------------------------------------------------

/// Boltzmann factor exp(-E / kT) with E in cm^-1 and T in K
/// (0.695 cm^-1 per K).
pub fn catexp(energy: f64, temperature: f64) -> f64 {
    (-energy / 0.695 / temperature).exp()
}

/// Population-difference ratio between `temperature` and 300 K for a line at
/// `freq` MHz out of a lower state at `energy` cm^-1. Multiplied onto the
/// 300 K catalog intensity when simulating other temperatures.
pub fn catescale(freq: f64, temperature: f64, energy: f64) -> f64 {
    (catexp(energy, temperature) - catexp(energy + freq * MHZ2WVN, temperature))
        / (catexp(energy, 300.0) - catexp(energy + freq * MHZ2WVN, 300.0))
}
