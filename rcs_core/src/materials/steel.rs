//! Reinforcing steel, symmetric in tension and compression.
//!
//! Elastic up to `eps_yd`, then either a flat plateau at `fyd` or a linear
//! hardening branch with slope `k_hardening·Es`. Rupture at `eps_ud` is not
//! checked.

use serde::{Deserialize, Serialize};

use super::MaterialLaw;
use crate::errors::{CalcError, CalcResult};

/// Default ultimate strain for reinforcing bars
pub const DEFAULT_EPS_UD: f64 = 0.01;

/// Partial safety factor applied by [`SteelLaw::from_fyk`]
pub const GAMMA_S: f64 = 1.15;

/// Allowed relative mismatch between `eps_yd·Es` and `fyd`
pub const YIELD_CONSISTENCY: f64 = 1e-3;

/// Post-yield behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SteelHardening {
    /// Stress held at fyd after yielding
    #[default]
    PerfectlyPlastic,
    /// Stress keeps growing with slope k·Es
    LinearHardening,
}

/// Reinforcing-steel constitutive parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLaw {
    /// Elastic modulus (kgf/cm²)
    pub es: f64,

    /// Design yield stress (kgf/cm²)
    pub fyd: f64,

    /// Yield strain, fyd / Es
    pub eps_yd: f64,

    /// Ultimate strain
    #[serde(default = "default_eps_ud")]
    pub eps_ud: f64,

    #[serde(default)]
    pub hardening: SteelHardening,

    /// Hardening slope as a fraction of Es
    #[serde(default)]
    pub k_hardening: f64,
}

fn default_eps_ud() -> f64 {
    DEFAULT_EPS_UD
}

impl SteelLaw {
    pub fn new(es: f64, fyd: f64) -> Self {
        SteelLaw {
            es,
            fyd,
            eps_yd: fyd / es,
            eps_ud: DEFAULT_EPS_UD,
            hardening: SteelHardening::PerfectlyPlastic,
            k_hardening: 0.0,
        }
    }

    /// Steel from its characteristic yield stress, `fyd = fyk / 1.15`,
    /// `Es = 2 060 000 kgf/cm²`.
    pub fn from_fyk(fyk: f64) -> Self {
        SteelLaw::new(2_060_000.0, fyk / GAMMA_S)
    }

    /// Switch to the bilinear law with slope `k·Es` past yield.
    pub fn with_hardening(mut self, k_hardening: f64) -> Self {
        self.hardening = SteelHardening::LinearHardening;
        self.k_hardening = k_hardening;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.es > 0.0) {
            return Err(CalcError::invalid_input(
                "steel.es",
                self.es.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if !(self.fyd > 0.0) {
            return Err(CalcError::invalid_input(
                "steel.fyd",
                self.fyd.to_string(),
                "Yield stress must be positive",
            ));
        }
        if !(self.eps_yd > 0.0) {
            return Err(CalcError::invalid_input(
                "steel.eps_yd",
                self.eps_yd.to_string(),
                "Yield strain must be positive",
            ));
        }
        if (self.eps_yd * self.es - self.fyd).abs() > YIELD_CONSISTENCY * self.fyd {
            return Err(CalcError::invalid_input(
                "steel.eps_yd",
                self.eps_yd.to_string(),
                format!("Yield strain must equal fyd / Es = {:.6}", self.fyd / self.es),
            ));
        }
        if self.k_hardening < 0.0 {
            return Err(CalcError::invalid_input(
                "steel.k_hardening",
                self.k_hardening.to_string(),
                "Hardening coefficient cannot be negative",
            ));
        }
        Ok(())
    }
}

impl MaterialLaw for SteelLaw {
    fn stress_at(&self, strain: f64) -> f64 {
        let magnitude = strain.abs();
        let sign = if strain < 0.0 { -1.0 } else { 1.0 };

        if magnitude < self.eps_yd {
            return sign * self.es * magnitude;
        }

        match self.hardening {
            SteelHardening::PerfectlyPlastic => sign * self.fyd,
            SteelHardening::LinearHardening => {
                sign * (self.fyd + self.k_hardening * self.es * (magnitude - self.eps_yd))
            }
        }
    }

    fn describe(&self) -> String {
        format!("Steel fyd={:.0} Es={:.0}", self.fyd, self.es)
    }
}
