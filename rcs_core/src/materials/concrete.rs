//! Concrete in compression.
//!
//! Three curve shapes share the same envelope: zero stress at zero strain,
//! `−fcd` at and beyond `eps_cu`, and never more than `fcd` in magnitude.
//!
//! ```text
//!  σ
//!  ▲
//!  │        tension (optional, Ec·ε)
//!  ┼──────────────────────────▶ -ε
//!  │ ╲
//!  │   ╲__
//!  │      ‾‾──___________  -fcd
//!  0     eps_c2       eps_cu
//! ```

use serde::{Deserialize, Serialize};

use super::MaterialLaw;
use crate::errors::{CalcError, CalcResult};

/// Default strain at the end of the parabolic branch
pub const DEFAULT_EPS_C2: f64 = 0.002;

/// Default ultimate compressive strain
pub const DEFAULT_EPS_CU: f64 = 0.0035;

/// Shape of the compressive branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcreteCurve {
    /// Single parabola over `0..eps_cu`: `−fcd·(1 − (1 − x)²)`, `x = |ε|/eps_cu`
    #[default]
    Parabolic,
    /// Parabola over `0..eps_c2`, then a plateau at `−fcd` up to `eps_cu`
    ParabolaRectangle,
    /// Elastic `Ec·ε`, capped at `−fcd`
    Linear,
}

impl ConcreteCurve {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteCurve::Parabolic => "Parabolic",
            ConcreteCurve::ParabolaRectangle => "Parabola-rectangle",
            ConcreteCurve::Linear => "Linear elastic",
        }
    }
}

/// Concrete constitutive parameters.
///
/// ## JSON Example
///
/// ```json
/// { "fcd": 110.0, "ec": 300000.0, "eps_c2": 0.002, "eps_cu": 0.0035,
///   "allow_tension": false, "curve": "Parabolic" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLaw {
    /// Design compressive strength (kgf/cm², positive)
    pub fcd: f64,

    /// Elastic modulus (kgf/cm²)
    pub ec: f64,

    /// End of the parabolic branch (positive magnitude)
    #[serde(default = "default_eps_c2")]
    pub eps_c2: f64,

    /// Ultimate compressive strain (positive magnitude)
    #[serde(default = "default_eps_cu")]
    pub eps_cu: f64,

    /// Whether tensile strain produces tensile stress
    #[serde(default)]
    pub allow_tension: bool,

    #[serde(default)]
    pub curve: ConcreteCurve,
}

fn default_eps_c2() -> f64 {
    DEFAULT_EPS_C2
}

fn default_eps_cu() -> f64 {
    DEFAULT_EPS_CU
}

impl ConcreteLaw {
    pub fn new(fcd: f64, ec: f64) -> Self {
        ConcreteLaw {
            fcd,
            ec,
            eps_c2: DEFAULT_EPS_C2,
            eps_cu: DEFAULT_EPS_CU,
            allow_tension: false,
            curve: ConcreteCurve::Parabolic,
        }
    }

    /// Concrete defined by its characteristic cube strength Rck (kgf/cm²).
    ///
    /// `Ec = 5700·√Rck`, `fck = 0.83·Rck`, `fcd = 0.85·fck / 1.6`.
    pub fn from_rck(rck: f64) -> Self {
        let fck = 0.83 * rck;
        ConcreteLaw::new(0.85 * fck / 1.6, 5700.0 * rck.sqrt())
    }

    pub fn with_curve(mut self, curve: ConcreteCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_tension(mut self, allow_tension: bool) -> Self {
        self.allow_tension = allow_tension;
        self
    }

    pub fn with_strains(mut self, eps_c2: f64, eps_cu: f64) -> Self {
        self.eps_c2 = eps_c2;
        self.eps_cu = eps_cu;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fcd > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete.fcd",
                self.fcd.to_string(),
                "Strength must be positive",
            ));
        }
        if !(self.ec > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete.ec",
                self.ec.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if !(self.eps_cu > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete.eps_cu",
                self.eps_cu.to_string(),
                "Ultimate strain must be positive",
            ));
        }
        if !(self.eps_c2 > 0.0) || self.eps_c2 > self.eps_cu {
            return Err(CalcError::invalid_input(
                "concrete.eps_c2",
                self.eps_c2.to_string(),
                "eps_c2 must lie in (0, eps_cu]",
            ));
        }
        Ok(())
    }
}

impl MaterialLaw for ConcreteLaw {
    fn stress_at(&self, strain: f64) -> f64 {
        if strain >= 0.0 {
            return if self.allow_tension { self.ec * strain } else { 0.0 };
        }

        let magnitude = -strain;
        if magnitude >= self.eps_cu {
            return -self.fcd;
        }

        match self.curve {
            ConcreteCurve::Parabolic => {
                let x = (magnitude / self.eps_cu).min(1.0);
                -self.fcd * (1.0 - (1.0 - x).powi(2))
            }
            ConcreteCurve::ParabolaRectangle => {
                if magnitude >= self.eps_c2 {
                    -self.fcd
                } else {
                    let x = magnitude / self.eps_c2;
                    -self.fcd * (1.0 - (1.0 - x).powi(2))
                }
            }
            ConcreteCurve::Linear => (self.ec * strain).max(-self.fcd),
        }
    }

    fn describe(&self) -> String {
        format!(
            "Concrete fcd={:.1} Ec={:.0} ({})",
            self.fcd,
            self.ec,
            self.curve.display_name()
        )
    }
}
