//! # Section Loads
//!
//! Axial force and biaxial bending applied at the centroid of the equivalent
//! section.
//!
//! ## Conventions
//!
//! - `n` in kgf, compression negative
//! - `my`, `mz` in kgf·m; converted to kgf·cm before solving
//! - positive `my` lengthens fibres with `z > zG`
//! - positive `mz` shortens fibres with `y > yG`

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Moment conversion kgf·m → kgf·cm
pub const KGM_TO_KGCM: f64 = 100.0;

/// Internal actions on the section.
///
/// ## JSON Example
///
/// ```json
/// { "n": -20000.0, "my": 5000.0, "mz": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadState {
    /// Axial force (kgf, compression negative)
    pub n: f64,

    /// Bending moment about the y axis (kgf·m)
    #[serde(default)]
    pub my: f64,

    /// Bending moment about the z axis (kgf·m)
    #[serde(default)]
    pub mz: f64,
}

impl LoadState {
    pub fn new(n: f64, my: f64, mz: f64) -> Self {
        LoadState { n, my, mz }
    }

    /// Pure axial force
    pub fn axial(n: f64) -> Self {
        LoadState { n, my: 0.0, mz: 0.0 }
    }

    /// Pure bending about y
    pub fn bending_y(my: f64) -> Self {
        LoadState { n: 0.0, my, mz: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.n == 0.0 && self.my == 0.0 && self.mz == 0.0
    }

    /// Right-hand side `[N, My, −Mz]` of the stiffness system, moments in kgf·cm.
    pub fn load_vector(&self) -> [f64; 3] {
        [self.n, self.my * KGM_TO_KGCM, -self.mz * KGM_TO_KGCM]
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("n", self.n), ("my", self.my), ("mz", self.mz)] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load must be finite",
                ));
            }
        }
        Ok(())
    }
}
