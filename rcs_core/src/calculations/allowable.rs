//! # Allowable-Stress Check
//!
//! Compares solver stresses against working-stress (TA) limits. Three
//! independent checks, all on magnitudes:
//!
//! - extreme concrete compression `|σc,min| ≤ σc,adm`
//! - steel `|σs| ≤ σs,adm`
//! - mean concrete stress `|N / A| ≤ σc,mean,adm`
//!
//! The section is verified only when all three hold.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::calculations::allowable::AllowableStresses;
//!
//! // Rck 250 concrete, FeB44k steel
//! let limits = AllowableStresses::from_rck(250.0, 2_600.0);
//! assert!((limits.sigma_c - 85.0).abs() < 1e-9);
//! assert!((limits.sigma_c_mean - 59.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::cracked_section::StressResult;
use crate::errors::{CalcError, CalcResult};

/// Ratio between the mean and the extreme allowable concrete stress
pub const MEAN_STRESS_RATIO: f64 = 0.7;

/// Allowable stresses (kgf/cm², positive magnitudes).
///
/// ## JSON Example
///
/// ```json
/// { "sigma_c": 85.0, "sigma_s": 2600.0, "sigma_c_mean": 59.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllowableStresses {
    /// Extreme concrete compression
    pub sigma_c: f64,

    /// Reinforcing steel, tension or compression
    pub sigma_s: f64,

    /// Mean concrete stress over the resisting section
    pub sigma_c_mean: f64,
}

impl AllowableStresses {
    pub fn new(sigma_c: f64, sigma_s: f64, sigma_c_mean: f64) -> Self {
        AllowableStresses {
            sigma_c,
            sigma_s,
            sigma_c_mean,
        }
    }

    /// Limits from the characteristic cube strength Rck (kgf/cm²).
    ///
    /// `σc = 60 + (Rck − 150) / 4`, mean limit `0.7·σc`.
    pub fn from_rck(rck: f64, sigma_s: f64) -> Self {
        let sigma_c = 60.0 + (rck - 150.0) / 4.0;
        AllowableStresses {
            sigma_c,
            sigma_s,
            sigma_c_mean: MEAN_STRESS_RATIO * sigma_c,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("allowable.sigma_c", self.sigma_c),
            ("allowable.sigma_s", self.sigma_s),
            ("allowable.sigma_c_mean", self.sigma_c_mean),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Allowable stress must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of the allowable-stress comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowableCheckResult {
    /// All three checks pass
    pub ok: bool,

    pub concrete_ok: bool,
    pub steel_ok: bool,
    pub mean_ok: bool,

    /// |σc,min| / σc,adm
    pub concrete_unity: f64,

    /// |σs| / σs,adm
    pub steel_unity: f64,

    /// |σc,mean| / σc,mean,adm
    pub mean_unity: f64,

    /// One line per failed check
    pub messages: Vec<String>,
}

impl AllowableCheckResult {
    /// Highest of the three unity ratios
    pub fn governing_unity(&self) -> f64 {
        self.concrete_unity.max(self.steel_unity).max(self.mean_unity)
    }

    /// Which check governs
    pub fn governing_condition(&self) -> &'static str {
        if self.concrete_unity >= self.steel_unity && self.concrete_unity >= self.mean_unity {
            "Concrete"
        } else if self.steel_unity >= self.mean_unity {
            "Steel"
        } else {
            "Mean concrete"
        }
    }

    /// Report wording used on calculation sheets
    pub fn verdict(&self) -> &'static str {
        if self.ok {
            "VERIFICATO"
        } else {
            "NON VERIFICATO"
        }
    }
}

fn unity(value: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        value.abs() / limit
    } else {
        f64::INFINITY
    }
}

/// Compare `stresses` against `limits`. Pure comparison, no side effects.
pub fn check_allowable_stresses(
    stresses: &StressResult,
    limits: &AllowableStresses,
) -> AllowableCheckResult {
    let concrete = stresses.sigma_c_min.abs();
    let steel = stresses.sigma_s_max.abs();
    let mean = stresses.sigma_c_mean.abs();

    let concrete_ok = concrete <= limits.sigma_c;
    let steel_ok = steel <= limits.sigma_s;
    let mean_ok = mean <= limits.sigma_c_mean;

    let mut messages = Vec::new();
    if !concrete_ok {
        messages.push(format!(
            "Concrete compression |σc| = {:.2} kgf/cm² exceeds allowable {:.2} kgf/cm²",
            concrete, limits.sigma_c
        ));
    }
    if !steel_ok {
        messages.push(format!(
            "Steel stress |σs| = {:.2} kgf/cm² exceeds allowable {:.2} kgf/cm²",
            steel, limits.sigma_s
        ));
    }
    if !mean_ok {
        messages.push(format!(
            "Mean concrete stress |σc,m| = {:.2} kgf/cm² exceeds allowable {:.2} kgf/cm²",
            mean, limits.sigma_c_mean
        ));
    }

    AllowableCheckResult {
        ok: concrete_ok && steel_ok && mean_ok,
        concrete_ok,
        steel_ok,
        mean_ok,
        concrete_unity: unity(concrete, limits.sigma_c),
        steel_unity: unity(steel, limits.sigma_s),
        mean_unity: unity(mean, limits.sigma_c_mean),
        messages,
    }
}
