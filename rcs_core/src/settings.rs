//! # Solver Settings
//!
//! Knobs of the cracked-section iteration. Every field has a default so a
//! JSON input may omit the whole block or any part of it.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default cap on exclusion iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Default convergence tolerance on the extreme compressive stress (kgf/cm²)
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Configuration of the cracked-section solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Keep tensile concrete in the resisting section (no cracking)
    pub allow_tension: bool,

    /// Maximum number of exclusion iterations
    pub max_iterations: usize,

    /// Stop when the extreme compressive stress changes by less than this
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            allow_tension: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverSettings {
    /// Uncracked analysis: concrete resists tension
    pub fn uncracked() -> Self {
        SolverSettings {
            allow_tension: true,
            ..SolverSettings::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "settings.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if !(self.tolerance > 0.0) {
            return Err(CalcError::invalid_input(
                "settings.tolerance",
                self.tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        Ok(())
    }
}
