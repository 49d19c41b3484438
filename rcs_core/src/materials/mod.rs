//! # Material Laws
//!
//! Uniaxial stress-strain laws for concrete and reinforcing steel.
//!
//! Sign convention: tension positive, compression negative, for both strain
//! and stress. Units: kgf/cm² for stresses and moduli.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::materials::{ConcreteLaw, MaterialLaw, SteelLaw};
//!
//! let concrete = ConcreteLaw::new(110.0, 300_000.0);
//! let steel = SteelLaw::new(2_000_000.0, 3_800.0);
//!
//! // Concrete carries no tension by default
//! assert_eq!(concrete.stress_at(0.001), 0.0);
//! // Beyond the ultimate strain the stress saturates at -fcd
//! assert_eq!(concrete.stress_at(-0.005), -110.0);
//! // Elastic steel
//! assert!((steel.stress_at(0.001) - 2_000.0).abs() < 1e-9);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{ConcreteCurve, ConcreteLaw};
pub use steel::{SteelHardening, SteelLaw};

/// A uniaxial constitutive law.
pub trait MaterialLaw {
    /// Stress (kgf/cm²) produced by `strain`.
    fn stress_at(&self, strain: f64) -> f64;

    /// Short label used in reports
    fn describe(&self) -> String;
}

/// Concrete stress for `strain` under `law`.
pub fn concrete_stress(strain: f64, law: &ConcreteLaw) -> f64 {
    law.stress_at(strain)
}

/// Steel stress for `strain` under `law`.
pub fn steel_stress(strain: f64, law: &SteelLaw) -> f64 {
    law.stress_at(strain)
}
