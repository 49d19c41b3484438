//! # Section Calculations
//!
//! Stress analysis and verification of reinforced-concrete sections. The
//! top-level calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`cracked_section`] - Normal stresses with tensile concrete removed
//! - [`allowable`] - Comparison against working-stress limits
//! - [`section_check`] - Both of the above for one section and load state

pub mod allowable;
pub mod cracked_section;
pub mod section_check;

// Re-export commonly used types
pub use allowable::{check_allowable_stresses, AllowableCheckResult, AllowableStresses};
pub use cracked_section::{compute_normal_stresses, StrainPlane, StressResult};
pub use section_check::{SectionCheckInput, SectionCheckResult};
