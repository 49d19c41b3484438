//! # rcs_core - Cracked Reinforced-Concrete Section Engine
//!
//! `rcs_core` computes normal stresses in reinforced-concrete cross-sections
//! under axial force and biaxial bending, removes cracked concrete from the
//! resisting section, and checks the result against allowable stresses
//! (working-stress / "tensioni ammissibili" method). All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Units
//!
//! Lengths in cm, forces in kgf, moments in kgf·m (converted to kgf·cm
//! internally), stresses and moduli in kgf/cm². Compression is negative.
//!
//! ## Quick Start
//!
//! ```rust
//! use rcs_core::calculations::section_check::{calculate, SectionCheckInput};
//!
//! let result = calculate(&SectionCheckInput::example()).unwrap();
//! println!("{}: {}", result.label, result.check.verdict());
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Concrete rings, bars, homogenization ratio
//! - [`properties`] - Area integrals and homogenized section properties
//! - [`materials`] - Concrete and steel stress-strain laws
//! - [`loads`] - Axial force and bending moments
//! - [`settings`] - Solver configuration
//! - [`calculations`] - Cracked-section solver and allowable-stress check
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON input loading and atomic result saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod properties;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{AllowableStresses, SectionCheckInput, SectionCheckResult, StressResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_inputs, save_results};
pub use geometry::{Bar, Ring, SectionGeometry, Vertex};
pub use loads::LoadState;
pub use materials::{ConcreteLaw, MaterialLaw, SteelLaw};
pub use properties::{compute_section_properties, SectionProperties};
pub use settings::SolverSettings;
