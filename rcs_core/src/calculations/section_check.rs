//! # Section Verification
//!
//! Full pipeline for one section under one load state:
//! geometry → properties → cracked-section stresses → allowable check.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::calculations::section_check::{calculate, SectionCheckInput};
//!
//! let input = SectionCheckInput::example();
//! let result = calculate(&input).unwrap();
//!
//! println!("σc = {:.1} kgf/cm²", result.stresses.sigma_c_min);
//! println!("σs = {:.1} kgf/cm²", result.stresses.sigma_s_max);
//! println!("{}", result.check.verdict());
//! ```

use serde::{Deserialize, Serialize};

use super::allowable::{check_allowable_stresses, AllowableCheckResult, AllowableStresses};
use super::cracked_section::{compute_normal_stresses, StressResult};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Bar, Ring, SectionGeometry};
use crate::loads::LoadState;
use crate::materials::{ConcreteLaw, SteelLaw};
use crate::properties::{compute_section_properties, SectionProperties, AREA_EPSILON};
use crate::settings::SolverSettings;

/// Everything needed to verify one section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Beam 101 midspan",
///   "geometry": {
///     "polygons": [[{"y": 0, "z": 0}, {"y": 30, "z": 0}, {"y": 30, "z": 50}, {"y": 0, "z": 50}]],
///     "bars": [{"y": 4, "z": 4, "diameter": 2.0}, {"y": 26, "z": 4, "diameter": 2.0}],
///     "n_homog": 15.0
///   },
///   "loads": { "n": 0.0, "my": -8000.0, "mz": 0.0 },
///   "concrete": { "fcd": 110.0, "ec": 285000.0 },
///   "steel": { "es": 2060000.0, "fyd": 3826.0, "eps_yd": 0.001857 },
///   "allowable": { "sigma_c": 85.0, "sigma_s": 2600.0, "sigma_c_mean": 59.5 },
///   "settings": { "max_iterations": 50 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCheckInput {
    /// User label for this check (e.g. "Beam 101 midspan")
    pub label: String,

    pub geometry: SectionGeometry,

    pub loads: LoadState,

    pub concrete: ConcreteLaw,

    pub steel: SteelLaw,

    pub allowable: AllowableStresses,

    #[serde(default)]
    pub settings: SolverSettings,
}

impl SectionCheckInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        self.loads.validate()?;
        self.concrete.validate()?;
        self.steel.validate()?;
        self.allowable.validate()?;
        self.settings.validate()?;
        if self.concrete.allow_tension != self.settings.allow_tension {
            return Err(CalcError::invalid_input(
                "concrete.allow_tension",
                self.concrete.allow_tension.to_string(),
                format!("Must match settings.allow_tension ({})", self.settings.allow_tension),
            ));
        }
        Ok(())
    }

    /// 30x50 beam with 2Ø20 at each face under a sagging moment, Rck 250.
    pub fn example() -> Self {
        let outline = Ring::rectangle(0.0, 0.0, 30.0, 50.0).subdivided(10);
        SectionCheckInput {
            label: "Beam 30x50".to_string(),
            geometry: SectionGeometry::new(vec![outline], Vec::new(), 15.0)
                .with_bar(Bar::new(4.0, 4.0, 2.0))
                .with_bar(Bar::new(26.0, 4.0, 2.0))
                .with_bar(Bar::new(4.0, 46.0, 2.0))
                .with_bar(Bar::new(26.0, 46.0, 2.0)),
            loads: LoadState::new(0.0, -8_000.0, 0.0),
            concrete: ConcreteLaw::from_rck(250.0),
            steel: SteelLaw::from_fyk(4_400.0),
            allowable: AllowableStresses::from_rck(250.0, 2_600.0),
            settings: SolverSettings::default(),
        }
    }
}

/// Results of a section verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCheckResult {
    pub label: String,
    pub properties: SectionProperties,
    pub stresses: StressResult,
    pub check: AllowableCheckResult,
}

impl SectionCheckResult {
    /// Check if the section passes all allowable-stress checks
    pub fn passes(&self) -> bool {
        self.check.ok
    }
}

/// Verify a section.
///
/// # Returns
///
/// * `Ok(SectionCheckResult)` - stresses and check outcome (a failing check is
///   still `Ok`)
/// * `Err(CalcError)` - invalid input, degenerate geometry or a singular
///   full-section system
pub fn calculate(input: &SectionCheckInput) -> CalcResult<SectionCheckResult> {
    input.validate()?;

    let properties = compute_section_properties(&input.geometry);
    if !(properties.area_equivalent > AREA_EPSILON) {
        return Err(CalcError::degenerate_section(properties.area_equivalent));
    }

    let stresses = compute_normal_stresses(
        &input.geometry,
        &properties,
        &input.loads,
        &input.concrete,
        &input.steel,
        &input.settings,
    )?;
    let check = check_allowable_stresses(&stresses, &input.allowable);

    Ok(SectionCheckResult {
        label: input.label.clone(),
        properties,
        stresses,
        check,
    })
}
