//! # Cracked-Section Stress Solver
//!
//! Normal stresses in a reinforced-concrete section under axial force and
//! biaxial bending, with concrete in tension removed from the resisting
//! section ("parzializzazione").
//!
//! ## Method
//!
//! 1. The section is broken into sample points: every ring vertex owns half
//!    of each fan triangle `(ring centroid, V_i−1, V_i)` and
//!    `(ring centroid, V_i, V_i+1)`, every bar owns its homogenized area
//!    `n·A_s`.
//! 2. The resisting sums `A, Sy, Sz, Iy, Iz, Iyz` (about the centroid of the
//!    full equivalent section) form the generalized stiffness matrix
//!
//!    ```text
//!         | A    Sy   Sz  |
//!    MM = | Sy   Iy   Iyz |      MM · ε = [N, My, −Mz]
//!         | Sz   Iyz  Iz  |
//!    ```
//!
//! 3. `ε / Ec` gives the strain plane `e0 + ky·(z − zG) + kz·(y − yG)`.
//! 4. Vertices with tensile strain are excluded, their triangles are
//!    subtracted from the sums and the system is solved again until the
//!    extreme compressive stress settles.
//!
//! The reference point `(yG, zG)` stays the full-section centroid for the
//! whole iteration.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::calculations::cracked_section::compute_normal_stresses;
//! use rcs_core::geometry::{Bar, SectionGeometry};
//! use rcs_core::loads::LoadState;
//! use rcs_core::materials::{ConcreteLaw, SteelLaw};
//! use rcs_core::properties::compute_section_properties;
//! use rcs_core::settings::SolverSettings;
//!
//! let section = SectionGeometry::rectangular(30.0, 50.0, 15.0)
//!     .with_bar(Bar::new(4.0, 4.0, 2.0))
//!     .with_bar(Bar::new(26.0, 4.0, 2.0));
//! let props = compute_section_properties(&section);
//!
//! let result = compute_normal_stresses(
//!     &section,
//!     &props,
//!     &LoadState::axial(-30_000.0),
//!     &ConcreteLaw::new(110.0, 300_000.0),
//!     &SteelLaw::new(2_060_000.0, 3_800.0),
//!     &SolverSettings::default(),
//! )
//! .unwrap();
//!
//! // Pure compression never cracks the section
//! assert_eq!(result.iterations, 0);
//! assert!((result.sigma_c_mean - (-30_000.0 / props.area_equivalent)).abs() < 1e-9);
//! ```

use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{SectionGeometry, Vertex};
use crate::loads::LoadState;
use crate::materials::{concrete_stress, steel_stress, ConcreteLaw, SteelLaw};
use crate::properties::{AreaIntegrals, SectionProperties, AREA_EPSILON};
use crate::settings::SolverSettings;

/// Determinants below this magnitude mark the stiffness system as singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Area and moments still resisting, about the full-section centroid.
pub type ResistingSums = AreaIntegrals;

/// Whether a sample belongs to the concrete outline or to a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleKind {
    Vertex,
    Bar,
}

/// A point where strain and stress are evaluated, with the share of the
/// section it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub y: f64,
    pub z: f64,
    pub kind: SampleKind,
    /// Contribution to the resisting sums, about the reference point
    pub contribution: ResistingSums,
}

/// Linear strain field over the section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrainPlane {
    /// Strain at the reference point
    pub e0: f64,
    /// Curvature multiplying `z − z_ref`
    pub ky: f64,
    /// Curvature multiplying `y − y_ref`
    pub kz: f64,
    pub y_ref: f64,
    pub z_ref: f64,
}

impl StrainPlane {
    pub fn strain_at(&self, y: f64, z: f64) -> f64 {
        self.e0 + self.ky * (z - self.z_ref) + self.kz * (y - self.y_ref)
    }
}

/// Stresses produced by one load state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Extreme compressive concrete stress, minimum over vertices (kgf/cm²)
    pub sigma_c_min: f64,

    /// Largest concrete stress over vertices; not positive once cracked (kgf/cm²)
    pub sigma_c_max: f64,

    /// N / resisting area (kgf/cm²)
    pub sigma_c_mean: f64,

    /// Bar stress with the largest magnitude, signed (kgf/cm²)
    pub sigma_s_max: f64,

    /// Concrete stress at every ring vertex, rings in order
    pub vertex_stresses: Vec<f64>,

    /// Steel stress at every bar
    pub bar_stresses: Vec<f64>,

    /// Final strain field
    pub strain_plane: StrainPlane,

    /// Equivalent area still resisting at exit (cm²)
    pub resisting_area: f64,

    /// Vertex indices excluded as cracked
    pub excluded_vertices: Vec<usize>,

    /// Exclusion iterations performed
    pub iterations: usize,

    /// False when the iteration cap was hit or a singular re-solve stopped it
    pub converged: bool,

    /// `sigma_c_min` after the initial solve and after every exclusion
    pub history: Vec<f64>,
}

impl StressResult {
    /// Whether any concrete was removed from the resisting section.
    pub fn is_cracked(&self) -> bool {
        !self.excluded_vertices.is_empty()
    }
}

/// Split the section into sample points about `(y_ref, z_ref)`.
///
/// Each ring is fan-triangulated about its own centroid and every vertex
/// owns half of the two triangles on either side of it, so mirror-image
/// vertices always carry mirror-image shares. Vertices come first, ring by
/// ring, then bars in input order.
pub fn build_samples(geometry: &SectionGeometry, y_ref: f64, z_ref: f64) -> Vec<SamplePoint> {
    let local = |v: Vertex| Vertex::new(v.y - y_ref, v.z - z_ref);
    let mut samples = Vec::with_capacity(geometry.vertex_count() + geometry.bars.len());

    for ring in &geometry.polygons {
        let integrals = AreaIntegrals::ring(ring);
        let usable = ring.len() >= 3;
        let pivot = integrals.centroid().map(|(y, z)| Vertex::new(y, z)).unwrap_or_else(|| {
            let n = ring.len().max(1) as f64;
            let sy: f64 = ring.vertices().iter().map(|v| v.y).sum();
            let sz: f64 = ring.vertices().iter().map(|v| v.z).sum();
            Vertex::new(sy / n, sz / n)
        });

        // wedges[i] spans (pivot, V_i, V_i+1)
        let wedges: Vec<ResistingSums> = ring
            .edges()
            .map(|(p, q)| {
                if usable {
                    AreaIntegrals::triangle(local(pivot), local(p), local(q))
                } else {
                    ResistingSums::default()
                }
            })
            .collect();

        let count = wedges.len();
        for (i, vertex) in ring.vertices().iter().enumerate() {
            let previous = wedges[(i + count - 1) % count];
            samples.push(SamplePoint {
                y: vertex.y,
                z: vertex.z,
                kind: SampleKind::Vertex,
                contribution: (previous + wedges[i]) * 0.5,
            });
        }
    }

    for bar in &geometry.bars {
        samples.push(SamplePoint {
            y: bar.y,
            z: bar.z,
            kind: SampleKind::Bar,
            contribution: AreaIntegrals::point(
                bar.y - y_ref,
                bar.z - z_ref,
                geometry.n_homog * bar.area(),
            ),
        });
    }

    samples
}

/// Remove the contributions of `indices` from `sums`.
pub fn exclude_tensile_points(
    sums: &ResistingSums,
    samples: &[SamplePoint],
    indices: &[usize],
) -> ResistingSums {
    indices
        .iter()
        .filter_map(|&i| samples.get(i))
        .fold(*sums, |acc, sample| acc - sample.contribution)
}

/// Solve `MM · x = rhs` for the generalized strain vector.
pub fn solve_stiffness_system(sums: &ResistingSums, rhs: [f64; 3]) -> CalcResult<[f64; 3]> {
    #[rustfmt::skip]
    let mm = Matrix3::new(
        sums.area, sums.sy, sums.sz,
        sums.sy, sums.iy, sums.iyz,
        sums.sz, sums.iyz, sums.iz,
    );
    let determinant = mm.determinant();
    if !determinant.is_finite() || determinant.abs() < SINGULAR_DETERMINANT {
        return Err(CalcError::singular_system(determinant));
    }
    let inverse = mm.try_inverse().ok_or_else(|| CalcError::singular_system(determinant))?;
    let x = inverse * Vector3::from(rhs);
    Ok([x[0], x[1], x[2]])
}

/// Strains and stresses for one set of resisting sums.
#[derive(Debug, Clone)]
struct Evaluation {
    sums: ResistingSums,
    plane: StrainPlane,
    strains: Vec<f64>,
    vertex_stresses: Vec<f64>,
    bar_stresses: Vec<f64>,
}

impl Evaluation {
    fn sigma_c_min(&self) -> f64 {
        self.vertex_stresses.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    fn sigma_c_max(&self) -> f64 {
        self.vertex_stresses.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    fn sigma_s_max(&self) -> f64 {
        self.bar_stresses
            .iter()
            .copied()
            .reduce(|a, b| if b.abs() > a.abs() { b } else { a })
            .unwrap_or(0.0)
    }
}

struct Problem<'a> {
    samples: &'a [SamplePoint],
    rhs: [f64; 3],
    concrete: ConcreteLaw,
    steel: &'a SteelLaw,
    y_ref: f64,
    z_ref: f64,
}

impl Problem<'_> {
    fn evaluate(&self, sums: ResistingSums) -> CalcResult<Evaluation> {
        let [x0, x1, x2] = solve_stiffness_system(&sums, self.rhs)?;
        let ec = self.concrete.ec;
        let plane = StrainPlane {
            e0: x0 / ec,
            ky: x1 / ec,
            kz: x2 / ec,
            y_ref: self.y_ref,
            z_ref: self.z_ref,
        };

        let strains: Vec<f64> = self.samples.iter().map(|s| plane.strain_at(s.y, s.z)).collect();
        let mut vertex_stresses = Vec::new();
        let mut bar_stresses = Vec::new();
        for (sample, &strain) in self.samples.iter().zip(&strains) {
            match sample.kind {
                SampleKind::Vertex => vertex_stresses.push(concrete_stress(strain, &self.concrete)),
                SampleKind::Bar => bar_stresses.push(steel_stress(strain, self.steel)),
            }
        }

        Ok(Evaluation {
            sums,
            plane,
            strains,
            vertex_stresses,
            bar_stresses,
        })
    }

    /// Vertex samples in tension that are not excluded yet.
    fn newly_tensile(&self, evaluation: &Evaluation, excluded: &[bool]) -> Vec<usize> {
        self.samples
            .iter()
            .zip(&evaluation.strains)
            .enumerate()
            .filter(|(i, (sample, strain))| {
                sample.kind == SampleKind::Vertex && **strain > 0.0 && !excluded[*i]
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// Normal stresses in the cracked section.
///
/// # Errors
///
/// * [`CalcError::DegenerateSection`] when the equivalent area is not positive
/// * [`CalcError::SingularSystem`] when the full-section system cannot be solved
///
/// A singular system met while excluding cracked concrete is not an error:
/// the last valid result is returned with `converged = false`. The same
/// holds when `max_iterations` runs out.
pub fn compute_normal_stresses(
    geometry: &SectionGeometry,
    properties: &SectionProperties,
    loads: &LoadState,
    concrete: &ConcreteLaw,
    steel: &SteelLaw,
    settings: &SolverSettings,
) -> CalcResult<StressResult> {
    if !(properties.area_equivalent > AREA_EPSILON) {
        return Err(CalcError::degenerate_section(properties.area_equivalent));
    }

    if concrete.allow_tension != settings.allow_tension {
        warn!(
            "concrete law allow_tension = {} overridden by solver settings ({})",
            concrete.allow_tension, settings.allow_tension
        );
    }

    let samples = build_samples(geometry, properties.y_g, properties.z_g);
    let problem = Problem {
        samples: &samples,
        rhs: loads.load_vector(),
        concrete: concrete.with_tension(settings.allow_tension),
        steel,
        y_ref: properties.y_g,
        z_ref: properties.z_g,
    };

    let mut current = problem.evaluate(properties.centroidal())?;
    let mut history = vec![current.sigma_c_min()];
    let mut excluded = vec![false; samples.len()];
    let mut iterations = 0;
    let mut converged = true;

    if !settings.allow_tension {
        loop {
            let newly = problem.newly_tensile(&current, &excluded);
            if newly.is_empty() {
                break;
            }
            if iterations >= settings.max_iterations {
                warn!(
                    "cracked section not converged after {} iterations (sigma_c_min = {:.3})",
                    iterations,
                    current.sigma_c_min()
                );
                converged = false;
                break;
            }
            iterations += 1;

            let reduced = exclude_tensile_points(&current.sums, &samples, &newly);
            let mut next = match problem.evaluate(reduced) {
                Ok(next) => next,
                Err(err) => {
                    warn!(
                        "exclusion iteration {iterations} stopped: {err}; keeping previous result"
                    );
                    converged = false;
                    break;
                }
            };
            for &i in &newly {
                excluded[i] = true;
            }

            let mut vertex_index = 0;
            for (i, sample) in samples.iter().enumerate() {
                if sample.kind != SampleKind::Vertex {
                    continue;
                }
                if excluded[i] && next.vertex_stresses[vertex_index] > 0.0 {
                    next.vertex_stresses[vertex_index] = 0.0;
                }
                vertex_index += 1;
            }

            let delta = (next.sigma_c_min() - current.sigma_c_min()).abs();
            debug!(
                "exclusion iteration {}: {} new cracked vertices, area {:.3} cm², \
                 sigma_c_min {:.4} (delta {:.2e})",
                iterations,
                newly.len(),
                next.sums.area,
                next.sigma_c_min(),
                delta
            );
            history.push(next.sigma_c_min());
            current = next;

            if delta < settings.tolerance {
                break;
            }
        }
    }

    let excluded_vertices = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SampleKind::Vertex)
        .enumerate()
        .filter(|(_, (i, _))| excluded[*i])
        .map(|(vertex_index, _)| vertex_index)
        .collect();

    Ok(StressResult {
        sigma_c_min: current.sigma_c_min(),
        sigma_c_max: current.sigma_c_max(),
        sigma_c_mean: loads.n / current.sums.area,
        sigma_s_max: current.sigma_s_max(),
        strain_plane: current.plane,
        resisting_area: current.sums.area,
        vertex_stresses: current.vertex_stresses,
        bar_stresses: current.bar_stresses,
        excluded_vertices,
        iterations,
        converged,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bar, Ring};
    use crate::materials::ConcreteCurve;
    use crate::properties::compute_section_properties;
    use approx::assert_relative_eq;

    fn concrete() -> ConcreteLaw {
        ConcreteLaw::new(110.0, 300_000.0)
    }

    fn steel() -> SteelLaw {
        SteelLaw::new(2_060_000.0, 3_800.0)
    }

    fn solve(
        section: &SectionGeometry,
        loads: LoadState,
        concrete: ConcreteLaw,
        settings: SolverSettings,
    ) -> CalcResult<StressResult> {
        let props = compute_section_properties(section);
        compute_normal_stresses(section, &props, &loads, &concrete, &steel(), &settings)
    }

    fn solve_cracked(section: &SectionGeometry, loads: LoadState) -> CalcResult<StressResult> {
        solve(section, loads, concrete(), SolverSettings::default())
    }

    /// 30x50 beam with two Ø20 bars at each face, outline refined every 2.5 cm.
    fn beam() -> SectionGeometry {
        let outline = Ring::rectangle(0.0, 0.0, 30.0, 50.0).subdivided(12);
        SectionGeometry::new(vec![outline], vec![], 15.0)
            .with_bar(Bar::new(4.0, 4.0, 2.0))
            .with_bar(Bar::new(26.0, 4.0, 2.0))
            .with_bar(Bar::new(4.0, 46.0, 2.0))
            .with_bar(Bar::new(26.0, 46.0, 2.0))
    }

    #[test]
    fn test_samples_reproduce_section_sums() {
        let section = beam();
        let props = compute_section_properties(&section);
        let samples = build_samples(&section, props.y_g, props.z_g);
        assert_eq!(samples.len(), section.vertex_count() + 4);

        let total: ResistingSums = samples.iter().map(|s| s.contribution).sum();
        let expected = props.centroidal();
        assert_relative_eq!(total.area, expected.area, max_relative = 1e-9);
        assert_relative_eq!(total.sy, 0.0, epsilon = 1e-6);
        assert_relative_eq!(total.sz, 0.0, epsilon = 1e-6);
        assert_relative_eq!(total.iy, expected.iy, max_relative = 1e-9);
        assert_relative_eq!(total.iz, expected.iz, max_relative = 1e-9);
        assert_relative_eq!(total.iyz, expected.iyz, epsilon = 1e-3);
    }

    #[test]
    fn test_exclude_tensile_points_is_pure_subtraction() {
        let section = SectionGeometry::rectangular(20.0, 40.0, 15.0);
        let props = compute_section_properties(&section);
        let samples = build_samples(&section, props.y_g, props.z_g);
        let full = props.centroidal();

        let reduced = exclude_tensile_points(&full, &samples, &[0, 1]);
        let expected = full - samples[0].contribution - samples[1].contribution;
        assert_eq!(reduced, expected);
        // The bottom wedge plus half of each side wedge: half the rectangle
        assert_relative_eq!(reduced.area, 400.0, epsilon = 1e-9);
        // Input is left untouched
        assert_relative_eq!(full.area, 800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exclude_nothing() {
        let section = SectionGeometry::rectangular(20.0, 40.0, 15.0);
        let props = compute_section_properties(&section);
        let samples = build_samples(&section, props.y_g, props.z_g);
        let full = props.centroidal();
        assert_eq!(exclude_tensile_points(&full, &samples, &[]), full);
    }

    #[test]
    fn test_zero_load_gives_zero_stresses() {
        let result = solve_cracked(&beam(), LoadState::default()).unwrap();
        assert!(result.vertex_stresses.iter().all(|&s| s == 0.0));
        assert!(result.bar_stresses.iter().all(|&s| s == 0.0));
        assert_eq!(result.sigma_c_min, 0.0);
        assert_eq!(result.sigma_s_max, 0.0);
        assert_eq!(result.iterations, 0);
        assert!(!result.is_cracked());
    }

    #[test]
    fn test_pure_compression_does_not_crack() {
        let section = beam();
        let props = compute_section_properties(&section);
        let result = solve_cracked(&section, LoadState::axial(-50_000.0)).unwrap();
        assert_eq!(result.iterations, 0);
        assert!(result.converged);
        let mean = -50_000.0 / props.area_equivalent;
        assert_relative_eq!(result.sigma_c_mean, mean, epsilon = 1e-12);
        assert_relative_eq!(result.resisting_area, props.area_equivalent, epsilon = 1e-12);
        // Uniform strain: every vertex sees the same stress
        let first = result.vertex_stresses[0];
        assert!(result.vertex_stresses.iter().all(|&s| (s - first).abs() < 1e-9));
        assert!(first < 0.0);
    }

    #[test]
    fn test_uncracked_linear_matches_navier() {
        let section = SectionGeometry::rectangular(30.0, 50.0, 15.0);
        let law = concrete().with_curve(ConcreteCurve::Linear);
        // My = 1000 kgf·m → σ = 1e5 · 25 / 312500 = 8 kgf/cm²
        let loads = LoadState::bending_y(1_000.0);
        let result = solve(&section, loads, law, SolverSettings::uncracked()).unwrap();
        assert_relative_eq!(result.sigma_c_max, 8.0, epsilon = 1e-9);
        assert_relative_eq!(result.sigma_c_min, -8.0, epsilon = 1e-9);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_biaxial_uncracked_superposition() {
        let section = SectionGeometry::rectangular(30.0, 50.0, 15.0);
        let law = concrete().with_curve(ConcreteCurve::Linear);
        let loads = LoadState::new(-15_000.0, 500.0, 300.0);
        let result = solve(&section, loads, law, SolverSettings::uncracked()).unwrap();
        // Vertex 2 is (30, 50): y − yG = 15, z − zG = 25
        let iy = 30.0 * 50.0_f64.powi(3) / 12.0;
        let iz = 50.0 * 30.0_f64.powi(3) / 12.0;
        let expected = -15_000.0 / 1500.0 + 50_000.0 * 25.0 / iy - 30_000.0 * 15.0 / iz;
        assert_relative_eq!(result.vertex_stresses[2], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_bending_cracks_tension_face() {
        let section = beam();
        let props = compute_section_properties(&section);
        // Positive My stretches the top face
        let result = solve_cracked(&section, LoadState::bending_y(8_000.0)).unwrap();

        assert!(result.is_cracked());
        assert!(result.converged);
        assert!(result.sigma_c_min < 0.0);
        assert!(result.sigma_c_max <= 0.0);
        assert!(result.resisting_area < props.area_equivalent);

        let plane = result.strain_plane;
        assert!(plane.strain_at(15.0, 50.0) > 0.0);
        assert!(plane.strain_at(15.0, 0.0) < 0.0);
        // Top bars in tension, bottom bars in compression
        assert!(result.bar_stresses[2] > 0.0 && result.bar_stresses[3] > 0.0);
        assert!(result.bar_stresses[0] < 0.0 && result.bar_stresses[1] < 0.0);
        assert!(result.sigma_s_max > 0.0);
    }

    #[test]
    fn test_exclusion_steps_shrink() {
        let settings = SolverSettings::default().with_tolerance(1e-9);
        let loads = [
            LoadState::bending_y(8_000.0),
            LoadState::new(-2_000.0, -6_000.0, 0.0),
            LoadState::new(-5_000.0, 6_000.0, 3_000.0),
            LoadState::new(0.0, 5_000.0, 4_000.0),
        ];
        for load in loads {
            let result = solve(&beam(), load, concrete(), settings).unwrap();
            assert!(result.converged);
            assert!(result.iterations <= settings.max_iterations);
            assert!(result.history.len() >= 3, "{load:?}: {:?}", result.history);

            let steps: Vec<f64> = result.history.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
            for pair in steps.windows(2) {
                assert!(pair[1] <= pair[0] + 1e-9, "{load:?}: steps grew {steps:?}");
            }
        }
    }

    #[test]
    fn test_cracked_symmetric_section_has_no_lateral_curvature() {
        // Coarse outline: four vertices only
        let section = SectionGeometry::rectangular(30.0, 50.0, 15.0)
            .with_bar(Bar::new(4.0, 4.0, 2.0))
            .with_bar(Bar::new(26.0, 4.0, 2.0))
            .with_bar(Bar::new(4.0, 46.0, 2.0))
            .with_bar(Bar::new(26.0, 46.0, 2.0));
        let result = solve_cracked(&section, LoadState::bending_y(8_000.0)).unwrap();

        assert!(result.is_cracked());
        let plane = result.strain_plane;
        assert!((plane.kz / plane.ky).abs() < 1e-9, "kz = {}, ky = {}", plane.kz, plane.ky);
        assert_relative_eq!(result.bar_stresses[0], result.bar_stresses[1], max_relative = 1e-9);
        assert_relative_eq!(result.bar_stresses[2], result.bar_stresses[3], max_relative = 1e-9);
    }

    #[test]
    fn test_cracked_hollow_box() {
        let hole = Ring::rectangle(5.0, 5.0, 30.0, 30.0).reversed();
        let section = SectionGeometry::rectangular(40.0, 40.0, 15.0)
            .with_ring(hole)
            .with_bar(Bar::new(2.5, 2.5, 2.0))
            .with_bar(Bar::new(37.5, 2.5, 2.0))
            .with_bar(Bar::new(2.5, 37.5, 2.0))
            .with_bar(Bar::new(37.5, 37.5, 2.0));
        let props = compute_section_properties(&section);
        let result = solve_cracked(&section, LoadState::bending_y(5_000.0)).unwrap();

        assert!(result.is_cracked());
        assert!(result.converged);
        assert!(result.resisting_area > 0.0);
        assert!(result.resisting_area < props.area_equivalent);

        let plane = result.strain_plane;
        assert!((plane.kz / plane.ky).abs() < 1e-9);
        // Bottom bars compressed, top bars stretched, mirrored pairs equal
        assert!(result.bar_stresses[0] < 0.0 && result.bar_stresses[2] > 0.0);
        assert_relative_eq!(result.bar_stresses[0], result.bar_stresses[1], max_relative = 1e-9);
        assert_relative_eq!(result.bar_stresses[2], result.bar_stresses[3], max_relative = 1e-9);
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let settings = SolverSettings::default().with_max_iterations(1).with_tolerance(1e-12);
        let result = solve(&beam(), LoadState::bending_y(8_000.0), concrete(), settings).unwrap();
        assert!(result.iterations <= 1);
        assert_eq!(result.history.len(), result.iterations + 1);
    }

    #[test]
    fn test_eccentric_tension_recovers_from_singular_exclusion() {
        // Plain concrete in pure tension: every vertex cracks and nothing is left
        let section = SectionGeometry::rectangular(20.0, 20.0, 15.0);
        let result = solve_cracked(&section, LoadState::axial(10_000.0)).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.resisting_area, 400.0, epsilon = 1e-9);
        assert!(result.vertex_stresses.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_degenerate_section() {
        let flat = Ring::new([(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let section = SectionGeometry::new(vec![flat], vec![], 15.0);
        let err = solve_cracked(&section, LoadState::axial(-1.0)).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
    }

    #[test]
    fn test_collinear_bars_are_singular() {
        let flat = Ring::new([(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let section = SectionGeometry::new(vec![flat], vec![], 15.0)
            .with_bar(Bar::new(0.0, 0.0, 2.0))
            .with_bar(Bar::new(10.0, 0.0, 2.0));
        let err = solve_cracked(&section, LoadState::axial(-1.0)).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
    }

    #[test]
    fn test_solve_stiffness_system_identity() {
        let sums = ResistingSums {
            area: 1.0,
            sy: 0.0,
            sz: 0.0,
            iy: 1.0,
            iz: 1.0,
            iyz: 0.0,
        };
        assert_eq!(solve_stiffness_system(&sums, [1.0, 2.0, 3.0]).unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_strain_plane_reference() {
        let plane = StrainPlane {
            e0: -0.001,
            ky: 1e-4,
            kz: -1e-4,
            y_ref: 10.0,
            z_ref: 20.0,
        };
        assert_relative_eq!(plane.strain_at(10.0, 20.0), -0.001, epsilon = 1e-15);
        assert_relative_eq!(plane.strain_at(12.0, 25.0), -0.001 + 5e-4 - 2e-4, epsilon = 1e-15);
    }
}
