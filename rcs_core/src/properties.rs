//! # Section Properties
//!
//! Area, centroid and second moments of the *equivalent* section (concrete
//! plus `n`-weighted steel) computed from arbitrary polygons with the
//! shoelace family of closed-form integrals.
//!
//! ## Notation
//!
//! - `A` = area
//! - `Sy = ∫z dA`, `Sz = ∫y dA` (first moments)
//! - `Iy = ∫z² dA`, `Iz = ∫y² dA`, `Iyz = ∫yz dA` (second moments)
//!
//! All sums are signed: a ring wound clockwise contributes negatively, which
//! is how holes are subtracted.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::geometry::SectionGeometry;
//! use rcs_core::properties::compute_section_properties;
//!
//! let section = SectionGeometry::rectangular(30.0, 15.0, 10.0);
//! let props = compute_section_properties(&section);
//!
//! assert!((props.area_concrete - 450.0).abs() < 1e-9);
//! assert!((props.y_g - 15.0).abs() < 1e-9);
//! assert!((props.z_g - 7.5).abs() < 1e-9);
//! // Iy = b·h³/12 = 30·15³/12
//! assert!((props.iy - 8437.5).abs() < 1e-6);
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::{Ring, SectionGeometry, Vertex};

/// Areas below this magnitude are treated as zero (cm²).
pub const AREA_EPSILON: f64 = 1e-9;

/// Area, first and second moments of a region about some reference point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaIntegrals {
    pub area: f64,
    /// ∫z dA
    pub sy: f64,
    /// ∫y dA
    pub sz: f64,
    /// ∫z² dA
    pub iy: f64,
    /// ∫y² dA
    pub iz: f64,
    /// ∫yz dA
    pub iyz: f64,
}

impl AreaIntegrals {
    /// Point area located at `(y, z)` with no self-inertia.
    pub fn point(y: f64, z: f64, area: f64) -> Self {
        AreaIntegrals {
            area,
            sy: area * z,
            sz: area * y,
            iy: area * z * z,
            iz: area * y * y,
            iyz: area * y * z,
        }
    }

    /// Integrals of a triangle, signed by its winding.
    pub fn triangle(a: Vertex, b: Vertex, c: Vertex) -> Self {
        let area = 0.5 * ((b.y - a.y) * (c.z - a.z) - (c.y - a.y) * (b.z - a.z));
        AreaIntegrals {
            area,
            sy: area * (a.z + b.z + c.z) / 3.0,
            sz: area * (a.y + b.y + c.y) / 3.0,
            iy: area / 6.0
                * (a.z * a.z + b.z * b.z + c.z * c.z + a.z * b.z + b.z * c.z + c.z * a.z),
            iz: area / 6.0
                * (a.y * a.y + b.y * b.y + c.y * c.y + a.y * b.y + b.y * c.y + c.y * a.y),
            iyz: area / 12.0
                * (2.0 * (a.y * a.z + b.y * b.z + c.y * c.z)
                    + a.y * b.z
                    + b.y * a.z
                    + a.y * c.z
                    + c.y * a.z
                    + b.y * c.z
                    + c.y * b.z),
        }
    }

    /// Shoelace integrals of a closed ring about the origin.
    ///
    /// Rings with fewer than 3 vertices contribute nothing.
    pub fn ring(ring: &Ring) -> Self {
        if ring.len() < 3 {
            return AreaIntegrals::default();
        }

        let mut acc = AreaIntegrals::default();
        for (p, q) in ring.edges() {
            let cross = p.y * q.z - q.y * p.z;
            acc.area += cross;
            acc.sz += (p.y + q.y) * cross;
            acc.sy += (p.z + q.z) * cross;
            acc.iz += (p.y * p.y + p.y * q.y + q.y * q.y) * cross;
            acc.iy += (p.z * p.z + p.z * q.z + q.z * q.z) * cross;
            acc.iyz += (p.y * q.z + 2.0 * p.y * p.z + 2.0 * q.y * q.z + q.y * p.z) * cross;
        }

        AreaIntegrals {
            area: acc.area / 2.0,
            sy: acc.sy / 6.0,
            sz: acc.sz / 6.0,
            iy: acc.iy / 12.0,
            iz: acc.iz / 12.0,
            iyz: acc.iyz / 24.0,
        }
    }

    /// The same region measured about `(y0, z0)` instead of the current origin.
    pub fn about(&self, y0: f64, z0: f64) -> Self {
        AreaIntegrals {
            area: self.area,
            sy: self.sy - self.area * z0,
            sz: self.sz - self.area * y0,
            iy: self.iy - 2.0 * z0 * self.sy + self.area * z0 * z0,
            iz: self.iz - 2.0 * y0 * self.sz + self.area * y0 * y0,
            iyz: self.iyz - y0 * self.sy - z0 * self.sz + self.area * y0 * z0,
        }
    }

    /// Centroid `(y, z)`, or `None` for a vanishing area.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.area.abs() < AREA_EPSILON {
            None
        } else {
            Some((self.sz / self.area, self.sy / self.area))
        }
    }
}

impl Add for AreaIntegrals {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        AreaIntegrals {
            area: self.area + rhs.area,
            sy: self.sy + rhs.sy,
            sz: self.sz + rhs.sz,
            iy: self.iy + rhs.iy,
            iz: self.iz + rhs.iz,
            iyz: self.iyz + rhs.iyz,
        }
    }
}

impl AddAssign for AreaIntegrals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for AreaIntegrals {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        AreaIntegrals {
            area: self.area - rhs.area,
            sy: self.sy - rhs.sy,
            sz: self.sz - rhs.sz,
            iy: self.iy - rhs.iy,
            iz: self.iz - rhs.iz,
            iyz: self.iyz - rhs.iyz,
        }
    }
}

impl Mul<f64> for AreaIntegrals {
    type Output = Self;
    fn mul(self, factor: f64) -> Self::Output {
        AreaIntegrals {
            area: self.area * factor,
            sy: self.sy * factor,
            sz: self.sz * factor,
            iy: self.iy * factor,
            iz: self.iz * factor,
            iyz: self.iyz * factor,
        }
    }
}

impl std::iter::Sum for AreaIntegrals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(AreaIntegrals::default(), Add::add)
    }
}

/// Geometric properties of the equivalent section.
///
/// Recomputed from scratch whenever the geometry changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Net concrete area, sum of signed ring areas (cm²)
    pub area_concrete: f64,

    /// Raw steel area, not homogenized (cm²)
    pub area_steel: f64,

    /// Concrete area + n × steel area (cm²)
    pub area_equivalent: f64,

    /// Centroid of the equivalent section, horizontal (cm)
    pub y_g: f64,

    /// Centroid of the equivalent section, vertical (cm)
    pub z_g: f64,

    /// ∫(z − zG)² dA of the equivalent section (cm⁴)
    pub iy: f64,

    /// ∫(y − yG)² dA of the equivalent section (cm⁴)
    pub iz: f64,

    /// ∫(y − yG)(z − zG) dA of the equivalent section (cm⁴)
    pub iyz: f64,

    /// Equivalent-section integrals about the global origin, before the
    /// centroid shift
    pub raw: AreaIntegrals,
}

impl SectionProperties {
    /// Equivalent-section integrals about its own centroid.
    ///
    /// First moments vanish; second moments are `iy`, `iz`, `iyz`.
    pub fn centroidal(&self) -> AreaIntegrals {
        AreaIntegrals {
            area: self.area_equivalent,
            sy: 0.0,
            sz: 0.0,
            iy: self.iy,
            iz: self.iz,
            iyz: self.iyz,
        }
    }

    /// Origin-referenced integrals rebuilt from the centroidal values
    /// (inverse Steiner shift).
    pub fn about_origin(&self) -> AreaIntegrals {
        self.centroidal().about(-self.y_g, -self.z_g)
    }
}

/// Integrate the equivalent section.
///
/// Returns an all-zero record when the total area vanishes; the solver
/// rejects such sections with [`CalcError::DegenerateSection`](crate::errors::CalcError).
pub fn compute_section_properties(geometry: &SectionGeometry) -> SectionProperties {
    let concrete: AreaIntegrals = geometry.polygons.iter().map(AreaIntegrals::ring).sum();
    let steel: AreaIntegrals = geometry
        .bars
        .iter()
        .map(|bar| AreaIntegrals::point(bar.y, bar.z, geometry.n_homog * bar.area()))
        .sum();
    let raw = concrete + steel;

    let Some((y_g, z_g)) = raw.centroid() else {
        return SectionProperties::default();
    };
    let centroidal = raw.about(y_g, z_g);

    SectionProperties {
        area_concrete: concrete.area,
        area_steel: geometry.steel_area(),
        area_equivalent: raw.area,
        y_g,
        z_g,
        iy: centroidal.iy,
        iz: centroidal.iz,
        iyz: centroidal.iyz,
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bar;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rectangle_properties() {
        let props = compute_section_properties(&SectionGeometry::rectangular(30.0, 15.0, 10.0));
        assert_relative_eq!(props.area_concrete, 450.0, epsilon = 1e-9);
        assert_relative_eq!(props.area_equivalent, 450.0, epsilon = 1e-9);
        assert_relative_eq!(props.y_g, 15.0, epsilon = 1e-9);
        assert_relative_eq!(props.z_g, 7.5, epsilon = 1e-9);
        // Iy = 30·15³/12, Iz = 15·30³/12
        assert_relative_eq!(props.iy, 8437.5, epsilon = 1e-6);
        assert_relative_eq!(props.iz, 33750.0, epsilon = 1e-6);
        assert_relative_eq!(props.iyz, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clockwise_ring_is_negative() {
        let ring = Ring::rectangle(0.0, 0.0, 2.0, 3.0).reversed();
        let integrals = AreaIntegrals::ring(&ring);
        assert_relative_eq!(integrals.area, -6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hollow_section() {
        // 40x40 box with a 20x20 centered void
        let section = SectionGeometry::rectangular(40.0, 40.0, 15.0)
            .with_ring(Ring::rectangle(10.0, 10.0, 20.0, 20.0).reversed());
        let props = compute_section_properties(&section);
        assert_relative_eq!(props.area_concrete, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(props.y_g, 20.0, epsilon = 1e-9);
        assert_relative_eq!(props.z_g, 20.0, epsilon = 1e-9);
        let expected = (40.0_f64.powi(4) - 20.0_f64.powi(4)) / 12.0;
        assert_relative_eq!(props.iy, expected, epsilon = 1e-6);
        assert_relative_eq!(props.iz, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_bar_homogenization() {
        let section =
            SectionGeometry::rectangular(10.0, 10.0, 10.0).with_bar(Bar::new(5.0, 5.0, 1.0));
        let props = compute_section_properties(&section);
        let bar_area = PI / 4.0;
        assert_relative_eq!(props.area_steel, bar_area, epsilon = 1e-12);
        assert_relative_eq!(props.area_equivalent, 100.0 + 10.0 * bar_area, epsilon = 1e-9);
        assert_relative_eq!(props.y_g, 5.0, epsilon = 1e-9);
        assert_relative_eq!(props.z_g, 5.0, epsilon = 1e-9);
        // A bar at the centroid adds no inertia
        assert_relative_eq!(props.iy, 10000.0 / 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_eccentric_bar_shifts_centroid() {
        let section =
            SectionGeometry::rectangular(30.0, 50.0, 15.0).with_bar(Bar::new(15.0, 5.0, 2.0));
        let props = compute_section_properties(&section);
        let n_as = 15.0 * PI;
        let expected_zg = (1500.0 * 25.0 + n_as * 5.0) / (1500.0 + n_as);
        assert_relative_eq!(props.z_g, expected_zg, epsilon = 1e-9);
        let expected_iy = 30.0 * 50.0_f64.powi(3) / 12.0
            + 1500.0 * (25.0 - expected_zg).powi(2)
            + n_as * (5.0 - expected_zg).powi(2);
        assert_relative_eq!(props.iy, expected_iy, max_relative = 1e-9);
    }

    #[test]
    fn test_product_of_inertia_for_l_shape() {
        // L shape: 20x5 leg along y plus 5x15 leg along z
        let ring =
            Ring::new([(0.0, 0.0), (20.0, 0.0), (20.0, 5.0), (5.0, 5.0), (5.0, 20.0), (0.0, 20.0)]);
        let props = compute_section_properties(&SectionGeometry::new(vec![ring], vec![], 15.0));
        // Direct composition of the two rectangles
        let parts = [
            AreaIntegrals::ring(&Ring::rectangle(0.0, 0.0, 20.0, 5.0)),
            AreaIntegrals::ring(&Ring::rectangle(0.0, 5.0, 5.0, 15.0)),
        ];
        let total: AreaIntegrals = parts.into_iter().sum();
        let (yg, zg) = total.centroid().unwrap();
        let centroidal = total.about(yg, zg);
        assert_relative_eq!(props.iyz, centroidal.iyz, epsilon = 1e-6);
        assert!(props.iyz < 0.0);
    }

    #[test]
    fn test_fan_triangles_sum_to_ring() {
        let ring = Ring::new([(0.0, 0.0), (7.0, 1.0), (9.0, 6.0), (3.0, 8.0), (-1.0, 4.0)]);
        let direct = AreaIntegrals::ring(&ring);
        let pivot = Vertex::new(3.0, 3.0);
        let fan: AreaIntegrals =
            ring.edges().map(|(p, q)| AreaIntegrals::triangle(pivot, p, q)).sum();
        assert_relative_eq!(fan.area, direct.area, epsilon = 1e-9);
        assert_relative_eq!(fan.sy, direct.sy, epsilon = 1e-9);
        assert_relative_eq!(fan.iz, direct.iz, epsilon = 1e-9);
        assert_relative_eq!(fan.iyz, direct.iyz, epsilon = 1e-9);
    }

    #[test]
    fn test_halves_add_back_to_whole() {
        let whole = AreaIntegrals::point(3.0, -2.0, 4.0);
        let half = whole * 0.5;
        assert_relative_eq!(half.area, 2.0, epsilon = 1e-12);
        assert_relative_eq!(half.iyz, -12.0, epsilon = 1e-12);
        assert_eq!(half + half, whole);
    }

    #[test]
    fn test_about_origin_inverts_centroid_shift() {
        let section =
            SectionGeometry::rectangular(25.0, 40.0, 15.0).with_bar(Bar::new(3.0, 3.0, 2.0));
        let props = compute_section_properties(&section);
        let rebuilt = props.about_origin();
        assert_relative_eq!(rebuilt.iy, props.raw.iy, max_relative = 1e-9);
        assert_relative_eq!(rebuilt.iyz, props.raw.iyz, max_relative = 1e-9);
        assert_relative_eq!(rebuilt.sz, props.raw.sz, max_relative = 1e-9);
    }

    #[test]
    fn test_short_ring_contributes_nothing() {
        let ring = Ring::new([(0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(AreaIntegrals::ring(&ring), AreaIntegrals::default());
    }

    #[test]
    fn test_zero_area_returns_zeros() {
        let ring = Ring::new([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let props = compute_section_properties(&SectionGeometry::new(vec![ring], vec![], 15.0));
        assert_eq!(props, SectionProperties::default());
    }
}
