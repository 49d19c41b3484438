//! # Section Geometry
//!
//! Immutable description of a reinforced-concrete cross-section: one or more
//! concrete rings plus discrete reinforcing bars and the homogenization
//! ratio `n = Es / Ec`.
//!
//! ## Coordinates
//!
//! Points are `(y, z)` pairs in centimeters. Outer boundaries and holes are
//! told apart only by winding: a hole must run opposite to the boundary that
//! contains it so that its signed area nets out.
//!
//! ```text
//!   z
//!   ▲   ┌───────────────┐
//!   │   │ •           • │   • bars (y, z, Ø)
//!   │   │               │
//!   │   │ •           • │
//!   │   └───────────────┘
//!   └──────────────────────▶ y
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::geometry::{Bar, SectionGeometry};
//!
//! let section = SectionGeometry::rectangular(30.0, 50.0, 15.0)
//!     .with_bar(Bar::new(4.0, 4.0, 1.6))
//!     .with_bar(Bar::new(26.0, 4.0, 1.6));
//!
//! assert!(section.validate().is_ok());
//! assert_eq!(section.bars.len(), 2);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A point of a concrete ring, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(y: f64, z: f64) -> Self {
        Vertex { y, z }
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((y, z): (f64, f64)) -> Self {
        Vertex { y, z }
    }
}

/// Closed polygon of concrete. The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<Vertex>);

impl Ring {
    pub fn new(vertices: impl IntoIterator<Item = impl Into<Vertex>>) -> Self {
        Ring(vertices.into_iter().map(Into::into).collect())
    }

    /// Axis-aligned rectangle wound counter-clockwise from `(y0, z0)`.
    pub fn rectangle(y0: f64, z0: f64, width: f64, height: f64) -> Self {
        Ring(vec![
            Vertex::new(y0, z0),
            Vertex::new(y0 + width, z0),
            Vertex::new(y0 + width, z0 + height),
            Vertex::new(y0, z0 + height),
        ])
    }

    /// Same ring with the opposite winding, e.g. to turn an outline into a hole.
    pub fn reversed(&self) -> Self {
        Ring(self.0.iter().rev().copied().collect())
    }

    /// Split every edge into `segments` equal parts.
    ///
    /// A finer outline gives the cracked-section solver more sample points.
    pub fn subdivided(&self, segments: usize) -> Self {
        let segments = segments.max(1);
        let mut vertices = Vec::with_capacity(self.len() * segments);
        for (p, q) in self.edges() {
            for k in 0..segments {
                let t = k as f64 / segments as f64;
                vertices.push(Vertex::new(p.y + t * (q.y - p.y), p.z + t * (q.z - p.z)));
            }
        }
        Ring(vertices)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive vertex pairs, closing the ring.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }
}

/// A discrete reinforcing bar treated as a point area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Horizontal coordinate (cm)
    pub y: f64,
    /// Vertical coordinate (cm)
    pub z: f64,
    /// Bar diameter (cm)
    pub diameter: f64,
}

impl Bar {
    pub fn new(y: f64, z: f64, diameter: f64) -> Self {
        Bar { y, z, diameter }
    }

    /// Steel area π·Ø²/4 (cm²)
    pub fn area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }
}

/// Complete cross-section description.
///
/// ## JSON Example
///
/// ```json
/// {
///   "polygons": [[{"y": 0.0, "z": 0.0}, {"y": 30.0, "z": 0.0},
///                 {"y": 30.0, "z": 50.0}, {"y": 0.0, "z": 50.0}]],
///   "bars": [{"y": 4.0, "z": 4.0, "diameter": 1.6}],
///   "n_homog": 15.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Concrete rings (outer boundaries and oppositely wound holes)
    pub polygons: Vec<Ring>,

    /// Reinforcing bars
    #[serde(default)]
    pub bars: Vec<Bar>,

    /// Homogenization ratio Es/Ec
    pub n_homog: f64,
}

impl SectionGeometry {
    pub fn new(polygons: Vec<Ring>, bars: Vec<Bar>, n_homog: f64) -> Self {
        SectionGeometry { polygons, bars, n_homog }
    }

    /// Solid `width × height` rectangle with its bottom-left corner at the origin.
    ///
    /// `y` runs along the width and `z` along the height.
    pub fn rectangular(width: f64, height: f64, n_homog: f64) -> Self {
        SectionGeometry {
            polygons: vec![Ring::rectangle(0.0, 0.0, width, height)],
            bars: Vec::new(),
            n_homog,
        }
    }

    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.polygons.push(ring);
        self
    }

    pub fn with_bar(mut self, bar: Bar) -> Self {
        self.bars.push(bar);
        self
    }

    /// Total raw steel area (cm²)
    pub fn steel_area(&self) -> f64 {
        self.bars.iter().map(Bar::area).sum()
    }

    /// Number of concrete vertices over all rings
    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Ring::len).sum()
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.n_homog > 0.0) || !self.n_homog.is_finite() {
            return Err(CalcError::invalid_input(
                "n_homog",
                self.n_homog.to_string(),
                "Homogenization ratio must be positive",
            ));
        }
        if self.polygons.is_empty() {
            return Err(CalcError::invalid_input(
                "polygons",
                "[]",
                "At least one concrete ring is required",
            ));
        }
        for (i, ring) in self.polygons.iter().enumerate() {
            if ring.len() < 3 {
                return Err(CalcError::invalid_input(
                    format!("polygons[{i}]"),
                    ring.len().to_string(),
                    "A ring needs at least 3 vertices",
                ));
            }
            if ring.vertices().iter().any(|v| !v.y.is_finite() || !v.z.is_finite()) {
                return Err(CalcError::invalid_input(
                    format!("polygons[{i}]"),
                    "non-finite",
                    "Vertex coordinates must be finite",
                ));
            }
        }
        for (i, bar) in self.bars.iter().enumerate() {
            if !(bar.diameter > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("bars[{i}].diameter"),
                    bar.diameter.to_string(),
                    "Bar diameter must be positive",
                ));
            }
            if !bar.y.is_finite() || !bar.z.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("bars[{i}]"),
                    "non-finite",
                    "Bar coordinates must be finite",
                ));
            }
        }
        Ok(())
    }
}
