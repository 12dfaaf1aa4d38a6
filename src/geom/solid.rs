//! Closed box solids.
//!
//! Every facade element is a rectangular prism: a rectangle centered on a
//! [`Plane`] origin, spanning `size_x` along the plane x axis and `size_y`
//! along its y axis, extruded `height` along the plane normal. [`Prism`]
//! keeps that description so callers can reason about placement without
//! inspecting triangles; [`Solid`] is the meshed result.

use super::diagnostics::GeomMeshDiagnostics;
use super::extrusion::{ExtrusionCaps, ExtrusionError, extrude_polyline};
use super::mesh::GeomMesh;
use super::{BBox, Plane, Point3};

/// A closed triangle mesh together with its repair diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub mesh: GeomMesh,
    pub diagnostics: GeomMeshDiagnostics,
}

impl Solid {
    #[must_use]
    pub fn new(mesh: GeomMesh, diagnostics: GeomMeshDiagnostics) -> Self {
        Self { mesh, diagnostics }
    }

    /// Returns `true` when the mesh is watertight and manifold.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.diagnostics.is_valid_solid()
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        self.mesh.bbox()
    }

    /// Enclosed volume. Only meaningful for closed solids.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.mesh.signed_volume()
    }
}

/// Placement and size of a rectangular prism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub plane: Plane,
    pub size_x: f64,
    pub size_y: f64,
    pub height: f64,
}

impl Prism {
    #[must_use]
    pub fn new(plane: Plane, size_x: f64, size_y: f64, height: f64) -> Self {
        Self {
            plane,
            size_x,
            size_y,
            height,
        }
    }

    /// The four base corners, counter-clockwise around the plane normal.
    #[must_use]
    pub fn base_corners(&self) -> [Point3; 4] {
        let hx = self.size_x * 0.5;
        let hy = self.size_y * 0.5;
        [
            self.plane.point_at(-hx, -hy),
            self.plane.point_at(hx, -hy),
            self.plane.point_at(hx, hy),
            self.plane.point_at(-hx, hy),
        ]
    }

    /// All eight corners: base first, then top.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let base = self.base_corners();
        let up = self.plane.z_axis.mul_scalar(self.height);
        [
            base[0],
            base[1],
            base[2],
            base[3],
            base[0].add_vec(up),
            base[1].add_vec(up),
            base[2].add_vec(up),
            base[3].add_vec(up),
        ]
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.corners())
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.size_x * self.size_y * self.height
    }

    pub fn to_solid(&self) -> Result<Solid, ExtrusionError> {
        centered_box(self.plane, self.size_x, self.size_y, self.height)
    }
}

/// Builds a closed box: a `size_x` by `size_y` rectangle centered on the
/// plane origin, extruded `height` along the plane normal.
pub fn centered_box(plane: Plane, size_x: f64, size_y: f64, height: f64) -> Result<Solid, ExtrusionError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(size_x) && valid(size_y) && valid(height)) {
        return Err(ExtrusionError::InvalidBoxSize { size_x, size_y, height });
    }

    let prism = Prism::new(plane, size_x, size_y, height);
    let profile = prism.base_corners();
    let direction = plane.z_axis.mul_scalar(height);

    let (mesh, diagnostics) = extrude_polyline(&profile, direction, ExtrusionCaps::BOTH)?;
    Ok(Solid::new(mesh, diagnostics))
}
