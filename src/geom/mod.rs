mod core;
mod diagnostics;
mod extrusion;
mod mesh;
mod plane;
mod solid;
mod triangulation;

pub use core::{BBox, Point3, Tolerance, Vec3};
pub use diagnostics::GeomMeshDiagnostics;
pub use extrusion::{ExtrusionCaps, ExtrusionError, extrude_polyline};
pub use mesh::GeomMesh;
pub use plane::Plane;
pub use solid::{Prism, Solid, centered_box};
pub use triangulation::{TriangulationError, UvPoint, signed_area, triangulate_polygon};

#[cfg(test)]
mod tests;
