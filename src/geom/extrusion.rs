//! Linear extrusion of a polyline profile.

use super::diagnostics::GeomMeshDiagnostics;
use super::mesh::{GeomMesh, finalize_mesh};
use super::triangulation::{TriangulationError, UvPoint, triangulate_polygon};
use super::{Point3, Tolerance, Vec3};

/// Which ends of an extrusion get a planar cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtrusionCaps {
    pub start: bool,
    pub end: bool,
}

impl ExtrusionCaps {
    pub const NONE: Self = Self { start: false, end: false };
    pub const BOTH: Self = Self { start: true, end: true };

    #[must_use]
    pub const fn any(self) -> bool {
        self.start || self.end
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtrusionError {
    #[error("extrusion direction must be finite and non-zero")]
    InvalidDirection,
    #[error("profile points must be finite")]
    NonFinitePoint,
    #[error("profile requires at least {min} distinct points")]
    NotEnoughPoints { min: usize },
    #[error("profile is degenerate (zero area)")]
    ProfileDegenerate,
    #[error("profile is not planar enough to cap (max distance {max_distance})")]
    ProfileNotPlanar { max_distance: f64 },
    #[error("profile must not be parallel to the extrusion direction")]
    ProfileParallelToDirection,
    #[error("failed to triangulate cap: {0}")]
    CapTriangulation(#[from] TriangulationError),
    #[error("box dimensions must be finite and positive (got {size_x} x {size_y} x {height})")]
    InvalidBoxSize { size_x: f64, size_y: f64, height: f64 },
}

/// Extrudes `profile` along `direction`.
///
/// A profile whose first and last points coincide is closed. Asking for caps
/// closes it as well; a capped extrusion of a planar loop is a closed solid.
pub fn extrude_polyline(
    profile: &[Point3],
    direction: Vec3,
    caps: ExtrusionCaps,
) -> Result<(GeomMesh, GeomMeshDiagnostics), ExtrusionError> {
    let tol = Tolerance::default_geom();
    if !direction.is_finite() || direction.length_squared() == 0.0 {
        return Err(ExtrusionError::InvalidDirection);
    }

    let (mut ring, closed) = clean_profile(profile, caps.any(), tol)?;
    let cap = if caps.any() {
        Some(cap_triangles(&mut ring, direction, tol)?)
    } else {
        None
    };

    let n = ring.len();
    let top = |i: usize| (n + i) as u32;
    let edges = if closed { n } else { n - 1 };

    let mut vertices = ring.clone();
    vertices.extend(ring.iter().map(|p| p.add_vec(direction)));

    let mut indices: Vec<u32> = Vec::with_capacity(edges * 6);
    for i in 0..edges {
        let j = (i + 1) % n;
        indices.extend_from_slice(&[i as u32, j as u32, top(j)]);
        indices.extend_from_slice(&[i as u32, top(j), top(i)]);
    }

    // Cap triangles wind along `direction`, so the bottom cap is reversed.
    if let Some(cap) = cap {
        for tri in cap.chunks_exact(3) {
            if caps.start {
                indices.extend_from_slice(&[tri[0], tri[2], tri[1]]);
            }
            if caps.end {
                indices.extend(tri.iter().map(|&i| top(i as usize)));
            }
        }
    }

    Ok(finalize_mesh(vertices, indices, tol))
}

/// Drops repeated points, detects closure and, for closed rings, removes
/// collinear points so walls and caps share every edge.
fn clean_profile(points: &[Point3], force_closed: bool, tol: Tolerance) -> Result<(Vec<Point3>, bool), ExtrusionError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(ExtrusionError::NonFinitePoint);
    }

    let mut ring: Vec<Point3> = Vec::with_capacity(points.len());
    for &p in points {
        if !ring.last().is_some_and(|&last| tol.approx_eq_point3(last, p)) {
            ring.push(p);
        }
    }

    let mut closed = force_closed;
    if ring.len() > 2 && ring.first().zip(ring.last()).is_some_and(|(&a, &b)| tol.approx_eq_point3(a, b)) {
        ring.pop();
        closed = true;
    }

    if closed {
        let mut i = 0;
        while ring.len() > 3 && i < ring.len() {
            let n = ring.len();
            let (prev, cur, next) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
            let chord = next.sub_point(prev);
            let offset = match chord.normalized() {
                Some(dir) => dir.cross(cur.sub_point(prev)).length(),
                None => cur.distance_to(prev),
            };
            if offset <= tol.eps {
                ring.remove(i);
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
    }

    let min = if closed { 3 } else { 2 };
    if ring.len() < min {
        return Err(ExtrusionError::NotEnoughPoints { min });
    }
    Ok((ring, closed))
}

/// Triangulates the cap in its own plane.
///
/// Reverses `ring` when needed so that its normal agrees with `direction`.
fn cap_triangles(ring: &mut [Point3], direction: Vec3, tol: Tolerance) -> Result<Vec<u32>, ExtrusionError> {
    let newell = newell_normal(ring);
    if newell.length_squared() <= tol.eps_squared() {
        return Err(ExtrusionError::ProfileDegenerate);
    }
    let mut normal = newell.normalized().ok_or(ExtrusionError::ProfileDegenerate)?;

    let origin = ring[0];
    let max_distance = ring
        .iter()
        .map(|p| p.sub_point(origin).dot(normal).abs())
        .fold(0.0_f64, f64::max);
    if max_distance > tol.eps * 1e3 {
        return Err(ExtrusionError::ProfileNotPlanar { max_distance });
    }

    let alignment = normal.dot(direction);
    if alignment.abs() <= tol.eps * direction.length() {
        return Err(ExtrusionError::ProfileParallelToDirection);
    }
    if alignment < 0.0 {
        ring.reverse();
        normal = normal.neg();
    }

    let helper = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u_axis = normal.cross(helper).normalized().ok_or(ExtrusionError::ProfileDegenerate)?;
    let v_axis = normal.cross(u_axis);
    let uv: Vec<UvPoint> = ring
        .iter()
        .map(|p| {
            let d = p.sub_point(origin);
            UvPoint::new(d.dot(u_axis), d.dot(v_axis))
        })
        .collect();

    Ok(triangulate_polygon(&uv, tol)?)
}

/// Newell normal of a closed ring; its length is twice the enclosed area.
fn newell_normal(points: &[Point3]) -> Vec3 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .fold(Vec3::ZERO, |n, (a, b)| {
            n.add(Vec3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            ))
        })
}
