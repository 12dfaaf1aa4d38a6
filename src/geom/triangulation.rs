//! Ear clipping for the planar caps of an extrusion.

use super::Tolerance;

/// A point in the 2D coordinate system of a cap plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    #[must_use]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriangulationError {
    #[error("polygon vertices must be finite")]
    NonFinite,
    #[error("polygon has fewer than 3 usable vertices")]
    Degenerate,
    #[error("no ear found, polygon is probably self-intersecting")]
    NoEar,
}

/// Triangulates a simple polygon without holes.
///
/// Returns indices into `ring`, three per triangle, wound counter-clockwise
/// in UV space whatever the input orientation. Duplicate and collinear
/// vertices are dropped first, so their indices never appear in the output.
pub fn triangulate_polygon(ring: &[UvPoint], tol: Tolerance) -> Result<Vec<u32>, TriangulationError> {
    if ring.iter().any(|p| !p.u.is_finite() || !p.v.is_finite()) {
        return Err(TriangulationError::NonFinite);
    }

    let mut remaining: Vec<usize> = (0..ring.len()).collect();
    drop_redundant(ring, &mut remaining, tol);
    if remaining.len() < 3 {
        return Err(TriangulationError::Degenerate);
    }

    let ccw = loop_area(ring, &remaining) > 0.0;
    let mut indices = Vec::with_capacity((remaining.len() - 2) * 3);

    while remaining.len() >= 3 {
        let m = remaining.len();
        let ear = (0..m)
            .find(|&i| is_ear(ring, &remaining, i, ccw, tol))
            .ok_or(TriangulationError::NoEar)?;

        let a = remaining[(ear + m - 1) % m];
        let b = remaining[ear];
        let c = remaining[(ear + 1) % m];
        let tri = if ccw { [a, b, c] } else { [a, c, b] };
        indices.extend(tri.iter().map(|&i| i as u32));

        if m == 3 {
            break;
        }
        remaining.remove(ear);
        drop_redundant(ring, &mut remaining, tol);
    }

    Ok(indices)
}

/// Signed area of a closed ring, positive when counter-clockwise.
#[must_use]
pub fn signed_area(ring: &[UvPoint]) -> f64 {
    let all: Vec<usize> = (0..ring.len()).collect();
    loop_area(ring, &all)
}

fn loop_area(ring: &[UvPoint], loop_indices: &[usize]) -> f64 {
    let n = loop_indices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = ring[loop_indices[i]];
            let b = ring[loop_indices[(i + 1) % n]];
            a.u * b.v - b.u * a.v
        })
        .sum();
    0.5 * twice
}

/// Removes vertices that coincide with their successor or lie on the line
/// through their neighbours, until none are left.
fn drop_redundant(ring: &[UvPoint], remaining: &mut Vec<usize>, tol: Tolerance) {
    while remaining.len() >= 3 {
        let m = remaining.len();
        let redundant = (0..m).find(|&i| {
            let prev = ring[remaining[(i + m - 1) % m]];
            let cur = ring[remaining[i]];
            let next = ring[remaining[(i + 1) % m]];
            same_point(cur, next, tol) || distance_to_line(cur, prev, next) <= tol.eps
        });
        match redundant {
            Some(i) => {
                remaining.remove(i);
            }
            None => break,
        }
    }
}

fn is_ear(ring: &[UvPoint], remaining: &[usize], i: usize, ccw: bool, tol: Tolerance) -> bool {
    let m = remaining.len();
    let (ia, ib, ic) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
    let (a, b, c) = (ring[ia], ring[ib], ring[ic]);

    let turn = orient(a, b, c);
    let convex = if ccw { turn > 0.0 } else { turn < 0.0 };
    if !convex {
        return false;
    }

    remaining
        .iter()
        .filter(|&&j| j != ia && j != ib && j != ic)
        .map(|&j| ring[j])
        .filter(|&p| !(same_point(p, a, tol) || same_point(p, b, tol) || same_point(p, c, tol)))
        .all(|p| !inside_triangle(p, a, b, c, ccw, tol))
}

fn orient(a: UvPoint, b: UvPoint, c: UvPoint) -> f64 {
    (b.u - a.u) * (c.v - a.v) - (b.v - a.v) * (c.u - a.u)
}

/// Inclusive point-in-triangle test for a triangle of known winding.
fn inside_triangle(p: UvPoint, a: UvPoint, b: UvPoint, c: UvPoint, ccw: bool, tol: Tolerance) -> bool {
    let sign = if ccw { 1.0 } else { -1.0 };
    [orient(a, b, p), orient(b, c, p), orient(c, a, p)]
        .iter()
        .all(|&o| sign * o >= -tol.eps)
}

fn same_point(a: UvPoint, b: UvPoint, tol: Tolerance) -> bool {
    (a.u - b.u).abs() <= tol.eps && (a.v - b.v).abs() <= tol.eps
}

/// Distance from `p` to the line through `a` and `b`.
fn distance_to_line(p: UvPoint, a: UvPoint, b: UvPoint) -> f64 {
    let (du, dv) = (b.u - a.u, b.v - a.v);
    let len = du.hypot(dv);
    if !len.is_finite() || len == 0.0 {
        return (p.u - a.u).hypot(p.v - a.v);
    }
    orient(a, b, p).abs() / len
}
