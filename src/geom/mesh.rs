use std::collections::HashMap;

use super::diagnostics::GeomMeshDiagnostics;
use super::{BBox, Point3, Tolerance, Vec3};

/// Indexed triangle mesh with optional per-vertex normals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points())
    }

    /// Signed enclosed volume, positive for a closed outward-facing mesh.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        signed_volume(&self.points(), &self.indices)
    }

    fn points(&self) -> Vec<Point3> {
        self.positions.iter().copied().map(Point3::from).collect()
    }
}

/// Turns raw triangles into a [`GeomMesh`].
///
/// Welds vertices closer than `tol`, drops zero-area triangles, counts open
/// and non-manifold edges, flips a closed mesh that faces inward and
/// computes smooth normals.
pub(crate) fn finalize_mesh(points: Vec<Point3>, indices: Vec<u32>, tol: Tolerance) -> (GeomMesh, GeomMeshDiagnostics) {
    let input_vertices = points.len();
    let (points, indices) = weld(points, indices, tol);
    let (mut indices, degenerate_triangle_count) = drop_degenerate(&points, indices, tol);
    let (open_edge_count, non_manifold_edge_count) = edge_topology(&indices);

    let mut warnings = Vec::new();
    if open_edge_count == 0 && non_manifold_edge_count == 0 && signed_volume(&points, &indices) < 0.0 {
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        warnings.push("mesh orientation flipped (outward)".to_owned());
    }
    if open_edge_count > 0 {
        warnings.push("mesh has open edges".to_owned());
    }
    if non_manifold_edge_count > 0 {
        warnings.push("mesh has non-manifold edges".to_owned());
    }

    let normals = smooth_normals(&points, &indices);
    let mesh = GeomMesh {
        positions: points.iter().map(|p| p.to_array()).collect(),
        indices,
        normals: Some(normals),
    };
    let diagnostics = GeomMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        welded_vertex_count: input_vertices - mesh.vertex_count(),
        degenerate_triangle_count,
        open_edge_count,
        non_manifold_edge_count,
        warnings,
    };
    (mesh, diagnostics)
}

/// Merges vertices that share a tolerance grid cell.
fn weld(points: Vec<Point3>, indices: Vec<u32>, tol: Tolerance) -> (Vec<Point3>, Vec<u32>) {
    let cell = |v: f64| (v / tol.eps).round() as i64;
    let mut seen: HashMap<(i64, i64, i64), u32> = HashMap::with_capacity(points.len());
    let mut welded: Vec<Point3> = Vec::with_capacity(points.len());
    let mut remap: Vec<u32> = Vec::with_capacity(points.len());

    for p in points {
        let index = if p.is_finite() {
            *seen.entry((cell(p.x), cell(p.y), cell(p.z))).or_insert_with(|| {
                welded.push(p);
                (welded.len() - 1) as u32
            })
        } else {
            welded.push(p);
            (welded.len() - 1) as u32
        };
        remap.push(index);
    }

    let indices = indices
        .into_iter()
        .map(|i| remap.get(i as usize).copied().unwrap_or(i))
        .collect();
    (welded, indices)
}

fn drop_degenerate(points: &[Point3], indices: Vec<u32>, tol: Tolerance) -> (Vec<u32>, usize) {
    let min_area2 = tol.eps_squared() * tol.eps_squared();
    let mut kept = Vec::with_capacity(indices.len());
    let mut dropped = 0usize;
    for tri in indices.chunks_exact(3) {
        let corners = (
            points.get(tri[0] as usize),
            points.get(tri[1] as usize),
            points.get(tri[2] as usize),
        );
        let usable = match corners {
            (Some(a), Some(b), Some(c)) => {
                let area2 = b.sub_point(*a).cross(c.sub_point(*a)).length_squared();
                area2.is_finite() && area2 > min_area2
            }
            _ => false,
        };
        if usable {
            kept.extend_from_slice(tri);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

/// `(open, non_manifold)` undirected edge counts.
fn edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            *uses.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    let open = uses.values().filter(|&&n| n == 1).count();
    let non_manifold = uses.values().filter(|&&n| n > 2).count();
    (open, non_manifold)
}

fn signed_volume(points: &[Point3], indices: &[u32]) -> f64 {
    let sixfold: f64 = indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let a = points.get(tri[0] as usize)?.to_vec3();
            let b = points.get(tri[1] as usize)?.to_vec3();
            let c = points.get(tri[2] as usize)?.to_vec3();
            Some(a.dot(b.cross(c)))
        })
        .sum();
    sixfold / 6.0
}

fn smooth_normals(points: &[Point3], indices: &[u32]) -> Vec<[f64; 3]> {
    let mut sums = vec![Vec3::ZERO; points.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| points[i as usize]);
        let face = b.sub_point(a).cross(c.sub_point(a));
        for &i in tri {
            sums[i as usize] = sums[i as usize].add(face);
        }
    }
    sums.into_iter()
        .map(|n| n.normalized().unwrap_or(Vec3::Z).to_array())
        .collect()
}
