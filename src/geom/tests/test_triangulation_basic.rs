use crate::geom::{Tolerance, TriangulationError, UvPoint, signed_area, triangulate_polygon};

fn triangle_area(ring: &[UvPoint], tri: &[u32]) -> f64 {
    let a = ring[tri[0] as usize];
    let b = ring[tri[1] as usize];
    let c = ring[tri[2] as usize];
    0.5 * ((b.u - a.u) * (c.v - a.v) - (b.v - a.v) * (c.u - a.u))
}

#[test]
fn triangulate_concave_l_shape_matches_area() {
    let tol = Tolerance::new(1e-9);
    let ring = vec![
        UvPoint::new(0.0, 0.0),
        UvPoint::new(3.0, 0.0),
        UvPoint::new(3.0, 1.0),
        UvPoint::new(1.0, 1.0),
        UvPoint::new(1.0, 3.0),
        UvPoint::new(0.0, 3.0),
    ];

    let indices = triangulate_polygon(&ring, tol).unwrap();
    assert_eq!(indices.len(), 4 * 3);
    assert!(indices.iter().all(|&i| (i as usize) < ring.len()));

    let total: f64 = indices.chunks_exact(3).map(|tri| triangle_area(&ring, tri)).sum();
    assert!((total - signed_area(&ring)).abs() <= 1e-9);
    assert!((total - 5.0).abs() <= 1e-9);
}

#[test]
fn clockwise_input_yields_counter_clockwise_triangles() {
    let tol = Tolerance::new(1e-9);
    let ring = vec![
        UvPoint::new(0.0, 0.0),
        UvPoint::new(0.0, 2.0),
        UvPoint::new(2.0, 2.0),
        UvPoint::new(2.0, 0.0),
    ];
    assert!(signed_area(&ring) < 0.0);

    let indices = triangulate_polygon(&ring, tol).unwrap();
    assert_eq!(indices.len(), 6);
    for tri in indices.chunks_exact(3) {
        assert!(triangle_area(&ring, tri) > 0.0);
    }
}

#[test]
fn collinear_vertices_are_skipped() {
    let tol = Tolerance::new(1e-9);
    let ring = vec![
        UvPoint::new(0.0, 0.0),
        UvPoint::new(1.0, 0.0),
        UvPoint::new(2.0, 0.0),
        UvPoint::new(2.0, 2.0),
        UvPoint::new(0.0, 2.0),
    ];

    let indices = triangulate_polygon(&ring, tol).unwrap();
    assert_eq!(indices.len(), 6);
    assert!(!indices.contains(&1));
}

#[test]
fn degenerate_polygons_are_rejected() {
    let tol = Tolerance::new(1e-9);
    let flat = vec![
        UvPoint::new(0.0, 0.0),
        UvPoint::new(1.0, 0.0),
        UvPoint::new(2.0, 0.0),
    ];
    assert_eq!(triangulate_polygon(&flat, tol), Err(TriangulationError::Degenerate));
    assert_eq!(triangulate_polygon(&flat[..2], tol), Err(TriangulationError::Degenerate));

    let nan = vec![
        UvPoint::new(0.0, 0.0),
        UvPoint::new(f64::NAN, 0.0),
        UvPoint::new(0.0, 1.0),
    ];
    assert_eq!(triangulate_polygon(&nan, tol), Err(TriangulationError::NonFinite));
}
