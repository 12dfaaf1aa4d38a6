use facade_engine::facade::{
    CurtainWallParams, ElementKind, Guide, GuideError, generate_curtain_wall, generate_curtain_wall_from_value,
    propagate_frames, resolve_guide, subdivide,
};
use facade_engine::geom::Point3;
use facade_engine::graph::value::Value;

const EPS: f64 = 1e-6;

fn guide(points: &[[f64; 3]]) -> Guide {
    Guide::new(points.iter().copied().map(Point3::from).collect()).expect("valid guide")
}

fn zigzag() -> Guide {
    guide(&[
        [0.0, 0.0, 0.0],
        [2700.0, 1200.0, 0.0],
        [5400.0, 0.0, 0.0],
        [5400.0, 0.0, 0.0],
        [1000.0, 0.0, 0.0],
        [1000.0, 3000.0, 0.0],
    ])
}

#[test]
fn bay_count_and_width_cover_the_segment() {
    for &length in &[1350.0, 1351.0, 2699.9, 4000.0, 12_345.6] {
        let layout = subdivide(length, 1350.0);
        let expected = (length / 1350.0_f64).floor();
        assert!(expected >= 1.0);
        assert_eq!(layout.count, expected as usize, "length {length}");
        assert!((layout.width * layout.count as f64 - length).abs() <= EPS);
    }
}

#[test]
fn lateral_axis_never_flips_between_segments() {
    let frames = propagate_frames(&zigzag());
    assert_eq!(frames.len(), 4);
    for pair in frames.windows(2) {
        assert!(
            pair[0].lateral.dot(pair[1].lateral) >= 0.0,
            "segments {} and {} flip",
            pair[0].index,
            pair[1].index
        );
    }
}

#[test]
fn four_metre_wall_has_three_mullions_per_story() {
    let params = CurtainWallParams {
        stories: 3,
        ..CurtainWallParams::default()
    };
    let wall = generate_curtain_wall(&guide(&[[0.0, 0.0, 0.0], [4000.0, 0.0, 0.0]]), &params).unwrap();

    for story in 0..3 {
        let mullions: Vec<f64> = wall
            .story_elements(story)
            .filter(|e| e.kind == ElementKind::Mullion)
            .map(|e| e.prism.plane.origin.x)
            .collect();
        assert_eq!(mullions, vec![0.0, 2000.0, 4000.0]);
    }
}

#[test]
fn glass_fits_inside_the_clear_opening() {
    let params = CurtainWallParams::default();
    let g = zigzag();
    let wall = generate_curtain_wall(&g, &params).unwrap();
    let frames = propagate_frames(&g);
    assert!(!wall.glazing.is_empty());

    let clear_height = params.story_height - 2.0 * params.transom_height - 2.0 * params.glass_gap;
    for glass in &wall.glazing {
        let frame = frames.iter().find(|f| f.index == glass.segment).unwrap();
        let layout = subdivide(frame.length, params.mullion_spacing);
        let clear_span = layout.width - params.mullion_width;

        assert!(glass.prism.size_x <= clear_span - 2.0 * params.glass_gap + EPS);
        assert!((glass.prism.size_x - (clear_span - 2.0 * params.glass_gap)).abs() <= EPS);
        assert!((glass.prism.height - clear_height).abs() <= EPS);

        let bbox = glass.solid.bbox().unwrap();
        assert!(bbox.min.z >= params.transom_height + params.glass_gap - EPS);
        assert!(bbox.max.z <= params.story_height - params.transom_height - params.glass_gap + EPS);
    }
}

#[test]
fn no_clear_height_keeps_only_mullions() {
    let params = CurtainWallParams {
        transom_height: 1600.0,
        ..CurtainWallParams::default()
    };
    let wall = generate_curtain_wall(&guide(&[[0.0, 0.0, 0.0], [4000.0, 0.0, 0.0]]), &params).unwrap();
    let counts = wall.counts();
    assert_eq!(counts.mullions, 3);
    assert_eq!(counts.transoms, 0);
    assert_eq!(counts.glass, 0);
    assert!(wall.glazing.is_empty());
}

#[test]
fn narrow_bay_keeps_its_mullions() {
    let params = CurtainWallParams {
        mullion_spacing: 50.0,
        ..CurtainWallParams::default()
    };
    let wall = generate_curtain_wall(&guide(&[[0.0, 0.0, 0.0], [50.0, 0.0, 0.0]]), &params).unwrap();
    let counts = wall.counts();
    assert_eq!(counts.mullions, 2);
    assert_eq!(counts.transoms + counts.glass, 0);
}

#[test]
fn stories_replicate_with_exact_offsets() {
    let single = generate_curtain_wall(&zigzag(), &CurtainWallParams::default()).unwrap();
    let params = CurtainWallParams {
        stories: 3,
        ..CurtainWallParams::default()
    };
    let stacked = generate_curtain_wall(&zigzag(), &params).unwrap();

    let one = single.counts();
    let all = stacked.counts();
    assert_eq!(all.mullions, 3 * one.mullions);
    assert_eq!(all.transoms, 3 * one.transoms);
    assert_eq!(all.glass, 3 * one.glass);

    let base: Vec<_> = single.elements().collect();
    for story in 0..3 {
        let offset = params.story_height * story as f64;
        let elements: Vec<_> = stacked.story_elements(story).collect();
        assert_eq!(elements.len(), base.len());
        for (element, reference) in elements.iter().zip(&base) {
            assert_eq!(element.kind, reference.kind);
            let a = element.solid.bbox().unwrap();
            let b = reference.solid.bbox().unwrap();
            assert!((a.min.z - b.min.z - offset).abs() <= EPS);
            assert!((a.max.z - b.max.z - offset).abs() <= EPS);
            assert!((a.min.x - b.min.x).abs() <= EPS);
            assert!((a.max.y - b.max.y).abs() <= EPS);
        }
    }
}

#[test]
fn coincident_points_yield_nothing() {
    let wall = generate_curtain_wall(
        &guide(&[[10.0, 20.0, 0.0], [10.0, 20.0, 0.0]]),
        &CurtainWallParams::default(),
    )
    .unwrap();
    assert!(wall.is_empty());
}

#[test]
fn identical_inputs_give_identical_output() {
    let params = CurtainWallParams {
        stories: 2,
        ..CurtainWallParams::default()
    };
    let first = generate_curtain_wall(&zigzag(), &params).unwrap();
    let second = generate_curtain_wall(&zigzag(), &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_element_is_a_closed_solid() {
    let wall = generate_curtain_wall(&zigzag(), &CurtainWallParams::default()).unwrap();
    for element in wall.elements() {
        assert!(element.solid.is_closed(), "{} is open", element.kind);
        assert!(element.solid.volume() > 0.0);
        assert!((element.solid.volume() - element.prism.volume()).abs() <= 1e-3 * element.prism.volume());
    }
}

#[test]
fn guide_errors_fail_before_generation() {
    assert!(matches!(
        resolve_guide(&Value::Null),
        Err(GuideError::InvalidGuideType { .. })
    ));
    assert!(matches!(
        resolve_guide(&Value::CurveArc {
            center: [0.0, 0.0, 0.0],
            radius: 10.0,
            start_angle: 0.0,
            end_angle: 1.0,
        }),
        Err(GuideError::NotPolylineShape { .. })
    ));
    assert_eq!(
        resolve_guide(&Value::List(vec![Value::Point([1.0, 2.0, 3.0])])),
        Err(GuideError::DegenerateGuide { point_count: 1 })
    );

    let chained = Value::List(vec![
        Value::CurveLine {
            p1: [0.0, 0.0, 0.0],
            p2: [4000.0, 0.0, 0.0],
        },
        Value::CurveLine {
            p1: [4000.0, 0.0, 0.0],
            p2: [4000.0, 2700.0, 0.0],
        },
    ]);
    let wall = generate_curtain_wall_from_value(&chained, &CurtainWallParams::default()).unwrap();
    assert_eq!(wall.counts().mullions, 3 + 3);
}

#[test]
fn failed_element_kinds_are_skipped_alone() {
    let line = guide(&[[0.0, 0.0, 0.0], [4000.0, 0.0, 0.0]]);

    let params = CurtainWallParams {
        panel_thickness: 0.0,
        ..CurtainWallParams::default()
    };
    let counts = generate_curtain_wall(&line, &params).unwrap().counts();
    assert_eq!((counts.mullions, counts.transoms, counts.glass), (3, 4, 0));

    let params = CurtainWallParams {
        transom_depth: 0.0,
        ..CurtainWallParams::default()
    };
    let counts = generate_curtain_wall(&line, &params).unwrap().counts();
    assert_eq!((counts.mullions, counts.transoms, counts.glass), (3, 0, 2));

    let params = CurtainWallParams {
        glass_inset: -10.0,
        ..CurtainWallParams::default()
    };
    let counts = generate_curtain_wall(&line, &params).unwrap().counts();
    assert_eq!((counts.mullions, counts.transoms, counts.glass), (3, 4, 2));
}

#[test]
fn sloped_guide_places_elements_from_the_segment_start() {
    // Length is a little over 4000, still two bays.
    let sloped = guide(&[[0.0, 0.0, 500.0], [4000.0, 0.0, 800.0]]);
    let params = CurtainWallParams {
        stories: 2,
        ..CurtainWallParams::default()
    };
    let wall = generate_curtain_wall(&sloped, &params).unwrap();

    for story in 0..2 {
        let base = params.story_height * story as f64;
        let z_of = |kind: ElementKind| -> Vec<f64> {
            wall.story_elements(story)
                .filter(|e| e.kind == kind)
                .map(|e| e.prism.plane.origin.z - base)
                .collect()
        };

        let mullions = z_of(ElementKind::Mullion);
        assert_eq!(mullions.len(), 3);
        for (z, expected) in mullions.iter().zip([500.0, 650.0, 800.0]) {
            assert!((z - expected).abs() <= EPS, "mullion at {z}, expected {expected}");
        }

        let transoms = z_of(ElementKind::Transom);
        assert_eq!(transoms.len(), 4);
        for pair in transoms.chunks(2) {
            assert!((pair[0] - 500.0).abs() <= EPS);
            assert!((pair[1] - (500.0 + params.story_height - params.transom_height)).abs() <= EPS);
        }

        let glass = z_of(ElementKind::Glass);
        assert_eq!(glass.len(), 2);
        for z in glass {
            assert!((z - (500.0 + params.transom_height + params.glass_gap)).abs() <= EPS);
        }
    }
}
