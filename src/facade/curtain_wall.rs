//! Curtain wall layout: mullions, transoms and glass per bay, per story.
//!
//! The traversal is strictly sequential within one story because the lateral
//! axis of each segment depends on the previous one. Every story restarts the
//! propagation from scratch, so stories are exact vertical copies of each
//! other.
//!
//! Degenerate sub-cases are skipped rather than reported: a zero-length
//! segment yields no elements, a bay too narrow or a story too short for
//! glazing still yields its mullion, and a solid that fails to build is logged
//! and left out.

use std::fmt;

use crate::geom::{Plane, Point3, Prism, Solid, Tolerance, Vec3};
use crate::graph::value::Value;

use super::bays::{Bay, subdivide};
use super::frame::{FramePropagator, SegmentFrame};
use super::guide::{Guide, GuideError, resolve_guide};
use super::params::CurtainWallParams;

/// Clearances at or below this value are treated as non-positive.
pub const LAYOUT_EPSILON: Tolerance = Tolerance::LOOSE;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurtainWallError {
    #[error(transparent)]
    Guide(#[from] GuideError),
    #[error("parameter `{name}` is invalid: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Mullion,
    Transom,
    Glass,
}

impl ElementKind {
    #[must_use]
    pub fn is_framing(self) -> bool {
        !matches!(self, Self::Glass)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mullion => "mullion",
            Self::Transom => "transom",
            Self::Glass => "glass",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated solid plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FacadeElement {
    pub kind: ElementKind,
    pub story: usize,
    /// Index of the guide segment (counting degenerate segments).
    pub segment: usize,
    /// Bay index within the segment; `None` for the end-of-segment mullion.
    pub bay: Option<usize>,
    pub prism: Prism,
    pub solid: Solid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementCounts {
    pub mullions: usize,
    pub transoms: usize,
    pub glass: usize,
}

impl ElementCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.mullions + self.transoms + self.glass
    }
}

/// Generated curtain wall: framing (mullions and transoms) and glazing, each
/// in append order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurtainWall {
    pub framing: Vec<FacadeElement>,
    pub glazing: Vec<FacadeElement>,
}

impl CurtainWall {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.framing.is_empty() && self.glazing.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for element in self.elements() {
            match element.kind {
                ElementKind::Mullion => counts.mullions += 1,
                ElementKind::Transom => counts.transoms += 1,
                ElementKind::Glass => counts.glass += 1,
            }
        }
        counts
    }

    /// Framing first, then glazing.
    pub fn elements(&self) -> impl Iterator<Item = &FacadeElement> {
        self.framing.iter().chain(self.glazing.iter())
    }

    pub fn framing_solids(&self) -> impl Iterator<Item = &Solid> {
        self.framing.iter().map(|element| &element.solid)
    }

    pub fn glazing_solids(&self) -> impl Iterator<Item = &Solid> {
        self.glazing.iter().map(|element| &element.solid)
    }

    pub fn story_elements(&self, story: usize) -> impl Iterator<Item = &FacadeElement> {
        self.elements().filter(move |element| element.story == story)
    }
}

/// Lays out a curtain wall along `guide`.
pub fn generate_curtain_wall(guide: &Guide, params: &CurtainWallParams) -> Result<CurtainWall, CurtainWallError> {
    params.validate()?;

    let mut assembler = Assembler::new(params);
    for story in 0..params.stories {
        assembler.story(guide, story);
    }

    let wall = assembler.finish();
    log::debug!(
        "curtain wall: {} stories, {} framing, {} glazing",
        params.stories,
        wall.framing.len(),
        wall.glazing.len()
    );
    Ok(wall)
}

/// Resolves `guide` and lays out a curtain wall along it.
pub fn generate_curtain_wall_from_value(
    guide: &Value,
    params: &CurtainWallParams,
) -> Result<CurtainWall, CurtainWallError> {
    let guide = resolve_guide(guide)?;
    generate_curtain_wall(&guide, params)
}

/// Lays out independent guides, in parallel when the `parallel` feature is on.
///
/// The result is ordered like `guides`.
#[cfg(feature = "parallel")]
pub fn generate_curtain_walls(
    guides: &[Guide],
    params: &CurtainWallParams,
) -> Result<Vec<CurtainWall>, CurtainWallError> {
    use rayon::prelude::*;

    params.validate()?;
    guides
        .par_iter()
        .map(|guide| generate_curtain_wall(guide, params))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn generate_curtain_walls(
    guides: &[Guide],
    params: &CurtainWallParams,
) -> Result<Vec<CurtainWall>, CurtainWallError> {
    params.validate()?;
    guides
        .iter()
        .map(|guide| generate_curtain_wall(guide, params))
        .collect()
}

struct Assembler<'a> {
    params: &'a CurtainWallParams,
    propagator: FramePropagator,
    wall: CurtainWall,
}

/// Vertical extent of the story being laid out.
#[derive(Debug, Clone, Copy)]
struct StorySlice {
    index: usize,
    z0: f64,
    z1: f64,
}

impl<'a> Assembler<'a> {
    fn new(params: &'a CurtainWallParams) -> Self {
        Self {
            params,
            propagator: FramePropagator::new(),
            wall: CurtainWall::default(),
        }
    }

    fn finish(self) -> CurtainWall {
        self.wall
    }

    fn story(&mut self, guide: &Guide, index: usize) {
        let z0 = self.params.story_base(index);
        let slice = StorySlice {
            index,
            z0,
            z1: z0 + self.params.story_height,
        };

        self.propagator.reset();
        for (segment, (start, end)) in guide.segments().enumerate() {
            match self.propagator.frame_segment(segment, start, end) {
                Some(frame) => self.segment(&frame, slice),
                None => log::debug!("story {index}: skipping degenerate segment {segment}"),
            }
        }
    }

    fn segment(&mut self, frame: &SegmentFrame, slice: StorySlice) {
        let layout = subdivide(frame.length, self.params.mullion_spacing);
        log::debug!(
            "story {}: segment {} length {:.3} -> {} bays of {:.3}",
            slice.index,
            frame.index,
            frame.length,
            layout.count,
            layout.width
        );

        for bay in layout.bays() {
            self.bay(frame, &bay, slice);
        }

        let end = lift(frame.end, slice.z0);
        self.mullion(frame, end, slice, None);
    }

    fn bay(&mut self, frame: &SegmentFrame, bay: &Bay, slice: StorySlice) {
        let p = self.params;
        let base = lift(frame.point_at(bay.start), slice.z0);
        let next = lift(frame.point_at(bay.end), slice.z0);

        self.mullion(frame, base, slice, Some(bay.index));

        let clear_span = bay.width() - p.mullion_width;
        if LAYOUT_EPSILON.is_non_positive(clear_span) {
            return;
        }
        let clear_width = clear_span - 2.0 * p.glass_gap;
        let clear_height = p.story_height - 2.0 * p.transom_height - 2.0 * p.glass_gap;
        if LAYOUT_EPSILON.is_non_positive(clear_width) || LAYOUT_EPSILON.is_non_positive(clear_height) {
            return;
        }

        let half_mullion = frame.forward.mul_scalar(p.mullion_width * 0.5);
        let mid = base.add_vec(half_mullion).midpoint(next.sub_vec(half_mullion));

        let bottom = mid.with_z(frame.start.z + slice.z0);
        let top = mid.with_z(frame.start.z + slice.z1 - p.transom_height);
        for origin in [bottom, top] {
            self.push(
                ElementKind::Transom,
                frame,
                origin,
                (clear_span, p.transom_depth, p.transom_height),
                slice,
                Some(bay.index),
            );
        }

        let glass = mid
            .sub_vec(frame.lateral.mul_scalar(p.glass_offset()))
            .with_z(frame.start.z + slice.z0 + p.transom_height + p.glass_gap);
        self.push(
            ElementKind::Glass,
            frame,
            glass,
            (clear_width, p.panel_thickness, clear_height),
            slice,
            Some(bay.index),
        );
    }

    fn mullion(&mut self, frame: &SegmentFrame, origin: Point3, slice: StorySlice, bay: Option<usize>) {
        let p = self.params;
        self.push(
            ElementKind::Mullion,
            frame,
            origin,
            (p.mullion_width, p.mullion_depth, p.story_height),
            slice,
            bay,
        );
    }

    fn push(
        &mut self,
        kind: ElementKind,
        frame: &SegmentFrame,
        origin: Point3,
        (size_x, size_y, height): (f64, f64, f64),
        slice: StorySlice,
        bay: Option<usize>,
    ) {
        let Some(plane) = element_plane(origin, frame.forward, frame.lateral) else {
            log::warn!(
                "story {}: segment {}: no plane for {kind}, skipped",
                slice.index,
                frame.index
            );
            return;
        };

        let prism = Prism::new(plane, size_x, size_y, height);
        let solid = match prism.to_solid() {
            Ok(solid) => solid,
            Err(err) => {
                log::warn!(
                    "story {}: segment {}: {kind} skipped: {err}",
                    slice.index,
                    frame.index
                );
                return;
            }
        };

        let element = FacadeElement {
            kind,
            story: slice.index,
            segment: frame.index,
            bay,
            prism,
            solid,
        };
        if kind.is_framing() {
            self.wall.framing.push(element);
        } else {
            self.wall.glazing.push(element);
        }
    }
}

fn lift(point: Point3, dz: f64) -> Point3 {
    point.add_vec(Vec3::new(0.0, 0.0, dz))
}

/// Plane with x along `forward` and y along `±lateral`, picking the sign that
/// makes the normal point up. The rectangle is centred, so the footprint does
/// not depend on the sign.
fn element_plane(origin: Point3, forward: Vec3, lateral: Vec3) -> Option<Plane> {
    let plane = Plane::from_axes(origin, forward, lateral)?;
    if plane.z_axis.z < 0.0 {
        Plane::from_axes(origin, forward, lateral.neg())
    } else {
        Some(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(length: f64) -> Guide {
        Guide::new(vec![Point3::ORIGIN, Point3::new(length, 0.0, 0.0)]).unwrap()
    }

    #[test]
    fn straight_wall_has_three_mullions_and_two_glass_panels() {
        let wall = generate_curtain_wall(&straight(4000.0), &CurtainWallParams::default()).unwrap();
        assert_eq!(
            wall.counts(),
            ElementCounts {
                mullions: 3,
                transoms: 4,
                glass: 2
            }
        );

        let kinds: Vec<ElementKind> = wall.framing.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Mullion,
                ElementKind::Transom,
                ElementKind::Transom,
                ElementKind::Mullion,
                ElementKind::Transom,
                ElementKind::Transom,
                ElementKind::Mullion,
            ]
        );
        assert_eq!(wall.framing.last().map(|e| e.bay), Some(None));
    }

    #[test]
    fn glass_sits_behind_the_guide_line() {
        let wall = generate_curtain_wall(&straight(4000.0), &CurtainWallParams::default()).unwrap();
        let glass = &wall.glazing[0];
        let tol = Tolerance::new(1e-9);

        assert!(tol.approx_eq_point3(glass.prism.plane.origin, Point3::new(1000.0, -8.0, 72.0)));
        assert!(tol.approx_eq_f64(glass.prism.size_x, 2000.0 - 60.0 - 24.0));
        assert!(tol.approx_eq_f64(glass.prism.size_y, 24.0));
        assert!(tol.approx_eq_f64(glass.prism.height, 3200.0 - 120.0 - 24.0));

        let bbox = glass.solid.bbox().unwrap();
        assert!(tol.approx_eq_f64(bbox.max.y, -8.0 + 12.0));
        assert!(tol.approx_eq_f64(bbox.min.y, -8.0 - 12.0));
    }

    #[test]
    fn transoms_are_centred_on_the_guide() {
        let wall = generate_curtain_wall(&straight(4000.0), &CurtainWallParams::default()).unwrap();
        let transoms: Vec<&FacadeElement> = wall
            .framing
            .iter()
            .filter(|e| e.kind == ElementKind::Transom)
            .collect();

        let tol = Tolerance::new(1e-9);
        assert!(tol.approx_eq_point3(transoms[0].prism.plane.origin, Point3::new(1000.0, 0.0, 0.0)));
        assert!(tol.approx_eq_point3(transoms[1].prism.plane.origin, Point3::new(1000.0, 0.0, 3140.0)));
        assert!(tol.approx_eq_f64(transoms[0].prism.size_x, 1940.0));
    }

    #[test]
    fn reversed_segment_mullions_still_rise() {
        let guide = Guide::new(vec![
            Point3::ORIGIN,
            Point3::new(2000.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ])
        .unwrap();
        let wall = generate_curtain_wall(&guide, &CurtainWallParams::default()).unwrap();

        for element in wall.elements() {
            let bbox = element.solid.bbox().unwrap();
            assert!(bbox.min.z >= -1e-9, "{} hangs below the story", element.kind);
            assert!(element.solid.is_closed());
        }
    }

    #[test]
    fn zero_stories_yields_nothing() {
        let params = CurtainWallParams {
            stories: 0,
            ..CurtainWallParams::default()
        };
        let wall = generate_curtain_wall(&straight(4000.0), &params).unwrap();
        assert!(wall.is_empty());
    }

    #[test]
    fn from_value_reports_guide_errors() {
        let err = generate_curtain_wall_from_value(&Value::Number(1.0), &CurtainWallParams::default()).unwrap_err();
        assert!(matches!(err, CurtainWallError::Guide(GuideError::InvalidGuideType { .. })));
    }

    #[test]
    fn invalid_parameters_fail_before_generation() {
        let params = CurtainWallParams {
            mullion_spacing: -5.0,
            ..CurtainWallParams::default()
        };
        assert!(matches!(
            generate_curtain_wall(&straight(4000.0), &params),
            Err(CurtainWallError::InvalidParameter { name: "mullion_spacing", .. })
        ));
    }

    #[test]
    fn many_guides_keep_input_order() {
        let guides = vec![straight(4000.0), straight(1000.0)];
        let walls = generate_curtain_walls(&guides, &CurtainWallParams::default()).unwrap();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].counts().mullions, 3);
        assert_eq!(walls[1].counts().mullions, 2);
    }
}
