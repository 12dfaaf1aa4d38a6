//! Per-segment local frames with lateral sign continuity.

use crate::geom::{Point3, Tolerance, Vec3};

use super::guide::Guide;

/// Segments at or below this length produce no frame.
pub const SEGMENT_EPSILON: Tolerance = Tolerance::LOOSE;

/// Lateral axis used when the segment is (nearly) vertical.
pub const FALLBACK_LATERAL: Vec3 = Vec3::Y;

const WORLD_UP: Vec3 = Vec3::Z;

/// Local frame of one non-degenerate guide segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFrame {
    /// Index of the segment within the guide (degenerate segments still count).
    pub index: usize,
    pub start: Point3,
    pub end: Point3,
    pub length: f64,
    /// Unit direction from `start` to `end`.
    pub forward: Vec3,
    /// Unit horizontal axis orthogonal to `forward`.
    pub lateral: Vec3,
}

impl SegmentFrame {
    /// Point at distance `d` along the segment.
    #[must_use]
    pub fn point_at(&self, d: f64) -> Point3 {
        self.start.add_vec(self.forward.mul_scalar(d))
    }
}

/// Threads the previous lateral axis through one guide traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePropagator {
    previous_lateral: Option<Vec3>,
}

impl FramePropagator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the carried lateral axis. Call at the start of every traversal.
    pub fn reset(&mut self) {
        self.previous_lateral = None;
    }

    #[must_use]
    pub fn previous_lateral(&self) -> Option<Vec3> {
        self.previous_lateral
    }

    /// Computes the frame for `start → end`, or `None` for a degenerate segment.
    ///
    /// Degenerate segments leave the carried lateral axis untouched.
    pub fn frame_segment(&mut self, index: usize, start: Point3, end: Point3) -> Option<SegmentFrame> {
        let delta = end.sub_point(start);
        let length = delta.length();
        if !length.is_finite() || SEGMENT_EPSILON.is_non_positive(length) {
            return None;
        }
        let forward = delta.div_scalar(length);

        let candidate = WORLD_UP.cross(forward);
        let mut lateral = if Tolerance::ZERO_LENGTH.is_zero_vec3(candidate) {
            FALLBACK_LATERAL
        } else {
            candidate.normalized().unwrap_or(FALLBACK_LATERAL)
        };

        if let Some(previous) = self.previous_lateral {
            if lateral.dot(previous) < 0.0 {
                lateral = lateral.neg();
            }
        }
        self.previous_lateral = Some(lateral);

        Some(SegmentFrame {
            index,
            start,
            end,
            length,
            forward,
            lateral,
        })
    }
}

/// Frames for every non-degenerate segment of `guide`, from a fresh state.
#[must_use]
pub fn propagate_frames(guide: &Guide) -> Vec<SegmentFrame> {
    let mut propagator = FramePropagator::new();
    guide
        .segments()
        .enumerate()
        .filter_map(|(index, (start, end))| propagator.frame_segment(index, start, end))
        .collect()
}
