//! Resolving opaque curve handles into polylines.
//!
//! The curtain wall only understands straight-segment chains, so anything
//! curved is rejected up front with [`GuideError::NotPolylineShape`]. The
//! floor plate boundary is more forgiving and tessellates arcs and circles.

use std::f64::consts::TAU;

use crate::geom::{Point3, Tolerance};
use crate::graph::value::{Value, ValueKind};

/// Fixed tessellation used for circular boundaries.
pub const CURVE_SEGMENTS: usize = 32;

/// Distance under which chained line endpoints are considered connected.
const CHAIN_TOLERANCE: Tolerance = Tolerance::LOOSE;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GuideError {
    #[error("guide must be curve-like, got {found}")]
    InvalidGuideType { found: ValueKind },
    #[error("guide cannot be represented as a polyline: {reason}")]
    NotPolylineShape { reason: &'static str },
    #[error("guide needs at least 2 points, got {point_count}")]
    DegenerateGuide { point_count: usize },
    #[error("guide contains non-finite coordinates")]
    NonFiniteGuide,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundaryError {
    #[error("floor boundary must be curve-like, got {found}")]
    InvalidBoundaryType { found: ValueKind },
    #[error("floor boundary is not a single connected curve")]
    BrokenChain,
    #[error("floor boundary needs at least 3 distinct points, got {point_count}")]
    DegenerateBoundary { point_count: usize },
    #[error("floor boundary contains non-finite coordinates")]
    NonFiniteBoundary,
}

/// An ordered open polyline with at least two vertices.
///
/// Consecutive vertices may coincide; the layout skips those segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    points: Vec<Point3>,
}

impl Guide {
    pub fn new(points: Vec<Point3>) -> Result<Self, GuideError> {
        if points.len() < 2 {
            return Err(GuideError::DegenerateGuide {
                point_count: points.len(),
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GuideError::NonFiniteGuide);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Consecutive `(start, end)` vertex pairs, including degenerate ones.
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// A closed planar outline, stored without the closing duplicate vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    points: Vec<Point3>,
}

impl Boundary {
    pub fn new(points: Vec<Point3>) -> Result<Self, BoundaryError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(BoundaryError::NonFiniteBoundary);
        }

        let mut distinct: Vec<Point3> = Vec::with_capacity(points.len());
        for p in points {
            if distinct.last().is_some_and(|prev| CHAIN_TOLERANCE.approx_eq_point3(*prev, p)) {
                continue;
            }
            distinct.push(p);
        }
        if distinct.len() > 1 {
            if let (Some(first), Some(last)) = (distinct.first(), distinct.last()) {
                if CHAIN_TOLERANCE.approx_eq_point3(*first, *last) {
                    distinct.pop();
                }
            }
        }

        if distinct.len() < 3 {
            return Err(BoundaryError::DegenerateBoundary {
                point_count: distinct.len(),
            });
        }
        Ok(Self { points: distinct })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ShapeError {
    NotCurve(ValueKind),
    Curved,
    BrokenChain,
    NonFinite,
}

/// Resolves a curve-like value into a [`Guide`].
pub fn resolve_guide(value: &Value) -> Result<Guide, GuideError> {
    let points = polyline_points(value, false).map_err(|err| match err {
        ShapeError::NotCurve(found) => GuideError::InvalidGuideType { found },
        ShapeError::Curved => GuideError::NotPolylineShape {
            reason: "arcs and circles are not supported",
        },
        ShapeError::BrokenChain => GuideError::NotPolylineShape {
            reason: "line segments do not form a connected chain",
        },
        ShapeError::NonFinite => GuideError::NonFiniteGuide,
    })?;
    Guide::new(points)
}

/// Resolves a curve-like value into a closed floor [`Boundary`].
pub fn resolve_boundary(value: &Value) -> Result<Boundary, BoundaryError> {
    let points = polyline_points(value, true).map_err(|err| match err {
        ShapeError::NotCurve(found) => BoundaryError::InvalidBoundaryType { found },
        ShapeError::BrokenChain | ShapeError::Curved => BoundaryError::BrokenChain,
        ShapeError::NonFinite => BoundaryError::NonFiniteBoundary,
    })?;
    Boundary::new(points)
}

fn polyline_points(value: &Value, allow_curved: bool) -> Result<Vec<Point3>, ShapeError> {
    match value {
        Value::CurveLine { p1, p2 } => Ok(vec![Point3::from(*p1), Point3::from(*p2)]),
        Value::CurveArc {
            center,
            radius,
            start_angle,
            end_angle,
        } if allow_curved => {
            if !(finite(center) && radius.is_finite() && start_angle.is_finite() && end_angle.is_finite()) {
                return Err(ShapeError::NonFinite);
            }
            Ok(tessellate_arc(Point3::from(*center), *radius, *start_angle, *end_angle))
        }
        Value::CurveCircle { center, radius } if allow_curved => {
            if !(finite(center) && radius.is_finite()) {
                return Err(ShapeError::NonFinite);
            }
            let mut points = tessellate_arc(Point3::from(*center), *radius, 0.0, TAU);
            points.pop();
            Ok(points)
        }
        Value::CurveArc { .. } | Value::CurveCircle { .. } => Err(ShapeError::Curved),
        Value::List(values) if values.iter().all(|v| matches!(v, Value::Point(_))) => Ok(values
            .iter()
            .filter_map(|v| match v {
                Value::Point(p) => Some(Point3::from(*p)),
                _ => None,
            })
            .collect()),
        Value::List(values) if values.len() == 1 => polyline_points(&values[0], allow_curved),
        Value::List(values) => join_chain(values, allow_curved),
        other => Err(ShapeError::NotCurve(other.kind())),
    }
}

/// Joins a list of curve pieces end to start.
fn join_chain(values: &[Value], allow_curved: bool) -> Result<Vec<Point3>, ShapeError> {
    let mut points: Vec<Point3> = Vec::new();
    for value in values {
        let piece = match value {
            Value::Point(_) => return Err(ShapeError::NotCurve(ValueKind::List)),
            Value::List(_) => return Err(ShapeError::NotCurve(ValueKind::List)),
            other => polyline_points(other, allow_curved)?,
        };
        let Some((first, rest)) = piece.split_first() else {
            continue;
        };
        match points.last().copied() {
            Some(last) if !CHAIN_TOLERANCE.approx_eq_point3(last, *first) => {
                return Err(ShapeError::BrokenChain);
            }
            Some(_) => points.extend_from_slice(rest),
            None => points.extend_from_slice(&piece),
        }
    }
    Ok(points)
}

fn finite(coords: &[f64; 3]) -> bool {
    coords.iter().all(|c| c.is_finite())
}

/// Samples an arc in the horizontal plane through `center`, both ends included.
/// Sweeps beyond a full turn are clamped to one turn.
fn tessellate_arc(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Vec<Point3> {
    let sweep = (end_angle - start_angle).clamp(-TAU, TAU);
    let segments = ((sweep.abs() / TAU) * CURVE_SEGMENTS as f64).ceil().max(1.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = start_angle + sweep * (i as f64 / segments as f64);
            Point3::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
                center.z,
            )
        })
        .collect()
}
