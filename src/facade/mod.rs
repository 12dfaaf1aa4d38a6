//! Facade generation: curtain walls along guide polylines and layered floor
//! plates below boundary outlines.
//!
//! The pipeline for a curtain wall is guide resolution ([`resolve_guide`]),
//! frame propagation ([`FramePropagator`]), bay subdivision ([`subdivide`])
//! and assembly ([`generate_curtain_wall`]). Floor plates only need a
//! resolved [`Boundary`].

pub mod bays;
pub mod curtain_wall;
pub mod floor_plate;
pub mod frame;
pub mod guide;
pub mod params;

pub use bays::{Bay, BayLayout, subdivide};
pub use curtain_wall::{
    CurtainWall, CurtainWallError, ElementCounts, ElementKind, FacadeElement, LAYOUT_EPSILON,
    generate_curtain_wall, generate_curtain_wall_from_value, generate_curtain_walls,
};
pub use floor_plate::{
    FloorLayer, FloorPlate, FloorPlateError, FloorPlateParams, generate_floor_plate,
    generate_floor_plate_from_value,
};
pub use frame::{FALLBACK_LATERAL, FramePropagator, SEGMENT_EPSILON, SegmentFrame, propagate_frames};
pub use guide::{Boundary, BoundaryError, CURVE_SEGMENTS, Guide, GuideError, resolve_boundary, resolve_guide};
pub use params::CurtainWallParams;
