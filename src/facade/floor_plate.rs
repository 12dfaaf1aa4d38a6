//! Layered floor slab below a boundary outline.
//!
//! Starting at `elevation`, each layer is extruded downward by its thickness
//! and the next layer starts where the previous one ended. Layer order, top
//! to bottom: finish, screed, insulation, structural.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{ExtrusionCaps, Point3, Solid, Vec3, extrude_polyline};
use crate::graph::value::Value;

use super::guide::{Boundary, BoundaryError, resolve_boundary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorLayer {
    Finish,
    Screed,
    Insulation,
    Structural,
}

impl FloorLayer {
    /// Top to bottom.
    pub const ALL: [Self; 4] = [Self::Finish, Self::Screed, Self::Insulation, Self::Structural];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Finish => "finish",
            Self::Screed => "screed",
            Self::Insulation => "insulation",
            Self::Structural => "structural",
        }
    }
}

impl fmt::Display for FloorLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlateParams {
    /// Top of the finish layer.
    pub elevation: f64,
    pub finish_thickness: f64,
    pub screed_thickness: f64,
    pub insulation_thickness: f64,
    pub structural_thickness: f64,
}

impl Default for FloorPlateParams {
    fn default() -> Self {
        Self {
            elevation: 0.0,
            finish_thickness: 15.0,
            screed_thickness: 70.0,
            insulation_thickness: 30.0,
            structural_thickness: 250.0,
        }
    }
}

impl FloorPlateParams {
    #[must_use]
    pub fn thickness(&self, layer: FloorLayer) -> f64 {
        match layer {
            FloorLayer::Finish => self.finish_thickness,
            FloorLayer::Screed => self.screed_thickness,
            FloorLayer::Insulation => self.insulation_thickness,
            FloorLayer::Structural => self.structural_thickness,
        }
    }

    #[must_use]
    pub fn total_thickness(&self) -> f64 {
        FloorLayer::ALL.iter().map(|&layer| self.thickness(layer)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FloorPlateError {
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
}

/// The generated layers. A layer that could not be built is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorPlate {
    pub layers: BTreeMap<FloorLayer, Solid>,
}

impl FloorPlate {
    #[must_use]
    pub fn layer(&self, layer: FloorLayer) -> Option<&Solid> {
        self.layers.get(&layer)
    }

    /// Layers in top-to-bottom order.
    pub fn iter(&self) -> impl Iterator<Item = (FloorLayer, &Solid)> {
        FloorLayer::ALL
            .into_iter()
            .filter_map(|layer| self.layers.get(&layer).map(|solid| (layer, solid)))
    }
}

pub fn generate_floor_plate(boundary: &Boundary, params: &FloorPlateParams) -> Result<FloorPlate, FloorPlateError> {
    let named = [
        ("elevation", params.elevation),
        ("finish_thickness", params.finish_thickness),
        ("screed_thickness", params.screed_thickness),
        ("insulation_thickness", params.insulation_thickness),
        ("structural_thickness", params.structural_thickness),
    ];
    if let Some(&(name, value)) = named.iter().find(|(_, value)| !value.is_finite()) {
        return Err(FloorPlateError::NonFiniteParameter { name, value });
    }

    let mut plate = FloorPlate::default();
    let mut z = params.elevation;
    for layer in FloorLayer::ALL {
        let thickness = params.thickness(layer);
        let profile: Vec<Point3> = boundary
            .points()
            .iter()
            .map(|&p| p.add_vec(Vec3::new(0.0, 0.0, z)))
            .collect();

        match extrude_polyline(&profile, Vec3::new(0.0, 0.0, -thickness), ExtrusionCaps::BOTH) {
            Ok((mesh, diagnostics)) => {
                plate.layers.insert(layer, Solid::new(mesh, diagnostics));
            }
            Err(err) => log::warn!("floor plate: {layer} layer skipped: {err}"),
        }
        z -= thickness;
    }

    log::debug!("floor plate: {} of 4 layers", plate.layers.len());
    Ok(plate)
}

/// Resolves `boundary` and builds the floor plate below it.
pub fn generate_floor_plate_from_value(
    boundary: &Value,
    params: &FloorPlateParams,
) -> Result<FloorPlate, FloorPlateError> {
    let boundary = resolve_boundary(boundary)?;
    generate_floor_plate(&boundary, params)
}
