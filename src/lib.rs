#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod facade;
pub mod geom;
pub mod graph;

use std::fmt;

use components::{ComponentError, ComponentKind, ComponentRegistry, OutputMap};
use facade::{CurtainWallError, CurtainWallParams, FloorLayer, FloorPlateParams};
use graph::value::Value;
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // niets te doen zonder panic hook
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // niets te doen zonder debug logs
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

/// Laagnamen in de geometrie-export.
pub const LAYER_GUIDE: &str = "guide";
pub const LAYER_FRAMING: &str = "framing";
pub const LAYER_GLAZING: &str = "glazing";

const CURTAIN_WALL_COMPONENT: &str = "Curtain Wall";
const FLOOR_PLATE_COMPONENT: &str = "Floor Plate";

/// Eén exporteerbaar geometrie-item, gegroepeerd per laag.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum GeometryItem<'a> {
    Polyline {
        layer: String,
        points: Vec<[f64; 3]>,
    },
    Mesh {
        layer: String,
        vertices: &'a [[f64; 3]],
        faces: &'a [Vec<u32>],
    },
}

impl GeometryItem<'_> {
    #[must_use]
    pub fn layer(&self) -> &str {
        match self {
            Self::Polyline { layer, .. } | Self::Mesh { layer, .. } => layer,
        }
    }
}

/// Uitvoer van de laatste evaluatie: componentuitvoer per laag.
#[derive(Debug, Clone, Default)]
struct EvaluationResult {
    layers: Vec<(String, Value)>,
}

/// Publiek toegangspunt voor de JavaScript-kant en native gebruikers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    registry: ComponentRegistry,
    guide: Option<Value>,
    boundary: Option<Value>,
    params: CurtainWallParams,
    floor_params: FloorPlateParams,
    last_result: Option<EvaluationResult>,
    result_dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            registry: ComponentRegistry::default(),
            guide: None,
            boundary: None,
            params: CurtainWallParams::default(),
            floor_params: FloorPlateParams::default(),
            last_result: None,
            result_dirty: false,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Stel de guide in als array van `[x, y, z]`-punten.
    #[wasm_bindgen]
    pub fn set_guide_points(&mut self, points: JsValue) -> Result<(), JsValue> {
        let points: Vec<[f64; 3]> = serde_wasm_bindgen::from_value(points).map_err(to_js_error)?;
        self.set_guide(points_to_value(points));
        Ok(())
    }

    /// Stel de vloercontour in als array van `[x, y, z]`-punten.
    #[wasm_bindgen]
    pub fn set_boundary_points(&mut self, points: JsValue) -> Result<(), JsValue> {
        let points: Vec<[f64; 3]> = serde_wasm_bindgen::from_value(points).map_err(to_js_error)?;
        self.set_boundary(points_to_value(points));
        Ok(())
    }

    /// Stel (een deel van) de gevelparameters in; ontbrekende velden krijgen
    /// hun standaardwaarde.
    #[wasm_bindgen]
    pub fn set_parameters(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: CurtainWallParams = serde_wasm_bindgen::from_value(params).map_err(to_js_error)?;
        self.set_params(params).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_floor_parameters(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: FloorPlateParams = serde_wasm_bindgen::from_value(params).map_err(to_js_error)?;
        self.set_floor_params(params);
        Ok(())
    }

    /// Evalueer de gevel en de vloer met de huidige invoer.
    #[wasm_bindgen]
    pub fn evaluate(&mut self) -> Result<(), JsValue> {
        self.run().map_err(to_js_error)
    }

    /// Haalt de geometrie van de laatste evaluatie op.
    #[wasm_bindgen]
    pub fn get_geometry(&self) -> Result<JsValue, JsValue> {
        let items = self.geometry_items().map_err(|err| js_error(&err))?;
        serde_wasm_bindgen::to_value(&items).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    pub fn set_guide(&mut self, guide: Value) {
        self.guide = Some(guide);
        self.result_dirty = true;
    }

    pub fn set_boundary(&mut self, boundary: Value) {
        self.boundary = Some(boundary);
        self.result_dirty = true;
    }

    pub fn set_params(&mut self, params: CurtainWallParams) -> Result<(), CurtainWallError> {
        params.validate()?;
        self.params = params;
        self.result_dirty = true;
        Ok(())
    }

    pub fn set_floor_params(&mut self, params: FloorPlateParams) {
        self.floor_params = params;
        self.result_dirty = true;
    }

    #[must_use]
    pub fn params(&self) -> &CurtainWallParams {
        &self.params
    }

    /// Native variant van [`Engine::evaluate`].
    pub fn run(&mut self) -> Result<(), ComponentError> {
        if !self.result_dirty && self.last_result.is_some() {
            return Ok(());
        }
        if self.guide.is_none() && self.boundary.is_none() {
            return Err(ComponentError::new("er is geen guide of vloercontour ingesteld"));
        }

        let mut result = EvaluationResult::default();

        if let Some(guide) = self.guide.as_ref() {
            result.layers.push((LAYER_GUIDE.to_owned(), guide.clone()));

            let mut outputs = self.evaluate_component(CURTAIN_WALL_COMPONENT, curtain_wall_inputs(guide, &self.params))?;
            for (pin, layer) in [("F", LAYER_FRAMING), ("G", LAYER_GLAZING)] {
                let value = outputs.remove(pin).unwrap_or(Value::Null);
                result.layers.push((layer.to_owned(), value));
            }
        }

        if let Some(boundary) = self.boundary.as_ref() {
            let mut outputs =
                self.evaluate_component(FLOOR_PLATE_COMPONENT, floor_plate_inputs(boundary, &self.floor_params))?;
            for layer in FloorLayer::ALL {
                let value = outputs
                    .remove(components::floor_plate::output_pin(layer))
                    .unwrap_or(Value::Null);
                result.layers.push((floor_layer_name(layer), value));
            }
        }

        log::debug!("engine: {} lagen geëvalueerd", result.layers.len());
        self.last_result = Some(result);
        self.result_dirty = false;
        Ok(())
    }

    /// Geometrie van de laatste evaluatie, in laagvolgorde.
    pub fn geometry_items(&self) -> Result<Vec<GeometryItem<'_>>, String> {
        if self.result_dirty {
            return Err("invoer is gewijzigd sinds de laatste evaluatie".to_owned());
        }

        let mut items = Vec::new();
        if let Some(result) = self.last_result.as_ref() {
            for (layer, value) in &result.layers {
                append_geometry_value(layer, value, &mut items);
            }
        }
        Ok(items)
    }

    fn evaluate_component(&self, name: &str, inputs: Vec<Value>) -> Result<OutputMap, ComponentError> {
        let component: ComponentKind = self
            .registry
            .resolve(None, Some(name), None)
            .ok_or_else(|| ComponentError::new(format!("component `{name}` is niet geregistreerd")))?;
        component.evaluate(&inputs)
    }
}

fn floor_layer_name(layer: FloorLayer) -> String {
    format!("floor_{}", layer.name())
}

fn points_to_value(points: Vec<[f64; 3]>) -> Value {
    Value::List(points.into_iter().map(Value::Point).collect())
}

fn curtain_wall_inputs(guide: &Value, params: &CurtainWallParams) -> Vec<Value> {
    let mut inputs = Vec::with_capacity(11);
    inputs.push(guide.clone());
    inputs.extend(params.dimensions().into_iter().map(|(_, value)| Value::Number(value)));
    inputs.push(Value::Number(params.stories as f64));
    inputs
}

fn floor_plate_inputs(boundary: &Value, params: &FloorPlateParams) -> Vec<Value> {
    vec![
        boundary.clone(),
        Value::Number(params.elevation),
        Value::Number(params.finish_thickness),
        Value::Number(params.screed_thickness),
        Value::Number(params.insulation_thickness),
        Value::Number(params.structural_thickness),
    ]
}

fn append_geometry_value<'a>(layer: &str, value: &'a Value, items: &mut Vec<GeometryItem<'a>>) {
    match value {
        Value::CurveLine { p1, p2 } => {
            items.push(GeometryItem::Polyline {
                layer: layer.to_owned(),
                points: vec![*p1, *p2],
            });
        }
        Value::Surface { vertices, faces } => {
            items.push(GeometryItem::Mesh {
                layer: layer.to_owned(),
                vertices,
                faces,
            });
        }
        Value::List(values) => {
            if let Some(polyline) = list_as_polyline(values) {
                items.push(GeometryItem::Polyline {
                    layer: layer.to_owned(),
                    points: polyline,
                });
            } else {
                for entry in values {
                    append_geometry_value(layer, entry, items);
                }
            }
        }
        Value::Null
        | Value::Number(_)
        | Value::Boolean(_)
        | Value::Text(_)
        | Value::Point(_)
        | Value::Vector(_)
        | Value::CurveArc { .. }
        | Value::CurveCircle { .. } => {}
    }
}

fn list_as_polyline(values: &[Value]) -> Option<Vec<[f64; 3]>> {
    if values.len() < 2 {
        return None;
    }

    let mut points = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Point(point) => points.push(*point),
            _ => return None,
        }
    }

    Some(points)
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
