//! Floor Plate component: contour + laagdiktes → vier gestapelde lagen.

use std::collections::BTreeMap;

use crate::facade::{FloorLayer, FloorPlateParams, generate_floor_plate_from_value};
use crate::graph::value::Value;

use super::coerce::{coerce_number_with_default, solid_to_value};
use super::{Component, ComponentError, ComponentResult, Registration};

const PARAMETER_PINS: [&str; 5] = ["E", "Fin", "Scr", "Ins", "Str"];

pub(super) const OPTIONAL_INPUT_PINS: &[&str] = &PARAMETER_PINS;

/// Outputpin per laag; een laag die niet gebouwd kon worden levert `Null`.
pub fn output_pin(layer: FloorLayer) -> &'static str {
    match layer {
        FloorLayer::Finish => "F",
        FloorLayer::Screed => "S",
        FloorLayer::Insulation => "I",
        FloorLayer::Structural => "C",
    }
}

/// Markerstruct voor een component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentImpl;

pub const REGISTRATIONS: &[Registration<ComponentImpl>] = &[Registration {
    guids: &["8d41e6b0-2c7f-4a93-b1d8-5f60c3e9a712"],
    names: &["Floor Plate", "Floor"],
    kind: ComponentImpl,
}];

impl Component for ComponentImpl {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        let Some(boundary) = inputs.first() else {
            return Err(ComponentError::new("Floor Plate component vereist een gesloten contour"));
        };

        let defaults = FloorPlateParams::default();
        let values = [
            defaults.elevation,
            defaults.finish_thickness,
            defaults.screed_thickness,
            defaults.insulation_thickness,
            defaults.structural_thickness,
        ];
        let mut read = [0.0; 5];
        for (index, (slot, default)) in read.iter_mut().zip(values).enumerate() {
            *slot = coerce_number_with_default(inputs.get(index + 1), default)
                .map_err(|err| ComponentError::new(format!("Floor Plate pin {}: {err}", PARAMETER_PINS[index])))?;
        }
        let [elevation, finish_thickness, screed_thickness, insulation_thickness, structural_thickness] = read;
        let params = FloorPlateParams {
            elevation,
            finish_thickness,
            screed_thickness,
            insulation_thickness,
            structural_thickness,
        };

        let plate = generate_floor_plate_from_value(boundary, &params)
            .map_err(|err| ComponentError::new(format!("Floor Plate: {err}")))?;

        let mut outputs = BTreeMap::new();
        for layer in FloorLayer::ALL {
            let value = plate.layer(layer).map_or(Value::Null, solid_to_value);
            outputs.insert(output_pin(layer).to_owned(), value);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Value {
        Value::List(vec![
            Value::Point([0.0, 0.0, 0.0]),
            Value::Point([5000.0, 0.0, 0.0]),
            Value::Point([5000.0, 5000.0, 0.0]),
            Value::Point([0.0, 5000.0, 0.0]),
        ])
    }

    #[test]
    fn every_layer_gets_a_pin() {
        let outputs = ComponentImpl.evaluate(&[square()]).unwrap();
        assert_eq!(outputs.len(), 4);
        for pin in ["F", "S", "I", "C"] {
            let (vertices, faces) = outputs[pin].expect_surface().unwrap();
            assert_eq!(vertices.len(), 8);
            assert_eq!(faces.len(), 12);
        }
    }

    #[test]
    fn zero_thickness_layer_is_null() {
        let inputs = [square(), Value::Null, Value::Null, Value::Number(0.0)];
        let outputs = ComponentImpl.evaluate(&inputs).unwrap();
        assert!(outputs["S"].is_null());
        assert!(!outputs["C"].is_null());
    }

    #[test]
    fn circle_boundary_is_accepted() {
        let circle = Value::CurveCircle {
            center: [0.0, 0.0, 3200.0],
            radius: 2000.0,
        };
        let outputs = ComponentImpl.evaluate(&[circle]).unwrap();
        let (vertices, _) = outputs["F"].expect_surface().unwrap();
        assert!(vertices.iter().all(|v| v[2] <= 3200.0 + 1e-9));
    }

    #[test]
    fn open_input_is_rejected() {
        let err = ComponentImpl.evaluate(&[Value::Number(1.0)]).unwrap_err();
        assert!(err.message().starts_with("Floor Plate:"));
        assert!(ComponentImpl.evaluate(&[]).is_err());
    }
}
