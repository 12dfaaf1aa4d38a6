//! Curtain Wall component: guide + maatvoering → framing en glas.

use std::collections::BTreeMap;

use crate::facade::{CurtainWallParams, generate_curtain_wall_from_value};
use crate::graph::value::Value;

use super::coerce::{coerce_count_with_default, coerce_number_with_default, solids_to_value};
use super::{Component, ComponentError, ComponentResult, Registration};

const PIN_OUTPUT_FRAMING: &str = "F";
const PIN_OUTPUT_GLAZING: &str = "G";
const PIN_OUTPUT_COUNT: &str = "N";

/// Invoerpinnen na de guide, in positionele volgorde.
const PARAMETER_PINS: [&str; 10] = ["Sp", "MW", "MD", "TH", "TD", "PT", "GI", "GG", "SH", "St"];

pub(super) const OPTIONAL_INPUT_PINS: &[&str] = &PARAMETER_PINS;

/// Markerstruct voor een component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentImpl;

pub const REGISTRATIONS: &[Registration<ComponentImpl>] = &[Registration {
    guids: &["3f2c9a14-6b1e-4d7a-9c55-1e0b7a4d2c01"],
    names: &["Curtain Wall", "CWall"],
    kind: ComponentImpl,
}];

impl Component for ComponentImpl {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        let Some(guide) = inputs.first() else {
            return Err(ComponentError::new("Curtain Wall component vereist een guide curve"));
        };

        let params = read_params(&inputs[1..])?;
        let wall = generate_curtain_wall_from_value(guide, &params)
            .map_err(|err| ComponentError::new(format!("Curtain Wall: {err}")))?;

        let counts = wall.counts();
        let mut outputs = BTreeMap::new();
        outputs.insert(PIN_OUTPUT_FRAMING.to_owned(), solids_to_value(wall.framing_solids()));
        outputs.insert(PIN_OUTPUT_GLAZING.to_owned(), solids_to_value(wall.glazing_solids()));
        outputs.insert(
            PIN_OUTPUT_COUNT.to_owned(),
            Value::List(
                [counts.mullions, counts.transoms, counts.glass]
                    .into_iter()
                    .map(|n| Value::Number(n as f64))
                    .collect(),
            ),
        );
        Ok(outputs)
    }
}

/// Leest de parameters positioneel; ontbrekende invoer valt terug op de
/// standaardwaarden.
fn read_params(inputs: &[Value]) -> Result<CurtainWallParams, ComponentError> {
    let defaults = CurtainWallParams::default();
    let number = |index: usize, default: f64| {
        coerce_number_with_default(inputs.get(index), default)
            .map_err(|err| ComponentError::new(format!("Curtain Wall pin {}: {err}", PARAMETER_PINS[index])))
    };

    Ok(CurtainWallParams {
        mullion_spacing: number(0, defaults.mullion_spacing)?,
        mullion_width: number(1, defaults.mullion_width)?,
        mullion_depth: number(2, defaults.mullion_depth)?,
        transom_height: number(3, defaults.transom_height)?,
        transom_depth: number(4, defaults.transom_depth)?,
        panel_thickness: number(5, defaults.panel_thickness)?,
        glass_inset: number(6, defaults.glass_inset)?,
        glass_gap: number(7, defaults.glass_gap)?,
        story_height: number(8, defaults.story_height)?,
        stories: coerce_count_with_default(inputs.get(9), defaults.stories)
            .map_err(|err| ComponentError::new(format!("Curtain Wall pin St: {err}")))?,
    })
}
