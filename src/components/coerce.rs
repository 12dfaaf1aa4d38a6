//! Hulpfuncties voor het converteren van `Value`-types.

use crate::geom::Solid;
use crate::graph::value::Value;

use super::ComponentError;

pub fn coerce_number(value: &Value) -> Result<f64, ComponentError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.trim().parse().map_err(|_| {
            ComponentError::new(format!("Kon tekst '{}' niet naar een getal converteren", s))
        }),
        Value::List(l) if l.len() == 1 => coerce_number(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een getal, kreeg {}",
            other.kind()
        ))),
    }
}

/// Geheel aantal, bijvoorbeeld verdiepingen. Breuken worden afgekapt en een
/// negatief aantal telt als nul.
pub fn coerce_count(value: &Value) -> Result<usize, ComponentError> {
    let number = coerce_number(value)?;
    if !number.is_finite() {
        return Err(ComponentError::new(format!(
            "Verwachtte een eindig aantal, kreeg {}",
            number
        )));
    }
    Ok(number.trunc().max(0.0) as usize)
}

/// Leest een optionele getalinvoer. Een ontbrekende of `Null`-invoer levert
/// `default` op; een invoer van het verkeerde type is een fout.
pub fn coerce_number_with_default(value: Option<&Value>, default: f64) -> Result<f64, ComponentError> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::List(l)) if l.is_empty() => Ok(default),
        Some(v) => coerce_number(v),
    }
}

pub fn coerce_count_with_default(value: Option<&Value>, default: usize) -> Result<usize, ComponentError> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::List(l)) if l.is_empty() => Ok(default),
        Some(v) => coerce_count(v),
    }
}

/// Zet een gesloten solid om naar een `Surface` met driehoekige faces.
#[must_use]
pub fn solid_to_value(solid: &Solid) -> Value {
    Value::Surface {
        vertices: solid.mesh.positions.clone(),
        faces: solid
            .mesh
            .indices
            .chunks_exact(3)
            .map(<[u32]>::to_vec)
            .collect(),
    }
}

#[must_use]
pub fn solids_to_value<'a>(solids: impl IntoIterator<Item = &'a Solid>) -> Value {
    Value::List(solids.into_iter().map(solid_to_value).collect())
}
