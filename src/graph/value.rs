//! De `Value`-handle waarmee componenten invoer ontvangen en resultaten
//! teruggeven.

use core::fmt;

/// Een dynamisch getypeerde waarde op een componentpin.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Ontbrekende invoer of een leeg resultaat.
    Null,
    Number(f64),
    Boolean(bool),
    Text(String),
    Point([f64; 3]),
    Vector([f64; 3]),
    CurveLine { p1: [f64; 3], p2: [f64; 3] },
    /// Boog in het horizontale vlak door `center`; hoeken in radialen.
    CurveArc {
        center: [f64; 3],
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Volledige cirkel in het horizontale vlak door `center`.
    CurveCircle { center: [f64; 3], radius: f64 },
    /// Mesh als hoekpunten plus faces met indices in `vertices`.
    Surface {
        vertices: Vec<[f64; 3]>,
        faces: Vec<Vec<u32>>,
    },
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Text(_) => ValueKind::Text,
            Self::Point(_) => ValueKind::Point,
            Self::Vector(_) => ValueKind::Vector,
            Self::CurveLine { .. } => ValueKind::CurveLine,
            Self::CurveArc { .. } => ValueKind::CurveArc,
            Self::CurveCircle { .. } => ValueKind::CurveCircle,
            Self::Surface { .. } => ValueKind::Surface,
            Self::List(_) => ValueKind::List,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Geeft de hoekpunten en faces van een `Surface`.
    pub fn expect_surface(&self) -> Result<(&[[f64; 3]], &[Vec<u32>]), ValueError> {
        match self {
            Self::Surface { vertices, faces } => Ok((vertices, faces)),
            other => Err(ValueError::new("Surface", other.kind())),
        }
    }

    pub fn expect_list(&self) -> Result<&[Value], ValueError> {
        match self {
            Self::List(values) => Ok(values),
            other => Err(ValueError::new("List", other.kind())),
        }
    }
}

/// Een `Value` had een ander type dan verwacht.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("verwachtte type `{expected}` maar kreeg `{found}`")]
pub struct ValueError {
    pub expected: &'static str,
    pub found: ValueKind,
}

impl ValueError {
    #[must_use]
    pub fn new(expected: &'static str, found: ValueKind) -> Self {
        Self { expected, found }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Number,
    Boolean,
    Text,
    Point,
    Vector,
    CurveLine,
    CurveArc,
    CurveCircle,
    Surface,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueError, ValueKind};

    #[test]
    fn surface_is_borrowed() {
        let value = Value::Surface {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![vec![0, 1, 2]],
        };
        let (vertices, faces) = value.expect_surface().unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(faces, &[vec![0, 1, 2]]);
    }

    #[test]
    fn wrong_type_names_both_kinds() {
        let err = Value::Point([0.0, 0.0, 0.0]).expect_list().unwrap_err();
        assert_eq!(err, ValueError::new("List", ValueKind::Point));
        assert_eq!(err.to_string(), "verwachtte type `List` maar kreeg `Point`");
        assert_eq!(
            Value::CurveCircle {
                center: [0.0, 0.0, 0.0],
                radius: 1.0
            }
            .kind()
            .to_string(),
            "CurveCircle"
        );
    }

    #[test]
    fn null_and_lists() {
        assert!(Value::Null.is_null());
        let value = Value::List(vec![Value::Number(1.0)]);
        assert_eq!(value.expect_list().unwrap().len(), 1);
    }
}
