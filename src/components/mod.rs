//! Componenten en de registry waarmee ze op GUID of naam worden gevonden.
//!
//! Een component leest zijn invoer positioneel uit een slice van [`Value`]s
//! en schrijft zijn resultaten per pinnickname naar een [`OutputMap`], zoals
//! Grasshopper dat doet.

use std::collections::{BTreeMap, HashMap};

use crate::graph::value::Value;

pub mod coerce;
pub mod curtain_wall;
pub mod floor_plate;

/// Pinnickname → waarde.
pub type OutputMap = BTreeMap<String, Value>;

pub type ComponentResult = Result<OutputMap, ComponentError>;

/// Fout tijdens het evalueren van een component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ComponentError {
    message: String,
}

impl ComponentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub trait Component {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult;
}

/// GUIDs en namen waaronder een component bekend is.
#[derive(Debug, Clone, Copy)]
pub struct Registration<T> {
    pub guids: &'static [&'static str],
    pub names: &'static [&'static str],
    pub kind: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    CurtainWall(curtain_wall::ComponentImpl),
    FloorPlate(floor_plate::ComponentImpl),
}

impl ComponentKind {
    pub fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        match self {
            Self::CurtainWall(component) => component.evaluate(inputs),
            Self::FloorPlate(component) => component.evaluate(inputs),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CurtainWall(_) => "Curtain Wall",
            Self::FloorPlate(_) => "Floor Plate",
        }
    }

    /// Invoerpinnen die leeg mogen blijven; de component gebruikt dan de
    /// standaardwaarde.
    #[must_use]
    pub fn optional_input_pins(&self) -> &'static [&'static str] {
        match self {
            Self::CurtainWall(_) => curtain_wall::OPTIONAL_INPUT_PINS,
            Self::FloorPlate(_) => floor_plate::OPTIONAL_INPUT_PINS,
        }
    }
}

/// Zoekt componenten op GUID, naam of nickname.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_guid: HashMap<String, ComponentKind>,
    by_name: HashMap<String, ComponentKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self {
            by_guid: HashMap::new(),
            by_name: HashMap::new(),
        };
        for registration in curtain_wall::REGISTRATIONS {
            registry.register(registration, ComponentKind::CurtainWall(registration.kind));
        }
        for registration in floor_plate::REGISTRATIONS {
            registry.register(registration, ComponentKind::FloorPlate(registration.kind));
        }
        registry
    }
}

impl ComponentRegistry {
    fn register<T>(&mut self, registration: &Registration<T>, kind: ComponentKind) {
        for guid in registration.guids {
            self.by_guid.insert(normalize_guid(guid), kind);
        }
        for name in registration.names {
            self.by_name.insert(normalize_name(name), kind);
        }
    }

    /// Een bekende GUID wint; anders wordt eerst de naam en dan de nickname
    /// geprobeerd.
    #[must_use]
    pub fn resolve(&self, guid: Option<&str>, name: Option<&str>, nickname: Option<&str>) -> Option<ComponentKind> {
        guid.and_then(|guid| self.by_guid.get(&normalize_guid(guid)))
            .or_else(|| {
                [name, nickname]
                    .into_iter()
                    .flatten()
                    .find_map(|name| self.by_name.get(&normalize_name(name)))
            })
            .copied()
    }

    /// Aantal geregistreerde componenten.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_guid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_guid.is_empty()
    }
}

fn normalize_guid(guid: &str) -> String {
    guid.trim_matches(|c| c == '{' || c == '}').to_lowercase()
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
