//! Selector descriptor classification.
//!
//! A raw selector prop is inspected exactly once and turned into a
//! [`Descriptor`]. Inspection order is fixed: absent, function, mapping,
//! sequence, literal. The first match wins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::projector::Projector;
use crate::core::value::Value;

/// Classified selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Descriptor {
    /// The selector key was not supplied at all.
    #[default]
    Absent,
    Projector(Projector),
    /// Keyed mapping; `Value::Function` entries are projectors.
    Mapping(BTreeMap<String, Value>),
    /// Ordered list; `Value::Function` elements are projectors.
    Sequence(Vec<Value>),
    /// Used verbatim (including a supplied `Undefined`).
    Literal(Value),
}

/// Shape tag of a [`Descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Absent,
    Projector,
    Mapping,
    Sequence,
    Literal,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Absent => "absent",
            Shape::Projector => "projector",
            Shape::Mapping => "mapping",
            Shape::Sequence => "sequence",
            Shape::Literal => "literal",
        }
    }
}

impl Descriptor {
    /// Classify a raw selector. `None` means the key was not supplied.
    pub fn classify(raw: Option<Value>) -> Self {
        let Some(raw) = raw else {
            return Descriptor::Absent;
        };
        match raw {
            Value::Function(projector) => Descriptor::Projector(projector),
            Value::Mapping(entries) => Descriptor::Mapping(entries),
            Value::Sequence(items) => Descriptor::Sequence(items),
            literal => Descriptor::Literal(literal),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Descriptor::Absent => Shape::Absent,
            Descriptor::Projector(_) => Shape::Projector,
            Descriptor::Mapping(_) => Shape::Mapping,
            Descriptor::Sequence(_) => Shape::Sequence,
            Descriptor::Literal(_) => Shape::Literal,
        }
    }
}

impl From<Projector> for Descriptor {
    fn from(projector: Projector) -> Self {
        Descriptor::Projector(projector)
    }
}
