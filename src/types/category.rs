//! Categorical lookup tables

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LustreError, Result};

/// An ordered `label → code` table for one categorical attribute.
///
/// Codes are the integers the consumed model was trained with. Lookup is
/// exact and case-sensitive; insertion order is the order labels are
/// listed in rejection messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMapping {
    field: CategoryField,
    entries: &'static [(&'static str, u8)],
}

/// Cut quality codes.
pub static CUT: CategoryMapping = CategoryMapping {
    field: CategoryField::Cut,
    entries: &[
        ("Ideal", 0),
        ("Premium", 1),
        ("Good", 2),
        ("Very Good", 3),
        ("Fair", 4),
    ],
};

/// Color grade codes.
pub static COLOR: CategoryMapping = CategoryMapping {
    field: CategoryField::Color,
    entries: &[
        ("D", 0),
        ("E", 1),
        ("F", 2),
        ("G", 3),
        ("H", 4),
        ("I", 5),
        ("J", 6),
    ],
};

/// Clarity grade codes.
pub static CLARITY: CategoryMapping = CategoryMapping {
    field: CategoryField::Clarity,
    entries: &[
        ("IF", 0),
        ("VVS1", 1),
        ("VVS2", 2),
        ("VS1", 3),
        ("VS2", 4),
        ("SI1", 5),
        ("SI2", 6),
        ("I1", 7),
    ],
};

impl CategoryMapping {
    /// The attribute this table encodes.
    pub fn field(&self) -> CategoryField {
        self.field
    }

    /// Code for `label`, if present.
    pub fn code(&self, label: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| *code)
    }

    /// Code for `label`, or a rejection listing every accepted label.
    pub fn lookup(&self, label: &str) -> Result<u8> {
        self.code(label)
            .ok_or_else(|| LustreError::UnrecognizedCategory {
                field: self.field,
                label: label.to_owned(),
            })
    }

    /// Accepted labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    /// Accepted labels joined with `", "`.
    pub fn joined_labels(&self) -> String {
        self.labels().collect::<Vec<_>>().join(", ")
    }

    /// `(label, code)` pairs in insertion order.
    pub fn entries(&self) -> &'static [(&'static str, u8)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three categorical attributes, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Cut,
    Color,
    Clarity,
}

impl CategoryField {
    /// Evaluation order used by the encoder.
    pub const ALL: [CategoryField; 3] = [
        CategoryField::Cut,
        CategoryField::Color,
        CategoryField::Clarity,
    ];

    pub fn mapping(self) -> &'static CategoryMapping {
        match self {
            CategoryField::Cut => &CUT,
            CategoryField::Color => &COLOR,
            CategoryField::Clarity => &CLARITY,
        }
    }

    /// Lowercase key used in metric labels and serialized forms.
    pub fn key(self) -> &'static str {
        match self {
            CategoryField::Cut => "cut",
            CategoryField::Color => "color",
            CategoryField::Clarity => "clarity",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryField::Cut => "Cut",
            CategoryField::Color => "Color",
            CategoryField::Clarity => "Clarity",
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
