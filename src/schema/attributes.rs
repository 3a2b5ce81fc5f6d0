//! Attribute definitions, value ranges, and modular stepping

use crate::io::error::{GenerationError, Result};

/// Shape names for the `type` attribute, ordinals 1 through 5
const SHAPE_NAMES: [&str; 5] = ["triangle", "square", "pentagon", "hexagon", "circle"];

/// Color names for the `color` attribute, ordinals 0 through 9
const COLOR_NAMES: [&str; 10] = [
    "red", "green", "blue", "yellow", "purple", "orange", "pink", "brown", "gray", "black",
];

/// Size scales for the `size` attribute, ordinals 1 through 6
pub const SIZE_SCALES: [f64; 6] = [0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// One of the five attribute slots of an entity vector
///
/// Each entity in a panel cell is a 5-slot integer vector indexed by these
/// attributes: `[exists, type, size, angle, color]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Slot 0: whether the cell holds an entity (0 or 1)
    Exists,
    /// Slot 1: shape class, 1..=5 (triangle through circle)
    Type,
    /// Slot 2: shape scale, 1..=6 (0.4 through 0.9 of a cell)
    Size,
    /// Slot 3: orientation, 0..=7 in 45-degree steps
    Angle,
    /// Slot 4: fill color, 0..=9 (ten named colors)
    Color,
}

impl Attribute {
    /// All attribute slots in tensor order
    pub const ALL: [Self; 5] = [Self::Exists, Self::Type, Self::Size, Self::Angle, Self::Color];

    /// The entity attributes a rule may target (everything but `exists`)
    pub const TARGETABLE: [Self; 4] = [Self::Type, Self::Size, Self::Angle, Self::Color];

    /// Position of this attribute within the entity vector
    pub const fn slot(self) -> usize {
        match self {
            Self::Exists => 0,
            Self::Type => 1,
            Self::Size => 2,
            Self::Angle => 3,
            Self::Color => 4,
        }
    }

    /// Inclusive value range for this attribute
    pub const fn bounds(self) -> (i32, i32) {
        match self {
            Self::Exists => (0, 1),
            Self::Type => (1, 5),
            Self::Size => (1, 6),
            Self::Angle => (0, 7),
            Self::Color => (0, 9),
        }
    }

    /// Number of distinct values this attribute can take
    pub const fn range_size(self) -> i32 {
        let (min, max) = self.bounds();
        max - min + 1
    }

    /// Canonical lowercase name of this attribute
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Type => "type",
            Self::Size => "size",
            Self::Angle => "angle",
            Self::Color => "color",
        }
    }

    /// Parse an attribute from its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    /// Check a value against this attribute's range
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidAttributeValue`] when the value
    /// falls outside the inclusive range; values are never clamped.
    pub const fn validate(self, value: i32) -> Result<i32> {
        let (min, max) = self.bounds();
        if value < min || value > max {
            return Err(GenerationError::InvalidAttributeValue {
                attribute: self.name(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    /// Step a value with modular wraparound inside this attribute's range
    ///
    /// Uses the Euclidean remainder so negative steps wrap correctly:
    /// type 5 stepped by +1 yields 1, size 1 stepped by -1 yields 6.
    pub const fn next_value(self, current: i32, step: i32) -> i32 {
        let (min, _) = self.bounds();
        min + (current - min + step).rem_euclid(self.range_size())
    }

    /// Map an ordinal value to its display form
    ///
    /// Ordinals outside the attribute's mapping pass through unchanged as
    /// [`DisplayValue::Ordinal`].
    pub fn to_display(self, value: i32) -> DisplayValue {
        let (min, _) = self.bounds();
        let offset = usize::try_from(value - min).ok();
        match self {
            Self::Exists => match value {
                0 => DisplayValue::Flag(false),
                1 => DisplayValue::Flag(true),
                other => DisplayValue::Ordinal(other),
            },
            Self::Type => offset
                .and_then(|i| SHAPE_NAMES.get(i))
                .map_or(DisplayValue::Ordinal(value), |name| {
                    DisplayValue::Shape(name)
                }),
            Self::Size => offset
                .and_then(|i| SIZE_SCALES.get(i))
                .map_or(DisplayValue::Ordinal(value), |scale| {
                    DisplayValue::Scale(*scale)
                }),
            Self::Angle => {
                if self.validate(value).is_ok() {
                    DisplayValue::Degrees(value * 45)
                } else {
                    DisplayValue::Ordinal(value)
                }
            }
            Self::Color => offset
                .and_then(|i| COLOR_NAMES.get(i))
                .map_or(DisplayValue::Ordinal(value), |name| {
                    DisplayValue::Shade(name)
                }),
        }
    }

    /// Map a display form back to its ordinal value
    ///
    /// Accepts shape and color names, size scales, and degree counts;
    /// unmapped inputs that parse as integers pass through unchanged.
    pub fn from_display(self, display: &str) -> Option<i32> {
        let (min, _) = self.bounds();
        let looked_up = match self {
            Self::Exists => match display {
                "false" => Some(0),
                "true" => Some(1),
                _ => None,
            },
            Self::Type => SHAPE_NAMES
                .iter()
                .position(|name| *name == display)
                .map(|i| min + i as i32),
            Self::Size => display.parse::<f64>().ok().and_then(|scale| {
                SIZE_SCALES
                    .iter()
                    .position(|s| (s - scale).abs() < 1e-9)
                    .map(|i| min + i as i32)
            }),
            Self::Angle => display
                .parse::<i32>()
                .ok()
                .filter(|degrees| degrees % 45 == 0)
                .map(|degrees| degrees / 45)
                .and_then(|ordinal| self.validate(ordinal).ok()),
            Self::Color => COLOR_NAMES
                .iter()
                .position(|name| *name == display)
                .map(|i| min + i as i32),
        };
        looked_up.or_else(|| display.parse::<i32>().ok())
    }
}

/// Display form of an ordinal attribute value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayValue {
    /// Presence flag (`exists`)
    Flag(bool),
    /// Shape name (`type`)
    Shape(&'static str),
    /// Fraction of a cell occupied (`size`)
    Scale(f64),
    /// Orientation in degrees (`angle`)
    Degrees(i32),
    /// Color name (`color`)
    Shade(&'static str),
    /// Unmapped ordinal passed through unchanged
    Ordinal(i32),
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Shape(name) | Self::Shade(name) => write!(f, "{name}"),
            Self::Scale(scale) => write!(f, "{scale}"),
            Self::Degrees(degrees) => write!(f, "{degrees}"),
            Self::Ordinal(value) => write!(f, "{value}"),
        }
    }
}
