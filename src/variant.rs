//! Generic tagged values.
//!
//! A [`Variant`] pairs a DXF-style group code with one of four value shapes.
//! The decoder produces them for extended entity data, where each item is a
//! small key/value pair whose type is only known at read time.

use std::fmt;

use crate::types::Vector3;

/// Payload of a [`Variant`].
#[derive(Debug, Clone, PartialEq)]
pub enum VariantValue {
    String(String),
    Integer(i32),
    Double(f64),
    Coord(Vector3),
}

/// A group code with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub code: i32,
    pub value: VariantValue,
}

impl Variant {
    pub fn string(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            value: VariantValue::String(value.into()),
        }
    }

    pub fn integer(code: i32, value: i32) -> Self {
        Self {
            code,
            value: VariantValue::Integer(value),
        }
    }

    pub fn double(code: i32, value: f64) -> Self {
        Self {
            code,
            value: VariantValue::Double(value),
        }
    }

    pub fn coord(code: i32, value: Vector3) -> Self {
        Self {
            code,
            value: VariantValue::Coord(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            VariantValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self.value {
            VariantValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            VariantValue::Double(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_coord(&self) -> Option<Vector3> {
        match self.value {
            VariantValue::Coord(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            VariantValue::String(s) => write!(f, "{}: {}", self.code, s),
            VariantValue::Integer(i) => write!(f, "{}: {}", self.code, i),
            VariantValue::Double(d) => write!(f, "{}: {}", self.code, d),
            VariantValue::Coord(c) => write!(f, "{}: {}", self.code, c),
        }
    }
}
