use std::fmt;

use crate::error::{UishotError, UishotResult};

/// The closed set of literal kinds the manifest mini-language supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Double,
}

impl ValueKind {
    pub fn parse(tag: &str) -> UishotResult<Self> {
        match tag {
            "String" => Ok(Self::String),
            "Integer" => Ok(Self::Integer),
            "Float" => Ok(Self::Float),
            "Double" => Ok(Self::Double),
            other => Err(UishotError::UnknownType(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructor argument or client-property value. Values keep their
/// declared kind: `Int(3)` and `Float(3.0)` never compare equal, which is
/// what makes descriptor equality (and therefore change detection) exact.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TypedValue {
    Str(String),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl TypedValue {
    /// Parse a `(type tag, literal)` pair from the manifest.
    pub fn parse(tag: &str, literal: &str) -> UishotResult<Self> {
        match ValueKind::parse(tag)? {
            ValueKind::String => Ok(Self::Str(literal.to_string())),
            ValueKind::Integer => literal
                .parse::<i32>()
                .map(Self::Int)
                .map_err(|_| malformed("Integer", literal)),
            ValueKind::Float => literal
                .parse::<f32>()
                .map(Self::Float)
                .map_err(|_| malformed("Float", literal)),
            ValueKind::Double => literal
                .parse::<f64>()
                .map(Self::Double)
                .map_err(|_| malformed("Double", literal)),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::String,
            Self::Int(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric reading for bindings that accept either float width.
    pub fn as_f64_lossy(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(f64::from(*v)),
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            Self::Str(_) => None,
        }
    }
}

fn malformed(kind: &'static str, literal: &str) -> UishotError {
    UishotError::MalformedValue {
        kind,
        literal: literal.to_string(),
    }
}
