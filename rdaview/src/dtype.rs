//! Output pixel types and their RDA wire codes.
//!
//! The `Format` node of a strip graph expects a short numeric code instead of
//! a readable type name. Unknown names never fail graph construction: they
//! fall back to [`DEFAULT_WIRE_CODE`] and emit a warning.
//!
//! | name      | code |
//! |-----------|------|
//! | (unset)   | `4`  |
//! | `uint8`   | `0`  |
//! | `uint16`  | `1`  |
//! | `int16`   | `2`  |
//! | `int32`   | `3`  |
//! | `float32` | `4`  |
//! | `float64` | `5`  |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Wire code used when no pixel type is requested or the name is unknown.
pub const DEFAULT_WIRE_CODE: &str = "4";

/// Error returned when a pixel type name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pixel type '{0}'")]
pub struct UnknownPixelType(pub String);

/// Output pixel types understood by the `Format` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    Uint8,
    Uint16,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl PixelType {
    /// All pixel types, in wire code order.
    pub const ALL: [PixelType; 6] = [
        PixelType::Uint8,
        PixelType::Uint16,
        PixelType::Int16,
        PixelType::Int32,
        PixelType::Float32,
        PixelType::Float64,
    ];

    /// The code the `Format` node expects for this type.
    pub fn wire_code(self) -> &'static str {
        match self {
            PixelType::Uint8 => "0",
            PixelType::Uint16 => "1",
            PixelType::Int16 => "2",
            PixelType::Int32 => "3",
            PixelType::Float32 => "4",
            PixelType::Float64 => "5",
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            PixelType::Uint8 => "uint8",
            PixelType::Uint16 => "uint16",
            PixelType::Int16 => "int16",
            PixelType::Int32 => "int32",
            PixelType::Float32 => "float32",
            PixelType::Float64 => "float64",
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelType {
    type Err = UnknownPixelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PixelType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownPixelType(s.to_string()))
    }
}

/// Maps an optional pixel type name to its wire code.
///
/// `None` maps to [`DEFAULT_WIRE_CODE`]. An unrecognized name also maps to
/// the default, after emitting a single warning carrying the name and the
/// lookup failure.
pub fn wire_code(name: Option<&str>) -> &'static str {
    let Some(name) = name else {
        return DEFAULT_WIRE_CODE;
    };

    match name.parse::<PixelType>() {
        Ok(pixel_type) => pixel_type.wire_code(),
        Err(e) => {
            warn!(dtype = name, reason = %e, "Unknown dtype, falling back to float32");
            DEFAULT_WIRE_CODE
        }
    }
}
