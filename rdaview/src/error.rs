//! Error types for image construction and part resolution.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::sensor::{Capability, RequestOption, SensorFamily};

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors surfaced to callers of the image API.
///
/// Unknown pixel types are not represented here: they are recovered inside
/// [`crate::dtype::wire_code`] and only logged.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The catalog returned no IDAHO records for a catalog id.
    #[error("Unable to find IDAHO imagery in the catalog: {query}")]
    MissingImagery { query: String },

    /// A derived-band accessor was used on a sensor that does not define it.
    #[error("{capability} bands not available for {variant}")]
    UnsupportedCapability {
        capability: Capability,
        variant: SensorFamily,
    },

    /// A request option was set that the sensor does not accept.
    #[error("Option '{option}' is not supported by {variant}")]
    UnsupportedOption {
        option: RequestOption,
        variant: SensorFamily,
    },

    /// More than one band was requested for display on a single-band sensor.
    #[error("{variant} supports displaying only a single band at a time (requested {requested})")]
    SingleBandOnly {
        variant: SensorFamily,
        requested: usize,
    },

    /// Sensor tag not present in the variant table.
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// Band type name not present in the band table.
    #[error("Unknown band type: {0}")]
    UnknownBandType(String),

    /// Error from the catalog collaborator, passed through unchanged.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
