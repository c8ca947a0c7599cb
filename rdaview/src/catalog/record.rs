//! Catalog records and vendor grouping keys.
//!
//! Records arrive as GeoJSON-style features. Only the feature id and the
//! attribute map under `properties` are kept:
//!
//! ```text
//! { "properties": { "id": "...", "attributes": { "idahoImageId": "...", ... } } }
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::CatalogError;

/// Attribute holding the vendor dataset identifier,
/// e.g. `LV1B:057107567010_01_P001:1030010076B8F500:A010016JAF1100`.
const VENDOR_DATASET_ATTR: &str = "vendorDatasetIdentifier";

/// Attribute holding a bare vendor id, used when no dataset identifier exists.
const VENDOR_ID_ATTR: &str = "vendorId";

const IDAHO_IMAGE_ID_ATTR: &str = "idahoImageId";
const BUCKET_NAME_ATTR: &str = "bucketName";

/// Grouping key for records produced by the same vendor pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VendorId(String);

impl VendorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the vendor id from a dataset identifier.
    ///
    /// The id is the second `:`-separated field up to its first `_`.
    pub fn from_dataset_identifier(identifier: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^[^:]*:([^_:]+)").expect("vendor dataset pattern is valid")
        });

        pattern
            .captures(identifier)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One record returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFeature")]
pub struct CatalogRecord {
    id: String,
    attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
}

#[derive(Deserialize)]
struct RawProperties {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl From<RawFeature> for CatalogRecord {
    fn from(raw: RawFeature) -> Self {
        Self {
            id: raw.properties.id,
            attributes: raw.properties.attributes,
        }
    }
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Add or replace a string attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// String attribute by name. Non-string values are treated as absent.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Vendor grouping key, or `None` if the record carries neither a dataset
    /// identifier nor a vendor id.
    pub fn vendor_id(&self) -> Option<VendorId> {
        self.attribute(VENDOR_DATASET_ATTR)
            .and_then(VendorId::from_dataset_identifier)
            .or_else(|| self.attribute(VENDOR_ID_ATTR).map(VendorId::new))
    }

    pub fn idaho_image_id(&self) -> Result<&str, CatalogError> {
        self.required(IDAHO_IMAGE_ID_ATTR)
    }

    pub fn bucket_name(&self) -> Result<&str, CatalogError> {
        self.required(BUCKET_NAME_ATTR)
    }

    fn required(&self, key: &str) -> Result<&str, CatalogError> {
        self.attribute(key).ok_or_else(|| {
            CatalogError::MalformedRecord(format!("record '{}' has no {}", self.id, key))
        })
    }
}
