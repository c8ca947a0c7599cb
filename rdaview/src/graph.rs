//! RDA node graph descriptors.
//!
//! Building a graph performs no computation and no I/O. A
//! [`NodeDescriptor`] is a chain of named processing steps, each node wrapping
//! the one it reads from. The serialized chain is what gets submitted to the
//! remote execution service.
//!
//! A strip graph always starts with a `DigitalGlobeStrip` node. It then ends
//! in exactly one of:
//!
//! - `RadiometricDRA` when dynamic range adjustment is requested and the
//!   sensor supports it, or
//! - `Format` carrying the output pixel type's wire code.
//!
//! The two are never combined.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::dtype;
use crate::request::ImageRequest;
use crate::sensor::SensorVariant;

/// Node id of the strip template node.
pub const STRIP_NODE: &str = "DigitalGlobeStrip";

/// Node id of the dynamic range adjustment node.
pub const DRA_NODE: &str = "RadiometricDRA";

/// Node id of the output pixel type node.
pub const FORMAT_NODE: &str = "Format";

/// Correction applied when atmospheric compensation is requested.
pub const ACOMP_CORRECTION: &str = "ACOMP";

/// Scalar node parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Str(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// One node of a processing graph, optionally wrapping the node it reads from.
///
/// Parameters are kept sorted so that serialization, and therefore
/// [`NodeDescriptor::graph_id`], is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    node_id: String,
    parameters: BTreeMap<String, ParamValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<Box<NodeDescriptor>>,
}

impl NodeDescriptor {
    /// Create a root node with no parameters.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            parameters: BTreeMap::new(),
            input: None,
        }
    }

    /// Add or replace a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Append a node reading from this one. The new node becomes the terminal
    /// node of the chain.
    pub fn then(self, node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            parameters: BTreeMap::new(),
            input: Some(Box::new(self)),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    /// The node this one reads from, if any.
    pub fn input(&self) -> Option<&NodeDescriptor> {
        self.input.as_deref()
    }

    /// Iterate from this node back to the root.
    pub fn chain(&self) -> impl Iterator<Item = &NodeDescriptor> {
        std::iter::successors(Some(self), |node| node.input())
    }

    /// Whether any node in the chain has the given id.
    pub fn contains(&self, node_id: &str) -> bool {
        self.chain().any(|node| node.node_id == node_id)
    }

    /// Number of nodes in the chain.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// The root node of the chain.
    pub fn root(&self) -> &NodeDescriptor {
        // chain() always yields at least `self`
        self.chain().last().unwrap_or(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Lowercase hex SHA-256 of the serialized chain.
    ///
    /// Equal graphs always have equal ids, so the id can key submitted graphs.
    pub fn graph_id(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

/// Resolve the correction mode for a request.
///
/// ACOMP wins over any override; without either the sensor default applies.
pub fn resolve_correction<'a>(variant: &SensorVariant, request: &'a ImageRequest) -> &'a str {
    if request.acomp() {
        ACOMP_CORRECTION
    } else {
        request
            .correction_type()
            .unwrap_or(variant.default_correction)
    }
}

/// Build the strip graph for a request on a sensor variant.
///
/// Unknown pixel type names fall back to the default wire code with a
/// warning. DRA is ignored on sensors that do not support it, in which case
/// the graph ends in a `Format` node as usual.
pub fn build_strip_graph(variant: &SensorVariant, request: &ImageRequest) -> NodeDescriptor {
    let band_type = request.band_type().unwrap_or(variant.default_band_type);
    let bands = variant.strip_bands(band_type);
    let correction = resolve_correction(variant, request);

    let strip = NodeDescriptor::new(STRIP_NODE)
        .with_param("catId", request.cat_id())
        .with_param("crs", request.proj())
        .with_param("gsd", request.gsd().unwrap_or(""))
        .with_param("correctionType", correction)
        .with_param("bands", bands)
        .with_param("fallbackToTOA", true);

    if request.dra() && variant.supports_dra {
        debug!(
            cat_id = request.cat_id(),
            sensor = %variant.family,
            bands,
            correction,
            "Built DRA strip graph"
        );
        return strip.then(DRA_NODE);
    }

    let dtype_name = request
        .dtype()
        .or_else(|| variant.default_pixel_type.map(|t| t.name()));
    let data_type = dtype::wire_code(dtype_name);

    debug!(
        cat_id = request.cat_id(),
        sensor = %variant.family,
        bands,
        correction,
        data_type,
        "Built formatted strip graph"
    );

    strip.then(FORMAT_NODE).with_param("dataType", data_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::tests::count_warnings;
    use crate::sensor::{BandType, SensorFamily};

    fn base() -> &'static SensorVariant {
        SensorFamily::WorldView.variant()
    }

    fn strip_of(graph: &NodeDescriptor) -> &NodeDescriptor {
        let root = graph.root();
        assert_eq!(root.node_id(), STRIP_NODE);
        root
    }

    fn str_param<'a>(node: &'a NodeDescriptor, key: &str) -> &'a str {
        node.param(key)
            .and_then(ParamValue::as_str)
            .unwrap_or_else(|| panic!("missing string param {}", key))
    }

    #[test]
    fn test_scenario_uint8_format() {
        let request = ImageRequest::builder("abc")
            .band_type(BandType::Multispectral)
            .dtype("uint8")
            .build();
        let graph = build_strip_graph(base(), &request);

        assert_eq!(graph.node_id(), FORMAT_NODE);
        assert_eq!(str_param(&graph, "dataType"), "0");
        assert_eq!(graph.depth(), 2);
    }

    #[test]
    fn test_scenario_bogus_dtype_warns_and_defaults() {
        let request = ImageRequest::builder("abc")
            .band_type(BandType::Multispectral)
            .dtype("bogus")
            .build();
        let (graph, warnings) = count_warnings(|| build_strip_graph(base(), &request));

        assert_eq!(warnings, 1);
        assert_eq!(graph.node_id(), FORMAT_NODE);
        assert_eq!(str_param(&graph, "dataType"), "4");
    }

    #[test]
    fn test_strip_parameters() {
        let request = ImageRequest::builder("abc")
            .proj("EPSG:3857")
            .gsd("0.5")
            .build();
        let graph = build_strip_graph(base(), &request);
        let strip = strip_of(&graph);

        assert_eq!(str_param(strip, "catId"), "abc");
        assert_eq!(str_param(strip, "crs"), "EPSG:3857");
        assert_eq!(str_param(strip, "gsd"), "0.5");
        assert_eq!(str_param(strip, "correctionType"), "TOAREFLECTANCE");
        assert_eq!(str_param(strip, "bands"), "Multi");
        assert_eq!(
            strip.param("fallbackToTOA").and_then(ParamValue::as_bool),
            Some(true)
        );
    }

    #[test]
    fn test_missing_gsd_is_empty_string() {
        let graph = build_strip_graph(base(), &ImageRequest::new("abc"));
        assert_eq!(str_param(strip_of(&graph), "gsd"), "");
    }

    #[test]
    fn test_acomp_overrides_correction_type() {
        let request = ImageRequest::builder("abc")
            .acomp(true)
            .correction_type("DN")
            .build();
        let graph = build_strip_graph(base(), &request);
        assert_eq!(str_param(strip_of(&graph), "correctionType"), "ACOMP");
    }

    #[test]
    fn test_correction_override_without_acomp() {
        let request = ImageRequest::builder("abc").correction_type("DN").build();
        let graph = build_strip_graph(base(), &request);
        assert_eq!(str_param(strip_of(&graph), "correctionType"), "DN");
    }

    #[test]
    fn test_dra_has_no_format_node() {
        let request = ImageRequest::builder("abc").dra(true).dtype("uint8").build();
        let graph = build_strip_graph(base(), &request);

        assert_eq!(graph.node_id(), DRA_NODE);
        assert!(!graph.contains(FORMAT_NODE));
        assert_eq!(graph.depth(), 2);
    }

    #[test]
    fn test_dra_skips_dtype_lookup() {
        let request = ImageRequest::builder("abc").dra(true).dtype("bogus").build();
        let (graph, warnings) = count_warnings(|| build_strip_graph(base(), &request));
        assert_eq!(warnings, 0);
        assert!(!graph.contains(FORMAT_NODE));
    }

    #[test]
    fn test_default_dtype_is_float32() {
        let graph = build_strip_graph(base(), &ImageRequest::new("abc"));
        assert_eq!(graph.node_id(), FORMAT_NODE);
        assert_eq!(str_param(&graph, "dataType"), "4");
    }

    #[test]
    fn test_swir_fixed_bands_and_ignores_dra() {
        let request = ImageRequest::builder("abc")
            .band_type(BandType::Panchromatic)
            .dra(true)
            .dtype("uint16")
            .build();
        let graph = build_strip_graph(SensorFamily::Wv03Swir.variant(), &request);

        assert_eq!(graph.node_id(), FORMAT_NODE);
        assert!(!graph.contains(DRA_NODE));
        assert_eq!(str_param(&graph, "dataType"), "1");
        assert_eq!(str_param(strip_of(&graph), "bands"), "SWIR");
    }

    #[test]
    fn test_wv01_defaults() {
        let graph = build_strip_graph(SensorFamily::Wv01.variant(), &ImageRequest::new("abc"));
        let strip = strip_of(&graph);

        assert_eq!(str_param(strip, "bands"), "PAN");
        assert_eq!(str_param(strip, "correctionType"), "DN");
        assert_eq!(str_param(&graph, "dataType"), "4");
    }

    #[test]
    fn test_never_both_dra_and_format() {
        for family in SensorFamily::ALL {
            for dra in [false, true] {
                let request = ImageRequest::builder("abc").dra(dra).build();
                let graph = build_strip_graph(family.variant(), &request);
                assert!(
                    !(graph.contains(DRA_NODE) && graph.contains(FORMAT_NODE)),
                    "{} dra={} produced both nodes",
                    family,
                    dra
                );
                if graph.contains(FORMAT_NODE) {
                    assert_eq!(graph.node_id(), FORMAT_NODE);
                }
            }
        }
    }

    #[test]
    fn test_json_shape() {
        let request = ImageRequest::builder("abc").dtype("uint8").build();
        let graph = build_strip_graph(base(), &request);
        let value: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

        assert_eq!(value["nodeId"], "Format");
        assert_eq!(value["parameters"]["dataType"], "0");
        assert_eq!(value["input"]["nodeId"], "DigitalGlobeStrip");
        assert_eq!(value["input"]["parameters"]["fallbackToTOA"], true);
        assert!(value["input"].get("input").is_none());
    }

    #[test]
    fn test_graph_id_deterministic() {
        let a = build_strip_graph(base(), &ImageRequest::new("abc"));
        let b = build_strip_graph(base(), &ImageRequest::new("abc"));
        let c = build_strip_graph(base(), &ImageRequest::new("abd"));

        let id = a.graph_id().unwrap();
        assert_eq!(id.len(), 64);
        assert_eq!(id, b.graph_id().unwrap());
        assert_ne!(id, c.graph_id().unwrap());
    }
}
