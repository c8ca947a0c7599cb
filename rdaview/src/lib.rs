//! rdaview - Lazy RDA graphs for WorldView imagery
//!
//! This library builds server-executed processing graphs for WorldView strips
//! and resolves the IDAHO tiles behind a catalog id. Nothing here touches
//! pixels: graphs are descriptors to be submitted elsewhere, and part
//! resolution only reads catalog records.
//!
//! # Example
//!
//! ```
//! use rdaview::graph::{build_strip_graph, FORMAT_NODE};
//! use rdaview::request::ImageRequest;
//! use rdaview::sensor::{BandType, SensorFamily};
//!
//! let request = ImageRequest::builder("1030010076B8F500")
//!     .band_type(BandType::Multispectral)
//!     .dtype("uint8")
//!     .build();
//! let graph = build_strip_graph(SensorFamily::WorldView.variant(), &request);
//!
//! assert_eq!(graph.node_id(), FORMAT_NODE);
//! assert_eq!(graph.param("dataType").and_then(|v| v.as_str()), Some("0"));
//! ```

pub mod catalog;
pub mod config;
pub mod dtype;
pub mod error;
pub mod graph;
pub mod image;
pub mod logging;
pub mod request;
pub mod sensor;

pub use error::{ImageError, ImageResult};
pub use image::{IdahoImage, WorldViewImage};
