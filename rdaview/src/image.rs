//! WorldView image handles.
//!
//! A [`WorldViewImage`] pairs an [`ImageRequest`] with a sensor variant and a
//! catalog. It exposes two independent access paths:
//!
//! - [`WorldViewImage::graph`] builds the strip graph for single-tile access
//!   without touching the catalog.
//! - [`WorldViewImage::parts`] resolves the IDAHO records behind the catalog
//!   id and wraps each one in an [`IdahoImage`].
//!
//! # Caching
//!
//! Parts are resolved at most once per image. The first successful call to
//! `parts()` stores the result and later calls return it unchanged, even if
//! the catalog has changed since. A failed resolution stores nothing.
//!
//! The cache is a [`OnceCell`], so `WorldViewImage` is not `Sync`. Callers
//! that share an image across threads must serialize the first `parts()`
//! call themselves.

use std::cell::OnceCell;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{resolve_parts, CatalogClient, CatalogRecord};
use crate::error::{ImageError, ImageResult};
use crate::graph::{self, NodeDescriptor, ACOMP_CORRECTION};
use crate::request::ImageRequest;
use crate::sensor::{SensorFamily, SensorVariant};

/// Node id of the IDAHO tile read template.
pub const IDAHO_NODE: &str = "IdahoRead";

/// Object store holding IDAHO tiles.
const IDAHO_OBJECT_STORE: &str = "S3";

/// Correction used for IDAHO tiles when ACOMP is not requested.
const IDAHO_DEFAULT_CORRECTION: &str = "TOAREFLECTANCE";

/// One IDAHO tile of a composite image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdahoImage {
    image_id: String,
    bucket: String,
    proj: String,
    gsd: Option<String>,
    acomp: bool,
}

impl IdahoImage {
    /// Build a tile handle from a catalog record, inheriting the owning
    /// request's projection, GSD and ACOMP flag.
    pub fn from_record(record: &CatalogRecord, request: &ImageRequest) -> ImageResult<Self> {
        Ok(Self {
            image_id: record.idaho_image_id()?.to_string(),
            bucket: record.bucket_name()?.to_string(),
            proj: request.proj().to_string(),
            gsd: request.gsd().map(str::to_string),
            acomp: request.acomp(),
        })
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn proj(&self) -> &str {
        &self.proj
    }

    pub fn gsd(&self) -> Option<&str> {
        self.gsd.as_deref()
    }

    pub fn acomp(&self) -> bool {
        self.acomp
    }

    /// Graph reading this tile directly from the object store.
    pub fn build_graph(&self) -> NodeDescriptor {
        let correction = if self.acomp {
            ACOMP_CORRECTION
        } else {
            IDAHO_DEFAULT_CORRECTION
        };

        NodeDescriptor::new(IDAHO_NODE)
            .with_param("bucketName", self.bucket.as_str())
            .with_param("imageId", self.image_id.as_str())
            .with_param("objectStore", IDAHO_OBJECT_STORE)
            .with_param("crs", self.proj.as_str())
            .with_param("targetGSD", self.gsd.as_deref().unwrap_or(""))
            .with_param("correctionType", correction)
    }
}

/// A WorldView strip identified by catalog id.
pub struct WorldViewImage<C: CatalogClient> {
    variant: &'static SensorVariant,
    request: ImageRequest,
    catalog: Arc<C>,
    parts: OnceCell<Vec<IdahoImage>>,
}

impl<C: CatalogClient> WorldViewImage<C> {
    /// Create an image handle.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedOption`] if the request sets an option
    /// the sensor does not accept.
    pub fn new(family: SensorFamily, request: ImageRequest, catalog: Arc<C>) -> ImageResult<Self> {
        let variant = family.variant();
        if let Some(option) = request
            .options_used()
            .into_iter()
            .find(|option| !variant.supports_option(*option))
        {
            return Err(ImageError::UnsupportedOption {
                option,
                variant: family,
            });
        }

        Ok(Self {
            variant,
            request,
            catalog,
            parts: OnceCell::new(),
        })
    }

    pub fn cat_id(&self) -> &str {
        self.request.cat_id()
    }

    pub fn request(&self) -> &ImageRequest {
        &self.request
    }

    pub fn variant(&self) -> &'static SensorVariant {
        self.variant
    }

    /// Strip graph for this image. No catalog access.
    pub fn graph(&self) -> NodeDescriptor {
        graph::build_strip_graph(self.variant, &self.request)
    }

    pub fn rgb_bands(&self) -> ImageResult<&'static [usize]> {
        self.variant.rgb_bands()
    }

    pub fn ndvi_bands(&self) -> ImageResult<&'static [usize]> {
        self.variant.ndvi_bands()
    }

    pub fn ndwi_bands(&self) -> ImageResult<&'static [usize]> {
        self.variant.ndwi_bands()
    }

    /// IDAHO tiles making up this image, resolved on first call.
    pub fn parts(&self) -> ImageResult<&[IdahoImage]> {
        if let Some(parts) = self.parts.get() {
            return Ok(parts.as_slice());
        }

        let band_type = self
            .request
            .band_type()
            .unwrap_or(self.variant.default_band_type);
        let records = resolve_parts(
            self.variant,
            self.catalog.as_ref(),
            self.request.cat_id(),
            band_type,
        )?;
        let parts = records
            .iter()
            .map(|record| IdahoImage::from_record(record, &self.request))
            .collect::<ImageResult<Vec<_>>>()?;

        debug!(
            cat_id = self.request.cat_id(),
            count = parts.len(),
            "Cached composite parts"
        );

        Ok(self.parts.get_or_init(|| parts).as_slice())
    }

    /// Whether parts have already been resolved.
    pub fn parts_resolved(&self) -> bool {
        self.parts.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, MockCatalog};
    use crate::graph::{FORMAT_NODE, STRIP_NODE};
    use crate::sensor::{BandType, Capability, RequestOption};

    fn record(id: &str, vendor: &str) -> CatalogRecord {
        CatalogRecord::new(id)
            .with_attribute("vendorId", vendor)
            .with_attribute("idahoImageId", format!("idaho-{}", id))
            .with_attribute("bucketName", format!("bucket-{}", id))
    }

    fn catalog() -> Arc<MockCatalog> {
        Arc::new(MockCatalog::new(vec![
            record("a", "X"),
            record("b", "Y"),
            record("c", "X"),
        ]))
    }

    #[test]
    fn test_parts_propagate_request_options() {
        let request = ImageRequest::builder("abc")
            .proj("EPSG:3857")
            .gsd("0.5")
            .acomp(true)
            .build();
        let image = WorldViewImage::new(SensorFamily::WorldView, request, catalog()).unwrap();
        let parts = image.parts().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].image_id(), "idaho-a");
        assert_eq!(parts[0].bucket(), "bucket-a");
        assert_eq!(parts[1].image_id(), "idaho-c");
        for part in parts {
            assert_eq!(part.proj(), "EPSG:3857");
            assert_eq!(part.gsd(), Some("0.5"));
            assert!(part.acomp());
        }
    }

    #[test]
    fn test_parts_memoized() {
        let catalog = catalog();
        let image =
            WorldViewImage::new(SensorFamily::WorldView, ImageRequest::new("abc"), catalog.clone())
                .unwrap();

        assert!(!image.parts_resolved());
        let first: Vec<IdahoImage> = image.parts().unwrap().to_vec();
        catalog.set_records(vec![record("z", "Z")]);
        let second = image.parts().unwrap();

        assert!(image.parts_resolved());
        assert_eq!(first, second);
        assert_eq!(catalog.call_count(), 1);
    }

    #[test]
    fn test_failed_resolution_not_cached() {
        let catalog = Arc::new(MockCatalog::new(Vec::new()));
        let image =
            WorldViewImage::new(SensorFamily::WorldView, ImageRequest::new("abc"), catalog.clone())
                .unwrap();

        assert!(matches!(
            image.parts(),
            Err(ImageError::MissingImagery { .. })
        ));
        assert!(!image.parts_resolved());

        catalog.set_records(vec![record("a", "X")]);
        assert_eq!(image.parts().unwrap().len(), 1);
        assert_eq!(catalog.call_count(), 2);
    }

    #[test]
    fn test_swir_parts_unfiltered() {
        let image =
            WorldViewImage::new(SensorFamily::Wv03Swir, ImageRequest::new("abc"), catalog())
                .unwrap();
        assert_eq!(image.parts().unwrap().len(), 3);
    }

    #[test]
    fn test_malformed_record_fails() {
        let catalog = Arc::new(MockCatalog::new(vec![
            CatalogRecord::new("a").with_attribute("vendorId", "X")
        ]));
        let image =
            WorldViewImage::new(SensorFamily::WorldView, ImageRequest::new("abc"), catalog)
                .unwrap();
        assert!(matches!(
            image.parts(),
            Err(ImageError::Catalog(CatalogError::MalformedRecord(_)))
        ));
    }

    #[test]
    fn test_graph_does_not_query_catalog() {
        let catalog = catalog();
        let image =
            WorldViewImage::new(SensorFamily::WorldView, ImageRequest::new("abc"), catalog.clone())
                .unwrap();
        let graph = image.graph();

        assert_eq!(graph.node_id(), FORMAT_NODE);
        assert_eq!(graph.root().node_id(), STRIP_NODE);
        assert_eq!(catalog.call_count(), 0);
    }

    #[test]
    fn test_wv01_rejects_acomp_and_dra() {
        let request = ImageRequest::builder("abc")
            .band_type(BandType::Panchromatic)
            .acomp(true)
            .build();
        match WorldViewImage::new(SensorFamily::Wv01, request, catalog()) {
            Err(ImageError::UnsupportedOption { option, variant }) => {
                assert_eq!(option, RequestOption::Acomp);
                assert_eq!(variant, SensorFamily::Wv01);
            }
            Err(other) => panic!("Expected UnsupportedOption, got {:?}", other),
            Ok(_) => panic!("Expected UnsupportedOption"),
        }

        let request = ImageRequest::builder("abc").dra(true).build();
        assert!(WorldViewImage::new(SensorFamily::Wv01, request, catalog()).is_err());
    }

    #[test]
    fn test_band_accessors_dispatch_to_variant() {
        let swir =
            WorldViewImage::new(SensorFamily::Wv03Swir, ImageRequest::new("abc"), catalog())
                .unwrap();
        assert!(matches!(
            swir.rgb_bands(),
            Err(ImageError::UnsupportedCapability {
                capability: Capability::Rgb,
                ..
            })
        ));
        assert_eq!(swir.ndwi_bands().unwrap(), &[7, 0]);

        let wv04 =
            WorldViewImage::new(SensorFamily::Wv04, ImageRequest::new("abc"), catalog()).unwrap();
        assert_eq!(wv04.rgb_bands().unwrap(), &[2, 1, 0]);
        assert_eq!(wv04.ndvi_bands().unwrap(), &[2, 3]);
    }

    #[test]
    fn test_idaho_graph() {
        let request = ImageRequest::builder("abc").gsd("1.2").build();
        let tile = IdahoImage::from_record(&record("a", "X"), &request).unwrap();
        let graph = tile.build_graph();

        assert_eq!(graph.node_id(), IDAHO_NODE);
        assert_eq!(graph.depth(), 1);
        let param = |k: &str| graph.param(k).and_then(|v| v.as_str()).map(str::to_string);
        assert_eq!(param("bucketName").as_deref(), Some("bucket-a"));
        assert_eq!(param("imageId").as_deref(), Some("idaho-a"));
        assert_eq!(param("objectStore").as_deref(), Some("S3"));
        assert_eq!(param("crs").as_deref(), Some("EPSG:4326"));
        assert_eq!(param("targetGSD").as_deref(), Some("1.2"));
        assert_eq!(param("correctionType").as_deref(), Some("TOAREFLECTANCE"));
    }

    #[test]
    fn test_idaho_graph_acomp() {
        let request = ImageRequest::builder("abc").acomp(true).build();
        let tile = IdahoImage::from_record(&record("a", "X"), &request).unwrap();
        let graph = tile.build_graph();
        assert_eq!(
            graph.param("correctionType").and_then(|v| v.as_str()),
            Some("ACOMP")
        );
    }
}
