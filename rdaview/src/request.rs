//! Image request types.
//!
//! An [`ImageRequest`] carries everything needed to describe a WorldView
//! strip: the catalog id plus the imaging options. It is immutable once
//! built; use [`ImageRequest::builder`] to construct one.
//!
//! # Example
//!
//! ```
//! use rdaview::request::ImageRequest;
//! use rdaview::sensor::BandType;
//!
//! let request = ImageRequest::builder("1030010076B8F500")
//!     .band_type(BandType::Multispectral)
//!     .dtype("uint8")
//!     .build();
//! assert_eq!(request.cat_id(), "1030010076B8F500");
//! assert_eq!(request.proj(), "EPSG:4326");
//! assert_eq!(request.dtype(), Some("uint8"));
//! ```

use crate::sensor::{BandType, RequestOption};

/// Projection used when a request does not name one.
pub const DEFAULT_PROJECTION: &str = "EPSG:4326";

/// Request for a WorldView strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    cat_id: String,
    /// `None` selects the sensor's default band type.
    band_type: Option<BandType>,
    proj: String,
    gsd: Option<String>,
    acomp: bool,
    dra: bool,
    /// Raw pixel type name; resolved to a wire code at graph build time.
    dtype: Option<String>,
    correction_type: Option<String>,
}

impl ImageRequest {
    /// Start building a request for a catalog id.
    pub fn builder(cat_id: impl Into<String>) -> ImageRequestBuilder {
        ImageRequestBuilder::new(cat_id)
    }

    /// Request with every option at its default.
    pub fn new(cat_id: impl Into<String>) -> Self {
        Self::builder(cat_id).build()
    }

    pub fn cat_id(&self) -> &str {
        &self.cat_id
    }

    pub fn band_type(&self) -> Option<BandType> {
        self.band_type
    }

    pub fn proj(&self) -> &str {
        &self.proj
    }

    pub fn gsd(&self) -> Option<&str> {
        self.gsd.as_deref()
    }

    /// Whether atmospheric compensation was requested.
    pub fn acomp(&self) -> bool {
        self.acomp
    }

    /// Whether dynamic range adjustment was requested.
    pub fn dra(&self) -> bool {
        self.dra
    }

    pub fn dtype(&self) -> Option<&str> {
        self.dtype.as_deref()
    }

    pub fn correction_type(&self) -> Option<&str> {
        self.correction_type.as_deref()
    }

    /// Options this request sets away from their defaults.
    pub fn options_used(&self) -> Vec<RequestOption> {
        let mut used = Vec::new();
        if self.proj != DEFAULT_PROJECTION {
            used.push(RequestOption::Proj);
        }
        if self.gsd.is_some() {
            used.push(RequestOption::Gsd);
        }
        if self.band_type.is_some() {
            used.push(RequestOption::BandType);
        }
        if self.correction_type.is_some() {
            used.push(RequestOption::CorrectionType);
        }
        if self.dtype.is_some() {
            used.push(RequestOption::Dtype);
        }
        if self.acomp {
            used.push(RequestOption::Acomp);
        }
        if self.dra {
            used.push(RequestOption::Dra);
        }
        used
    }
}

/// Builder for [`ImageRequest`].
#[derive(Debug, Clone)]
pub struct ImageRequestBuilder {
    request: ImageRequest,
}

impl ImageRequestBuilder {
    fn new(cat_id: impl Into<String>) -> Self {
        Self {
            request: ImageRequest {
                cat_id: cat_id.into(),
                band_type: None,
                proj: DEFAULT_PROJECTION.to_string(),
                gsd: None,
                acomp: false,
                dra: false,
                dtype: None,
                correction_type: None,
            },
        }
    }

    pub fn band_type(mut self, band_type: BandType) -> Self {
        self.request.band_type = Some(band_type);
        self
    }

    /// Output projection as a CRS code, e.g. `EPSG:3857`.
    pub fn proj(mut self, proj: impl Into<String>) -> Self {
        self.request.proj = proj.into();
        self
    }

    /// Ground sample distance, passed to the strip node verbatim.
    pub fn gsd(mut self, gsd: impl Into<String>) -> Self {
        self.request.gsd = Some(gsd.into());
        self
    }

    pub fn acomp(mut self, acomp: bool) -> Self {
        self.request.acomp = acomp;
        self
    }

    pub fn dra(mut self, dra: bool) -> Self {
        self.request.dra = dra;
        self
    }

    pub fn dtype(mut self, dtype: impl Into<String>) -> Self {
        self.request.dtype = Some(dtype.into());
        self
    }

    /// Correction mode used when ACOMP is not requested.
    pub fn correction_type(mut self, correction_type: impl Into<String>) -> Self {
        self.request.correction_type = Some(correction_type.into());
        self
    }

    pub fn build(self) -> ImageRequest {
        self.request
    }
}
