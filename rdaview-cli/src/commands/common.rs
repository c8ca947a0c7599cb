//! Common types and utilities shared across CLI commands.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use rdaview::catalog::{ReqwestClient, VectorServicesCatalog};
use rdaview::config::ClientConfig;
use rdaview::request::ImageRequest;
use rdaview::sensor::{BandType, SensorFamily};

use crate::error::CliError;

/// Sensor selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SensorArg {
    /// WorldView-2 (base multispectral behavior)
    Wv02,
    /// WorldView-3 visible and near infrared
    Wv03Vnir,
    /// WorldView-3 short-wave infrared
    Wv03Swir,
    /// WorldView-1 panchromatic
    Wv01,
    /// WorldView-4
    Wv04,
}

impl From<SensorArg> for SensorFamily {
    fn from(sensor: SensorArg) -> Self {
        match sensor {
            SensorArg::Wv02 => SensorFamily::WorldView,
            SensorArg::Wv03Vnir => SensorFamily::Wv03Vnir,
            SensorArg::Wv03Swir => SensorFamily::Wv03Swir,
            SensorArg::Wv01 => SensorFamily::Wv01,
            SensorArg::Wv04 => SensorFamily::Wv04,
        }
    }
}

/// Band type selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum BandTypeArg {
    /// Multispectral bands
    Ms,
    /// Panchromatic band
    Pan,
    /// Thermal bands
    Thermal,
}

impl From<BandTypeArg> for BandType {
    fn from(band_type: BandTypeArg) -> Self {
        match band_type {
            BandTypeArg::Ms => BandType::Multispectral,
            BandTypeArg::Pan => BandType::Panchromatic,
            BandTypeArg::Thermal => BandType::Thermal,
        }
    }
}

/// Image request options shared by `graph` and `parts`.
#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Sensor the catalog id belongs to
    #[arg(long, value_enum, ignore_case = true, default_value = "wv02")]
    pub sensor: SensorArg,

    /// Catalog id of the strip
    #[arg(long = "cat-id")]
    pub cat_id: String,

    /// Band set (defaults to the sensor's default)
    #[arg(long, value_enum, ignore_case = true)]
    pub band_type: Option<BandTypeArg>,

    /// Output projection (defaults to the configured projection)
    #[arg(long)]
    pub proj: Option<String>,

    /// Ground sample distance
    #[arg(long)]
    pub gsd: Option<String>,

    /// Apply atmospheric compensation
    #[arg(long)]
    pub acomp: bool,

    /// Apply dynamic range adjustment instead of a fixed output type
    #[arg(long)]
    pub dra: bool,

    /// Output pixel type (uint8, uint16, int16, int32, float32, float64)
    #[arg(long)]
    pub dtype: Option<String>,

    /// Radiometric correction used when ACOMP is off
    #[arg(long = "correction")]
    pub correction_type: Option<String>,
}

impl ImageArgs {
    /// Build a request, filling the projection from config when not given.
    pub fn to_request(&self, config: &ClientConfig) -> ImageRequest {
        let mut builder = ImageRequest::builder(self.cat_id.as_str())
            .proj(
                self.proj
                    .clone()
                    .unwrap_or_else(|| config.default_projection.clone()),
            )
            .acomp(self.acomp)
            .dra(self.dra);

        if let Some(band_type) = self.band_type {
            builder = builder.band_type(band_type.into());
        }
        if let Some(gsd) = &self.gsd {
            builder = builder.gsd(gsd.as_str());
        }
        if let Some(dtype) = &self.dtype {
            builder = builder.dtype(dtype.as_str());
        }
        if let Some(correction_type) = &self.correction_type {
            builder = builder.correction_type(correction_type.as_str());
        }
        builder.build()
    }
}

/// Catalog client used by CLI commands.
pub type CliCatalog = VectorServicesCatalog<ReqwestClient>;

/// Create the HTTP catalog client from configuration.
pub fn catalog_from_config(config: &ClientConfig) -> Result<Arc<CliCatalog>, CliError> {
    let http_client = ReqwestClient::with_timeout(config.catalog.timeout_secs)?;
    Ok(Arc::new(VectorServicesCatalog::new(
        http_client,
        config.catalog.url.clone(),
        config.catalog.page_size,
    )))
}
