//! WorldView sensor variants.
//!
//! Every sensor family shares one graph-building and part-resolution
//! algorithm. What differs between them is data: default band type, default
//! radiometric correction, accepted request options, derived band indices and
//! how catalog parts are filtered. That data lives in a static table of
//! [`SensorVariant`] records looked up through [`SensorFamily::variant`].
//!
//! | Family      | RGB       | NDVI    | NDWI    | Notes                                  |
//! |-------------|-----------|---------|---------|----------------------------------------|
//! | `WorldView` | [4, 2, 1] | [6, 4]  | [7, 0]  | base multispectral, also used for WV02 |
//! | `WV03_SWIR` | -         | -       | [7, 0]  | fixed `SWIR` bands, unfiltered parts   |
//! | `WV03_VNIR` | [4, 2, 1] | [6, 4]  | [7, 0]  | same as base                           |
//! | `WV01`      | [4, 2, 1] | [6, 4]  | [7, 0]  | panchromatic, `DN` correction          |
//! | `WV04`      | [2, 1, 0] | [2, 3]  | [7, 0]  | four-band layout                       |

use std::fmt;
use std::str::FromStr;

use crate::catalog::PartsPolicy;
use crate::dtype::PixelType;
use crate::error::{ImageError, ImageResult};

/// Band sets a strip can be requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandType {
    Multispectral,
    Panchromatic,
    Thermal,
}

impl BandType {
    /// Value of the strip node's `bands` parameter for this band type.
    pub fn strip_bands(self) -> &'static str {
        match self {
            BandType::Multispectral => "Multi",
            BandType::Panchromatic => "PAN",
            BandType::Thermal => "thermal",
        }
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BandType::Multispectral => "MS",
            BandType::Panchromatic => "pan",
            BandType::Thermal => "thermal",
        };
        f.write_str(name)
    }
}

impl FromStr for BandType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MS" | "ms" => Ok(BandType::Multispectral),
            "Panchromatic" | "Pan" | "pan" => Ok(BandType::Panchromatic),
            "thermal" => Ok(BandType::Thermal),
            other => Err(ImageError::UnknownBandType(other.to_string())),
        }
    }
}

/// Derived band combinations a variant may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Rgb,
    Ndvi,
    Ndwi,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Rgb => "RGB",
            Capability::Ndvi => "NDVI",
            Capability::Ndwi => "NDWI",
        };
        f.write_str(name)
    }
}

/// Options an image request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOption {
    Proj,
    Gsd,
    BandType,
    CorrectionType,
    Dtype,
    Acomp,
    Dra,
}

impl RequestOption {
    /// Option name as used in request option maps and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            RequestOption::Proj => "proj",
            RequestOption::Gsd => "gsd",
            RequestOption::BandType => "band_type",
            RequestOption::CorrectionType => "correctionType",
            RequestOption::Dtype => "dtype",
            RequestOption::Acomp => "acomp",
            RequestOption::Dra => "dra",
        }
    }
}

impl fmt::Display for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensor family tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorFamily {
    /// Base multispectral behavior, used for WorldView-2.
    WorldView,
    Wv03Swir,
    Wv03Vnir,
    /// Panchromatic-only WorldView-1.
    Wv01,
    Wv04,
}

impl SensorFamily {
    pub const ALL: [SensorFamily; 5] = [
        SensorFamily::WorldView,
        SensorFamily::Wv03Swir,
        SensorFamily::Wv03Vnir,
        SensorFamily::Wv01,
        SensorFamily::Wv04,
    ];

    /// Canonical tag for the family.
    pub fn tag(self) -> &'static str {
        match self {
            SensorFamily::WorldView => "WorldView",
            SensorFamily::Wv03Swir => "WV03_SWIR",
            SensorFamily::Wv03Vnir => "WV03_VNIR",
            SensorFamily::Wv01 => "WV01",
            SensorFamily::Wv04 => "WV04",
        }
    }

    /// Looks up the variant record for this family.
    pub fn variant(self) -> &'static SensorVariant {
        match self {
            SensorFamily::WorldView => &WORLDVIEW,
            SensorFamily::Wv03Swir => &WV03_SWIR,
            SensorFamily::Wv03Vnir => &WV03_VNIR,
            SensorFamily::Wv01 => &WV01,
            SensorFamily::Wv04 => &WV04,
        }
    }
}

impl fmt::Display for SensorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SensorFamily {
    type Err = ImageError;

    /// Parses a sensor tag, ignoring case and `-`/`_` differences.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "WORLDVIEW" | "WV02" => Ok(SensorFamily::WorldView),
            "WV03_SWIR" => Ok(SensorFamily::Wv03Swir),
            "WV03_VNIR" | "WV03" => Ok(SensorFamily::Wv03Vnir),
            "WV01" => Ok(SensorFamily::Wv01),
            "WV04" => Ok(SensorFamily::Wv04),
            _ => Err(ImageError::UnknownSensor(s.to_string())),
        }
    }
}

/// Per-family configuration record.
#[derive(Debug)]
pub struct SensorVariant {
    pub family: SensorFamily,
    /// Band type used when the request does not name one.
    pub default_band_type: BandType,
    /// Replaces the band table lookup when set.
    pub fixed_bands: Option<&'static str>,
    /// Correction applied when neither ACOMP nor an override is requested.
    pub default_correction: &'static str,
    /// Pixel type used when the request does not name one.
    pub default_pixel_type: Option<PixelType>,
    pub supported_options: &'static [RequestOption],
    pub supports_dra: bool,
    /// Display only one band at a time.
    pub single_band_display: bool,
    pub parts_policy: PartsPolicy,
    rgb: Option<&'static [usize]>,
    ndvi: Option<&'static [usize]>,
    ndwi: Option<&'static [usize]>,
}

const ALL_OPTIONS: &[RequestOption] = &[
    RequestOption::Proj,
    RequestOption::Gsd,
    RequestOption::BandType,
    RequestOption::CorrectionType,
    RequestOption::Dtype,
    RequestOption::Acomp,
    RequestOption::Dra,
];

const PAN_OPTIONS: &[RequestOption] = &[
    RequestOption::Proj,
    RequestOption::Gsd,
    RequestOption::BandType,
    RequestOption::CorrectionType,
    RequestOption::Dtype,
];

const BASE_RGB: &[usize] = &[4, 2, 1];
const BASE_NDVI: &[usize] = &[6, 4];
const BASE_NDWI: &[usize] = &[7, 0];

// Statics cannot be struct update bases, so the base record is a const.
const BASE: SensorVariant = SensorVariant {
    family: SensorFamily::WorldView,
    default_band_type: BandType::Multispectral,
    fixed_bands: None,
    default_correction: "TOAREFLECTANCE",
    default_pixel_type: Some(PixelType::Float32),
    supported_options: ALL_OPTIONS,
    supports_dra: true,
    single_band_display: false,
    parts_policy: PartsPolicy::MatchFirstVendor,
    rgb: Some(BASE_RGB),
    ndvi: Some(BASE_NDVI),
    ndwi: Some(BASE_NDWI),
};

static WORLDVIEW: SensorVariant = BASE;

static WV03_SWIR: SensorVariant = SensorVariant {
    family: SensorFamily::Wv03Swir,
    fixed_bands: Some("SWIR"),
    supports_dra: false,
    single_band_display: true,
    parts_policy: PartsPolicy::Unfiltered,
    rgb: None,
    ndvi: None,
    ..BASE
};

static WV03_VNIR: SensorVariant = SensorVariant {
    family: SensorFamily::Wv03Vnir,
    ..BASE
};

static WV01: SensorVariant = SensorVariant {
    family: SensorFamily::Wv01,
    default_band_type: BandType::Panchromatic,
    default_correction: "DN",
    default_pixel_type: None,
    supported_options: PAN_OPTIONS,
    supports_dra: false,
    ..BASE
};

static WV04: SensorVariant = SensorVariant {
    family: SensorFamily::Wv04,
    rgb: Some(&[2, 1, 0]),
    ndvi: Some(&[2, 3]),
    ..BASE
};

impl SensorVariant {
    /// Value of the strip node's `bands` parameter for a band type.
    pub fn strip_bands(&self, band_type: BandType) -> &'static str {
        self.fixed_bands.unwrap_or_else(|| band_type.strip_bands())
    }

    pub fn supports_option(&self, option: RequestOption) -> bool {
        self.supported_options.contains(&option)
    }

    /// Band indices for a derived capability.
    pub fn bands_for(&self, capability: Capability) -> ImageResult<&'static [usize]> {
        let bands = match capability {
            Capability::Rgb => self.rgb,
            Capability::Ndvi => self.ndvi,
            Capability::Ndwi => self.ndwi,
        };
        bands.ok_or(ImageError::UnsupportedCapability {
            capability,
            variant: self.family,
        })
    }

    pub fn rgb_bands(&self) -> ImageResult<&'static [usize]> {
        self.bands_for(Capability::Rgb)
    }

    pub fn ndvi_bands(&self) -> ImageResult<&'static [usize]> {
        self.bands_for(Capability::Ndvi)
    }

    pub fn ndwi_bands(&self) -> ImageResult<&'static [usize]> {
        self.bands_for(Capability::Ndwi)
    }

    /// Checks a band selection intended for display.
    ///
    /// Single-band sensors reject selections of more than one band.
    pub fn check_display_bands(&self, bands: &[usize]) -> ImageResult<()> {
        if self.single_band_display && bands.len() > 1 {
            return Err(ImageError::SingleBandOnly {
                variant: self.family,
                requested: bands.len(),
            });
        }
        Ok(())
    }
}
