//! IDAHO part resolution.
//!
//! One catalog id may map to several IDAHO records, and a catalog query can
//! return records from more than one vendor pipeline. The default policy keeps
//! the records whose vendor id matches the first record returned. SWIR keeps
//! everything the catalog returns, unfiltered and without the empty-result
//! check.

use tracing::debug;

use super::{CatalogClient, CatalogRecord};
use crate::error::{ImageError, ImageResult};
use crate::sensor::{BandType, SensorVariant};

/// Catalog item type of IDAHO image records.
pub const IDAHO_ITEM_TYPE: &str = "IDAHOImage";

/// How a sensor filters the records returned for its catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartsPolicy {
    /// Keep records sharing the first record's vendor id. Empty results fail.
    MatchFirstVendor,
    /// Keep every record returned.
    Unfiltered,
}

/// Catalog query string selecting the IDAHO records of a catalog id.
pub fn catalog_query(cat_id: &str) -> String {
    format!(
        "item_type:{} AND attributes.catalogID:{}",
        IDAHO_ITEM_TYPE, cat_id
    )
}

/// Keep the records whose vendor id equals the first record's, in order.
///
/// Returns `None` for an empty input.
pub fn filter_first_vendor(records: Vec<CatalogRecord>) -> Option<Vec<CatalogRecord>> {
    let first = records.first()?.vendor_id();
    Some(
        records
            .into_iter()
            .filter(|record| record.vendor_id() == first)
            .collect(),
    )
}

/// Resolve the records that make up one composite image.
///
/// `band_type` does not change the query; it is accepted so callers can pass
/// the request through unchanged.
///
/// # Errors
///
/// - [`ImageError::MissingImagery`] when the default policy finds no records
/// - [`ImageError::Catalog`] when the catalog query itself fails
pub fn resolve_parts<C: CatalogClient + ?Sized>(
    variant: &SensorVariant,
    catalog: &C,
    cat_id: &str,
    band_type: BandType,
) -> ImageResult<Vec<CatalogRecord>> {
    let query = catalog_query(cat_id);
    let records = catalog.query(&query)?;
    let returned = records.len();

    let parts = match variant.parts_policy {
        PartsPolicy::Unfiltered => records,
        PartsPolicy::MatchFirstVendor => match filter_first_vendor(records) {
            Some(parts) => parts,
            None => return Err(ImageError::MissingImagery { query }),
        },
    };

    debug!(
        cat_id,
        sensor = %variant.family,
        %band_type,
        returned,
        kept = parts.len(),
        "Resolved IDAHO parts"
    );

    Ok(parts)
}
