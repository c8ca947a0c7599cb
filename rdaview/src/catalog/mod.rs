//! Catalog access and IDAHO part resolution.
//!
//! A WorldView catalog id is often delivered as several IDAHO image records.
//! This module defines the catalog collaborator ([`CatalogClient`]), the
//! records it returns ([`CatalogRecord`]) and the resolver that decides which
//! of them form one composite image ([`resolve_parts`]).
//!
//! ```ignore
//! use rdaview::catalog::{resolve_parts, ReqwestClient, VectorServicesCatalog};
//! use rdaview::sensor::{BandType, SensorFamily};
//!
//! let catalog = VectorServicesCatalog::new(ReqwestClient::new()?, url, 1000);
//! let parts = resolve_parts(
//!     SensorFamily::WorldView.variant(),
//!     &catalog,
//!     "1030010076B8F500",
//!     BandType::Multispectral,
//! )?;
//! ```

mod http;
mod parts;
mod record;
mod vector;

pub use http::{HttpClient, ReqwestClient};
pub use parts::{catalog_query, filter_first_vendor, resolve_parts, PartsPolicy, IDAHO_ITEM_TYPE};
pub use record::{CatalogRecord, VendorId};
pub use vector::{CatalogClient, VectorServicesCatalog};

#[cfg(test)]
pub use http::tests::MockHttpClient;
#[cfg(test)]
pub use vector::tests::MockCatalog;

use thiserror::Error;

/// Errors raised by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not a recognizable record list.
    #[error("Failed to parse catalog response: {0}")]
    Parse(String),

    /// A record lacks a field the caller needs.
    #[error("Malformed catalog record: {0}")]
    MalformedRecord(String),
}
