//! Renovation quoting core
//!
//! Static company and catalog data plus the estimate calculator shared by
//! the PDF renderer and the HTTP server.

pub mod catalog;
pub mod company;
pub mod error;
pub mod estimate;
pub mod lenient;
pub mod money;
pub mod request;

pub use catalog::{PriceCatalog, PriceCatalogEntry};
pub use company::CompanyProfile;
pub use error::QuoteError;
pub use estimate::{EstimateCalculator, EstimateResult, PricedLineItem, TaxRate};
pub use money::{format_yen, group_thousands, parse_yen};
pub use request::{EstimateRequest, LineItemRequest, RequestedQuantity, RequestedTaxRate};
