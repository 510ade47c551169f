//! Estimate and presentation PDF rendering
//!
//! Documents are described as a [`DocumentSpec`] (title plus page blocks)
//! and rendered by a [`DocumentRenderer`] that stamps the company's header
//! and footer on every page. Output is an in-memory A4 PDF.

pub mod canvas;
mod chrome;
pub mod document;
pub mod error;
pub mod estimate;
pub mod font;
pub mod inspect;
pub mod layout;
pub mod logo;
pub mod presentation;

pub use document::{DocumentRenderer, DocumentSpec, PageBlock};
pub use error::RenderError;
pub use estimate::estimate_document;
pub use logo::LogoImage;
pub use presentation::{presentation_document, Customer, PresentationRequest, PriceRow, PriceTotals};
