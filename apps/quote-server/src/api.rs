//! API handlers for the quote server
//!
//! Provides REST endpoints for:
//! - Estimate calculation
//! - Estimate and presentation PDF downloads
//! - Catalog listing

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use quote_core::{
    CompanyProfile, EstimateCalculator, EstimateRequest, EstimateResult, PriceCatalogEntry,
};
use quote_pdf::{
    estimate_document, presentation_document, DocumentRenderer, DocumentSpec, LogoImage,
    PresentationRequest,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::extract::LenientJson;
use crate::AppState;

pub const ESTIMATE_FILENAME: &str = "estimate_demo.pdf";
pub const PRESENTATION_FILENAME: &str = "presentation_demo.pdf";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "quote-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Catalog list response
#[derive(Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub items: Vec<PriceCatalogEntry>,
    pub count: usize,
}

/// Handler: GET /api/catalog
pub async fn handle_list_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let items: Vec<PriceCatalogEntry> = state.catalog.entries().cloned().collect();
    let count = items.len();
    Json(CatalogResponse {
        success: true,
        items,
        count,
    })
}

/// Handler: POST /api/estimate/generate
pub async fn handle_generate_estimate(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<EstimateRequest>,
) -> Json<EstimateResult> {
    info!("Estimate request: {} lines", req.lines.len());
    debug!("Request: {:?}", req);

    let result = EstimateCalculator::new(&state.catalog).calculate_request(&req);
    info!(
        "Estimate priced {} of {} lines, total {}",
        result.lines.len(),
        req.lines.len(),
        result.total
    );
    Json(result)
}

/// Handler: POST /api/estimate/pdf
///
/// Renders the totals exactly as sent; nothing is recalculated.
pub async fn handle_estimate_pdf(
    State(state): State<AppState>,
    LenientJson(sheet): LenientJson<EstimateResult>,
) -> Result<Response, ServerError> {
    info!("Estimate PDF request: {} lines", sheet.lines.len());
    let bytes = render_pdf(&state, estimate_document(sheet)).await?;
    Ok(pdf_attachment(bytes, ESTIMATE_FILENAME))
}

/// Handler: POST /api/presentation/pdf
pub async fn handle_presentation_pdf(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<PresentationRequest>,
) -> Result<Response, ServerError> {
    info!(
        "Presentation PDF request: customer={}, bullets={}, price_rows={}",
        req.customer.is_some(),
        req.bullets.as_ref().map_or(0, Vec::len),
        req.price_rows.as_ref().map_or(0, Vec::len)
    );
    let bytes = render_pdf(&state, presentation_document(req)).await?;
    Ok(pdf_attachment(bytes, PRESENTATION_FILENAME))
}

/// Render off the async runtime; the whole document is buffered before
/// anything is sent.
async fn render_pdf(state: &AppState, spec: DocumentSpec) -> Result<Vec<u8>, ServerError> {
    let company: Arc<CompanyProfile> = state.company.clone();
    let logo: Option<Arc<LogoImage>> = state.logo.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        DocumentRenderer::new(&company)
            .with_logo(logo.as_deref())
            .render(&spec)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Render task failed: {}", e)))??;
    debug!("Rendered {} bytes", bytes.len());
    Ok(bytes)
}

fn pdf_attachment(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
