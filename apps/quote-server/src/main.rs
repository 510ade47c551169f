//! Renovation Quote Server
//!
//! Serves the quoting page and provides REST endpoints for:
//!
//! - Estimate calculation against the fixed price catalog
//! - Estimate PDF download
//! - Sales presentation PDF download
//!
//! Company data and the price catalog are built once at startup and shared
//! read-only by every request.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use quote_core::{CompanyProfile, PriceCatalog};
use quote_pdf::LogoImage;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod extract;

use api::{
    handle_estimate_pdf, handle_generate_estimate, handle_health, handle_list_catalog,
    handle_presentation_pdf,
};

/// Command-line arguments for the quote server
#[derive(Parser, Debug)]
#[command(name = "quote-server")]
#[command(about = "Renovation estimate and presentation PDF server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory holding index.html and other static assets
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Logo image drawn in the document header
    #[arg(long, default_value = "assets/logo.jpg")]
    logo: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub company: Arc<CompanyProfile>,
    pub catalog: Arc<PriceCatalog>,
    /// Decoded once at startup; `None` when the file was unusable
    pub logo: Option<Arc<LogoImage>>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        company: CompanyProfile,
        catalog: PriceCatalog,
        logo: Option<LogoImage>,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            company: Arc::new(company),
            catalog: Arc::new(catalog),
            logo: logo.map(Arc::new),
            static_dir,
        }
    }
}

/// Routes without middleware
pub fn build_router(state: AppState) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        // Entry page
        .route_service("/", index)
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/catalog", get(handle_list_catalog))
        .route("/api/estimate/generate", post(handle_generate_estimate))
        .route("/api/estimate/pdf", post(handle_estimate_pdf))
        .route("/api/presentation/pdf", post(handle_presentation_pdf))
        // Static assets
        .nest_service("/static", assets)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting quote server on {}:{}", args.host, args.port);

    if !args.static_dir.join("index.html").is_file() {
        warn!("No index.html in {}", args.static_dir.display());
    }

    let catalog = PriceCatalog::standard();
    info!("Price catalog loaded with {} items", catalog.len());

    let company = CompanyProfile::sugimotoya(&args.logo);
    let logo = LogoImage::load_or_skip(&company.logo_path);

    // Create shared state
    let state = AppState::new(company, catalog, logo, args.static_dir.clone());

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Static files from {}", args.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
