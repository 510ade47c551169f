//! Document description and the renderer that turns it into PDF bytes

use quote_core::{CompanyProfile, EstimateResult};
use tracing::debug;

use crate::canvas::{DocumentInfo, PdfCanvas};
use crate::chrome::Chrome;
use crate::error::RenderError;
use crate::estimate;
use crate::logo::LogoImage;
use crate::presentation::{self, Customer, PriceRow, PriceTotals};

/// What to render: a document title and its page blocks in order
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSpec {
    pub title: String,
    pub pages: Vec<PageBlock>,
}

/// Content of one logical page.
///
/// Only `Estimate` may spill onto further physical pages; every other block
/// is laid out on exactly one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBlock {
    Estimate(EstimateResult),
    Cover(Customer),
    PlanSummary(Vec<String>),
    PriceSummary {
        rows: Vec<PriceRow>,
        totals: PriceTotals,
    },
    CompanyInfo,
}

impl PageBlock {
    /// Title shown at the right of the header band
    pub fn chrome_title(&self) -> &'static str {
        match self {
            PageBlock::Estimate(_) => "見積書",
            PageBlock::Cover(_) => "表紙 / Cover",
            PageBlock::PlanSummary(_) => "プラン概要",
            PageBlock::PriceSummary { .. } => "価格まとめ",
            PageBlock::CompanyInfo => "会社情報",
        }
    }
}

/// Renders [`DocumentSpec`]s with a company's chrome.
///
/// Holds no mutable state; every call builds its own document in memory.
/// Only PDF encoding failures are returned as errors. Without a decoded
/// logo the header is drawn without one.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRenderer<'a> {
    company: &'a CompanyProfile,
    logo: Option<&'a LogoImage>,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(company: &'a CompanyProfile) -> Self {
        Self {
            company,
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Option<&'a LogoImage>) -> Self {
        self.logo = logo;
        self
    }

    pub fn render(&self, spec: &DocumentSpec) -> Result<Vec<u8>, RenderError> {
        let mut canvas = PdfCanvas::new();
        let logo = self.logo.map(|logo| logo.embed(&mut canvas));
        let chrome = Chrome::new(self.company, logo);

        for block in &spec.pages {
            let title = block.chrome_title();
            match block {
                PageBlock::Estimate(sheet) => {
                    estimate::draw_estimate(&mut canvas, &chrome, title, sheet)?
                }
                PageBlock::Cover(customer) => {
                    presentation::draw_cover(&mut canvas, &chrome, title, customer)?
                }
                PageBlock::PlanSummary(bullets) => {
                    presentation::draw_plan_summary(&mut canvas, &chrome, title, bullets)?
                }
                PageBlock::PriceSummary { rows, totals } => {
                    presentation::draw_price_summary(&mut canvas, &chrome, title, rows, totals)?
                }
                PageBlock::CompanyInfo => {
                    presentation::draw_company_info(&mut canvas, &chrome, title, self.company)?
                }
            }
        }

        debug!("Rendered '{}' with {} pages", spec.title, canvas.page_count());
        canvas.finish(&DocumentInfo {
            title: spec.title.clone(),
            author: self.company.name.clone(),
        })
    }
}
