//! Header band and footer drawn on every page

use quote_core::CompanyProfile;

use crate::canvas::{ImageHandle, Paint, PdfCanvas};
use crate::font::TextStyle;
use crate::layout::{Rgb, BAND_HEIGHT, FOOTER_BASELINE, PAGE_HEIGHT, PAGE_WIDTH};

pub(crate) struct Chrome<'a> {
    company: &'a CompanyProfile,
    logo: Option<ImageHandle>,
    footer: String,
}

impl<'a> Chrome<'a> {
    pub(crate) fn new(company: &'a CompanyProfile, logo: Option<ImageHandle>) -> Self {
        Self {
            company,
            logo,
            footer: company.footer_line(),
        }
    }

    /// Draw the band, logo, company name, page `title` and footer.
    /// Leaves the fill colour black.
    pub(crate) fn draw(&self, canvas: &mut PdfCanvas, title: &str) {
        canvas.set_fill(Rgb::BRAND_BLUE);
        canvas.rect(
            0.0,
            PAGE_HEIGHT - BAND_HEIGHT,
            PAGE_WIDTH,
            BAND_HEIGHT,
            Paint::Fill,
        );
        if let Some(logo) = &self.logo {
            canvas.image(logo, 10.0, PAGE_HEIGHT - 28.0, 40.0, 14.0);
        }

        canvas.set_fill(Rgb::WHITE);
        canvas.text(60.0, PAGE_HEIGHT - 20.0, TextStyle::bold(12.0), &self.company.name);
        canvas.text_right(
            PAGE_WIDTH - 20.0,
            PAGE_HEIGHT - 20.0,
            TextStyle::regular(9.0),
            title,
        );

        canvas.set_fill(Rgb::BLACK);
        canvas.text(20.0, FOOTER_BASELINE, TextStyle::regular(8.0), &self.footer);
    }
}
