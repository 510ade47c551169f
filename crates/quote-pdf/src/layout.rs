//! Page geometry and colours shared by every document
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

/// A4 width in points
pub const PAGE_WIDTH: f32 = 595.275_6;
/// A4 height in points
pub const PAGE_HEIGHT: f32 = 841.889_8;

/// Height of the coloured header band
pub const BAND_HEIGHT: f32 = 30.0;
/// Baseline of the footer contact line
pub const FOOTER_BASELINE: f32 = 15.0;

/// First body baseline below the header
pub const BODY_TOP: f32 = PAGE_HEIGHT - 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const GREY: Rgb = Rgb::new(0.501_961, 0.501_961, 0.501_961);
    pub const BRAND_BLUE: Rgb = Rgb::new(0.15, 0.35, 0.65);
}
