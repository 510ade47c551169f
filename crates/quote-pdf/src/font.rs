//! Japanese text fonts
//!
//! Text is set in the non-embedded Adobe-Japan1 font HeiseiKakuGo-W5, which
//! every conforming Japanese-capable reader provides. Strings are encoded as
//! UTF-16BE through the `UniJIS-UCS2-HW-H` CMap, which maps ASCII to the
//! half-width glyphs (CIDs 231..=325, 500 units wide).

use lopdf::{dictionary, Dictionary, Document, Object, StringFormat};

const CMAP: &str = "UniJIS-UCS2-HW-H";
const FAMILY: &str = "HeiseiKakuGo-W5";

/// Replacement for characters outside the Basic Multilingual Plane
const GETA: u16 = 0x3013;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Gothic,
    GothicBold,
}

impl Font {
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Gothic => "F1",
            Font::GothicBold => "F2",
        }
    }

    fn base_font(self) -> String {
        match self {
            Font::Gothic => FAMILY.to_string(),
            Font::GothicBold => format!("{},Bold", FAMILY),
        }
    }

    fn flags(self) -> i64 {
        // Symbolic, plus ForceBold for the bold face
        match self {
            Font::Gothic => 4,
            Font::GothicBold => 4 | (1 << 18),
        }
    }
}

/// Font, size and slant used for a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub oblique: bool,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        Self {
            font: Font::Gothic,
            size,
            oblique: false,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            font: Font::GothicBold,
            size,
            oblique: false,
        }
    }

    pub const fn oblique(size: f32) -> Self {
        Self {
            font: Font::Gothic,
            size,
            oblique: true,
        }
    }
}

fn is_half_width(c: char) -> bool {
    matches!(c, ' '..='~' | '¥' | '\u{FF61}'..='\u{FF9F}')
}

/// Advance width of `text` at `size` points
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| if is_half_width(c) { 500 } else { 1000 })
        .sum();
    units as f32 * size / 1000.0
}

/// Encode `text` as UTF-16BE code units for a `Tj` operand
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for c in text.chars() {
        let unit = u16::try_from(u32::from(c)).unwrap_or(GETA);
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Decode a string written by [`encode_text`]
pub fn decode_text(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// A PDF text string (document info entries): UTF-16BE with a byte order mark
pub fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Add both faces to `doc` and return the `/Font` resource dictionary
pub(crate) fn register(doc: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in [Font::Gothic, Font::GothicBold] {
        let base = font.base_font();

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(base.clone().into_bytes()),
            "Flags" => font.flags(),
            "FontBBox" => vec![(-92).into(), (-250).into(), 1010.into(), 922.into()],
            "ItalicAngle" => 0,
            "Ascent" => 752,
            "Descent" => -221,
            "CapHeight" => 737,
            "StemV" => 114,
        });

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType0",
            "BaseFont" => Object::Name(base.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Japan1"),
                "Supplement" => 2,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => 1000,
            "W" => vec![231.into(), 325.into(), 500.into()],
        });

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(format!("{}-{}", base, CMAP).into_bytes()),
            "Encoding" => CMAP,
            "DescendantFonts" => vec![cid_font_id.into()],
        });

        fonts.set(font.resource_name(), font_id);
    }
    fonts
}
