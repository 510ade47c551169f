//! Page-at-a-time PDF drawing surface
//!
//! Drawing calls append content operations to the current page;
//! [`PdfCanvas::show_page`] closes it. Fonts and images live in one
//! resource dictionary shared by every page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::RenderError;
use crate::font::{self, encode_text, text_width, TextStyle};
use crate::layout::{Rgb, PAGE_HEIGHT, PAGE_WIDTH};

/// Bezier control distance for a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// Horizontal shear used for oblique text
const OBLIQUE_SHEAR: f32 = 0.212_556;

/// How a path is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Fill,
    Stroke,
    FillStroke,
}

impl Paint {
    fn operator(self) -> &'static str {
        match self {
            Paint::Fill => "f",
            Paint::Stroke => "S",
            Paint::FillStroke => "B",
        }
    }
}

/// Name of an image XObject registered on the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Document metadata written to the trailer's `/Info`
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    fonts: Dictionary,
    xobjects: Dictionary,
    page_ids: Vec<ObjectId>,
    ops: Vec<Operation>,
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        let fonts = font::register(&mut doc);
        Self {
            doc,
            pages_id,
            resources_id,
            fonts,
            xobjects: Dictionary::new(),
            page_ids: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Pages closed so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn set_fill(&mut self, color: Rgb) {
        self.push("rg", vec![real(color.r), real(color.g), real(color.b)]);
    }

    pub fn set_stroke(&mut self, color: Rgb) {
        self.push("RG", vec![real(color.r), real(color.g), real(color.b)]);
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint) {
        self.push("re", vec![real(x), real(y), real(width), real(height)]);
        self.push(paint.operator(), vec![]);
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, paint: Paint) {
        let k = r * KAPPA;
        self.push("m", vec![real(cx + r), real(cy)]);
        let quarters = [
            [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
            [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
            [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
            [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
        ];
        for q in quarters {
            self.push("c", q.iter().copied().map(real).collect());
        }
        self.push("h", vec![]);
        self.push(paint.operator(), vec![]);
    }

    /// Draw `text` with its baseline starting at (`x`, `y`)
    pub fn text(&mut self, x: f32, y: f32, style: TextStyle, text: &str) {
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(style.font.resource_name().as_bytes().to_vec()),
                real(style.size),
            ],
        );
        if style.oblique {
            self.push(
                "Tm",
                vec![
                    real(1.0),
                    real(0.0),
                    real(OBLIQUE_SHEAR),
                    real(1.0),
                    real(x),
                    real(y),
                ],
            );
        } else {
            self.push("Td", vec![real(x), real(y)]);
        }
        self.push(
            "Tj",
            vec![Object::String(encode_text(text), StringFormat::Hexadecimal)],
        );
        self.push("ET", vec![]);
    }

    /// Draw `text` so that it ends at `x_right`
    pub fn text_right(&mut self, x_right: f32, y: f32, style: TextStyle, text: &str) {
        let x = x_right - text_width(text, style.size);
        self.text(x, y, style, text);
    }

    /// Draw `text` centred on `x_center`
    pub fn text_centred(&mut self, x_center: f32, y: f32, style: TextStyle, text: &str) {
        let x = x_center - text_width(text, style.size) / 2.0;
        self.text(x, y, style, text);
    }

    /// Register an 8-bit RGB image, with an optional 8-bit alpha channel
    pub fn embed_image(
        &mut self,
        width: u32,
        height: u32,
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    ) -> ImageHandle {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        if let Some(alpha) = alpha {
            let mask_id = self.doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(width),
                    "Height" => i64::from(height),
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha,
            ));
            dict.set("SMask", mask_id);
        }
        let image_id = self.doc.add_object(Stream::new(dict, rgb));
        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.set(name.as_str(), image_id);
        ImageHandle(name)
    }

    pub fn image(&mut self, handle: &ImageHandle, x: f32, y: f32, width: f32, height: f32) {
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                real(width),
                real(0.0),
                real(0.0),
                real(height),
                real(x),
                real(y),
            ],
        );
        self.push("Do", vec![Object::Name(handle.0.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    /// Close the current page and start a fresh one
    pub fn show_page(&mut self) -> Result<(), RenderError> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let bytes = content
            .encode()
            .map_err(|e| RenderError::EncodeError(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Write the finished document. A page with pending drawing is closed first.
    pub fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        if !self.ops.is_empty() {
            self.show_page()?;
        }

        let mut resources = dictionary! {
            "Font" => self.fonts,
            "ProcSet" => vec!["PDF".into(), "Text".into(), "ImageC".into()],
        };
        if !self.xobjects.is_empty() {
            resources.set("XObject", self.xobjects);
        }
        self.doc
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => font::text_string(&info.title),
            "Author" => font::text_string(&info.author),
            "Producer" => Object::string_literal(concat!("quote-pdf ", env!("CARGO_PKG_VERSION"))),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| RenderError::WriteError(e.to_string()))?;
        Ok(output)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}
