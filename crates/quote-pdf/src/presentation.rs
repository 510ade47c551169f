//! Four-page sales presentation: cover, plan summary, price summary and
//! company information. Content is assumed to fit; nothing paginates.

use quote_core::{format_yen, lenient, parse_yen, CompanyProfile, TaxRate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::canvas::{Paint, PdfCanvas};
use crate::chrome::Chrome;
use crate::document::{DocumentSpec, PageBlock};
use crate::error::RenderError;
use crate::font::TextStyle;
use crate::layout::{Rgb, BODY_TOP, PAGE_HEIGHT, PAGE_WIDTH};

pub const HEADING: &str = "リフォーム提案書（デモ）";

/// Body of `POST /api/presentation/pdf`; absent fields use sample content.
///
/// Each field is decoded on its own: a `customer` that is not an object, or
/// `bullets`/`price_rows` that are not arrays, count as absent. Bullets are
/// scalars written out as text; other entries are skipped, as are price
/// rows that are neither pairs nor `{name, value}` objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationRequest {
    pub customer: Option<Customer>,
    pub bullets: Option<Vec<String>>,
    pub price_rows: Option<Vec<PriceRow>>,
}

impl PresentationRequest {
    pub fn from_value(value: &Value) -> Self {
        let array = |field: &str| value.get(field).and_then(Value::as_array);
        Self {
            customer: value
                .get("customer")
                .filter(|c| c.is_object())
                .map(Customer::from_value),
            bullets: array("bullets")
                .map(|items| items.iter().filter_map(lenient::text).collect()),
            price_rows: array("price_rows")
                .map(|items| items.iter().filter_map(PriceRow::from_value).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for PresentationRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self::from_value(&v))
    }
}

/// Customer block on the cover; missing fields render empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub date: String,
}

impl Customer {
    pub fn sample() -> Self {
        Self {
            name: "山田 太郎 様".to_string(),
            address: "東京都新宿区〇〇".to_string(),
            date: "2025/08/08".to_string(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            name: lenient::text_field(value, "name"),
            address: lenient::text_field(value, "address"),
            date: lenient::text_field(value, "date"),
        }
    }
}

/// A labelled amount on the price summary page.
///
/// Accepts either `["キッチン", "¥630,000"]` or
/// `{"name": "キッチン", "value": "¥630,000"}`; numeric values are written
/// out as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub name: String,
    pub value: String,
}

impl PriceRow {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `None` when `value` has neither accepted shape
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(pair) => match pair.as_slice() {
                [name, amount] => Some(Self {
                    name: lenient::text(name)?,
                    value: lenient::text(amount)?,
                }),
                _ => None,
            },
            Value::Object(_) => Some(Self {
                name: lenient::text_field(value, "name"),
                value: lenient::text_field(value, "value"),
            }),
            _ => None,
        }
    }
}

/// Pre-tax subtotal, 10% tax and total of the price rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceTotals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl PriceTotals {
    /// Sum the rows whose value reads as a yen amount; other rows are shown
    /// but not counted.
    pub fn from_rows(rows: &[PriceRow]) -> Self {
        let subtotal = rows
            .iter()
            .filter_map(|r| parse_yen(&r.value))
            .fold(0i64, i64::saturating_add);
        let tax = TaxRate::DEFAULT.tax_on(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

pub fn default_bullets() -> Vec<String> {
    [
        "キッチン：I型2550／食洗機搭載／静音シンク",
        "浴室：ユニットバス1216／保温浴槽／換気乾燥暖房機",
        "トイレ：節水型＋温水洗浄便座",
        "洗面：W750三面鏡／LED照明",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_price_rows() -> Vec<PriceRow> {
    vec![
        PriceRow::new("キッチン", "¥630,000"),
        PriceRow::new("浴室", "¥900,000"),
        PriceRow::new("トイレ", "¥200,000"),
        PriceRow::new("洗面室", "¥145,000"),
        PriceRow::new("諸経費", "¥90,400"),
    ]
}

/// Resolve defaults and lay out the four presentation pages
pub fn presentation_document(request: PresentationRequest) -> DocumentSpec {
    let customer = request.customer.unwrap_or_else(Customer::sample);
    let bullets = request.bullets.unwrap_or_else(default_bullets);
    let rows = request.price_rows.unwrap_or_else(default_price_rows);
    let totals = PriceTotals::from_rows(&rows);

    DocumentSpec {
        title: HEADING.to_string(),
        pages: vec![
            PageBlock::Cover(customer),
            PageBlock::PlanSummary(bullets),
            PageBlock::PriceSummary { rows, totals },
            PageBlock::CompanyInfo,
        ],
    }
}

pub(crate) fn draw_cover(
    canvas: &mut PdfCanvas,
    chrome: &Chrome<'_>,
    title: &str,
    customer: &Customer,
) -> Result<(), RenderError> {
    chrome.draw(canvas, title);
    canvas.text(30.0, PAGE_HEIGHT - 90.0, TextStyle::bold(22.0), HEADING);

    let fields = [
        (30.0, "お客様名", customer.name.as_str()),
        (220.0, "現場住所", customer.address.as_str()),
        (410.0, "日付", customer.date.as_str()),
    ];
    for (x, label, value) in fields {
        canvas.set_fill(Rgb::GREY);
        canvas.text(x, PAGE_HEIGHT - 115.0, TextStyle::regular(10.0), label);
        canvas.set_fill(Rgb::BLACK);
        canvas.text(x, PAGE_HEIGHT - 130.0, TextStyle::bold(12.0), value);
    }

    // Key visual placeholder
    canvas.set_stroke(Rgb::GREY);
    canvas.rect(
        30.0,
        PAGE_HEIGHT - 350.0,
        PAGE_WIDTH - 60.0,
        180.0,
        Paint::Stroke,
    );
    canvas.set_fill(Rgb::GREY);
    canvas.text_centred(
        PAGE_WIDTH / 2.0,
        PAGE_HEIGHT - 260.0,
        TextStyle::oblique(10.0),
        "キービジュアル（完成イメージ）",
    );
    canvas.set_fill(Rgb::BLACK);

    canvas.show_page()
}

pub(crate) fn draw_plan_summary(
    canvas: &mut PdfCanvas,
    chrome: &Chrome<'_>,
    title: &str,
    bullets: &[String],
) -> Result<(), RenderError> {
    chrome.draw(canvas, title);
    canvas.text(30.0, BODY_TOP, TextStyle::bold(16.0), "提案プラン概要");

    let mut y = PAGE_HEIGHT - 100.0;
    for bullet in bullets {
        canvas.circle(35.0, y + 3.0, 1.5, Paint::FillStroke);
        canvas.text(45.0, y, TextStyle::regular(11.0), bullet);
        y -= 18.0;
    }

    // Floor plan placeholder
    canvas.rect(
        PAGE_WIDTH - 210.0,
        PAGE_HEIGHT - 320.0,
        160.0,
        180.0,
        Paint::Stroke,
    );
    canvas.set_fill(Rgb::GREY);
    canvas.text_centred(
        PAGE_WIDTH - 130.0,
        PAGE_HEIGHT - 230.0,
        TextStyle::oblique(10.0),
        "間取り図 / 3Dイメージ",
    );
    canvas.set_fill(Rgb::BLACK);

    canvas.show_page()
}

pub(crate) fn draw_price_summary(
    canvas: &mut PdfCanvas,
    chrome: &Chrome<'_>,
    title: &str,
    rows: &[PriceRow],
    totals: &PriceTotals,
) -> Result<(), RenderError> {
    chrome.draw(canvas, title);
    canvas.text(30.0, BODY_TOP, TextStyle::bold(16.0), "価格まとめ（税抜）");

    let right = PAGE_WIDTH - 40.0;
    let mut y = PAGE_HEIGHT - 110.0;
    let body = TextStyle::regular(11.0);
    for row in rows {
        canvas.text(40.0, y, body, &row.name);
        canvas.text_right(right, y, body, &row.value);
        y -= 20.0;
    }

    let bold = TextStyle::bold(12.0);
    let summary = [
        ("小計", totals.subtotal),
        ("消費税(10%)", totals.tax),
        ("合計", totals.total),
    ];
    for (i, (label, amount)) in summary.into_iter().enumerate() {
        let line_y = y - 10.0 - 20.0 * i as f32;
        canvas.text(40.0, line_y, bold, label);
        canvas.text_right(right, line_y, bold, &format_yen(amount));
    }

    canvas.show_page()
}

pub(crate) fn draw_company_info(
    canvas: &mut PdfCanvas,
    chrome: &Chrome<'_>,
    title: &str,
    company: &CompanyProfile,
) -> Result<(), RenderError> {
    chrome.draw(canvas, title);
    canvas.text(30.0, BODY_TOP, TextStyle::bold(16.0), "会社情報");

    let lines = [
        company.name.clone(),
        format!("代表取締役 {}", company.ceo),
        company.license.clone(),
        company.address.clone(),
        format!("{} / {}", company.tel, company.fax),
        company.mobile.clone(),
        company.email_primary.clone(),
        company.email_secondary.clone(),
        company.website.clone(),
    ];
    for (i, line) in lines.iter().enumerate() {
        canvas.text(
            40.0,
            PAGE_HEIGHT - 100.0 - 20.0 * i as f32,
            TextStyle::regular(11.0),
            line,
        );
    }

    canvas.show_page()
}
