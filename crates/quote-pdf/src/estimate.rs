//! Estimate document
//!
//! Lines are laid out top-down with greedy pagination: after each line the
//! cursor drops by [`LINE_STEP`], and once it is below [`BOTTOM_LIMIT`] the
//! page is closed and the next one starts at [`BODY_TOP`] with fresh chrome.

use quote_core::{format_yen, EstimateResult, PricedLineItem};

use crate::canvas::PdfCanvas;
use crate::chrome::Chrome;
use crate::document::{DocumentSpec, PageBlock};
use crate::error::RenderError;
use crate::font::TextStyle;
use crate::layout::BODY_TOP;

pub const HEADING: &str = "見積書（デモ）";

pub const LINE_STEP: f32 = 18.0;
pub const BOTTOM_LIMIT: f32 = 100.0;

/// One estimate block titled like the printed form
pub fn estimate_document(sheet: EstimateResult) -> DocumentSpec {
    DocumentSpec {
        title: HEADING.to_string(),
        pages: vec![PageBlock::Estimate(sheet)],
    }
}

pub fn line_text(line: &PricedLineItem) -> String {
    format!(
        "- {} x {}  = {}",
        line.description,
        line.quantity,
        format_yen(line.line_total)
    )
}

pub(crate) fn draw_estimate(
    canvas: &mut PdfCanvas,
    chrome: &Chrome<'_>,
    title: &str,
    sheet: &EstimateResult,
) -> Result<(), RenderError> {
    chrome.draw(canvas, title);

    let mut y = BODY_TOP;
    canvas.text(30.0, y, TextStyle::bold(16.0), HEADING);
    y -= 30.0;

    let body = TextStyle::regular(11.0);
    for line in &sheet.lines {
        canvas.text(40.0, y, body, &line_text(line));
        y -= LINE_STEP;
        if y < BOTTOM_LIMIT {
            canvas.show_page()?;
            chrome.draw(canvas, title);
            y = BODY_TOP;
        }
    }

    y -= 10.0;
    let totals = TextStyle::bold(12.0);
    canvas.text(40.0, y, totals, &format!("小計: {}", format_yen(sheet.subtotal)));
    y -= LINE_STEP;
    canvas.text(40.0, y, totals, &format!("消費税: {}", format_yen(sheet.tax)));
    y -= LINE_STEP;
    canvas.text(40.0, y, totals, &format!("合計: {}", format_yen(sheet.total)));

    canvas.show_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentRenderer;
    use crate::inspect;
    use pretty_assertions::assert_eq;
    use quote_core::{CompanyProfile, EstimateCalculator, LineItemRequest, PriceCatalog, TaxRate};

    fn company() -> CompanyProfile {
        CompanyProfile::sugimotoya("/nonexistent/logo.jpg")
    }

    fn sheet_with_lines(count: usize) -> EstimateResult {
        let lines: Vec<PricedLineItem> = (0..count)
            .map(|i| PricedLineItem {
                code: format!("L-{:02}", i),
                description: format!("項目{}", i),
                quantity: 1,
                line_total: 1000 * (i as i64 + 1),
            })
            .collect();
        let subtotal = lines.iter().map(|l| l.line_total).sum();
        let tax = TaxRate::DEFAULT.tax_on(subtotal);
        EstimateResult {
            lines,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    fn render(sheet: EstimateResult) -> Vec<u8> {
        let company = company();
        DocumentRenderer::new(&company)
            .render(&estimate_document(sheet))
            .unwrap()
    }

    #[test]
    fn test_line_text_format() {
        let line = PricedLineItem {
            code: "T-01".into(),
            description: "便器交換（温水洗浄便座付）".into(),
            quantity: 2,
            line_total: 240_000,
        };
        assert_eq!(line_text(&line), "- 便器交換（温水洗浄便座付） x 2  = ¥240,000");
    }

    #[test]
    fn test_single_page_estimate() {
        let catalog = PriceCatalog::standard();
        let sheet = EstimateCalculator::new(&catalog).calculate(
            TaxRate::DEFAULT,
            &[LineItemRequest::new("K-01", 1), LineItemRequest::new("T-01", 2)],
        );
        let bytes = render(sheet);

        let pages = inspect::page_strings(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        let body: Vec<&str> = pages[0][3..].iter().map(String::as_str).collect();
        assert_eq!(
            body,
            vec![
                "見積書（デモ）",
                "- システムキッチン標準 x 1  = ¥450,000",
                "- 便器交換（温水洗浄便座付） x 2  = ¥240,000",
                "小計: ¥690,000",
                "消費税: ¥69,000",
                "合計: ¥759,000",
            ]
        );
    }

    #[test]
    fn test_page_break_thresholds() {
        // 36 lines fit above the limit on the first page, 38 on later pages
        assert_eq!(inspect::page_count(&render(sheet_with_lines(35))).unwrap(), 1);
        assert_eq!(inspect::page_count(&render(sheet_with_lines(36))).unwrap(), 2);
        assert_eq!(inspect::page_count(&render(sheet_with_lines(73))).unwrap(), 2);
        assert_eq!(inspect::page_count(&render(sheet_with_lines(74))).unwrap(), 3);
    }

    #[test]
    fn test_long_estimate_keeps_every_line() {
        let sheet = sheet_with_lines(45);
        let expected: Vec<String> = sheet.lines.iter().map(line_text).collect();
        let bytes = render(sheet);

        let pages = inspect::page_strings(&bytes).unwrap();
        assert_eq!(pages.len(), 2);

        let drawn: Vec<String> = pages
            .iter()
            .flatten()
            .filter(|s| s.starts_with("- "))
            .cloned()
            .collect();
        assert_eq!(drawn, expected);

        // Chrome is redrawn on the continuation page, the heading is not
        let company = company();
        assert_eq!(pages[1][0], company.name);
        assert_eq!(pages[1][1], "見積書");
        assert!(!pages[1].iter().any(|s| s == HEADING));
        assert_eq!(pages[1].last().unwrap(), "合計: ¥1,138,500");
    }

    #[test]
    fn test_empty_sheet_renders_totals() {
        let bytes = render(EstimateResult::default());
        let pages = inspect::page_strings(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].iter().any(|s| s == "合計: ¥0"));
    }
}
