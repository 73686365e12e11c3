//! Block document → Typst markup → PDF bytes.
//!
//! User text is only ever emitted inside Typst string literals, so markup
//! characters typed into the wizard (`#`, `*`, `=`, `$`, ...) print as-is.

use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_as_lib::TypstEngine;

use crate::render::document::{Block, Document};
use crate::render::style::{PageConfig, TextStyle};
use crate::render::RenderError;

/// Transpiles a block document into a standalone Typst source file.
pub fn transpile(doc: &Document, page: &PageConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "#set document(title: {})\n",
        string_literal(&doc.title)
    ));
    output.push_str(&format!(
        "#set page(paper: {}, margin: (left: {}pt, right: {}pt, top: {}pt, bottom: {}pt))\n",
        string_literal(&page.paper),
        page.margin_left_pt,
        page.margin_right_pt,
        page.margin_top_pt,
        page.margin_bottom_pt
    ));
    output.push_str(&format!("#set text(size: {}pt)\n", page.body.size_pt));
    output.push_str("#set par(justify: false)\n\n");

    for block in &doc.blocks {
        output.push_str(&transpile_block(block, page));
        output.push('\n');
    }

    output
}

fn transpile_block(block: &Block, page: &PageConfig) -> String {
    match block {
        Block::Title(text) => styled_block(text, &page.title),
        Block::Heading(text) => styled_block(text, &page.heading),
        Block::Paragraph(text) => styled_block(text, &page.body),
        Block::Entry {
            lines,
            space_after_pt,
        } => {
            let children = lines
                .iter()
                .map(|l| string_literal(l))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "#block(breakable: false, above: 0pt, below: {}pt, stack(spacing: {}pt, {}))",
                space_after_pt, page.entry_line_gap_pt, children
            )
        }
        Block::Spacer(points) => format!("#v({points}pt)"),
    }
}

fn styled_block(text: &str, style: &TextStyle) -> String {
    let weight = if style.bold { "bold" } else { "regular" };
    format!(
        "#block(above: {}pt, below: {}pt, text(size: {}pt, weight: \"{}\", {}))",
        style.space_before_pt,
        style.space_after_pt,
        style.size_pt,
        weight,
        string_literal(text)
    )
}

/// Quotes `s` as a Typst string literal.
fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Compiles Typst markup to PDF bytes.
///
/// The configured font files come first; the fonts bundled with Typst are always
/// available behind them, so text renders even when none are configured.
pub fn compile(markup: &str, fonts: &[Vec<u8>]) -> Result<Vec<u8>, RenderError> {
    let engine = TypstEngine::builder()
        .main_file(markup.to_string())
        .fonts(fonts.iter().map(Vec::as_slice))
        .search_fonts_with(
            TypstKitFontOptions::new()
                .include_system_fonts(false)
                .include_embedded_fonts(true),
        )
        .build();

    // compiled is Warned<Result<Document, Error>>; warnings (e.g. missing glyphs) are not fatal.
    let compiled = engine.compile();
    let document = compiled
        .output
        .map_err(|e| RenderError::Compilation(format!("{e:?}")))?;

    let options = typst_pdf::PdfOptions::default();
    let pdf_bytes = typst_pdf::pdf(&document, &options)
        .map_err(|e| RenderError::Compilation(format!("PDF generation failed: {e:?}")))?;

    Ok(pdf_bytes.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::default_page_config;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(
            string_literal("say \"hi\" \\ #tag\r\nnext"),
            "\"say \\\"hi\\\" \\\\ #tag\\nnext\""
        );
    }

    #[test]
    fn test_transpile_page_setup() {
        let doc = Document::new("Jane Doe - Resume");
        let markup = transpile(&doc, &default_page_config());

        assert!(markup.contains("#set document(title: \"Jane Doe - Resume\")"));
        assert!(markup.contains(
            "#set page(paper: \"a4\", margin: (left: 30pt, right: 30pt, top: 30pt, bottom: 18pt))"
        ));
        assert!(markup.contains("#set text(size: 10pt)"));
    }

    #[test]
    fn test_transpile_blocks() {
        let mut doc = Document::new("t");
        doc.push(Block::Title("Jane Doe".to_string()));
        doc.heading("SKILLS");
        doc.paragraph("Rust, *Go*");
        doc.entry(["Engineer - Acme".to_string(), "2020".to_string()], 12.0);
        doc.spacer(20.0);

        let markup = transpile(&doc, &default_page_config());
        assert!(markup.contains(
            "#block(above: 0pt, below: 30pt, text(size: 24pt, weight: \"bold\", \"Jane Doe\"))"
        ));
        assert!(markup.contains(
            "#block(above: 20pt, below: 12pt, text(size: 14pt, weight: \"bold\", \"SKILLS\"))"
        ));
        assert!(markup.contains("weight: \"regular\", \"Rust, *Go*\""));
        assert!(markup.contains(
            "#block(breakable: false, above: 0pt, below: 12pt, stack(spacing: 2pt, \"Engineer - Acme\", \"2020\"))"
        ));
        assert!(markup.contains("#v(20pt)"));
    }

    #[test]
    fn test_compile_produces_pdf() {
        let mut doc = Document::new("Test");
        doc.heading("EDUCATION");
        doc.paragraph("Markup like #set and = headings stays literal.");
        let markup = transpile(&doc, &default_page_config());

        let pdf = compile(&markup, &[]).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_compile_embeds_a_font_without_configured_fonts() {
        let mut doc = Document::new("Test");
        doc.heading("EDUCATION");
        let markup = transpile(&doc, &default_page_config());

        let pdf = compile(&markup, &[]).unwrap();
        assert!(
            contains(&pdf, b"/FontDescriptor"),
            "no font in the PDF, text would be invisible"
        );
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_compile_reports_invalid_markup() {
        let result = compile("#let x = (", &[]);
        assert!(matches!(result, Err(RenderError::Compilation(_))));
    }
}
