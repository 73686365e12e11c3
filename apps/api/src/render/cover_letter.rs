//! Cover letter layout: contact header, date line, then the letter body one paragraph per block.

use chrono::NaiveDate;

use crate::models::candidate::CandidateRecord;
use crate::render::document::Document;

const HEADER_GAP_PT: f32 = 20.0;
const PARAGRAPH_GAP_PT: f32 = 12.0;

pub fn layout_cover_letter(letter: &str, record: &CandidateRecord, date: NaiveDate) -> Document {
    let mut doc = Document::new(format!("{} - Cover Letter", record.name.trim()));

    doc.heading(&record.name);
    doc.paragraph(record.email.clone());
    doc.paragraph(record.phone.clone());
    doc.spacer(HEADER_GAP_PT);

    doc.paragraph(format_letter_date(date));
    doc.spacer(HEADER_GAP_PT);

    for paragraph in split_paragraphs(letter) {
        doc.paragraph(paragraph);
        doc.spacer(PARAGRAPH_GAP_PT);
    }

    doc
}

/// Full month name, day, year, e.g. "March 04, 2026".
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Splits the letter on blank lines. Lines inside one paragraph keep their line
/// breaks; blank paragraphs are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}
