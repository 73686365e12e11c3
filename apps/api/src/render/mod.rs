// Document Renderer: lays out the resume and the cover letter as block documents,
// transpiles them to Typst and compiles PDF bytes.
// Compilation is CPU-bound; async callers must run it inside tokio::task::spawn_blocking.

pub mod cover_letter;
pub mod document;
pub mod resume;
pub mod style;
pub mod typst;

use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::candidate::CandidateRecord;

pub use style::{default_page_config, PageConfig};

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    #[error("Rendering task failed: {0}")]
    Task(String),
}

/// A finished PDF and the filename it should be downloaded as.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub filename: String,
    pub bytes: Bytes,
}

/// Renders documents with one page configuration and font set.
#[derive(Clone)]
pub struct Renderer {
    page: PageConfig,
    fonts: Arc<Vec<Vec<u8>>>,
}

impl Renderer {
    pub fn new(page: PageConfig, fonts: Vec<Vec<u8>>) -> Self {
        Self {
            page,
            fonts: Arc::new(fonts),
        }
    }

    pub fn render_resume(&self, record: &CandidateRecord) -> Result<RenderedPdf, RenderError> {
        let doc = resume::layout_resume(record);
        let bytes = self.compile(&doc)?;
        Ok(RenderedPdf {
            filename: record.resume_filename(),
            bytes,
        })
    }

    pub fn render_cover_letter(
        &self,
        letter: &str,
        record: &CandidateRecord,
        date: NaiveDate,
    ) -> Result<RenderedPdf, RenderError> {
        let doc = cover_letter::layout_cover_letter(letter, record, date);
        let bytes = self.compile(&doc)?;
        Ok(RenderedPdf {
            filename: record.cover_letter_filename(),
            bytes,
        })
    }

    fn compile(&self, doc: &document::Document) -> Result<Bytes, RenderError> {
        let markup = typst::transpile(doc, &self.page);
        let pdf = typst::compile(&markup, &self.fonts)?;
        debug!(
            "Rendered '{}': {} blocks, {} bytes",
            doc.title,
            doc.blocks.len(),
            pdf.len()
        );
        Ok(Bytes::from(pdf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::ExperienceEntry;

    fn renderer() -> Renderer {
        Renderer::new(default_page_config(), Vec::new())
    }

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme \"Widgets\" #1".to_string(),
                duration: "2020 - Present".to_string(),
                description: "Shipped $things* with = signs".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_resume() {
        let pdf = renderer().render_resume(&record()).unwrap();
        assert_eq!(pdf.filename, "Jane_Doe_resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_cover_letter() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let pdf = renderer()
            .render_cover_letter("Dear Hiring Manager,\n\nThank you.", &record(), date)
            .unwrap();
        assert_eq!(pdf.filename, "Jane_Doe_cover_letter.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }
}
