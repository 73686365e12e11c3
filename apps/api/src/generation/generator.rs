//! Document generation: orchestrates the final wizard step.
//!
//! Flow: record snapshot → Letter Generator (one LLM call) →
//!       resume PDF + cover letter PDF (spawn_blocking) → GeneratedDocuments.
//!
//! Any failure aborts the whole attempt; no partial documents are returned.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::letter::generator::generate_cover_letter;
use crate::llm_client::TextGenerator;
use crate::models::candidate::CandidateRecord;
use crate::render::{RenderError, RenderedPdf, Renderer};

/// Output of one successful Generate action.
#[derive(Debug, Clone)]
pub struct GeneratedDocuments {
    pub cover_letter_text: String,
    pub resume: RenderedPdf,
    pub cover_letter: RenderedPdf,
    pub generated_at: DateTime<Utc>,
}

/// Runs letter generation and both renderings for an immutable record snapshot.
///
/// `date` is the date printed on the cover letter.
pub async fn generate_documents(
    generator: &dyn TextGenerator,
    renderer: &Renderer,
    record: CandidateRecord,
    date: NaiveDate,
) -> Result<GeneratedDocuments, AppError> {
    // Step 1: Cover letter text
    let cover_letter_text =
        generate_cover_letter(generator, &record, &record.job_description).await?;
    info!(
        "Cover letter generated for '{}' ({} chars)",
        record.name,
        cover_letter_text.len()
    );

    // Step 2: Render both PDFs off the async executor
    let renderer = renderer.clone();
    let letter = cover_letter_text.clone();
    let (resume, cover_letter) = tokio::task::spawn_blocking(move || {
        let resume = renderer.render_resume(&record)?;
        let cover_letter = renderer.render_cover_letter(&letter, &record, date)?;
        Ok::<_, RenderError>((resume, cover_letter))
    })
    .await
    .map_err(|e| RenderError::Task(e.to_string()))??;

    info!(
        "Rendered {} ({} bytes) and {} ({} bytes)",
        resume.filename,
        resume.bytes.len(),
        cover_letter.filename,
        cover_letter.bytes.len()
    );

    Ok(GeneratedDocuments {
        cover_letter_text,
        resume,
        cover_letter,
        generated_at: Utc::now(),
    })
}
