//! Axum route handlers for document generation and download.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Local, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_documents;
use crate::render::{RenderedPdf, PDF_MIME};
use crate::state::AppState;
use crate::wizard::controller::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

#[derive(Debug, Serialize)]
pub struct DocumentLink {
    pub filename: String,
    pub mime_type: &'static str,
    pub size_bytes: usize,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub cover_letter_text: String,
    pub resume: DocumentLink,
    pub cover_letter: DocumentLink,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/sessions/:id/generate
///
/// Generates the cover letter and renders both PDFs from a snapshot of the record.
/// The session lock is not held while the LLM call and rendering run.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let record = state
        .sessions
        .update(id, |s| s.generation_snapshot())
        .await?;
    info!("Generating documents for session {id}");

    let today = Local::now().date_naive();
    let documents =
        generate_documents(state.generator.as_ref(), &state.renderer, record, today).await?;

    let response = GenerateResponse {
        cover_letter_text: documents.cover_letter_text.clone(),
        resume: link(id, "resume", &documents.resume),
        cover_letter: link(id, "cover_letter", &documents.cover_letter),
        generated_at: documents.generated_at,
    };

    state
        .sessions
        .update(id, |s| {
            s.documents = Some(documents);
            Ok::<_, WizardError>(())
        })
        .await?;

    Ok(Json(response))
}

/// GET /api/v1/sessions/:id/documents/:kind
///
/// Serves the last generated PDF as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
) -> Result<impl IntoResponse, AppError> {
    let documents = state.sessions.get(id).await?.documents.ok_or_else(|| {
        AppError::NotFound("No documents have been generated for this session yet".to_string())
    })?;

    let pdf = match kind {
        DocumentKind::Resume => documents.resume,
        DocumentKind::CoverLetter => documents.cover_letter,
    };

    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&pdf.filename)),
        ],
        pdf.bytes,
    ))
}

fn link(id: Uuid, kind: &str, pdf: &RenderedPdf) -> DocumentLink {
    DocumentLink {
        filename: pdf.filename.clone(),
        mime_type: PDF_MIME,
        size_bytes: pdf.bytes.len(),
        download_url: format!("/api/v1/sessions/{id}/documents/{kind}"),
    }
}

/// RFC 5987 `attr-char`: everything else in `filename*` is percent-encoded.
const FILENAME_ATTR_CHARS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Attachment header with an ASCII `filename` fallback and the exact UTF-8 name in
/// `filename*` (RFC 6266). Control characters never reach the header.
fn content_disposition(filename: &str) -> String {
    let name: String = filename.chars().filter(|c| !c.is_control()).collect();
    let fallback: String = name
        .chars()
        .map(|c| match c {
            c if c.is_ascii() && c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(&name, FILENAME_ATTR_CHARS)
    )
}
