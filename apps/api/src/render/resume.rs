//! Resume layout: contact header followed by the fixed sequence of sections.
//! A section is left out entirely when it has nothing to show.

use crate::models::candidate::CandidateRecord;
use crate::render::document::{Block, Document};

pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub const EDUCATION_HEADING: &str = "EDUCATION";
pub const SKILLS_HEADING: &str = "SKILLS";
pub const EXPERIENCE_HEADING: &str = "PROFESSIONAL EXPERIENCE";
pub const PROJECTS_HEADING: &str = "PROJECTS";
pub const CERTIFICATIONS_HEADING: &str = "CERTIFICATIONS";

const HEADER_GAP_PT: f32 = 20.0;
const SUMMARY_GAP_PT: f32 = 12.0;
const SHORT_ENTRY_GAP_PT: f32 = 6.0;
const LONG_ENTRY_GAP_PT: f32 = 12.0;

pub fn layout_resume(record: &CandidateRecord) -> Document {
    let mut doc = Document::new(format!("{} - Resume", record.name.trim()));

    doc.push(Block::Title(record.name.clone()));
    doc.paragraph(record.email.clone());
    doc.paragraph(record.phone.clone());
    if !record.current_role.trim().is_empty() {
        doc.paragraph(format!("Current Role: {}", record.current_role));
    }
    if !record.years_of_experience.trim().is_empty() {
        doc.paragraph(format!(
            "Years of Experience: {}",
            record.years_of_experience
        ));
    }
    doc.spacer(HEADER_GAP_PT);

    if !record.summary.trim().is_empty() {
        doc.heading(SUMMARY_HEADING);
        doc.paragraph(record.summary.clone());
        doc.spacer(SUMMARY_GAP_PT);
    }

    if !record.education.is_empty() {
        doc.heading(EDUCATION_HEADING);
        for edu in &record.education {
            let mut line = dash_joined(&[&edu.degree, &edu.institution]);
            if !edu.year.trim().is_empty() {
                line.push_str(&format!(" ({})", edu.year.trim()));
            }
            doc.entry([line], SHORT_ENTRY_GAP_PT);
        }
    }

    if !record.skills.is_empty() {
        doc.heading(SKILLS_HEADING);
        doc.paragraph(record.skills_line());
    }

    if !record.experience.is_empty() {
        doc.heading(EXPERIENCE_HEADING);
        for exp in &record.experience {
            doc.entry(
                [
                    dash_joined(&[&exp.title, &exp.company]),
                    exp.duration.clone(),
                    bullet(&exp.description),
                ],
                LONG_ENTRY_GAP_PT,
            );
        }
    }

    if !record.projects.is_empty() {
        doc.heading(PROJECTS_HEADING);
        for proj in &record.projects {
            let tech = if proj.tech.trim().is_empty() {
                String::new()
            } else {
                format!("Tech Stack: {}", proj.tech)
            };
            doc.entry(
                [
                    dash_joined(&[&proj.title, &proj.duration]),
                    tech,
                    bullet(&proj.description),
                ],
                LONG_ENTRY_GAP_PT,
            );
        }
    }

    if !record.certifications.is_empty() {
        doc.heading(CERTIFICATIONS_HEADING);
        for cert in &record.certifications {
            doc.entry([cert.title.clone()], SHORT_ENTRY_GAP_PT);
        }
    }

    doc
}

/// Joins the non-blank parts with " - ".
fn dash_joined(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

fn bullet(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("• {}", text.trim())
    }
}
