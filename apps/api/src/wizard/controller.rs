//! Wizard Controller: the linear five-step state machine and the commands that
//! mutate the candidate record bound to each step.
//!
//! Commands take `&mut Session` and return the outcome; the HTTP handlers turn the
//! mutated session into a fresh `SessionView`. Nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::generation::generator::GeneratedDocuments;
use crate::models::candidate::{CandidateRecord, Entry, EntryIndexError, EntryKind};

// ────────────────────────────────────────────────────────────────────────────
// Steps
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    SkillsExperience,
    ProjectsCertifications,
    EducationJob,
    Generate,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::PersonalInfo,
        WizardStep::SkillsExperience,
        WizardStep::ProjectsCertifications,
        WizardStep::EducationJob,
        WizardStep::Generate,
    ];

    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::PersonalInfo => 1,
            WizardStep::SkillsExperience => 2,
            WizardStep::ProjectsCertifications => 3,
            WizardStep::EducationJob => 4,
            WizardStep::Generate => 5,
        }
    }

    /// Maps any integer onto a step, clamping values outside 1..=5.
    pub fn from_number_clamped(n: i64) -> Self {
        let index = n.clamp(1, Self::ALL.len() as i64) - 1;
        Self::ALL[index as usize]
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::SkillsExperience => "Skills & Experience",
            WizardStep::ProjectsCertifications => "Projects & Certifications",
            WizardStep::EducationJob => "Education & Job Description",
            WizardStep::Generate => "Generate Documents",
        }
    }

    fn next(self) -> Self {
        Self::from_number_clamped(self.number() as i64 + 1)
    }

    fn previous(self) -> Self {
        Self::from_number_clamped(self.number() as i64 - 1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    #[error(transparent)]
    EntryOutOfRange(#[from] EntryIndexError),

    #[error("Invalid {kind} entry: {message}")]
    InvalidEntry { kind: &'static str, message: String },

    #[error("Documents can only be generated from the 'Generate Documents' step")]
    NotOnFinalStep,
}

// ────────────────────────────────────────────────────────────────────────────
// Step inputs
// ────────────────────────────────────────────────────────────────────────────

/// Step 1 fields. Only the fields present in the request are overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfoInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub current_role: Option<String>,
    pub years_of_experience: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillsInput {
    /// Comma-separated, e.g. "Rust, Tokio, PostgreSQL".
    pub skills: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobDescriptionInput {
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

/// One candidate's wizard: current step, collected record, last generated documents.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub current_step: WizardStep,
    pub record: CandidateRecord,
    pub documents: Option<GeneratedDocuments>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_step: WizardStep::PersonalInfo,
            record: CandidateRecord::default(),
            documents: None,
            created_at: Utc::now(),
        }
    }

    /// Moves to `step` (clamped into 1..=5).
    ///
    /// Only the step 1 -> 2 transition is guarded: it requires name, email and phone,
    /// and on failure the session stays where it is. Every other jump is unconditional.
    pub fn goto(&mut self, step: i64) -> Result<WizardStep, WizardError> {
        let target = WizardStep::from_number_clamped(step);

        if self.current_step == WizardStep::PersonalInfo
            && target == WizardStep::SkillsExperience
        {
            let missing = self.record.missing_required_fields();
            if !missing.is_empty() {
                return Err(WizardError::MissingRequiredFields(missing));
            }
        }

        self.current_step = target;
        Ok(target)
    }

    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.goto(self.current_step.next().number() as i64)
    }

    pub fn previous(&mut self) -> WizardStep {
        self.current_step = self.current_step.previous();
        self.current_step
    }

    pub fn update_personal_info(&mut self, input: PersonalInfoInput) {
        let record = &mut self.record;
        let fields = [
            (&mut record.name, input.name),
            (&mut record.email, input.email),
            (&mut record.phone, input.phone),
            (&mut record.current_role, input.current_role),
            (&mut record.years_of_experience, input.years_of_experience),
            (&mut record.summary, input.summary),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    pub fn update_skills(&mut self, input: &SkillsInput) {
        self.record.set_skills_from_input(&input.skills);
    }

    pub fn update_job_description(&mut self, input: JobDescriptionInput) {
        self.record.job_description = input.job_description;
    }

    /// Appends an entry decoded from `payload` and returns its index.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        payload: serde_json::Value,
    ) -> Result<usize, WizardError> {
        let entry = decode_entry(kind, payload)?;
        Ok(self.record.push_entry(entry))
    }

    pub fn replace_entry(
        &mut self,
        kind: EntryKind,
        index: usize,
        payload: serde_json::Value,
    ) -> Result<(), WizardError> {
        let entry = decode_entry(kind, payload)?;
        self.record.replace_entry(index, entry)?;
        Ok(())
    }

    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> Result<Entry, WizardError> {
        Ok(self.record.remove_entry(kind, index)?)
    }

    /// Read-only copy of the record for the generation pipeline.
    /// Refuses unless the wizard is on the final step.
    pub fn generation_snapshot(&self) -> Result<CandidateRecord, WizardError> {
        if self.current_step != WizardStep::Generate {
            return Err(WizardError::NotOnFinalStep);
        }
        Ok(self.record.clone())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_entry(kind: EntryKind, payload: serde_json::Value) -> Result<Entry, WizardError> {
    Entry::from_json(kind, payload).map_err(|e| WizardError::InvalidEntry {
        kind: kind.as_str(),
        message: e.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
