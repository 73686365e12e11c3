use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Entry types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub tech: String,
    pub duration: String,
    pub description: String,
}

/// Only the title is collected; issuer and year were never wired into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub title: String,
}

/// Addresses one of the record's ordered entry lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Projects,
    Certifications,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Projects => "projects",
            EntryKind::Certifications => "certifications",
        }
    }
}

/// A single entry of any list, tagged by the list it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Project(ProjectEntry),
    Certification(CertificationEntry),
}

impl Entry {
    /// Decodes a JSON payload into the entry type that `kind` holds.
    /// Absent fields default to empty strings, so `{}` yields a blank entry.
    pub fn from_json(kind: EntryKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EntryKind::Experience => Entry::Experience(serde_json::from_value(value)?),
            EntryKind::Education => Entry::Education(serde_json::from_value(value)?),
            EntryKind::Projects => Entry::Project(serde_json::from_value(value)?),
            EntryKind::Certifications => Entry::Certification(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Experience(_) => EntryKind::Experience,
            Entry::Education(_) => EntryKind::Education,
            Entry::Project(_) => EntryKind::Projects,
            Entry::Certification(_) => EntryKind::Certifications,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind:?} entry {index} does not exist (list has {len} entries)")]
pub struct EntryIndexError {
    pub kind: EntryKind,
    pub index: usize,
    pub len: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate record
// ────────────────────────────────────────────────────────────────────────────

/// Everything the candidate has entered during one wizard session.
///
/// Optional text fields use the empty string for "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_role: String,
    pub years_of_experience: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub job_description: String,
}

impl CandidateRecord {
    /// Names of the required personal-info fields that are still blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn set_skills_from_input(&mut self, input: &str) {
        self.skills = parse_skills(input);
    }

    /// The skills rendered back as the comma-separated form input.
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }

    pub fn entry_count(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Experience => self.experience.len(),
            EntryKind::Education => self.education.len(),
            EntryKind::Projects => self.projects.len(),
            EntryKind::Certifications => self.certifications.len(),
        }
    }

    /// Appends an entry to its list and returns the new entry's index.
    pub fn push_entry(&mut self, entry: Entry) -> usize {
        let kind = entry.kind();
        match entry {
            Entry::Experience(e) => self.experience.push(e),
            Entry::Education(e) => self.education.push(e),
            Entry::Project(e) => self.projects.push(e),
            Entry::Certification(e) => self.certifications.push(e),
        }
        self.entry_count(kind) - 1
    }

    pub fn replace_entry(&mut self, index: usize, entry: Entry) -> Result<(), EntryIndexError> {
        let kind = entry.kind();
        let len = self.entry_count(kind);
        let out_of_range = EntryIndexError { kind, index, len };
        match entry {
            Entry::Experience(e) => *self.experience.get_mut(index).ok_or(out_of_range)? = e,
            Entry::Education(e) => *self.education.get_mut(index).ok_or(out_of_range)? = e,
            Entry::Project(e) => *self.projects.get_mut(index).ok_or(out_of_range)? = e,
            Entry::Certification(e) => {
                *self.certifications.get_mut(index).ok_or(out_of_range)? = e
            }
        }
        Ok(())
    }

    /// Removes the entry at `index`; later entries shift down by one.
    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> Result<Entry, EntryIndexError> {
        match kind {
            EntryKind::Experience => remove_at(&mut self.experience, kind, index).map(Entry::Experience),
            EntryKind::Education => remove_at(&mut self.education, kind, index).map(Entry::Education),
            EntryKind::Projects => remove_at(&mut self.projects, kind, index).map(Entry::Project),
            EntryKind::Certifications => {
                remove_at(&mut self.certifications, kind, index).map(Entry::Certification)
            }
        }
    }

    /// Filename stem shared by both generated documents.
    pub fn file_stem(&self) -> String {
        self.name.trim().replace(' ', "_")
    }

    pub fn resume_filename(&self) -> String {
        format!("{}_resume.pdf", self.file_stem())
    }

    pub fn cover_letter_filename(&self) -> String {
        format!("{}_cover_letter.pdf", self.file_stem())
    }
}

/// Splits comma-separated skills, trimming each and dropping empties. Order is preserved.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn remove_at<T>(list: &mut Vec<T>, kind: EntryKind, index: usize) -> Result<T, EntryIndexError> {
    if index >= list.len() {
        return Err(EntryIndexError {
            kind,
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}
