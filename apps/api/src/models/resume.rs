use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::models::lenient;
use crate::sections::order::SectionOrder;

// ────────────────────────────────────────────────────────────────────────────
// Resume document
// ────────────────────────────────────────────────────────────────────────────

/// The resume aggregate edited by the builder.
///
/// `section_order` is `None` until the user reorders something; readers go
/// through `section_order()` which falls back to the canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "lenient::record")]
    pub personal_info: PersonalInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_order: Option<SectionOrder>,
    #[serde(deserialize_with = "lenient::records")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::records")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient::records")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "lenient::records")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "lenient::records")]
    pub certifications: Vec<CertificationEntry>,
}

impl ResumeDocument {
    /// The effective order: the stored one, or canonical when none is stored.
    pub fn section_order(&self) -> SectionOrder {
        self.section_order.clone().unwrap_or_default()
    }

    pub fn set_section_order(&mut self, order: SectionOrder) {
        self.section_order = Some(order);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
    /// Professional summary, rendered as the `summary` section.
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    /// Opaque identifier returned by the photo store.
    #[serde(
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_file_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub gpa: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

/// A labelled group of skills, e.g. "Languages: Rust, Go".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    #[serde(deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub credential_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Style settings
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_ACCENT: &str = "#2563eb";

/// User-chosen styling shared by every template. Read-only during rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    #[serde(deserialize_with = "lenient::string")]
    pub accent_color: String,
    /// Recommended range 0.9 – 1.2.
    #[serde(deserialize_with = "lenient::scale")]
    pub text_scale: f32,
    /// Recommended range 0.9 – 1.2.
    #[serde(deserialize_with = "lenient::scale")]
    pub line_height_scale: f32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        StyleSettings {
            accent_color: DEFAULT_ACCENT.to_string(),
            text_scale: 1.0,
            line_height_scale: 1.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted record
// ────────────────────────────────────────────────────────────────────────────

/// A stored resume: the document plus the template and style it renders with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template_key: String,
    pub style_settings: StyleSettings,
    pub document: ResumeDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template_key: String,
    pub style_settings: Value,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        let style_settings = serde_json::from_value(row.style_settings).unwrap_or_else(|e| {
            warn!("Resume {} has unreadable style settings: {e}", row.id);
            StyleSettings::default()
        });
        let document = serde_json::from_value(row.document).unwrap_or_else(|e| {
            warn!("Resume {} has an unreadable document: {e}", row.id);
            ResumeDocument::default()
        });
        ResumeRecord {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            template_key: row.template_key,
            style_settings,
            document,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
