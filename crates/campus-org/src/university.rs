//! University domain models
//!
//! A university is the top-level tenant. It owns course groups, enrolled
//! users and admission offers. In the auth collaborator's vocabulary it is
//! an "organization" whose slug is the university code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Default faculty for universities created without one.
pub const DEFAULT_FACULTY: &str = "General";
/// Default department for universities created without one.
pub const DEFAULT_DEPARTMENT: &str = "General Studies";
/// Default programme for universities created without one.
pub const DEFAULT_PROGRAMME: &str = "General Programme";

/// Degree awarded by a university's programme.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DegreeType {
    /// Diploma
    Diploma,
    /// Bachelor's degree
    #[default]
    Bachelor,
    /// Master's degree
    Master,
    /// Doctorate
    Doctorate,
}

impl DegreeType {
    /// Get string representation of the degree type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diploma => "diploma",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctorate => "doctorate",
        }
    }

    /// Parse degree type from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "diploma" => Some(Self::Diploma),
            "bachelor" | "bachelors" | "bsc" | "ba" => Some(Self::Bachelor),
            "master" | "masters" | "msc" | "ma" => Some(Self::Master),
            "doctorate" | "phd" => Some(Self::Doctorate),
            _ => None,
        }
    }
}

impl fmt::Display for DegreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to create a university.
///
/// Only `name` and `code` are mandatory; the rest is filled with defaults
/// by [`University::from_request`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUniversity {
    /// Human-readable name
    pub name: String,
    /// Short code, unique across the platform
    pub code: String,
    /// Faculty
    pub faculty: Option<String>,
    /// Department
    pub department: Option<String>,
    /// Programme
    pub programme: Option<String>,
    /// Degree awarded
    pub degree_type: Option<DegreeType>,
    /// Year of study the tenant covers
    pub study_year: Option<u32>,
    /// Intake season (e.g. "fall")
    pub intake_season: Option<String>,
    /// Accreditation body or status
    pub accreditation: Option<String>,
}

impl NewUniversity {
    /// Start a request with the two mandatory fields.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }
}

/// A university tenant.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_org::{NewUniversity, University};
///
/// let creator = Uuid::now_v7();
/// let uni = University::from_request(NewUniversity::new("Umm Al-Qura University", "UQU"), creator);
/// assert_eq!(uni.code, "UQU");
/// assert_eq!(uni.faculty, "General");
/// assert!(uni.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    /// Unique identifier for the university
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// University code (the tenant slug)
    pub code: String,

    /// Faculty
    pub faculty: String,

    /// Department
    pub department: String,

    /// Programme
    pub programme: String,

    /// Degree awarded
    pub degree_type: DegreeType,

    /// Year of study
    pub study_year: Option<u32>,

    /// Intake season
    pub intake_season: Option<String>,

    /// Accreditation
    pub accreditation: Option<String>,

    /// User who created the university
    pub created_by: Uuid,

    /// Whether the university is active
    pub is_active: bool,

    /// When the university was created
    pub created_at: DateTime<Utc>,

    /// When the university was last updated
    pub updated_at: DateTime<Utc>,

    /// Custom metadata for extensibility
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl University {
    /// Create a university from a request, filling missing required fields
    /// with the portal defaults.
    pub fn from_request(request: NewUniversity, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: request.name,
            code: request.code,
            faculty: non_blank_or(request.faculty, DEFAULT_FACULTY),
            department: non_blank_or(request.department, DEFAULT_DEPARTMENT),
            programme: non_blank_or(request.programme, DEFAULT_PROGRAMME),
            degree_type: request.degree_type.unwrap_or_default(),
            study_year: request.study_year,
            intake_season: request.intake_season,
            accreditation: request.accreditation,
            created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
            metadata: HashMap::new(),
        }
    }

    /// Mark the university inactive.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
