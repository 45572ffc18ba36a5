use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default title for sections created without one.
const DEFAULT_TITLE: &str = "Untitled Section";

/// One writing section embedded in a project document.
///
/// `word_count` is derived from `content` on every write and never stored
/// stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub word_count: usize,
    pub status: SectionStatus,
    pub required: bool,
    pub has_warning: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    NotStarted,
    InProgress,
    Draft,
    Completed,
}

impl SectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Draft => "draft",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "draft" => Some(Self::Draft),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Upsert payload for a single section; `section_id` is the merge key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpsertInput {
    pub section_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: String,
    pub status: Option<SectionStatus>,
    pub required: Option<bool>,
    pub has_warning: Option<bool>,
}

/// Count the non-empty whitespace-separated tokens in `content`.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

impl Section {
    /// Build a new section from an upsert payload, filling defaults for
    /// anything the payload omits.
    pub fn from_input(input: &SectionUpsertInput, now: DateTime<Utc>) -> Self {
        Self {
            id: input.section_id.clone(),
            title: input
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: input.description.clone().unwrap_or_default(),
            content: input.content.clone(),
            word_count: word_count(&input.content),
            status: input.status.unwrap_or(SectionStatus::InProgress),
            required: input.required.unwrap_or(false),
            has_warning: input.has_warning.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an upsert payload into an existing section. `id` and
    /// `created_at` are preserved; omitted fields keep their previous value.
    pub fn apply_update(&mut self, input: &SectionUpsertInput, now: DateTime<Utc>) {
        if let Some(title) = &input.title {
            self.title = title.clone();
        }
        if let Some(description) = &input.description {
            self.description = description.clone();
        }
        self.content = input.content.clone();
        self.word_count = word_count(&self.content);
        if let Some(status) = input.status {
            self.status = status;
        }
        if let Some(required) = input.required {
            self.required = required;
        }
        if let Some(has_warning) = input.has_warning {
            self.has_warning = has_warning;
        }
        self.updated_at = now;
    }
}
