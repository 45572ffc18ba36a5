use grantflow_core::models::{word_count, Section, SectionStatus, SectionUpsertInput};

use crate::client::{ClientError, GrantClient};

/// Lifecycle of a mounted section editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Editing,
    Saving,
}

/// Events surfaced to the parent view.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// A local edit changed the content; word count recomputed without a
    /// network round trip.
    ContentChanged {
        section_id: String,
        word_count: usize,
    },
    /// Section was saved successfully; carries the server-confirmed state.
    SectionSaved(Section),
    /// Save failed with an error message. Local content is untouched.
    SaveFailed {
        section_id: String,
        message: String,
    },
}

/// Controller keeping one section synchronized with the server.
///
/// Constructed with the initially-supplied section from the parent list,
/// loaded once on mount, and discarded when the user navigates to a
/// different section.
pub struct SectionEditor {
    project_id: String,
    section: Section,
    baseline_content: String,
    state: EditorState,
    last_error: Option<String>,
}

impl SectionEditor {
    pub fn new(project_id: impl Into<String>, initial: Section) -> Self {
        let baseline_content = initial.content.clone();
        Self {
            project_id: project_id.into(),
            section: initial,
            baseline_content,
            state: EditorState::Loading,
            last_error: None,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn section_id(&self) -> &str {
        &self.section.id
    }

    pub fn content(&self) -> &str {
        &self.section.content
    }

    pub fn word_count(&self) -> usize {
        self.section.word_count
    }

    pub fn status(&self) -> SectionStatus {
        self.section.status
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dismiss the current error notification.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.section.content != self.baseline_content
    }

    /// Fetch the owning project and adopt the server's copy of this section
    /// if one exists; otherwise the initially-supplied content stays.
    pub async fn load(&mut self, client: &GrantClient) -> Result<(), ClientError> {
        self.state = EditorState::Loading;
        match client.get_project(&self.project_id).await {
            Ok(project) => {
                if let Some(section) = project
                    .sections
                    .into_iter()
                    .find(|section| section.id == self.section.id)
                {
                    self.baseline_content = section.content.clone();
                    self.section = section;
                }
                self.state = EditorState::Editing;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.state = EditorState::Editing;
                Err(err)
            }
        }
    }

    /// Apply a local edit and recompute the word count.
    pub fn set_content(&mut self, text: &str) -> EditorEvent {
        self.section.content = text.to_string();
        self.section.word_count = word_count(text);
        EditorEvent::ContentChanged {
            section_id: self.section.id.clone(),
            word_count: self.section.word_count,
        }
    }

    /// Save the current section state, keeping its current status.
    pub async fn save(&mut self, client: &GrantClient) -> EditorEvent {
        let status = self.section.status;
        self.save_with_status(client, status).await
    }

    /// Save with `status` forced to completed. Rejected before any network
    /// call when the content is empty.
    pub async fn complete(&mut self, client: &GrantClient) -> EditorEvent {
        if self.section.content.trim().is_empty() {
            let err = ClientError::Precondition(
                "cannot mark an empty section complete".into(),
            );
            self.last_error = Some(err.to_string());
            return EditorEvent::SaveFailed {
                section_id: self.section.id.clone(),
                message: err.to_string(),
            };
        }
        self.save_with_status(client, SectionStatus::Completed).await
    }

    async fn save_with_status(
        &mut self,
        client: &GrantClient,
        status: SectionStatus,
    ) -> EditorEvent {
        self.state = EditorState::Saving;
        let payload = SectionUpsertInput {
            section_id: self.section.id.clone(),
            title: Some(self.section.title.clone()),
            description: Some(self.section.description.clone()),
            content: self.section.content.clone(),
            status: Some(status),
            required: Some(self.section.required),
            has_warning: Some(self.section.has_warning),
        };

        let result = client.upsert_section(&self.project_id, &payload).await;
        self.state = EditorState::Editing;

        let saved = match result {
            Ok(project) => project
                .sections
                .into_iter()
                .find(|section| section.id == self.section.id),
            Err(err) => {
                self.last_error = Some(err.to_string());
                return EditorEvent::SaveFailed {
                    section_id: self.section.id.clone(),
                    message: err.to_string(),
                };
            }
        };

        match saved {
            Some(section) => {
                self.baseline_content = section.content.clone();
                self.section = section.clone();
                self.last_error = None;
                EditorEvent::SectionSaved(section)
            }
            None => {
                let message = "server response did not include the saved section".to_string();
                self.last_error = Some(message.clone());
                EditorEvent::SaveFailed {
                    section_id: self.section.id.clone(),
                    message,
                }
            }
        }
    }
}
