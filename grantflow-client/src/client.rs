use grantflow_core::models::{
    CreateProjectInput, Project, SectionUpsertInput, UpdateProjectInput,
};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Precondition(String),
}

/// Error body shape produced by the server.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed HTTP client for the GrantFlow server.
#[derive(Debug, Clone)]
pub struct GrantClient {
    base_url: String,
    http: reqwest::Client,
}

impl GrantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let resp = self.http.get(self.url("/projects")).send().await?;
        decode(resp).await
    }

    pub async fn create_project(&self, input: &CreateProjectInput) -> Result<Project, ClientError> {
        let resp = self
            .http
            .post(self.url("/projects"))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        tracing::debug!(project_id = %id, "fetching project");
        let resp = self
            .http
            .get(self.url(&format!("/projects/{id}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn replace_project(
        &self,
        id: &str,
        input: &CreateProjectInput,
    ) -> Result<Project, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/projects/{id}")))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        input: &UpdateProjectInput,
    ) -> Result<Project, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/projects/{id}")))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    /// Create or update one section of a project.
    pub async fn upsert_section(
        &self,
        id: &str,
        input: &SectionUpsertInput,
    ) -> Result<Project, ClientError> {
        tracing::debug!(project_id = %id, section_id = %input.section_id, "saving section");
        let resp = self
            .http
            .patch(self.url(&format!("/projects/{id}")))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let message = match resp.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned()),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Api { status, message })
}
