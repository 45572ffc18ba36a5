//! SQLite-backed project store.
//!
//! Each project is a single row; its writing sections live in a JSON column
//! and are read and written as one sequence. The unit of atomicity is the
//! project document.

mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CreateProjectInput, Project, ProjectRef, Section, SectionUpsertInput, UpdateProjectInput,
};

const PROJECT_COLUMNS: &str = "id, name, description, sections, created_at, updated_at";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("project not found")]
    NotFound,

    #[error("update matched no rows for project {0}")]
    UpdateMissed(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid sections payload: {0}")]
    Sections(#[from] serde_json::Error),

    #[error("no platform data directory available")]
    DataDirUnavailable,

    #[error("failed to create data directory: {0}")]
    CreateDir(std::io::Error),
}

/// Handle to the project store. Cheap to clone; all clones share one
/// connection behind a mutex, so in-process writers are serialized.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the store at the platform data directory, creating it if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
        }
        tracing::debug!(path = %path.display(), "opening project store");
        Self::open(&path)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = directories::ProjectDirs::from("dev", "rocket-tycoon", "grantflow")
            .ok_or(StoreError::DataDirUnavailable)?;
        Ok(dirs.data_dir().join("grantflow.db"))
    }

    /// Apply the schema. Idempotent.
    pub fn migrate(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute_batch(schema::SCHEMA)?;
            Ok(())
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        f(&conn)
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub fn create_project(&self, input: CreateProjectInput) -> Result<Project, StoreError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.insert_project(&project)?;
        tracing::debug!(project_id = %project.id, "created project");
        Ok(project)
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at"
            ))?;
            let projects = stmt
                .query_map([], row_to_project)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(projects)
        })
    }

    pub fn get_project(&self, id: &ProjectRef) -> Result<Option<Project>, StoreError> {
        self.with_conn(|conn| {
            let project = conn
                .query_row(
                    &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                    params![id.to_string()],
                    row_to_project,
                )
                .optional()?;
            Ok(project)
        })
    }

    /// Resolve a project, lazily creating it for demo identifiers.
    ///
    /// Idempotent for demo identifiers: after the first call the synthesized
    /// document is found rather than recreated. Native identifiers that do
    /// not exist yield [`StoreError::NotFound`].
    pub fn resolve_or_create(&self, id: &ProjectRef) -> Result<Project, StoreError> {
        if let Some(project) = self.get_project(id)? {
            return Ok(project);
        }
        let name = match id.demo_name() {
            Some(name) => name,
            None => return Err(StoreError::NotFound),
        };
        let now = Utc::now();
        let project = Project {
            id: id.to_string(),
            name,
            description: None,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.insert_project(&project)?;
        tracing::info!(project_id = %project.id, "created demo project on first lookup");
        Ok(project)
    }

    /// Merge scalar fields into a project, leaving its sections untouched.
    pub fn update_project(
        &self,
        id: &ProjectRef,
        input: UpdateProjectInput,
    ) -> Result<Project, StoreError> {
        let mut project = self.resolve_or_create(id)?;
        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(description) = input.description {
            project.description = Some(description);
        }
        project.updated_at = Utc::now();
        self.persist_project(&project)?;
        Ok(project)
    }

    /// Replace a project's scalar fields wholesale, preserving its sections.
    pub fn replace_project(
        &self,
        id: &ProjectRef,
        input: CreateProjectInput,
    ) -> Result<Project, StoreError> {
        let mut project = self.resolve_or_create(id)?;
        project.name = input.name;
        project.description = input.description;
        project.updated_at = Utc::now();
        self.persist_project(&project)?;
        Ok(project)
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    /// Create or mutate exactly one section entry, keyed by the payload's
    /// section id, then persist the whole sequence back onto the project.
    pub fn upsert_section(
        &self,
        id: &ProjectRef,
        input: SectionUpsertInput,
    ) -> Result<Project, StoreError> {
        let mut project = self.resolve_or_create(id)?;
        let now = Utc::now();
        match project
            .sections
            .iter_mut()
            .find(|section| section.id == input.section_id)
        {
            Some(section) => section.apply_update(&input, now),
            None => project.sections.push(Section::from_input(&input, now)),
        }
        project.updated_at = now;
        self.persist_project(&project)?;
        tracing::debug!(
            project_id = %project.id,
            section_id = %input.section_id,
            sections = project.sections.len(),
            "upserted section"
        );
        Ok(project)
    }

    // ------------------------------------------------------------------
    // Row plumbing
    // ------------------------------------------------------------------

    fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        let sections = serde_json::to_string(&project.sections)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO projects (id, name, description, sections, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    project.id,
                    project.name,
                    project.description,
                    sections,
                    project.created_at,
                    project.updated_at,
                ],
            )?;
            Ok(())
        })
    }

    fn persist_project(&self, project: &Project) -> Result<(), StoreError> {
        let sections = serde_json::to_string(&project.sections)?;
        let modified = self.with_conn(|conn| {
            let modified = conn.execute(
                "UPDATE projects SET name = ?1, description = ?2, sections = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    project.name,
                    project.description,
                    sections,
                    project.updated_at,
                    project.id,
                ],
            )?;
            Ok(modified)
        })?;
        if modified == 0 {
            return Err(StoreError::UpdateMissed(project.id.clone()));
        }
        Ok(())
    }
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    let sections_json: String = row.get(3)?;
    let sections: Vec<Section> = serde_json::from_str(&sections_json).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(err))
    })?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        sections,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
