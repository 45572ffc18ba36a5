use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::section::Section;

/// Reserved prefix for externally supplied demo identifiers.
pub const DEMO_PREFIX: &str = "demo-";

/// A grant application project with its embedded writing sections.
///
/// The identifier is always exposed as a single string: either a
/// store-generated UUID or a full demo identifier (`demo-<token>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project identifier, parsed once at the boundary.
///
/// Demo identifiers are lazily creatable on first lookup; native identifiers
/// must already exist in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// Store-generated UUID reference.
    Native(Uuid),
    /// Fixed-format demo identifier (`demo-` + non-empty token).
    Demo(String),
}

impl ProjectRef {
    /// Parse a raw identifier string. Returns `None` for anything that is
    /// neither a demo identifier nor a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(token) = raw.strip_prefix(DEMO_PREFIX) {
            if token.is_empty() {
                return None;
            }
            return Some(Self::Demo(raw.to_string()));
        }
        Uuid::parse_str(raw).ok().map(Self::Native)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }

    /// Default display name for lazily-created demo projects.
    pub fn demo_name(&self) -> Option<String> {
        match self {
            Self::Demo(key) => {
                let token = key.strip_prefix(DEMO_PREFIX).unwrap_or(key);
                Some(format!("Demo Project {token}"))
            }
            Self::Native(_) => None,
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(id) => write!(f, "{id}"),
            Self::Demo(key) => f.write_str(key),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
}
