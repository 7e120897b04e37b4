pub mod json_backend;

use std::path::Path;

use crate::{domain::workspace::Workspace, errors::BookkeepingError};

pub type Result<T> = std::result::Result<T, BookkeepingError>;

/// Abstraction over persistence backends capable of storing company workspaces.
pub trait WorkspaceStore: Send + Sync {
    fn save(&self, workspace: &Workspace) -> Result<()>;
    fn load(&self, company: &str) -> Result<Workspace>;
    fn list(&self) -> Result<Vec<WorkspaceMetadata>>;
    fn remove(&self, company: &str) -> Result<()>;

    /// Ad-hoc file helpers, independent of the managed directory.
    fn save_to_path(&self, workspace: &Workspace, path: &Path) -> Result<()> {
        json_backend::save_workspace_to_path(workspace, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Workspace> {
        json_backend::load_workspace_from_path(path)
    }
}

/// Summary of a stored workspace, cheap to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceMetadata {
    pub slug: String,
    pub company_id: String,
    pub company_name: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub use json_backend::JsonStorage;
