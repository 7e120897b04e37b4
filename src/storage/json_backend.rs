use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::workspace::Workspace,
    errors::BookkeepingError,
    utils::{app_data_dir, ensure_dir, slugify},
};

use super::{Result, WorkspaceMetadata, WorkspaceStore};

const COMPANIES_DIR: &str = "companies";
const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores one pretty-printed JSON file per company under `<root>/companies`.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    companies_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        let companies_dir = root.join(COMPANIES_DIR);
        ensure_dir(&companies_dir)?;
        Ok(Self { companies_dir })
    }

    /// Canonical file path for a company name or slug.
    pub fn workspace_path(&self, company: &str) -> PathBuf {
        self.companies_dir
            .join(format!("{}.{}", slugify(company), FILE_EXTENSION))
    }

    pub fn companies_dir(&self) -> &Path {
        &self.companies_dir
    }

    /// Removes files other than `current` that hold the same company, e.g. after a rename.
    fn remove_stale_copies(&self, company_id: &str, current: &Path) -> Result<()> {
        for entry in fs::read_dir(&self.companies_dir)? {
            let path = entry?.path();
            if path == current
                || path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION)
            {
                continue;
            }
            let Ok(stored) = load_workspace_from_path(&path) else {
                continue;
            };
            if stored.company.id == company_id {
                fs::remove_file(&path)?;
                tracing::info!(
                    path = %path.display(),
                    "removed workspace stored under an old name"
                );
            }
        }
        Ok(())
    }
}

impl WorkspaceStore for JsonStorage {
    /// Writes the workspace under its company's slug.
    ///
    /// Refuses to overwrite a file that belongs to a different company, and
    /// drops files left behind by earlier names of the same company.
    fn save(&self, workspace: &Workspace) -> Result<()> {
        let path = self.workspace_path(&workspace.company.name);
        if path.exists() {
            let existing = load_workspace_from_path(&path)?;
            if existing.company.id != workspace.company.id {
                return Err(BookkeepingError::InvalidInput(format!(
                    "`{}` would overwrite the stored company `{}`",
                    workspace.company.name, existing.company.name
                )));
            }
        }
        save_workspace_to_path(workspace, &path)?;
        self.remove_stale_copies(&workspace.company.id, &path)?;
        tracing::info!(
            company = %workspace.company.name,
            path = %path.display(),
            "saved workspace"
        );
        Ok(())
    }

    fn load(&self, company: &str) -> Result<Workspace> {
        if company.trim().is_empty() {
            return Err(BookkeepingError::InvalidInput(
                "company name cannot be empty".into(),
            ));
        }
        let path = self.workspace_path(company);
        if !path.exists() {
            return Err(BookkeepingError::CompanyNotFound(company.to_string()));
        }
        load_workspace_from_path(&path)
    }

    fn list(&self) -> Result<Vec<WorkspaceMetadata>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.companies_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match load_workspace_from_path(&path) {
                Ok(workspace) => entries.push(WorkspaceMetadata {
                    slug: slug.to_string(),
                    company_id: workspace.company.id,
                    company_name: workspace.company.name,
                    updated_at: workspace.updated_at,
                }),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable workspace"
                    );
                }
            }
        }
        entries.sort_by_key(|entry| entry.company_name.to_lowercase());
        Ok(entries)
    }

    fn remove(&self, company: &str) -> Result<()> {
        let path = self.workspace_path(company);
        if !path.exists() {
            return Err(BookkeepingError::CompanyNotFound(company.to_string()));
        }
        fs::remove_file(&path)?;
        tracing::info!(company, "removed workspace");
        Ok(())
    }
}

/// Writes the workspace by staging to a temporary file and renaming it over the target.
pub fn save_workspace_to_path(workspace: &Workspace, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(workspace)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a workspace snapshot from disk, returning structured errors on failure.
pub fn load_workspace_from_path(path: &Path) -> Result<Workspace> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        BookkeepingError::StorageError(format!("{}: {err}", path.display()))
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
