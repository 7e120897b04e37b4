use std::path::Path;

use crate::cli::args::ParsedArgs;
use crate::cli::output::{set_preferences, OutputPreferences};
use crate::config::{Config, ConfigManager};
use crate::core::permissions::Session;
use crate::domain::user::Role;
use crate::domain::workspace::Workspace;
use crate::errors::CliError;
use crate::storage::{JsonStorage, WorkspaceStore};

/// Shared state handed to every command.
pub struct CliContext {
    pub config: Config,
    pub config_manager: ConfigManager,
    pub storage: JsonStorage,
}

impl CliContext {
    pub fn new() -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        set_preferences(OutputPreferences {
            color_enabled: config.color_enabled,
            quiet_mode: false,
        });
        let storage = JsonStorage::new(Some(config.resolve_data_root()))?;
        Ok(Self {
            config,
            config_manager,
            storage,
        })
    }

    /// Loads the workspace named by `--file`, the first positional, or the
    /// last opened company, in that order.
    pub fn load_workspace(
        &self,
        args: &ParsedArgs,
        positional: usize,
    ) -> Result<Workspace, CliError> {
        if let Some(path) = args.option("file") {
            return Ok(self.storage.load_from_path(Path::new(path))?);
        }
        let company = args
            .positional(positional)
            .map(str::to_string)
            .or_else(|| self.config.last_opened_company.clone())
            .ok_or_else(|| {
                CliError::Input("name a company or pass --file <workspace.json>".into())
            })?;
        Ok(self.storage.load(&company)?)
    }

    /// Session the command acts under; `--role` defaults to owner.
    pub fn session(&self, args: &ParsedArgs, workspace: &Workspace) -> Result<Session, CliError> {
        let role = match args.option("role") {
            Some(raw) => raw.parse::<Role>().map_err(CliError::Input)?,
            None => Role::Owner,
        };
        Ok(Session::new("cli", workspace.company.id.clone(), role))
    }

    pub fn page_size(&self, args: &ParsedArgs) -> Result<usize, CliError> {
        Ok(args
            .usize_option("page-size")?
            .unwrap_or_else(|| self.config.page_size()))
    }
}
