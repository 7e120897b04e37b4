//! Read-only command line front end over stored company workspaces.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod ui;

use crate::errors::CliError;

pub use context::CliContext;
pub use registry::{CommandEntry, CommandRegistry};

pub type CommandResult = Result<(), CliError>;

/// Builds the registry with every built-in command.
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in commands::definitions() {
        registry.register(entry);
    }
    registry
}

/// Runs one command from process arguments (without the program name).
pub fn run_cli(args: Vec<String>) -> CommandResult {
    let registry = build_registry();
    let Some((name, rest)) = args.split_first() else {
        commands::system::print_help(&registry);
        return Ok(());
    };

    let name = name.to_ascii_lowercase();
    let entry = match registry.get(&name) {
        Some(entry) => entry,
        None => {
            return Err(CliError::UnknownCommand {
                suggestion: registry.suggest(&name).map(str::to_string),
                name,
            })
        }
    };

    if name == "help" {
        commands::system::print_help(&registry);
        return Ok(());
    }

    let mut context = CliContext::new()?;
    tracing::debug!(command = entry.name, args = ?rest, "dispatching command");
    (entry.handler)(&mut context, rest)
}
