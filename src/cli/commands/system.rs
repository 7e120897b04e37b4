use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::CommandResult;
use crate::errors::{BookkeepingError, CliError};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help", cmd_help),
        CommandEntry::new("version", "Show build information", "version", cmd_version),
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config [show | set <locale|page_size|color|data_root> <value>]",
            cmd_config,
        ),
    ]
}

pub fn print_help(registry: &CommandRegistry) {
    output::section("Bookkeeping Core");
    println!("Available commands:");
    for entry in registry.list() {
        println!("  {:<12} {}", entry.name, entry.description);
        println!("  {:<12} usage: {}", "", entry.usage);
    }
}

fn cmd_help(_context: &mut CliContext, _args: &[String]) -> CommandResult {
    print_help(&crate::cli::build_registry());
    Ok(())
}

fn cmd_version(_context: &mut CliContext, _args: &[String]) -> CommandResult {
    println!("Bookkeeping Core version {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build: {} ({})",
        env!("BOOKKEEPING_BUILD_HASH"),
        env!("BOOKKEEPING_BUILD_STATUS")
    );
    println!("built at: {}", env!("BOOKKEEPING_BUILD_TIMESTAMP"));
    println!(
        "target: {} [{}]",
        env!("BOOKKEEPING_BUILD_TARGET"),
        env!("BOOKKEEPING_BUILD_PROFILE")
    );
    println!("rustc: {}", env!("BOOKKEEPING_BUILD_RUSTC"));
    Ok(())
}

fn cmd_config(context: &mut CliContext, args: &[String]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    match parsed.positional(0).unwrap_or("show") {
        "show" => {
            let json = serde_json::to_string_pretty(&context.config)
                .map_err(BookkeepingError::from)?;
            println!("{json}");
            println!("(stored at {})", context.config_manager.path().display());
            Ok(())
        }
        "set" => {
            let (Some(key), Some(value)) = (parsed.positional(1), parsed.positional(2)) else {
                return Err(CliError::Input("usage: config set <key> <value>".into()));
            };
            context.config.set(key, value)?;
            context.config_manager.save(&context.config)?;
            output::success(format!("Set {key} = {value}"));
            Ok(())
        }
        other => Err(CliError::Input(format!("unknown config action `{other}`"))),
    }
}
