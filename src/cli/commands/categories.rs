use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::CommandResult;
use crate::core::hierarchy::{CategoryNode, HierarchyBuilder};
use crate::core::permissions::{Action, Resource};
use crate::domain::category::CategoryType;
use crate::errors::CliError;

const INDENT: &str = "  ";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "categories",
        "Show the category tree of a company",
        "categories [company] [--file <path>] [--type inflow|outflow] [--role <role>]",
        cmd_categories,
    )]
}

fn cmd_categories(context: &mut CliContext, args: &[String]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["file", "type", "role"])?;
    let workspace = context.load_workspace(&parsed, 0)?;
    let session = context.session(&parsed, &workspace)?;
    if !session.can(Resource::Category, Action::View) {
        return Err(CliError::Input(format!(
            "role `{}` may not view categories",
            session.role
        )));
    }

    let kinds = match parsed.option("type") {
        Some(raw) => vec![raw.parse::<CategoryType>().map_err(CliError::Input)?],
        None => vec![CategoryType::Inflow, CategoryType::Outflow],
    };

    for kind in kinds {
        output::section(format!("{} categories: {}", kind, workspace.company.name));
        let forest = HierarchyBuilder::build(&workspace.categories, kind);
        if forest.is_empty() {
            output::warning(format!("No {kind} categories."));
            continue;
        }
        for line in render_tree(&forest) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One indented line per category, with a child count on branches.
pub fn render_tree(forest: &[CategoryNode]) -> Vec<String> {
    HierarchyBuilder::flatten(forest)
        .into_iter()
        .map(|entry| {
            let indent = INDENT.repeat(entry.depth);
            let marker = if entry.depth == 0 { "" } else { "- " };
            if entry.node.is_leaf() {
                format!("{indent}{marker}{}", entry.node.name)
            } else {
                format!(
                    "{indent}{marker}{} ({})",
                    entry.node.name,
                    entry.node.children.len()
                )
            }
        })
        .collect()
}
