use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn};
use crate::cli::CommandResult;
use crate::core::listing::{ListQuery, PageView, PaginatedFilteredView};
use crate::core::permissions::{Action, Resource};
use crate::domain::common::Searchable;
use crate::errors::CliError;
use crate::storage::WorkspaceStore;

const NO_VALUE: &str = "-";
const OPTIONS: &[&str] = &["file", "search", "page", "page-size", "role"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "list",
        "List companies, storages, categories, methods, banks, customers, users, invoices",
        "list <resource> [company] [--file <path>] [--search <text>] [--page <n>] \
         [--page-size <n>] [--role <role>]",
        cmd_list,
    )]
}

fn cmd_list(context: &mut CliContext, args: &[String]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, OPTIONS)?;
    let target = parsed
        .positional(0)
        .ok_or_else(|| CliError::Input("list needs a resource, e.g. `list customers`".into()))?
        .to_ascii_lowercase();
    let query = build_query(context, &parsed)?;

    if target == "companies" {
        return list_companies(context, &query);
    }

    let resource = parse_resource(&target)?;
    let workspace = context.load_workspace(&parsed, 1)?;
    let session = context.session(&parsed, &workspace)?;
    if !session.can(resource, Action::View) {
        return Err(CliError::Input(format!(
            "role `{}` may not view {target}",
            session.role
        )));
    }

    match resource {
        Resource::Storage => render_page(
            "Storages",
            &workspace.storages,
            &query,
            vec![
                TableColumn::new("NAME", 12),
                TableColumn::new("DESCRIPTION", 16),
                TableColumn::new("OPENING", 10).right(),
            ],
            |storage| {
                vec![
                    storage.name.clone(),
                    or_placeholder(&storage.description),
                    format!("{:.2}", storage.opening_balance),
                ]
            },
        ),
        Resource::Category => render_page(
            "Categories",
            &workspace.categories,
            &query,
            vec![
                TableColumn::new("NAME", 16),
                TableColumn::new("TYPE", 8),
                TableColumn::new("PARENT", 16),
            ],
            |category| {
                let parent = category
                    .parent_ref()
                    .map(|id| {
                        workspace
                            .category(id)
                            .map_or_else(|| format!("{id} (missing)"), |p| p.name.clone())
                    })
                    .unwrap_or_else(|| NO_VALUE.into());
                vec![category.name.clone(), category.kind.to_string(), parent]
            },
        ),
        Resource::Method => render_page(
            "Payment methods",
            &workspace.methods,
            &query,
            vec![TableColumn::new("NAME", 16)],
            |method| vec![method.name.clone()],
        ),
        Resource::Bank => render_page(
            "Bank accounts",
            &workspace.banks,
            &query,
            vec![
                TableColumn::new("NAME", 14),
                TableColumn::new("BANK", 14),
                TableColumn::new("NUMBER", 10),
            ],
            |bank| {
                vec![
                    bank.name.clone(),
                    or_placeholder(&bank.bank_name),
                    or_placeholder(&bank.masked_number()),
                ]
            },
        ),
        Resource::Customer => render_page(
            "Customers",
            &workspace.customers,
            &query,
            vec![
                TableColumn::new("NAME", 14),
                TableColumn::new("EMAIL", 16),
                TableColumn::new("PHONE", 10),
            ],
            |customer| {
                vec![
                    customer.name.clone(),
                    or_placeholder(&customer.email),
                    or_placeholder(&customer.phone),
                ]
            },
        ),
        Resource::User => render_page(
            "Users",
            &workspace.users,
            &query,
            vec![
                TableColumn::new("NAME", 14),
                TableColumn::new("EMAIL", 18),
                TableColumn::new("ROLE", 10),
            ],
            |user| vec![user.name.clone(), user.email.clone(), user.role.to_string()],
        ),
        Resource::Invoice => render_page(
            "Invoices",
            &workspace.invoices,
            &query,
            vec![
                TableColumn::new("NUMBER", 10),
                TableColumn::new("CUSTOMER", 14),
                TableColumn::new("ISSUED", 10),
                TableColumn::new("STATUS", 9),
                TableColumn::new("TOTAL", 10).right(),
                TableColumn::new("NEXT", 10),
            ],
            |invoice| {
                vec![
                    invoice.number.clone(),
                    invoice.customer_name.clone(),
                    invoice.issue_date.to_string(),
                    invoice.status.to_string(),
                    format!("{:.2}", invoice.total()),
                    invoice
                        .next_occurrence()
                        .map(|date| date.to_string())
                        .unwrap_or_else(|| NO_VALUE.into()),
                ]
            },
        ),
        Resource::Company => Err(CliError::Input("use `list companies`".into())),
    }
}

fn build_query(context: &CliContext, parsed: &ParsedArgs) -> Result<ListQuery, CliError> {
    let mut query = ListQuery::new(
        parsed.usize_option("page")?.unwrap_or(1),
        context.page_size(parsed)?,
    );
    if let Some(term) = parsed.option("search") {
        query = query.with_search(term);
    }
    Ok(query)
}

fn parse_resource(target: &str) -> Result<Resource, CliError> {
    match target {
        "storages" | "storage" => Ok(Resource::Storage),
        "categories" | "category" => Ok(Resource::Category),
        "methods" | "method" => Ok(Resource::Method),
        "banks" | "bank" => Ok(Resource::Bank),
        "customers" | "customer" => Ok(Resource::Customer),
        "users" | "user" => Ok(Resource::User),
        "invoices" | "invoice" => Ok(Resource::Invoice),
        other => Err(CliError::Input(format!("unknown list target `{other}`"))),
    }
}

fn list_companies(context: &CliContext, query: &ListQuery) -> CommandResult {
    let stored = context.storage.list()?;
    let names: Vec<CompanyRow> = stored
        .into_iter()
        .map(|meta| CompanyRow {
            name: meta.company_name,
            slug: meta.slug,
            updated: meta.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    render_page(
        "Companies",
        &names,
        query,
        vec![
            TableColumn::new("NAME", 16),
            TableColumn::new("FILE", 12),
            TableColumn::new("UPDATED", 16),
        ],
        |row| vec![row.name.clone(), row.slug.clone(), row.updated.clone()],
    )
}

struct CompanyRow {
    name: String,
    slug: String,
    updated: String,
}

impl Searchable for CompanyRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.slug.as_str()]
    }
}

fn render_page<T, F>(
    title: &str,
    items: &[T],
    query: &ListQuery,
    columns: Vec<TableColumn>,
    row: F,
) -> CommandResult
where
    T: Searchable,
    F: Fn(&T) -> Vec<String>,
{
    let view = PaginatedFilteredView::apply_searchable(items, query);
    output::section(title);
    if view.is_empty() {
        if query.normalized_term().is_some() {
            output::warning(format!("Nothing matches `{}`.", query.search_term.trim()));
        } else {
            output::warning(format!("No {} yet.", title.to_lowercase()));
        }
        return Ok(());
    }

    let mut table = Table::new(columns);
    for item in &view.visible_items {
        table.add_row(row(item));
    }
    println!("{}", table.render());
    println!("{}", page_footer(&view));
    Ok(())
}

fn page_footer<T>(view: &PageView<T>) -> String {
    let mut footer = format!(
        "Page {}/{} ({})",
        view.effective_page,
        view.total_pages,
        view.range_label()
    );
    if view.has_next() {
        footer.push_str(&format!(" - next: --page {}", view.effective_page + 1));
    }
    footer
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        NO_VALUE.into()
    } else {
        value.to_string()
    }
}
