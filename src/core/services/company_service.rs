//! Company details and per-company storage profiles.

use crate::core::listing::{ListQuery, PageView, PaginatedFilteredView};
use crate::core::permissions::{Action, Resource, Session};
use crate::core::services::{authorize, require_name, ServiceError, ServiceResult};
use crate::domain::company::{Company, StorageProfile};
use crate::domain::workspace::Workspace;

pub struct CompanyService;

impl CompanyService {
    /// Creates a fresh workspace for a new company.
    pub fn create(session: &Session, company: Company) -> ServiceResult<Workspace> {
        authorize(session, Resource::Company, Action::Create)?;
        let mut company = company;
        company.name = require_name("Company", &company.name)?;
        tracing::info!(company_id = %company.id, name = %company.name, "creating company");
        Ok(Workspace::new(company))
    }

    pub fn rename(workspace: &mut Workspace, session: &Session, name: &str) -> ServiceResult<()> {
        authorize(session, Resource::Company, Action::Update)?;
        workspace.company.name = require_name("Company", name)?;
        workspace.touch();
        Ok(())
    }

    /// Checks that the session may delete the company. The caller removes the
    /// persisted workspace.
    pub fn authorize_removal(workspace: &Workspace, session: &Session) -> ServiceResult<()> {
        authorize(session, Resource::Company, Action::Delete)?;
        tracing::info!(company_id = %workspace.company.id, "company removal authorized");
        Ok(())
    }

    /// Pages through a set of companies, e.g. every workspace the user can open.
    pub fn list<'a>(companies: &'a [Company], query: &ListQuery) -> PageView<&'a Company> {
        PaginatedFilteredView::apply_searchable(companies, query)
    }

    pub fn add_storage(
        workspace: &mut Workspace,
        session: &Session,
        name: &str,
        description: &str,
        opening_balance: f64,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Storage, Action::Create)?;
        let name = require_name("Storage", name)?;
        let duplicate = workspace
            .storages
            .iter()
            .any(|storage| storage.name.eq_ignore_ascii_case(&name));
        if duplicate {
            return Err(ServiceError::Invalid(format!(
                "Storage `{name}` already exists"
            )));
        }
        let mut storage = StorageProfile::new(workspace.company.id.clone(), name);
        storage.description = description.trim().to_string();
        storage.opening_balance = opening_balance;
        let id = storage.id.clone();
        tracing::info!(storage_id = %id, "adding storage profile");
        workspace.storages.push(storage);
        workspace.touch();
        Ok(id)
    }

    pub fn remove_storage(
        workspace: &mut Workspace,
        session: &Session,
        id: &str,
    ) -> ServiceResult<()> {
        authorize(session, Resource::Storage, Action::Delete)?;
        let before = workspace.storages.len();
        workspace.storages.retain(|storage| storage.id != id);
        if workspace.storages.len() == before {
            return Err(ServiceError::NotFound(format!("Storage `{id}`")));
        }
        workspace.touch();
        Ok(())
    }

    pub fn storages<'a>(
        workspace: &'a Workspace,
        query: &ListQuery,
    ) -> PageView<&'a StorageProfile> {
        PaginatedFilteredView::apply_searchable(&workspace.storages, query)
    }
}
