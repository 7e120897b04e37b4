//! Customers, bank accounts, payment methods, and workspace users.

use crate::core::permissions::{Action, Resource, Session};
use crate::core::services::{authorize, require_name, ServiceError, ServiceResult};
use crate::domain::bank::BankAccount;
use crate::domain::common::{Identifiable, NamedEntity};
use crate::domain::customer::Customer;
use crate::domain::method::PaymentMethod;
use crate::domain::user::{Role, User};
use crate::domain::workspace::Workspace;

pub struct DirectoryService;

impl DirectoryService {
    pub fn add_customer(
        workspace: &mut Workspace,
        session: &Session,
        mut customer: Customer,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Customer, Action::Create)?;
        customer.name = require_name("Customer", &customer.name)?;
        customer.email = customer.email.trim().to_string();
        let id = insert(&mut workspace.customers, customer, "Customer")?;
        workspace.touch();
        Ok(id)
    }

    pub fn remove_customer(
        workspace: &mut Workspace,
        session: &Session,
        id: &str,
    ) -> ServiceResult<()> {
        authorize(session, Resource::Customer, Action::Delete)?;
        if workspace
            .invoices
            .iter()
            .any(|invoice| invoice.customer_id == id)
        {
            return Err(ServiceError::Invalid(
                "Customer has linked invoices".into(),
            ));
        }
        remove(&mut workspace.customers, id, "Customer")?;
        workspace.touch();
        Ok(())
    }

    pub fn add_bank(
        workspace: &mut Workspace,
        session: &Session,
        mut bank: BankAccount,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Bank, Action::Create)?;
        bank.name = require_name("Bank account", &bank.name)?;
        let id = insert(&mut workspace.banks, bank, "Bank account")?;
        workspace.touch();
        Ok(id)
    }

    pub fn remove_bank(workspace: &mut Workspace, session: &Session, id: &str) -> ServiceResult<()> {
        authorize(session, Resource::Bank, Action::Delete)?;
        remove(&mut workspace.banks, id, "Bank account")?;
        workspace.touch();
        Ok(())
    }

    pub fn add_method(
        workspace: &mut Workspace,
        session: &Session,
        mut method: PaymentMethod,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Method, Action::Create)?;
        method.name = require_name("Method", &method.name)?;
        let id = insert(&mut workspace.methods, method, "Method")?;
        workspace.touch();
        Ok(id)
    }

    pub fn remove_method(
        workspace: &mut Workspace,
        session: &Session,
        id: &str,
    ) -> ServiceResult<()> {
        authorize(session, Resource::Method, Action::Delete)?;
        remove(&mut workspace.methods, id, "Method")?;
        workspace.touch();
        Ok(())
    }

    pub fn add_user(
        workspace: &mut Workspace,
        session: &Session,
        mut user: User,
    ) -> ServiceResult<String> {
        authorize(session, Resource::User, Action::Create)?;
        user.name = require_name("User", &user.name)?;
        user.email = user.email.trim().to_lowercase();
        if !user.email.contains('@') {
            return Err(ServiceError::Invalid(format!(
                "`{}` is not a valid email address",
                user.email
            )));
        }
        if workspace.users.iter().any(|existing| existing.email == user.email) {
            return Err(ServiceError::Invalid(format!(
                "User `{}` already exists",
                user.email
            )));
        }
        if user.role == Role::Owner && session.role != Role::Owner {
            return Err(ServiceError::Forbidden {
                role: session.role,
                resource: Resource::User,
                action: Action::Create,
            });
        }
        let id = user.id.clone();
        tracing::info!(user_id = %id, role = %user.role, "adding user");
        workspace.users.push(user);
        workspace.touch();
        Ok(id)
    }

    pub fn remove_user(workspace: &mut Workspace, session: &Session, id: &str) -> ServiceResult<()> {
        authorize(session, Resource::User, Action::Delete)?;
        if id == session.user_id {
            return Err(ServiceError::Invalid("Users cannot remove themselves".into()));
        }
        let removing_owner = workspace
            .users
            .iter()
            .any(|user| user.id == id && user.role == Role::Owner);
        let owners = workspace
            .users
            .iter()
            .filter(|user| user.role == Role::Owner)
            .count();
        if removing_owner && owners <= 1 {
            return Err(ServiceError::Invalid(
                "A company needs at least one owner".into(),
            ));
        }
        remove(&mut workspace.users, id, "User")?;
        workspace.touch();
        Ok(())
    }
}

/// Appends an entity after checking for a case-insensitive name clash.
fn insert<T: Identifiable + NamedEntity>(
    items: &mut Vec<T>,
    item: T,
    label: &str,
) -> ServiceResult<String> {
    if items
        .iter()
        .any(|existing| existing.name().eq_ignore_ascii_case(item.name()))
    {
        return Err(ServiceError::Invalid(format!(
            "{label} `{}` already exists",
            item.name()
        )));
    }
    let id = item.id().to_string();
    tracing::info!(id = %id, kind = label, "adding record");
    items.push(item);
    Ok(id)
}

fn remove<T: Identifiable>(items: &mut Vec<T>, id: &str, label: &str) -> ServiceResult<()> {
    let before = items.len();
    items.retain(|item| item.id() != id);
    if items.len() == before {
        return Err(ServiceError::NotFound(format!("{label} `{id}`")));
    }
    tracing::info!(id = %id, kind = label, "removed record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::test_support::{session, workspace};
    use crate::domain::invoice::Invoice;
    use chrono::NaiveDate;

    #[test]
    fn customers_with_invoices_cannot_be_removed() {
        let mut ws = workspace();
        let owner = session(Role::Owner);
        let id =
            DirectoryService::add_customer(&mut ws, &owner, Customer::new("Initech")).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ws.invoices.push(Invoice::new("INV-1", id.clone(), "Initech", date));

        let err = DirectoryService::remove_customer(&mut ws, &owner, &id).expect_err("linked");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn duplicate_method_names_are_rejected() {
        let mut ws = workspace();
        let owner = session(Role::Owner);
        DirectoryService::add_method(&mut ws, &owner, PaymentMethod::new("Cash")).unwrap();
        let err = DirectoryService::add_method(&mut ws, &owner, PaymentMethod::new("cash"))
            .expect_err("duplicate");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn missing_bank_reports_not_found() {
        let mut ws = workspace();
        let err = DirectoryService::remove_bank(&mut ws, &session(Role::Owner), "nope")
            .expect_err("missing");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn last_owner_is_kept() {
        let mut ws = workspace();
        let owner = session(Role::Owner);
        let first = User::new("Ada", "ada@acme.test", Role::Owner);
        let first_id = DirectoryService::add_user(&mut ws, &owner, first).unwrap();

        let err =
            DirectoryService::remove_user(&mut ws, &owner, &first_id).expect_err("last owner");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("owner")));
    }

    #[test]
    fn admin_cannot_grant_owner_role() {
        let mut ws = workspace();
        let admin = session(Role::Admin);
        let err = DirectoryService::add_user(
            &mut ws,
            &admin,
            User::new("Eve", "eve@acme.test", Role::Owner),
        )
        .expect_err("forbidden");
        assert!(matches!(err, ServiceError::Forbidden { .. }));

        let bob = User::new("Bob", "BOB@acme.test", Role::Viewer);
        DirectoryService::add_user(&mut ws, &admin, bob).unwrap();
        assert_eq!(ws.users[0].email, "bob@acme.test");
    }
}
