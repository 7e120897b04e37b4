//! Role-based visibility and mutation checks.
//!
//! The current user's session is passed explicitly to whatever needs it; the
//! policy itself is a pure function of role, resource, and action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::user::Role;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Company,
    Storage,
    Category,
    Method,
    Bank,
    Customer,
    Invoice,
    User,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Resource::Company => "company",
            Resource::Storage => "storage",
            Resource::Category => "category",
            Resource::Method => "method",
            Resource::Bank => "bank",
            Resource::Customer => "customer",
            Resource::Invoice => "invoice",
            Resource::User => "user",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Returns whether `role` may perform `action` on `resource`.
pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    match role {
        Role::Owner => true,
        Role::Admin => !(resource == Resource::Company && action == Action::Delete),
        Role::Accountant => match (resource, action) {
            (Resource::User, _) => false,
            (_, Action::View) => true,
            (
                Resource::Category
                | Resource::Method
                | Resource::Bank
                | Resource::Customer
                | Resource::Invoice,
                Action::Create | Action::Update,
            ) => true,
            (Resource::Invoice, Action::Delete) => true,
            _ => false,
        },
        Role::Viewer => action == Action::View && resource != Resource::User,
    }
}

/// Who is acting, and in which company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub company_id: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, company_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            company_id: company_id.into(),
            role,
        }
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        is_allowed(self.role, resource, action)
    }

    /// Resources this session may list, in navigation order.
    pub fn visible_resources(&self) -> Vec<Resource> {
        [
            Resource::Company,
            Resource::Storage,
            Resource::Category,
            Resource::Method,
            Resource::Bank,
            Resource::Customer,
            Resource::Invoice,
            Resource::User,
        ]
        .into_iter()
        .filter(|resource| self.can(*resource, Action::View))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_do_everything() {
        assert!(is_allowed(Role::Owner, Resource::Company, Action::Delete));
        assert!(is_allowed(Role::Owner, Resource::User, Action::Create));
    }

    #[test]
    fn admin_cannot_delete_company() {
        assert!(!is_allowed(Role::Admin, Resource::Company, Action::Delete));
        assert!(is_allowed(Role::Admin, Resource::Company, Action::Update));
        assert!(is_allowed(Role::Admin, Resource::User, Action::Delete));
    }

    #[test]
    fn accountant_books_but_does_not_administer() {
        assert!(is_allowed(Role::Accountant, Resource::Category, Action::Create));
        assert!(is_allowed(Role::Accountant, Resource::Invoice, Action::Delete));
        assert!(!is_allowed(Role::Accountant, Resource::Category, Action::Delete));
        assert!(!is_allowed(Role::Accountant, Resource::Storage, Action::Create));
        assert!(!is_allowed(Role::Accountant, Resource::User, Action::View));
        assert!(is_allowed(Role::Accountant, Resource::Company, Action::View));
    }

    #[test]
    fn viewer_sees_everything_but_users() {
        let session = Session::new("u1", "c1", Role::Viewer);
        assert!(!session.can(Resource::Invoice, Action::Create));
        let visible = session.visible_resources();
        assert_eq!(visible.len(), 7);
        assert!(!visible.contains(&Resource::User));
    }
}
