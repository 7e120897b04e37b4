//! Validated mutations against a [`Workspace`](crate::domain::workspace::Workspace).
//!
//! Each service stands in for the create/update/delete callbacks a listing
//! screen invokes, checking the session's role before touching data.

pub mod category_service;
pub mod company_service;
pub mod directory_service;
pub mod invoice_service;

pub use category_service::CategoryService;
pub use company_service::CompanyService;
pub use directory_service::DirectoryService;
pub use invoice_service::InvoiceService;

use crate::core::permissions::{Action, Resource, Session};
use crate::domain::user::Role;
use crate::errors::BookkeepingError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] BookkeepingError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("role `{role}` may not {action} {resource}")]
    Forbidden {
        role: Role,
        resource: Resource,
        action: Action,
    },
}

pub(crate) fn authorize(session: &Session, resource: Resource, action: Action) -> ServiceResult<()> {
    if session.can(resource, action) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %session.user_id,
            role = %session.role,
            %resource,
            %action,
            "permission denied"
        );
        Err(ServiceError::Forbidden {
            role: session.role,
            resource,
            action,
        })
    }
}

/// Trims a required display name, rejecting blanks.
pub(crate) fn require_name(label: &str, candidate: &str) -> ServiceResult<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        Err(ServiceError::Invalid(format!("{label} name cannot be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}
