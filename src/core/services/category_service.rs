//! Business logic helpers for category management.

use std::collections::HashSet;

use crate::core::hierarchy::{CategoryNode, HierarchyBuilder};
use crate::core::listing::{ListQuery, PageView, PaginatedFilteredView};
use crate::core::permissions::{Action, Resource, Session};
use crate::core::services::{authorize, require_name, ServiceError, ServiceResult};
use crate::domain::category::{CategoryRecord, CategoryType};
use crate::domain::common::new_id;
use crate::domain::workspace::Workspace;

/// Provides validated operations for [`CategoryRecord`] entities.
///
/// Parents are not required to share the child's type; such a child simply
/// shows up as a root of its own type's tree.
pub struct CategoryService;

impl CategoryService {
    /// Adds a new category and ensures its name and parent are valid.
    pub fn add(
        workspace: &mut Workspace,
        session: &Session,
        mut category: CategoryRecord,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Category, Action::Create)?;
        category.name = require_name("Category", &category.name)?;
        if category.id.trim().is_empty() {
            category.id = new_id();
        } else if workspace.category(&category.id).is_some() {
            return Err(ServiceError::Invalid(format!(
                "Category id `{}` is already in use",
                category.id
            )));
        }
        Self::validate_name(workspace, None, category.kind, &category.name)?;
        if let Some(parent_id) = category.parent_ref() {
            Self::validate_parent(workspace, parent_id, None)?;
        }

        let id = category.id.clone();
        tracing::info!(
            category_id = %id,
            name = %category.name,
            kind = %category.kind,
            "adding category"
        );
        workspace.categories.push(category);
        workspace.touch();
        Ok(id)
    }

    /// Applies updates to a category, respecting parentage rules.
    pub fn edit(
        workspace: &mut Workspace,
        session: &Session,
        id: &str,
        changes: CategoryRecord,
    ) -> ServiceResult<()> {
        authorize(session, Resource::Category, Action::Update)?;
        if workspace.category(id).is_none() {
            return Err(ServiceError::NotFound(format!("Category `{id}`")));
        }
        let name = require_name("Category", &changes.name)?;
        Self::validate_name(workspace, Some(id), changes.kind, &name)?;
        if let Some(parent_id) = changes.parent_ref() {
            Self::validate_parent(workspace, parent_id, Some(id))?;
        }

        let parent_id = changes.parent_ref().map(str::to_string);
        let category = workspace
            .category_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Category `{id}`")))?;
        category.name = name;
        category.kind = changes.kind;
        category.parent_id = parent_id;
        tracing::info!(category_id = %id, "updated category");
        workspace.touch();
        Ok(())
    }

    /// Removes a category after verifying it has no children.
    pub fn remove(workspace: &mut Workspace, session: &Session, id: &str) -> ServiceResult<()> {
        authorize(session, Resource::Category, Action::Delete)?;
        if workspace
            .categories
            .iter()
            .any(|category| category.parent_ref() == Some(id))
        {
            return Err(ServiceError::Invalid(
                "Category has child categories".into(),
            ));
        }
        let before = workspace.categories.len();
        workspace.categories.retain(|category| category.id != id);
        if workspace.categories.len() == before {
            return Err(ServiceError::NotFound(format!("Category `{id}`")));
        }
        tracing::info!(category_id = %id, "removed category");
        workspace.touch();
        Ok(())
    }

    /// Returns the requested page of categories matching the query.
    pub fn list<'a>(workspace: &'a Workspace, query: &ListQuery) -> PageView<&'a CategoryRecord> {
        PaginatedFilteredView::apply_searchable(&workspace.categories, query)
    }

    /// Builds the category tree of one type.
    pub fn forest(workspace: &Workspace, kind: CategoryType) -> Vec<CategoryNode> {
        HierarchyBuilder::build(&workspace.categories, kind)
    }

    fn validate_name(
        workspace: &Workspace,
        exclude: Option<&str>,
        kind: CategoryType,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_lowercase();
        let duplicate = workspace.categories.iter().any(|category| {
            category.kind == kind
                && category.name.trim().to_lowercase() == normalized
                && exclude != Some(category.id.as_str())
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }

    fn validate_parent(
        workspace: &Workspace,
        parent_id: &str,
        current: Option<&str>,
    ) -> ServiceResult<()> {
        if Some(parent_id) == current {
            return Err(ServiceError::Invalid(
                "Category cannot be its own parent".into(),
            ));
        }
        if workspace.category(parent_id).is_none() {
            return Err(ServiceError::Invalid("Parent category not found".into()));
        }
        if let Some(current) = current {
            if Self::is_descendant(workspace, parent_id, current) {
                return Err(ServiceError::Invalid(
                    "Category cannot be moved under its own descendant".into(),
                ));
            }
        }
        Ok(())
    }

    /// Follows `candidate`'s parent chain looking for `ancestor`.
    fn is_descendant(workspace: &Workspace, candidate: &str, ancestor: &str) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = Some(candidate);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            cursor = workspace.category(id).and_then(CategoryRecord::parent_ref);
        }
        false
    }
}
