pub mod hierarchy;
pub mod listing;
pub mod load_state;
pub mod permissions;
pub mod services;

pub use hierarchy::{CategoryNode, FlatNode, HierarchyBuilder};
pub use listing::{ListQuery, PageView, PaginatedFilteredView};
pub use load_state::LoadState;
pub use permissions::{is_allowed, Action, Resource, Session};
