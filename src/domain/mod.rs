pub mod bank;
pub mod category;
pub mod common;
pub mod company;
pub mod customer;
pub mod invoice;
pub mod method;
pub mod user;
pub mod workspace;

pub use common::{Displayable, Identifiable, NamedEntity, Searchable};
