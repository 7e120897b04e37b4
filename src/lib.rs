#![doc(test(attr(deny(warnings))))]

//! Bookkeeping Core holds the shared data model and view logic behind the
//! multi-tenant bookkeeping front end: category hierarchies, filtered and
//! paginated entity listings, role checks, and a JSON-backed workspace store.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bookkeeping Core tracing initialized.");
    });
}
