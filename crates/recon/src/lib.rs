//! `pinmatch-recon` — Statement/Settlement reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded row-major tables, returns annotated
//! and classified tables. No CLI or IO dependencies.

pub mod classify;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod pin;
pub mod query;
pub mod settlement;
pub mod statement;
pub mod summary;
pub mod tag;

pub use engine::run;
pub use error::ReconError;
pub use model::{Cell, Classification, ReconResult, ReconcileTag, Table};
pub use query::get_classified;
