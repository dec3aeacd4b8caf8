//! staffkit library
//!
//! Two independent pieces:
//! - [`utils::validation`] - format validators for usernames, emails,
//!   Egyptian mobile numbers and national IDs
//! - [`repository`] - fetches employee records from an HTTP endpoint and
//!   returns them sorted by `id`

pub mod config;
pub mod repository;
pub mod traits;
pub mod utils;

pub use config::RepositoryConfig;
pub use repository::{sort_records, Record, RecordRepository, SortKey};
pub use traits::RecordSource;
pub use utils::national_id::NationalId;
pub use utils::validation::{
    is_valid_email, is_valid_national_id, is_valid_phone, is_valid_username, FieldKind,
};
