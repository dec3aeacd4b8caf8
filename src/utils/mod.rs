//! Utility functions
//!
//! Pure, stateless helpers for checking user-supplied fields.

pub mod national_id;
pub mod validation;
