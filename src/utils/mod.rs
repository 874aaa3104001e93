//! Utility functions for code generation, URL validation, and error mapping.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
