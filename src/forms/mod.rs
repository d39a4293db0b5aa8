//! Payload definitions backing the entry routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod entry;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
}
