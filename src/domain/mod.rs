//! Domain aggregates exposed by the service layer.

pub mod entry;
pub mod types;
