//! CLI command implementations.

pub(crate) mod filters;
pub(crate) mod job;
