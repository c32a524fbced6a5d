//! Error types, display helpers and clamped arithmetic shared across the workspace

pub mod errors;
pub mod format;
pub mod saturating;
