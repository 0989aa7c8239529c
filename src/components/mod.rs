//! Components the provider mounts for its own housekeeping.

pub mod error_reporter;
