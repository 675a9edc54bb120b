//! Subcommand implementations

pub mod extract;
pub mod scan;
pub mod verify;
