//! Subcommand implementations for the `regen` binary.

pub mod propagate;
pub mod sync;
