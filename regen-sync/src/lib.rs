//! # regen-sync
//!
//! The synchronization engine for generated fixture content.
//!
//! Call [`region::synchronize`] to re-run a fixture's `GENERATED-BY` command
//! and hash-gate the rewrite of its generated region, or
//! [`splice::propagate`] to splice externally edited per-section files back
//! into the flattened document they were split from.

pub mod command;
pub mod error;
pub mod harness;
pub mod region;
pub mod splice;

pub use command::Substitution;
pub use error::SyncError;
pub use region::{synchronize, SyncOutcome};
pub use splice::{propagate, SpliceOutcome};
