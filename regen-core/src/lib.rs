//! Regen core library — line-oriented document model and marker recognition.
//!
//! Public API surface:
//! - [`document`] — [`Document`]: load / line-span replace / atomic save
//! - [`markers`] — pure matchers for the three fixture marker lines
//! - [`error`] — [`DocumentError`]

pub mod document;
pub mod error;
pub mod markers;

pub use document::Document;
pub use error::DocumentError;
pub use markers::Directive;
