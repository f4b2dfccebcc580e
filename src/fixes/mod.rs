//! Proposal model and edit materialization

pub mod engine;

pub use engine::{resolve_transform, ResolveError, Transform};
