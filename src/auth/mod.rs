//! Credential loading and session state.
//!
//! The calculator never persists its key: [`KeyLoader`] fetches it from a
//! key-storage endpoint on first need and parks it in a [`Session`] that
//! lives as long as the process.

pub mod loader;
pub mod session;

pub use loader::{KeyLoader, KeyPayload};
pub use session::{Credential, Session};
