//! Alias document model for aliasync.
//!
//! An alias document maps permission-group names to member logins. On disk
//! it is the Prow `OWNERS_ALIASES` YAML file:
//!
//! ```yaml
//! aliases:
//!   sig-api:
//!   - alice
//!   - bob
//! ```
//!
//! Serialization is deterministic: keys and member lists are emitted in
//! ascending order, so two equal documents always produce identical text.

pub mod document;
pub mod error;

pub use document::{AliasDocument, OWNERS_ALIASES_FILENAME};
pub use error::{AliasError, Result};
