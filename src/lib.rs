//! strapi-contacts: contact management backed by a Strapi CMS.
//!
//! This library provides a typed client for the CMS `contacts` collection,
//! the flattening of the CMS's nested `attributes`/`data` response envelopes,
//! and validation of contact edit forms.

// Core modules
pub mod cli;
pub mod config;
pub mod contacts;
pub mod error;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::ContactsConfig;
pub use contacts::{ContactId, ContactMutation, ContactRecord, ContactsClient};
pub use error::{ConfigError, ContactsError, TransportError};
pub use utils::flatten_attributes;
