//! Contact data access over the CMS REST API.
//!
//! # Example
//!
//! ```ignore
//! use strapi_contacts::contacts::{ContactMutation, ContactsClient};
//!
//! let client = ContactsClient::from_env()?;
//!
//! let created = client
//!     .create(&ContactMutation::new().with_first("Ada").with_last("Lovelace"))
//!     .await?;
//!
//! for contact in client.list(Some("ada")).await? {
//!     println!("{} ({})", contact.display_name(), contact.id);
//! }
//!
//! client.delete(&created.id).await?;
//! ```

pub mod client;
pub mod transport;
pub mod types;

pub use client::{ContactsClient, CONTACTS_PATH, SEARCH_FIELDS};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{ContactId, ContactMutation, ContactRecord, NO_NAME};
