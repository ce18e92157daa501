//! CRUD operations against the CMS `contacts` collection.
//!
//! Every operation issues exactly one request, parses the JSON envelope,
//! flattens the `data` member and deserializes it. Any failure along the way
//! is logged with its cause and reported as
//! [`ContactsError::SomethingWentWrong`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use super::types::{ContactId, ContactMutation, ContactRecord};
use crate::config::ContactsConfig;
use crate::error::{ConfigError, ContactsError, TransportError};
use crate::utils::{flatten_attributes, query_string};

/// Path of the contacts collection relative to the CMS base URL.
pub const CONTACTS_PATH: &str = "/api/contacts";

/// Fields matched by the search filter, in query order.
pub const SEARCH_FIELDS: [&str; 3] = ["first", "last", "twitter"];

/// Reasons an operation failed before being collapsed into the generic error.
#[derive(Debug)]
enum Failure {
    Transport(TransportError),
    Status { status: u16, body: String },
    Json(serde_json::Error),
    Serialize(serde_json::Error),
    MissingData,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transport(e) => write!(f, "{}", e),
            Failure::Status { status, body } => {
                write!(f, "unexpected status {}: {}", status, truncate(body, 200))
            }
            Failure::Json(e) => write!(f, "invalid response payload: {}", e),
            Failure::Serialize(e) => write!(f, "failed to encode request body: {}", e),
            Failure::MissingData => write!(f, "response carried no data"),
        }
    }
}

/// Client for the contacts collection.
pub struct ContactsClient<T: HttpTransport> {
    transport: T,
    page_size: u32,
    page: u32,
}

impl ContactsClient<ReqwestTransport> {
    /// Creates a client that talks to the CMS over HTTP.
    pub fn from_config(config: &ContactsConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(transport)
            .with_page_size(config.page_size)
            .with_page(config.page))
    }

    /// Creates a client from environment variables.
    ///
    /// See [`ContactsConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&ContactsConfig::from_env()?)
    }
}

impl<T: HttpTransport> ContactsClient<T> {
    /// Creates a client over an arbitrary transport with default pagination.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    /// Sets the page size used by [`list`](Self::list).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page number used by [`list`](Self::list).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists contacts, optionally filtered by a search term.
    ///
    /// The term is matched as a substring against first name, last name and
    /// twitter handle. Without a term all contacts on the configured page are
    /// returned.
    pub async fn list(&self, q: Option<&str>) -> Result<Vec<ContactRecord>, ContactsError> {
        let path = format!("{}?{}", CONTACTS_PATH, self.list_query(q));
        let request = HttpRequest::get(path);
        let contacts: Option<Vec<ContactRecord>> = self.execute("list", request).await?;
        let contacts = contacts.unwrap_or_default();
        tracing::debug!(count = contacts.len(), query = ?q, "Listed contacts");
        Ok(contacts)
    }

    /// Fetches a single contact. Returns `None` when the API reports no data.
    pub async fn get(&self, id: &ContactId) -> Result<Option<ContactRecord>, ContactsError> {
        let request = HttpRequest::get(entry_path(id));
        self.execute("get", request).await
    }

    /// Creates a contact and returns the stored record.
    pub async fn create(
        &self,
        mutation: &ContactMutation,
    ) -> Result<ContactRecord, ContactsError> {
        let body = self.envelope("create", mutation)?;
        let request = HttpRequest::post(CONTACTS_PATH, body);
        let record: ContactRecord = self.execute_required("create", request).await?;
        tracing::info!(id = %record.id, "Created contact");
        Ok(record)
    }

    /// Updates the given fields of a contact and returns the stored record.
    pub async fn update(
        &self,
        id: &ContactId,
        mutation: &ContactMutation,
    ) -> Result<ContactRecord, ContactsError> {
        let body = self.envelope("update", mutation)?;
        let request = HttpRequest::put(entry_path(id), body);
        let record: ContactRecord = self.execute_required("update", request).await?;
        tracing::info!(id = %record.id, "Updated contact");
        Ok(record)
    }

    /// Marks or unmarks a contact as favorite.
    pub async fn set_favorite(
        &self,
        id: &ContactId,
        favorite: bool,
    ) -> Result<ContactRecord, ContactsError> {
        self.update(id, &ContactMutation::new().with_favorite(favorite))
            .await
    }

    /// Deletes a contact.
    pub async fn delete(&self, id: &ContactId) -> Result<(), ContactsError> {
        let request = HttpRequest::delete(entry_path(id));
        // The acknowledgement must still be valid JSON.
        let _: Value = self.execute("delete", request).await?;
        tracing::info!(id = %id, "Deleted contact");
        Ok(())
    }

    /// Builds the filter and pagination query for [`list`](Self::list).
    pub fn list_query(&self, q: Option<&str>) -> String {
        let mut query = serde_json::Map::new();
        if let Some(term) = q {
            let clauses: Vec<Value> = SEARCH_FIELDS
                .iter()
                .map(|field| {
                    let mut clause = serde_json::Map::new();
                    clause.insert(field.to_string(), json!({ "$contains": term }));
                    Value::Object(clause)
                })
                .collect();
            query.insert("filters".to_string(), json!({ "$or": clauses }));
        }
        query.insert(
            "pagination".to_string(),
            json!({ "pageSize": self.page_size, "page": self.page }),
        );
        query_string::stringify(&Value::Object(query))
    }

    fn envelope(
        &self,
        operation: &'static str,
        mutation: &ContactMutation,
    ) -> Result<Value, ContactsError> {
        serde_json::to_value(mutation)
            .map(|data| json!({ "data": data }))
            .map_err(|e| fail(operation, Failure::Serialize(e)))
    }

    async fn execute_required<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<R, ContactsError> {
        let value: Option<R> = self.execute(operation, request).await?;
        value.ok_or_else(|| fail(operation, Failure::MissingData))
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<R, ContactsError> {
        tracing::debug!(
            operation,
            method = %request.method,
            path = %request.path,
            "Issuing contacts request"
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| fail(operation, Failure::Transport(e)))?;

        if !response.is_success() {
            return Err(fail(
                operation,
                Failure::Status {
                    status: response.status,
                    body: response.body,
                },
            ));
        }

        let payload: Value = serde_json::from_str(&response.body)
            .map_err(|e| fail(operation, Failure::Json(e)))?;
        let data = payload.get("data").cloned().unwrap_or(Value::Null);

        serde_json::from_value(flatten_attributes(&data))
            .map_err(|e| fail(operation, Failure::Json(e)))
    }
}

fn entry_path(id: &ContactId) -> String {
    format!("{}/{}", CONTACTS_PATH, urlencoding::encode(id.as_str()))
}

fn fail(operation: &'static str, failure: Failure) -> ContactsError {
    tracing::warn!(operation, error = %failure, "Contacts request failed");
    ContactsError::SomethingWentWrong
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
