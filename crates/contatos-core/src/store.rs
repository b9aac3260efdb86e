//! Contact store client over the Firestore REST API.
//!
//! All operations target one flat collection. Documents hold two string
//! fields (`nome`, `telefone`); the document id is assigned by the backend.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BackendSettings;
use crate::models::{Contact, MISSING_FIELD_PLACEHOLDER, NAME_FIELD, NewContact, PHONE_FIELD};

/// Documents requested per list page.
const PAGE_SIZE: u32 = 300;

/// Store failure. `Display` yields the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Erro ao adicionar documento: {0}")]
    CreateFailed(String),

    #[error("Erro ao buscar documentos: {0}")]
    FetchFailed(String),

    #[error("Erro ao deletar documento: {0}")]
    DeleteFailed(String),

    /// No valid session could be produced for the request.
    #[error("Sessão expirada: faça login novamente. ({0})")]
    Unauthenticated(String),
}

/// A document as returned by the REST API.
#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl Document {
    /// Final path segment of the resource name.
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// String value of a field, or the placeholder when missing or not a string.
    fn string_field(&self, field: &str) -> String {
        self.fields
            .get(field)
            .and_then(|value| value.get("stringValue"))
            .and_then(Value::as_str)
            .unwrap_or(MISSING_FIELD_PLACEHOLDER)
            .to_string()
    }

    fn into_contact(self) -> Contact {
        Contact {
            id: self.id().to_string(),
            name: self.string_field(NAME_FIELD),
            phone: self.string_field(PHONE_FIELD),
        }
    }
}

/// Client for one contact collection.
#[derive(Debug, Clone)]
pub struct ContactStore {
    http: reqwest::Client,
    collection_url: String,
}

impl ContactStore {
    pub fn new(
        http: reqwest::Client,
        firestore_url: &str,
        project_id: &str,
        collection: &str,
    ) -> Self {
        let collection_url = format!(
            "{}/v1/projects/{project_id}/databases/(default)/documents/{collection}",
            firestore_url.trim_end_matches('/')
        );
        Self {
            http,
            collection_url,
        }
    }

    pub fn from_settings(http: reqwest::Client, settings: &BackendSettings) -> Self {
        Self::new(
            http,
            &settings.firestore_url,
            &settings.project_id,
            &settings.collection,
        )
    }

    /// Creates a contact and returns its backend-assigned id.
    ///
    /// Empty name or phone are stored as empty strings.
    ///
    /// # Errors
    /// Returns [`StoreError::CreateFailed`] on any failure.
    pub async fn create(&self, id_token: &str, contact: &NewContact) -> Result<String, StoreError> {
        debug!("Creating contact document");
        let body = json!({
            "fields": {
                NAME_FIELD: { "stringValue": contact.name },
                PHONE_FIELD: { "stringValue": contact.phone },
            }
        });

        let response = self
            .http
            .post(&self.collection_url)
            .bearer_auth(id_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::CreateFailed(e.to_string()))?;

        if !response.status().is_success() {
            let detail = http_error_detail(response).await;
            warn!(%detail, "Error adding document");
            return Err(StoreError::CreateFailed(detail));
        }

        let document: Document = response
            .json()
            .await
            .map_err(|e| StoreError::CreateFailed(format!("invalid response: {e}")))?;
        let id = document.id().to_string();
        info!(%id, "Document written");
        Ok(id)
    }

    /// Fetches every contact in the collection, following pages until exhausted.
    ///
    /// Order is whatever the backend returns. An empty collection is `Ok(vec![])`.
    ///
    /// # Errors
    /// Returns [`StoreError::FetchFailed`] on any failure.
    pub async fn list(&self, id_token: &str) -> Result<Vec<Contact>, StoreError> {
        let mut contacts = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&self.collection_url)
                .bearer_auth(id_token)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::FetchFailed(e.to_string()))?;

            if !response.status().is_success() {
                let detail = http_error_detail(response).await;
                warn!(%detail, "Error getting documents");
                return Err(StoreError::FetchFailed(detail));
            }

            let page: ListResponse = response
                .json()
                .await
                .map_err(|e| StoreError::FetchFailed(format!("invalid response: {e}")))?;

            contacts.extend(page.documents.into_iter().map(Document::into_contact));

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!(count = contacts.len(), "Fetched contacts");
        Ok(contacts)
    }

    /// Deletes the contact with the given id.
    ///
    /// # Errors
    /// Returns [`StoreError::DeleteFailed`] on any failure.
    pub async fn delete(&self, id_token: &str, id: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(StoreError::DeleteFailed("missing document id".to_string()));
        }

        let mut url = url::Url::parse(&self.collection_url)
            .map_err(|e| StoreError::DeleteFailed(format!("invalid collection URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::DeleteFailed("invalid collection URL".to_string()))?
            .push(id);

        let response = self
            .http
            .delete(url)
            .bearer_auth(id_token)
            .send()
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            let detail = http_error_detail(response).await;
            warn!(%id, %detail, "Error deleting document");
            return Err(StoreError::DeleteFailed(detail));
        }

        info!(%id, "Document deleted");
        Ok(())
    }
}

/// One-line summary of a failed response, preferring the API's own message.
async fn http_error_detail(response: reqwest::Response) -> String {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                message: Some(message),
            },
        }) => format!("HTTP {status}: {message}"),
        _ if body.trim().is_empty() => format!("HTTP {status}"),
        _ => format!("HTTP {status}: {}", body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const COLLECTION_PATH: &str = "/v1/projects/agenda/databases/(default)/documents/autenticador";

    fn store(server: &MockServer) -> ContactStore {
        ContactStore::new(reqwest::Client::new(), &server.uri(), "agenda", "autenticador")
    }

    fn document(id: &str, fields: Value) -> Value {
        json!({
            "name": format!("projects/agenda/databases/(default)/documents/autenticador/{id}"),
            "fields": fields,
            "createTime": "2024-05-01T12:00:00.000000Z",
            "updateTime": "2024-05-01T12:00:00.000000Z"
        })
    }

    #[test]
    fn test_document_missing_fields_use_placeholder() {
        let doc: Document = serde_json::from_value(document(
            "abc",
            json!({ "nome": { "stringValue": "Ana" }, "telefone": { "integerValue": "5551234" } }),
        ))
        .unwrap();
        assert_eq!(doc.into_contact(), Contact::new("abc", "Ana", "--"));

        let bare: Document = serde_json::from_value(json!({
            "name": "projects/agenda/databases/(default)/documents/autenticador/xyz"
        }))
        .unwrap();
        assert_eq!(bare.into_contact(), Contact::new("xyz", "--", "--"));
    }

    #[tokio::test]
    async fn test_create_sends_fields_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .and(header("authorization", "Bearer id-1"))
            .and(body_json(json!({
                "fields": {
                    "nome": { "stringValue": "Ana" },
                    "telefone": { "stringValue": "555-1234" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(document(
                "new-id",
                json!({ "nome": { "stringValue": "Ana" }, "telefone": { "stringValue": "555-1234" } }),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let id = store(&server)
            .create("id-1", &NewContact::new("Ana", "555-1234"))
            .await
            .unwrap();
        assert_eq!(id, "new-id");
    }

    #[tokio::test]
    async fn test_create_with_empty_fields_still_sends_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .and(body_json(json!({
                "fields": {
                    "nome": { "stringValue": "" },
                    "telefone": { "stringValue": "" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(document(
                "empty-id",
                json!({ "nome": { "stringValue": "" }, "telefone": { "stringValue": "" } }),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let id = store(&server)
            .create("id-1", &NewContact::default())
            .await
            .unwrap();
        assert_eq!(id, "empty-id");
    }

    #[tokio::test]
    async fn test_create_failure_reports_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Missing or insufficient permissions.",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&server)
            .await;

        let err = store(&server)
            .create("id-1", &NewContact::new("Ana", "1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::CreateFailed("HTTP 403: Missing or insufficient permissions.".to_string())
        );
        assert_eq!(
            err.to_string(),
            "Erro ao adicionar documento: HTTP 403: Missing or insufficient permissions."
        );
    }

    #[tokio::test]
    async fn test_list_empty_collection_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let contacts = store(&server).list("id-1").await.unwrap();
        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn test_list_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .and(query_param("pageToken", "page-2"))
            .and(query_param("pageSize", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document("b", json!({ "nome": { "stringValue": "Bia" } }))]
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .and(header("authorization", "Bearer id-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document(
                    "a",
                    json!({ "nome": { "stringValue": "Ana" }, "telefone": { "stringValue": "555-1234" } }),
                )],
                "nextPageToken": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let contacts = store(&server).list("id-1").await.unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("a", "Ana", "555-1234"),
                Contact::new("b", "Bia", "--"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_failure_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = store(&server).list("id-1").await.unwrap_err();
        assert_eq!(err, StoreError::FetchFailed("HTTP 500".to_string()));
    }

    #[tokio::test]
    async fn test_delete_targets_document() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("{COLLECTION_PATH}/abc")))
            .and(header("authorization", "Bearer id-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        store(&server).delete("id-1", "abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_empty_id_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = store(&server).delete("id-1", "").await.unwrap_err();
        assert!(matches!(err, StoreError::DeleteFailed(_)));
    }
}
