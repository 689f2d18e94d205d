//! GraphQL-over-HTTP implementation of the note store.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::documents::{
    CREATE_NOTE, CREATE_NOTE_OPERATION, DELETE_NOTE, DELETE_NOTE_OPERATION, LIST_NOTES,
    LIST_NOTES_OPERATION,
};
use super::{
    CreateNoteInput, CreateNoteResponse, DeleteNoteInput, DeleteNoteResponse, ListNotesResponse,
    MutationVariables, NoteStore, RemoteError, RemoteResult,
};
use crate::config::{BackendAuth, BackendConfig};

const API_KEY_HEADER: &str = "x-api-key";
const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<V>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "errorType")]
    error_type: Option<String>,
}

impl GraphQlError {
    fn describe(&self) -> String {
        match (&self.error_type, &self.message) {
            (Some(kind), Some(message)) => format!("{kind}: {}", message.trim()),
            (None, Some(message)) => message.trim().to_string(),
            (Some(kind), None) => kind.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
    #[serde(default)]
    message: Option<String>,
}

/// Note store backed by a managed GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct GraphQlNoteStore {
    endpoint: String,
    auth_label: &'static str,
    client: Client,
}

impl GraphQlNoteStore {
    pub fn new(config: &BackendConfig) -> RemoteResult<Self> {
        let mut builder = Client::builder().default_headers(auth_headers(&config.auth)?);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            auth_label: config.auth.label(),
            client: builder.build()?,
        })
    }

    async fn execute<V, T>(
        &self,
        operation_name: &str,
        query: &str,
        variables: Option<V>,
    ) -> RemoteResult<T>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(
            operation = operation_name,
            endpoint = %self.endpoint,
            auth = self.auth_label,
            "Sending GraphQL request"
        );

        let request = GraphQlRequest {
            query,
            operation_name,
            variables,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }

        decode_payload(operation_name, &body)
    }
}

#[async_trait]
impl NoteStore for GraphQlNoteStore {
    async fn list_notes(&self) -> RemoteResult<ListNotesResponse> {
        self.execute::<(), _>(LIST_NOTES_OPERATION, LIST_NOTES, None)
            .await
    }

    async fn create_note(&self, input: CreateNoteInput) -> RemoteResult<CreateNoteResponse> {
        self.execute(
            CREATE_NOTE_OPERATION,
            CREATE_NOTE,
            Some(MutationVariables { input }),
        )
        .await
    }

    async fn delete_note(&self, input: DeleteNoteInput) -> RemoteResult<DeleteNoteResponse> {
        self.execute(
            DELETE_NOTE_OPERATION,
            DELETE_NOTE,
            Some(MutationVariables { input }),
        )
        .await
    }
}

fn auth_headers(auth: &BackendAuth) -> RemoteResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let (name, value) = match auth {
        BackendAuth::None => return Ok(headers),
        BackendAuth::ApiKey(key) => (API_KEY_HEADER, key),
        BackendAuth::Token(token) => (AUTHORIZATION_HEADER, token),
    };

    let mut value = HeaderValue::from_str(value.trim()).map_err(|_| {
        RemoteError::InvalidConfiguration(format!(
            "{} credential contains invalid header characters",
            auth.label()
        ))
    })?;
    value.set_sensitive(true);
    headers.insert(name, value);
    Ok(headers)
}

/// Decode a successful HTTP body into the operation's response shape.
///
/// GraphQL errors alongside data are logged and the data is kept; errors
/// without any data are reported as an API error.
fn decode_payload<T: DeserializeOwned>(operation_name: &str, body: &str) -> RemoteResult<T> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|error| RemoteError::InvalidPayload(format!("{operation_name}: {error}")))?;

    let errors = payload
        .get("errors")
        .cloned()
        .and_then(|errors| serde_json::from_value::<Vec<GraphQlError>>(errors).ok())
        .unwrap_or_default();
    let has_data = payload.get("data").is_some_and(|data| !data.is_null());

    if !errors.is_empty() {
        let summary = summarize_errors(&errors);
        if !has_data {
            return Err(RemoteError::Api(summary));
        }
        tracing::warn!(
            operation = operation_name,
            "GraphQL response carried errors alongside data: {}",
            summary
        );
    }

    serde_json::from_value(payload)
        .map_err(|error| RemoteError::InvalidPayload(format!("{operation_name}: {error}")))
}

fn summarize_errors(errors: &[GraphQlError]) -> String {
    compact_text(
        &errors
            .iter()
            .map(GraphQlError::describe)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
            return format!("{} ({})", summarize_errors(&errors), status.as_u16());
        }
        if let Some(message) = payload.message {
            return format!("{} ({})", compact_text(&message), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}
