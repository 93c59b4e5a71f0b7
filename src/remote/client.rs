//! REST client for server-backed tables.
//!
//! Every endpoint answers JSON over HTTPS. Listing is a `GET` returning an
//! array of records; add, update, and delete are `POST`s with a JSON body.
//! Mutation responses are only checked for a success status.

use crate::config::model::EndpointConfig;
use crate::config::RemoteConfig;
use crate::table::error::TableError;
use crate::table::record::RecordId;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<RemoteError> for TableError {
    fn from(e: RemoteError) -> Self {
        TableError::Transport(e.to_string())
    }
}

pub struct RestClient {
    http: Client,
    base_url: String,
    endpoints: EndpointConfig,
}

impl RestClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fetch every record as raw JSON objects.
    ///
    /// Accepts either a bare array or an object wrapping the array under
    /// `data`.
    pub async fn list_raw(&self) -> Result<Vec<Value>, RemoteError> {
        let url = self.url(&self.endpoints.list);
        debug!(%url, "listing records");
        let response = check(&self.endpoints.list, self.http.get(&url).send().await?)?;
        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(e.to_string()))?;
        match body {
            Value::Array(items) => Ok(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(RemoteError::Decode("expected a JSON array of records".into())),
            },
            _ => Err(RemoteError::Decode("expected a JSON array of records".into())),
        }
    }

    pub async fn create(&self, payload: &Value) -> Result<(), RemoteError> {
        self.post(&self.endpoints.add, payload).await
    }

    pub async fn update(&self, payload: &Value) -> Result<(), RemoteError> {
        self.post(&self.endpoints.update, payload).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), RemoteError> {
        self.post(&self.endpoints.delete, &json!({ "id": id })).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<(), RemoteError> {
        let url = self.url(endpoint);
        debug!(%url, "posting");
        check(endpoint, self.http.post(&url).json(body).send().await?)?;
        Ok(())
    }
}

fn check(endpoint: &str, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::lead::Lead;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    async fn record(State(seen): State<Seen>, path: String, body: Value) -> StatusCode {
        seen.lock().await.push((path, body));
        StatusCode::OK
    }

    async fn spawn_lead_server() -> (RemoteConfig, Seen) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/api/Lead/GetAll",
                get(|| async {
                    Json(json!([
                        {"id": 1, "leadName": "Ada", "status": "New", "createdAt": "2025-03-01T08:15:00"},
                        {"id": 2, "leadName": "Grace", "status": "Lost", "isActive": true}
                    ]))
                }),
            )
            .route(
                "/api/Lead/Add",
                post(|s: State<Seen>, Json(b): Json<Value>| record(s, "add".into(), b)),
            )
            .route(
                "/api/Lead/Update",
                post(|s: State<Seen>, Json(b): Json<Value>| record(s, "update".into(), b)),
            )
            .route(
                "/api/Lead/Delete",
                post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .with_state(seen.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let config = RemoteConfig {
            base_url: format!("http://{}/api/", addr),
            timeout_secs: Some(5),
            ..RemoteConfig::default()
        };
        (config, seen)
    }

    #[test]
    fn test_url_joins_single_slash() {
        let client = RestClient::new(&RemoteConfig {
            base_url: "https://localhost:44302/api/".into(),
            ..RemoteConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.url("/Lead/GetAll"),
            "https://localhost:44302/api/Lead/GetAll"
        );
    }

    #[tokio::test]
    async fn test_list_decodes_leads() {
        let (config, _) = spawn_lead_server().await;
        let client = RestClient::new(&config).unwrap();
        let raw = client.list_raw().await.unwrap();
        let leads: Vec<Lead> = raw
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap())
            .collect();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].lead_name, "Ada");
        assert!(leads[0].created_at.is_some());
        assert_eq!(leads[1].status, "Lost");
    }

    #[tokio::test]
    async fn test_mutations_post_json() {
        let (config, seen) = spawn_lead_server().await;
        let client = RestClient::new(&config).unwrap();
        client.create(&json!({"leadName": "New"})).await.unwrap();
        client.update(&json!({"id": 2, "leadName": "Grace"})).await.unwrap();

        let seen = seen.lock().await;
        assert_eq!(seen[0].0, "add");
        assert_eq!(seen[0].1["leadName"], "New");
        assert_eq!(seen[1].0, "update");
        assert_eq!(seen[1].1["id"], 2);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (config, _) = spawn_lead_server().await;
        let client = RestClient::new(&config).unwrap();
        let err = client.delete(2).await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 500, .. }));
        assert_eq!(
            TableError::from(err),
            TableError::Transport("Lead/Delete returned HTTP 500".into())
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = RestClient::new(&RemoteConfig {
            base_url: format!("http://{}/api", addr),
            ..RemoteConfig::default()
        })
        .unwrap();
        assert!(matches!(client.list_raw().await, Err(RemoteError::Http(_))));
    }
}
