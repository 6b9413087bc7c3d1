//! Minimal GraphQL-over-HTTP client.

use crate::error::{DataError, DataResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Body of a GraphQL request.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

/// Client bound to one subgraph endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    http: reqwest::Client,
    url: String,
}

impl SubgraphClient {
    /// Creates a client for `url` with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> DataResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Runs a query and decodes its `data` payload.
    ///
    /// Failures are returned as-is; there is no retry.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, GraphQL
    /// errors or an undecodable payload.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> DataResult<T> {
        debug!(url = %self.url, "Sending subgraph query");

        let response = self
            .http
            .post(&self.url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?
            .error_for_status()?;

        let body: GraphQlResponse<T> = response.json().await?;
        decode_response(body)
    }
}

fn decode_response<T>(body: GraphQlResponse<T>) -> DataResult<T> {
    match (body.data, body.errors) {
        (_, Some(errors)) if !errors.is_empty() => {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            warn!(errors = ?messages, "Subgraph returned errors");
            Err(DataError::GraphQl(messages))
        }
        (Some(data), _) => Ok(data),
        (None, _) => Err(DataError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_response_data() {
        let body: GraphQlResponse<Value> =
            serde_json::from_value(json!({ "data": { "pair": null } })).unwrap();
        let data = decode_response(body).unwrap();
        assert_eq!(data, json!({ "pair": null }));
    }

    #[test]
    fn test_decode_response_errors() {
        let body: GraphQlResponse<Value> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "indexing error" }]
        }))
        .unwrap();

        match decode_response(body) {
            Err(DataError::GraphQl(messages)) => assert_eq!(messages, vec!["indexing error"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_response_empty() {
        let body: GraphQlResponse<Value> = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(decode_response(body), Err(DataError::EmptyResponse)));
    }
}
