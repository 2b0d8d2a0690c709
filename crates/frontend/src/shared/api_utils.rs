//! API utilities for frontend-backend communication
//!
//! URL construction, the shared error type and a send helper that aborts
//! requests after the configured timeout.

use super::config::config;
use gloo_net::http::{RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

/// Failure of a REST call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Falha de rede: {0}")]
    Network(String),
    #[error("O servidor não respondeu em {0} ms")]
    Timeout(u32),
    #[error("O servidor respondeu com erro HTTP {status}")]
    Status { status: u16 },
    #[error("Resposta inesperada do servidor: {0}")]
    Decode(String),
    #[error("Falha ao montar a requisição: {0}")]
    Encode(String),
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/pedido/api/123");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&config().api_base, path)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Send a request without a body and return the successful response
pub async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    dispatch(builder, None).await
}

/// Send a request with a JSON body and return the successful response
pub async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    let json = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    dispatch(builder, Some(json)).await
}

/// Decode a successful response body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn dispatch(builder: RequestBuilder, body: Option<String>) -> Result<Response, ApiError> {
    let timeout_ms = config().request_timeout_ms;
    let controller =
        web_sys::AbortController::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let timed_out = Rc::new(Cell::new(false));
    let timer = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let signal = controller.signal();
    let builder = builder.abort_signal(Some(&signal));
    let result = match body {
        Some(json) => {
            let request = builder
                .header("Content-Type", "application/json")
                .body(json)
                .map_err(|e| ApiError::Encode(e.to_string()))?;
            request.send().await
        }
        None => builder.send().await,
    };
    timer.cancel();

    match result {
        Ok(response) if response.ok() => Ok(response),
        Ok(response) => Err(ApiError::Status {
            status: response.status(),
        }),
        Err(_) if timed_out.get() => Err(ApiError::Timeout(timeout_ms)),
        Err(e) => Err(ApiError::Network(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_same_origin() {
        assert_eq!(join_url("", "/pedido/api/1"), "/pedido/api/1");
    }

    #[test]
    fn test_join_url_with_base() {
        assert_eq!(
            join_url("http://localhost:8080/", "/pedido/api"),
            "http://localhost:8080/pedido/api"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::Status { status: 500 }.to_string(),
            "O servidor respondeu com erro HTTP 500"
        );
        assert_eq!(
            ApiError::Timeout(15000).to_string(),
            "O servidor não respondeu em 15000 ms"
        );
    }
}
