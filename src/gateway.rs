//! Gateway-style request handling.
//!
//! A [`GatewayRequest`] is the normalized shape an HTTP gateway or serverless
//! invoker hands over: method, query parameters, raw body and headers.
//! [`ProductHandler`] dispatches it onto the product services and always
//! answers with a [`GatewayResponse`]; errors never escape as `Err`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::repository::{ProductReader, ProductWriter};
use crate::services::products::{self, ProductsQuery};
use crate::services::ServiceError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, X-User-Id, X-Authorization";
pub const MAX_AGE_SECONDS: u32 = 86400;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Inbound request descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Passed through untouched; authentication happens upstream.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
}

impl GatewayRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Request body, with a missing body read as an empty JSON object.
    fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("{}")
    }
}

fn default_method() -> String {
    "GET".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outbound response descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    /// Response to a CORS preflight request.
    pub fn preflight() -> Self {
        let headers = HashMap::from([
            (
                "Access-Control-Allow-Origin".to_string(),
                ALLOW_ORIGIN.to_string(),
            ),
            (
                "Access-Control-Allow-Methods".to_string(),
                ALLOW_METHODS.to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                ALLOW_HEADERS.to_string(),
            ),
            (
                "Access-Control-Max-Age".to_string(),
                MAX_AGE_SECONDS.to_string(),
            ),
        ]);
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// JSON response carrying the serialized `value`.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::json_body(status_code, body),
            Err(err) => Self::error(500, &err.to_string()),
        }
    }

    /// JSON response of the form `{"error": message}`.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json_body(status_code, serde_json::json!({ "error": message }).to_string())
    }

    fn json_body(status_code: u16, body: String) -> Self {
        let headers = HashMap::from([
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
            (
                "Access-Control-Allow-Origin".to_string(),
                ALLOW_ORIGIN.to_string(),
            ),
        ]);
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}

impl From<ServiceError> for GatewayResponse {
    fn from(err: ServiceError) -> Self {
        let status_code = err.status_code();
        if status_code >= 500 {
            log::error!("Product request failed: {err}");
        }
        Self::error(status_code, &err.to_string())
    }
}

/// Dispatches gateway requests onto the product services.
#[derive(Clone)]
pub struct ProductHandler<R> {
    repo: R,
}

impl<R> ProductHandler<R>
where
    R: ProductReader + ProductWriter,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Handle one request. Preflight is answered before any repository access.
    pub fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        match request.http_method.as_str() {
            "OPTIONS" => GatewayResponse::preflight(),
            "GET" => {
                let query = ProductsQuery::from_params(&request.query_string_parameters);
                Self::respond(200, products::load_products(&self.repo, query))
            }
            "POST" => Self::respond(
                201,
                products::create_product(&self.repo, request.body_or_empty()),
            ),
            "PUT" => Self::respond(
                200,
                products::update_product(&self.repo, request.body_or_empty()),
            ),
            _ => GatewayResponse::error(405, "Method not allowed"),
        }
    }

    fn respond<T: Serialize>(status_code: u16, result: Result<T, ServiceError>) -> GatewayResponse {
        match result {
            Ok(value) => GatewayResponse::json(status_code, &value),
            Err(err) => err.into(),
        }
    }
}
