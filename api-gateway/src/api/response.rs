//! Standardized API response formats
//!
//! Every endpoint wraps its payload in one of these so clients always find the
//! result under `data`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use common::model::network::NetworkId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

/// A standardized API response wrapper for single resource responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// The response data
    pub data: T,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

/// Additional metadata about the response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMetadata {
    /// Network the data was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkId>,
    /// Number of items in a list response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// A standardized API response wrapper for list/collection responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiListResponse<T> {
    /// The list of items
    pub data: Vec<T>,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> IntoResponse for ApiListResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> ApiResponse<T> {
    /// Create a new API response with just data
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    /// Create a new API response tagged with its network
    pub fn for_network(data: T, network: NetworkId) -> Self {
        Self {
            data,
            meta: Some(ResponseMetadata {
                network: Some(network),
                count: None,
            }),
        }
    }
}

impl<T> ApiListResponse<T> {
    /// Create a new list response with just data
    pub fn new(data: Vec<T>) -> Self {
        Self { data, meta: None }
    }

    /// Create a new list response tagged with its network and item count
    pub fn for_network(data: Vec<T>, network: NetworkId) -> Self {
        let count = data.len();
        Self {
            data,
            meta: Some(ResponseMetadata {
                network: Some(network),
                count: Some(count),
            }),
        }
    }
}
