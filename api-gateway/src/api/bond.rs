//! Bond API handlers
//!
//! Handlers for bond market endpoints including:
//! - List supported networks
//! - List live bonds on a network
//! - Get a single bond

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use bond_engine::BondDuration;
use common::model::bond::Bond;
use common::model::market::MarketId;
use common::model::network::NetworkId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::response::{ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::AppState;

/// Bond with its duration formatted for display
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BondView {
    /// Bond snapshot
    pub bond: Bond,
    /// Duration as shown to users, e.g. "14 days"
    pub duration_label: String,
}

impl From<Bond> for BondView {
    fn from(bond: Bond) -> Self {
        let duration_label = BondDuration::render(Some(bond.duration)).label().to_string();
        Self {
            bond,
            duration_label,
        }
    }
}

/// Sort order for bond listings
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BondSort {
    /// Ascending market id
    #[default]
    Id,
    /// Highest discount first
    Discount,
}

/// Bond listing query parameters
#[derive(Debug, Deserialize, ToSchema)]
pub struct BondsQuery {
    /// Sort order
    #[serde(default)]
    pub sort: BondSort,
    /// Include markets with less than one base token left
    #[serde(default = "default_include_sold_out")]
    pub include_sold_out: bool,
}

fn default_include_sold_out() -> bool {
    true
}

fn parse_network(network: &str) -> Result<NetworkId, ApiError> {
    network
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unsupported network: {}", network)))
}

/// List supported networks
#[utoipa::path(
    get,
    path = "/api/v1/networks",
    responses(
        (status = 200, description = "Supported networks retrieved successfully")
    ),
    tag = "bond"
)]
pub async fn get_networks(
    State(state): State<Arc<AppState>>,
) -> Result<ApiListResponse<NetworkId>, ApiError> {
    Ok(ApiListResponse::new(state.networks.clone()))
}

/// List live bonds on a network
#[utoipa::path(
    get,
    path = "/api/v1/networks/{network}/bonds",
    params(
        ("network" = String, Path, description = "Network name or chain id"),
        ("sort" = Option<String>, Query, description = "Sort order (id, discount)"),
        ("include_sold_out" = Option<bool>, Query, description = "Include sold out markets")
    ),
    responses(
        (status = 200, description = "Live bonds retrieved successfully"),
        (status = 400, description = "Unsupported network"),
        (status = 502, description = "Depository unavailable"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bond"
)]
pub async fn get_bonds(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Query(query): Query<BondsQuery>,
) -> Result<ApiListResponse<BondView>, ApiError> {
    let network = parse_network(&network)?;

    let bonds = state.bond_service.bonds(network).await?;

    let mut bonds: Vec<Bond> = bonds
        .iter()
        .filter(|bond| query.include_sold_out || !bond.is_sold_out)
        .cloned()
        .collect();

    match query.sort {
        BondSort::Id => bonds.sort_by_key(|bond| bond.id),
        BondSort::Discount => bonds.sort_by(|a, b| b.discount.cmp(&a.discount).then(a.id.cmp(&b.id))),
    }

    let views = bonds.into_iter().map(BondView::from).collect();
    Ok(ApiListResponse::for_network(views, network))
}

/// Get a single bond
#[utoipa::path(
    get,
    path = "/api/v1/networks/{network}/bonds/{id}",
    params(
        ("network" = String, Path, description = "Network name or chain id"),
        ("id" = u64, Path, description = "Market id")
    ),
    responses(
        (status = 200, description = "Bond retrieved successfully"),
        (status = 400, description = "Unsupported network"),
        (status = 404, description = "Market or quote token not found"),
        (status = 502, description = "Depository or price oracle unavailable"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bond"
)]
pub async fn get_bond(
    State(state): State<Arc<AppState>>,
    Path((network, id)): Path<(String, MarketId)>,
) -> Result<ApiResponse<BondView>, ApiError> {
    let network = parse_network(&network)?;

    let bond = state.bond_service.bond(network, id).await?;

    Ok(ApiResponse::for_network(BondView::from(bond), network))
}
