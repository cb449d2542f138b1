//! API gateway for the bond depository

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{routing::get, Router};
use bond_engine::BondService;
use chrono::{DateTime, Utc};
use common::model::network::NetworkId;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::bond::{get_bond, get_bonds, get_networks};
use crate::api::health::health_check;

/// App state shared across handlers
pub struct AppState {
    /// Cached bond queries
    pub bond_service: Arc<BondService>,
    /// Networks served by this gateway
    pub networks: Vec<NetworkId>,
    /// When the gateway started
    pub started_at: DateTime<Utc>,
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::bond::get_networks,
        api::bond::get_bonds,
        api::bond::get_bond,
    ),
    components(
        schemas(
            api::bond::BondView,
            api::bond::BondSort,
            api::bond::BondsQuery,
            api::response::ResponseMetadata,
            common::model::bond::Bond,
            common::model::bond::BondPrice,
            common::model::bond::TokenAmount,
            common::model::token::Token,
            common::model::token::LpToken,
            common::model::network::NetworkId,
        )
    ),
    tags(
        (name = "bond", description = "Bond market endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Bond Depository API",
        version = "1.0.0",
        description = "Read API for live bond markets: price, discount, capacity and maturity"
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/networks", get(get_networks))
        .route("/networks/:network/bonds", get(get_bonds))
        .route("/networks/:network/bonds/:id", get(get_bond));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .with_state(state)
}
