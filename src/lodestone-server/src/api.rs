//! Request/response types and handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lodestone::{GeneratedItem, GeneratedList, ResourceHub};
use lodestone_store::loaders;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiFailure, ErrorResponse, GENERATE_FAILED, LIST_HUBS_FAILED};
use crate::pipeline;
use crate::AppState;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HubResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub min_provisions: u32,
    pub max_provisions: u32,
    pub upper_price_modifier: f64,
    pub lower_price_modifier: f64,
    pub selected_provisions: Vec<String>,
}

impl From<ResourceHub> for HubResponse {
    fn from(hub: ResourceHub) -> Self {
        Self {
            id: hub.id,
            name: hub.name,
            image_url: hub.image_url,
            min_provisions: hub.min_provisions,
            max_provisions: hub.max_provisions,
            upper_price_modifier: hub.upper_price_modifier,
            lower_price_modifier: hub.lower_price_modifier,
            selected_provisions: hub.selected_provisions,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub hub_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedItemResponse {
    pub id: String,
    pub name: String,
    /// Unit price, rounded to cents; shared by every copy of this item
    pub price: f64,
    pub count: u32,
    pub rarity: String,
}

impl From<GeneratedItem> for GeneratedItemResponse {
    fn from(item: GeneratedItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            count: item.count,
            rarity: item.rarity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub hub_name: String,
    pub items: Vec<GeneratedItemResponse>,
}

impl From<GeneratedList> for GenerateResponse {
    fn from(list: GeneratedList) -> Self {
        Self {
            hub_name: list.hub_name,
            items: list.items.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "System"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/api/lodestone/hubs",
    responses(
        (status = 200, description = "All resource hubs", body = Vec<HubResponse>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Lodestone"
)]
pub async fn list_hubs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HubResponse>>, ApiFailure> {
    let hubs = loaders::list_hubs(&state.store)
        .await
        .map_err(|e| ApiError::from(e).labeled(LIST_HUBS_FAILED))?;

    tracing::debug!(count = hubs.len(), "Listed resource hubs");
    Ok(Json(hubs.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/lodestone/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated loot list", body = GenerateResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Resource hub not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Lodestone"
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiFailure> {
    let Json(req) =
        payload.map_err(|e| ApiError::BadRequest(e.body_text()).labeled(GENERATE_FAILED))?;

    if req.hub_id.trim().is_empty() {
        return Err(ApiError::BadRequest("hubId must not be empty".into()).labeled(GENERATE_FAILED));
    }

    let list = pipeline::generate_for_hub(&state.store, &req.hub_id)
        .await
        .map_err(|e| ApiError::from(e).labeled(GENERATE_FAILED))?;

    Ok(Json(list.into()))
}
