//! Repair order handlers

use axum::{extract::State, Json};

use domain_claims::RepairOrderView;

use crate::dto::claims::CompleteRepairOrderRequest;
use crate::dto::MessageResponse;
use crate::extract::Payload;
use crate::{error::ApiError, AppState};

/// Lists repair orders that are not ready yet
pub async fn list_repair_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<RepairOrderView>>, ApiError> {
    let orders = state.claims.list_repair_orders().await?;
    Ok(Json(orders))
}

/// Marks a repair order ready
pub async fn complete_repair_order(
    State(state): State<AppState>,
    Payload(request): Payload<CompleteRepairOrderRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.claims.complete_repair_order(request.uuid).await?;
    Ok(Json(MessageResponse::success()))
}
