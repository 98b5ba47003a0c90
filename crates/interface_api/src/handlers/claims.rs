//! Claim and theft claim handlers

use axum::{extract::State, Json};

use domain_claims::{Claim, TheftClaimView};

use crate::dto::claims::*;
use crate::extract::{OptionalPayload, Payload};
use crate::{error::ApiError, AppState};

/// Lists claims, optionally by status
pub async fn list_claims(
    State(state): State<AppState>,
    OptionalPayload(request): OptionalPayload<ListClaimsRequest>,
) -> Result<Json<Vec<Claim>>, ApiError> {
    let claims = state.claims.list_claims(request.into()).await?;
    Ok(Json(claims))
}

/// Files a claim against a contract
pub async fn file_claim(
    State(state): State<AppState>,
    Payload(request): Payload<FileClaimRequest>,
) -> Result<Json<Claim>, ApiError> {
    let claim = state.claims.file_claim(request.into()).await?;
    Ok(Json(claim))
}

/// Moves a claim to repair, reimbursement or rejection
pub async fn process_claim(
    State(state): State<AppState>,
    Payload(request): Payload<ProcessClaimRequest>,
) -> Result<Json<Claim>, ApiError> {
    let claim = state.claims.process_claim(request.into()).await?;
    Ok(Json(claim))
}

/// Lists theft claims awaiting the authorities
pub async fn list_theft_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<TheftClaimView>>, ApiError> {
    let claims = state.claims.list_theft_claims().await?;
    Ok(Json(claims))
}

/// Records the authorities' verdict on a theft claim
pub async fn process_theft_claim(
    State(state): State<AppState>,
    Payload(request): Payload<ProcessTheftClaimRequest>,
) -> Result<Json<Claim>, ApiError> {
    let claim = state.claims.process_theft_claim(request.into()).await?;
    Ok(Json(claim))
}
