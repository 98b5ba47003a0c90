//! HTTP API Layer
//!
//! This crate exposes the shop insurance operations over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one typed handler per route, calling one service operation
//! - **Extractors**: validated JSON bodies, optional for list routes
//! - **Middleware**: request IDs, tracing, audit logging
//! - **Error Handling**: domain error kinds mapped onto HTTP statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::postgres(pool, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{ClaimService, ClaimsPort};
use domain_contract::{ContractPort, ContractService};
use domain_party::{Argon2Hasher, UserPort, UserService};
use infra_db::{DatabasePool, PostgresClaimsAdapter, PostgresContractAdapter, PostgresUserAdapter};

use crate::config::ApiConfig;
use crate::handlers::{claims, contracts, health, repairs, users};
use crate::middleware::{audit_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub contracts: Arc<ContractService>,
    pub claims: Arc<ClaimService>,
    pub users: Arc<UserService>,
    /// Probed by the readiness check
    pub store_health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the services on top of the given ports
    ///
    /// # Arguments
    ///
    /// * `users` - User record store
    /// * `contracts` - Contract type and contract record store
    /// * `claims` - Claim and repair order record store
    /// * `store_health` - Adapter probed by `/health/ready`
    /// * `config` - API configuration
    pub fn from_ports(
        users: Arc<dyn UserPort>,
        contracts: Arc<dyn ContractPort>,
        claims: Arc<dyn ClaimsPort>,
        store_health: Arc<dyn HealthCheckable>,
        config: ApiConfig,
    ) -> Self {
        let user_service = Arc::new(UserService::new(users.clone(), Arc::new(Argon2Hasher::new())));
        Self {
            contracts: Arc::new(ContractService::new(contracts.clone(), user_service.clone())),
            claims: Arc::new(ClaimService::new(claims, contracts, users)),
            users: user_service,
            store_health,
            config,
        }
    }

    /// Builds the state on the PostgreSQL adapters
    pub fn postgres(pool: DatabasePool, config: ApiConfig) -> Self {
        let contracts = Arc::new(PostgresContractAdapter::new(pool.clone()));
        Self::from_ports(
            Arc::new(PostgresUserAdapter::new(pool.clone())),
            contracts.clone(),
            Arc::new(PostgresClaimsAdapter::new(pool)),
            contracts,
            config,
        )
    }
}

/// Creates the main API router
///
/// List routes answer both GET and POST; every other operation is a POST
/// with a JSON body.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // Contract types
        .route(
            "/contract_types/list",
            get(contracts::list_contract_types).post(contracts::list_contract_types),
        )
        .route("/contract_types/create", post(contracts::create_contract_type))
        .route("/contract_types/set_active", post(contracts::set_contract_type_active))
        // Contracts
        .route(
            "/contracts/list",
            get(contracts::list_contracts).post(contracts::list_contracts),
        )
        .route("/contracts/create", post(contracts::create_contract))
        .route("/contracts/claims", post(contracts::contract_claims))
        .route("/contracts/rebuild_claim_index", post(contracts::rebuild_claim_index))
        // Claims
        .route("/claims/list", get(claims::list_claims).post(claims::list_claims))
        .route("/claims/file", post(claims::file_claim))
        .route("/claims/process", post(claims::process_claim))
        .route(
            "/theft_claims/list",
            get(claims::list_theft_claims).post(claims::list_theft_claims),
        )
        .route("/theft_claims/process", post(claims::process_theft_claim))
        // Repair orders
        .route(
            "/repair_orders/list",
            get(repairs::list_repair_orders).post(repairs::list_repair_orders),
        )
        .route("/repair_orders/complete", post(repairs::complete_repair_order))
        // Users
        .route("/users/create", post(users::create_user))
        .route("/users/authenticate", post(users::authenticate))
        .route("/users/get_info", post(users::get_user_info))
        .route("/users/update_password", post(users::update_password))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
