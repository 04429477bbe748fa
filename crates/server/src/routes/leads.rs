use axum::{extract::State, http::StatusCode, Json};
use common::observability::LEADS_CREATED_TOTAL;
use service::domain::{Lead, NewLead};
use tracing::info;

use crate::{errors::JsonApiError, extract::ApiJson, state::ServerState};

const STORE: &str = "leads";

/// List every demo request in submission order.
#[utoipa::path(
    get, path = "/api/leads", tag = "leads",
    responses(
        (status = 200, description = "All leads"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn list_leads(State(state): State<ServerState>) -> Result<Json<Vec<Lead>>, JsonApiError> {
    let leads = state.leads.list().await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    info!(count = leads.len(), "list leads");
    Ok(Json(leads))
}

/// Store a demo request from the landing page form.
#[utoipa::path(
    post, path = "/api/leads", tag = "leads",
    request_body = crate::openapi::NewLeadDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Body is not a lead form"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn create_lead(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewLead>,
) -> Result<(StatusCode, Json<Lead>), JsonApiError> {
    let lead = state.leads.create(input).await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    LEADS_CREATED_TOTAL.inc();
    info!(id = %lead.id, occupation = %lead.occupation, "created lead");
    Ok((StatusCode::CREATED, Json(lead)))
}
