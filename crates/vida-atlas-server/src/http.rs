use crate::filter_options::compute_filter_options;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, error, info};
use vida_atlas_api::{
    parse_list_species_params, parse_moderation_request, validate_create, ApiError,
    CreateSpeciesDto, ListSpeciesParams, ListSpeciesResponseDto, ModerationRequestDto,
    SpeciesResponseDto,
};
use vida_atlas_query::{project, PageWindow};
use vida_atlas_store::StoreError;

pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(vida_atlas_api::status_for(err))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

/// Empty page used when the listing path degrades on store failure: the
/// browsing UI keeps rendering instead of erroring.
fn degraded_listing(params: &ListSpeciesParams) -> Response {
    let window = PageWindow::compute(1, params.page_size, 0);
    Json(ListSpeciesResponseDto {
        species: Vec::new(),
        pagination: window.into(),
    })
    .into_response()
}

pub(crate) async fn list_species(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params = parse_list_species_params(&query, state.config.max_page_size);
    debug!(page = params.page, page_size = params.page_size, "species listing request");

    let total = match state.store.count(&params.filter) {
        Ok(total) => total,
        Err(e) => {
            error!(error = %e, "species count failed; degrading to empty listing");
            return degraded_listing(&params);
        }
    };
    let window = PageWindow::compute(params.page, params.page_size, total);
    let records = match state
        .store
        .fetch_page(&params.filter, window.page_size, window.offset())
    {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "species page fetch failed; degrading to empty listing");
            return degraded_listing(&params);
        }
    };

    Json(ListSpeciesResponseDto {
        species: records.iter().map(project).collect(),
        pagination: window.into(),
    })
    .into_response()
}

pub(crate) async fn create_species(
    State(state): State<AppState>,
    Json(payload): Json<CreateSpeciesDto>,
) -> Response {
    let new = match validate_create(&payload) {
        Ok(new) => new,
        Err(e) => return api_error_response(&e),
    };
    match state.store.create(&new) {
        Ok(record) => {
            info!(scientific_name = record.scientific_name.as_str(), "species contribution stored");
            (
                StatusCode::CREATED,
                Json(SpeciesResponseDto {
                    species: project(&record),
                    message: "species contribution submitted successfully".to_string(),
                }),
            )
                .into_response()
        }
        Err(StoreError::Conflict(_)) => {
            api_error_response(&ApiError::duplicate_scientific_name(new.scientific_name.as_str()))
        }
        Err(e) => {
            error!(error = %e, "species creation failed");
            api_error_response(&ApiError::store_unavailable(&e.to_string()))
        }
    }
}

pub(crate) async fn moderate_species(
    State(state): State<AppState>,
    Json(payload): Json<ModerationRequestDto>,
) -> Response {
    let (id, action) = match parse_moderation_request(&payload) {
        Ok(parsed) => parsed,
        Err(e) => return api_error_response(&e),
    };
    match state.store.set_moderation_state(id, action) {
        Ok(record) => Json(SpeciesResponseDto {
            species: project(&record),
            message: format!("species {} successfully", action.as_state().as_str()),
        })
        .into_response(),
        Err(StoreError::NotFound) => api_error_response(&ApiError::species_not_found(id)),
        Err(e) => {
            error!(error = %e, id, "moderation update failed");
            api_error_response(&ApiError::store_unavailable(&e.to_string()))
        }
    }
}

pub(crate) async fn filter_options(State(state): State<AppState>) -> Response {
    if let Some(snapshot) = state.filters_cache.lock().await.get() {
        debug!("filter options served from cache");
        return Json(snapshot).into_response();
    }
    // Recompute outside the lock; concurrent misses may both get here and
    // the last put wins.
    info!("filter options cache miss; scanning store");
    match compute_filter_options(&state.store) {
        Ok(options) => {
            state.filters_cache.lock().await.put(options.clone());
            Json(options).into_response()
        }
        Err(e) => {
            error!(error = %e, "filter options computation failed");
            api_error_response(&ApiError::internal(&e.to_string()))
        }
    }
}

pub(crate) async fn health() -> Response {
    Json(json!({"success": true, "message": "species api is alive"})).into_response()
}

pub(crate) async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "API endpoint not found"})),
    )
        .into_response()
}
