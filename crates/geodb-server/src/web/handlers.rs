//! Dataset endpoints
//!
//! Thin handlers: validate the path parameter, make sure the dataset is
//! built, delegate to the query layer, serialize. Path parameters are
//! validated before the cache is touched, so malformed input gets its 400
//! even while the dataset is unavailable.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use geodb_core::query::{normalize_iso_code, parse_id};
use geodb_core::{Entity, GeoIndex, QueryError};
use serde_json::{json, Value};
use std::sync::Arc;

use super::extractors::PathParam;
use super::responses::ApiError;
use super::AppState;

type ApiResult = Result<Response, ApiError>;

/// Waits for the dataset; a build failure becomes `failure` for the caller.
async fn dataset(state: &AppState, failure: &'static str) -> Result<Arc<GeoIndex>, ApiError> {
    state
        .cache
        .ensure_ready()
        .await
        .map_err(|source| ApiError::unavailable(failure, source))
}

/// Fails on malformed input only. A well-formed key that can never match
/// still waits for the dataset, so it is reported like any other miss.
fn reject_malformed<T>(checked: Result<T, QueryError>) -> Result<(), ApiError> {
    match checked {
        Err(err @ QueryError::InvalidArgument(_)) => Err(err.into()),
        _ => Ok(()),
    }
}

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Country Data API" }))
}

pub async fn list_countries(State(state): State<AppState>) -> ApiResult {
    let geo = dataset(&state, "Failed to retrieve countries").await?;
    Ok(Json(geo.list_countries()).into_response())
}

pub async fn get_country(State(state): State<AppState>, PathParam(id): PathParam) -> ApiResult {
    reject_malformed(parse_id(&id, Entity::Country))?;
    let geo = dataset(&state, "Failed to retrieve country data").await?;
    let country = geo.get_country_by_id(&id)?;
    Ok(Json(country).into_response())
}

pub async fn get_country_by_iso(
    State(state): State<AppState>,
    PathParam(code): PathParam,
) -> ApiResult {
    reject_malformed(normalize_iso_code(&code))?;
    let geo = dataset(&state, "Failed to retrieve country data").await?;
    let country = geo.get_country_by_iso(&code)?;
    Ok(Json(country).into_response())
}

pub async fn list_country_states(
    State(state): State<AppState>,
    PathParam(id): PathParam,
) -> ApiResult {
    reject_malformed(parse_id(&id, Entity::Country))?;
    let geo = dataset(&state, "Failed to retrieve states data").await?;
    let states = geo.list_states(&id)?;
    Ok(Json(states).into_response())
}

pub async fn get_state(State(state): State<AppState>, PathParam(id): PathParam) -> ApiResult {
    reject_malformed(parse_id(&id, Entity::State))?;
    let geo = dataset(&state, "Failed to retrieve state data").await?;
    let found = geo.get_state_by_id(&id)?;
    Ok(Json(found).into_response())
}

pub async fn list_country_cities(
    State(state): State<AppState>,
    PathParam(id): PathParam,
) -> ApiResult {
    reject_malformed(parse_id(&id, Entity::Country))?;
    let geo = dataset(&state, "Failed to retrieve cities data").await?;
    let cities = geo.list_cities_of_country(&id)?;
    Ok(Json(cities).into_response())
}

pub async fn list_state_cities(
    State(state): State<AppState>,
    PathParam(id): PathParam,
) -> ApiResult {
    reject_malformed(parse_id(&id, Entity::State))?;
    let geo = dataset(&state, "Failed to retrieve cities data").await?;
    let cities = geo.list_cities_of_state(&id)?;
    Ok(Json(cities).into_response())
}

pub async fn search_countries(
    State(state): State<AppState>,
    PathParam(term): PathParam,
) -> ApiResult {
    let geo = dataset(&state, "Failed to search countries").await?;
    Ok(Json(geo.search_countries_by_name(&term)).into_response())
}

pub async fn list_regions(State(state): State<AppState>) -> ApiResult {
    let geo = dataset(&state, "Failed to retrieve regions data").await?;
    Ok(Json(geo.list_regions()).into_response())
}

pub async fn region_countries(
    State(state): State<AppState>,
    PathParam(region): PathParam,
) -> ApiResult {
    let geo = dataset(&state, "Failed to retrieve region data").await?;
    Ok(Json(geo.countries_by_region(&region)).into_response())
}

pub async fn list_subregions(State(state): State<AppState>) -> ApiResult {
    let geo = dataset(&state, "Failed to retrieve subregions data").await?;
    Ok(Json(geo.list_subregions()).into_response())
}

pub async fn subregion_countries(
    State(state): State<AppState>,
    PathParam(subregion): PathParam,
) -> ApiResult {
    let geo = dataset(&state, "Failed to retrieve subregion data").await?;
    Ok(Json(geo.countries_by_subregion(&subregion)).into_response())
}

pub async fn not_found() -> ApiError {
    ApiError::NoRoute
}
