use axum::{
	Json, Router,
	extract::{
		Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use marquee_domain::TrendingEntry;
use marquee_service::{Error, RequestState};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", get(current_search))
		.route("/v1/search/query", post(set_query))
		.route("/v1/trending", get(load_trending))
		.route("/v1/trending/refresh", post(refresh_trending))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
	pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchSnapshot {
	pub raw_query: String,
	pub debounced_query: Option<String>,
	pub generation: u64,
	pub state: RequestState,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
	pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
	pub items: Vec<TrendingEntry>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } => {
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
			},
			Error::Store { message } => {
				tracing::error!(%message, "Trending store request failed.");

				Self::new(
					StatusCode::SERVICE_UNAVAILABLE,
					"store_unavailable",
					"Trending store is unavailable.",
				)
			},
			Error::Transport { message } | Error::Api { message } => {
				Self::new(StatusCode::BAD_GATEWAY, "catalog_unavailable", message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn current_search(State(state): State<AppState>) -> Json<SearchSnapshot> {
	Json(snapshot(&state))
}

async fn set_query(
	State(state): State<AppState>,
	payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SearchSnapshot>), ApiError> {
	let Json(payload) = payload.map_err(|err| {
		ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", err.body_text())
	})?;

	state.session.set_query(payload.query);

	Ok((StatusCode::ACCEPTED, Json(snapshot(&state))))
}

async fn load_trending(
	State(state): State<AppState>,
	params: Result<Query<TrendingParams>, QueryRejection>,
) -> Result<Json<TrendingResponse>, ApiError> {
	let Query(params) = params.map_err(|err| {
		ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", err.body_text())
	})?;
	let limit = params.limit.unwrap_or(state.trending_limit);
	let items = state.session.load_trending(limit).await?;

	Ok(Json(TrendingResponse { items }))
}

async fn refresh_trending(
	State(state): State<AppState>,
) -> Result<Json<TrendingResponse>, ApiError> {
	let items = state.session.refresh_trending().await?;

	Ok(Json(TrendingResponse { items }))
}

fn snapshot(state: &AppState) -> SearchSnapshot {
	let view = state.session.view();

	SearchSnapshot {
		raw_query: state.session.raw_query(),
		debounced_query: view.debounced_query,
		generation: view.generation,
		state: view.request,
	}
}
