//! Controllers for courts and their pricing rules

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use court::{Court, NewCourt, NewPricingRule, UpdateCourt};
use primitive_court::PrimitiveCourt;
use primitive_pricing_rule::PrimitivePricingRule;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schemas::court::{
	CourtDetailResponse,
	CourtResponse,
	CreateCourtRequest,
	PricingRuleResponse,
	ReplacePricingRequest,
	UpdateCourtRequest,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourtListQuery {
	#[serde(default)]
	pub active_only: bool,
}

/// List all courts
#[instrument(skip(pool))]
pub(crate) async fn get_all_courts(
	State(pool): State<DbPool>,
	Query(query): Query<CourtListQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let courts = PrimitiveCourt::get_all(query.active_only, &conn).await?;
	let response: Vec<CourtResponse> =
		courts.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get a court with its pricing rules
#[instrument(skip(pool))]
pub(crate) async fn get_court(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let court = Court::get_by_id(id, &conn).await?;

	Ok((StatusCode::OK, Json(CourtDetailResponse::from(court))))
}

/// Create a new court
#[instrument(skip(pool))]
pub(crate) async fn create_court(
	State(pool): State<DbPool>,
	Json(request): Json<CreateCourtRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	let court = NewCourt::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(CourtResponse::from(court))))
}

/// Update a court
#[instrument(skip(pool))]
pub(crate) async fn update_court(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
	Json(request): Json<UpdateCourtRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	let court = UpdateCourt::from(request).apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(CourtResponse::from(court))))
}

/// Delete a court
#[instrument(skip(pool))]
pub(crate) async fn delete_court(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Court::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Get the pricing rules of a court
#[instrument(skip(pool))]
pub(crate) async fn get_court_pricing(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	// 404 for unknown courts rather than an empty rule list
	PrimitiveCourt::get_by_id(id, &conn).await?;

	let rules = PrimitivePricingRule::for_court(id, &conn).await?;
	let response: Vec<PricingRuleResponse> =
		rules.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Replace the full pricing rule set of a court
#[instrument(skip(pool))]
pub(crate) async fn replace_court_pricing(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
	Json(request): Json<ReplacePricingRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	PrimitiveCourt::get_by_id(id, &conn).await?;

	let rules = request.into_new_rules(id);
	let rules = NewPricingRule::replace_for_court(id, rules, &conn).await?;

	let response: Vec<PricingRuleResponse> =
		rules.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}
