use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use primitive_profile::PrimitiveProfile;
use reservation::{Reservation, ReservationFilter};

use crate::schemas::BuildResponse;
use crate::schemas::profile::ProfileResponse;
use crate::schemas::reservation::ReservationResponse;
use crate::{Config, Session};

/// Get the profile of the current user
#[instrument(skip(pool))]
pub async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::get_by_id(session.data.profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

/// Get the reservations made by the current user
#[instrument(skip(config, pool))]
pub async fn get_current_profile_reservations(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	session: Session,
	Query(filter): Query<ReservationFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		Reservation::for_profile(session.data.profile_id, filter, &conn)
			.await?;

	let response: Vec<ReservationResponse> = reservations
		.into_iter()
		.map(|r| r.build_response(&config))
		.collect();

	Ok((StatusCode::OK, Json(response)))
}
