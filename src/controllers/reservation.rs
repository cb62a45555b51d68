//! Controllers for reservations and admin slot blocks

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use reservation::Reservation;
use validator::Validate;

use crate::schemas::BuildResponse;
use crate::schemas::reservation::{
	BlockSlotRequest,
	CourtReservationsQuery,
	CreateReservationRequest,
	ReservationResponse,
};
use crate::{AdminSession, Config, Session};

/// Book a slot on a court for the current profile
///
/// A conflict with a reservation made between slot selection and submission
/// is recoverable: the client gets a 409 and is expected to refresh the
/// availability grid and retry.
#[instrument(skip(config, pool))]
pub(crate) async fn create_reservation(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	let reservation = request
		.into_request(id, session.data.profile_id)
		.book(&config.venue_policy, &conn)
		.await?;

	let response: ReservationResponse = reservation.build_response(&config);

	Ok((StatusCode::CREATED, Json(response)))
}

/// List the reservations for a court on a given day
#[instrument(skip(config, pool))]
pub(crate) async fn get_reservations_for_court(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(id): Path<i32>,
	Query(query): Query<CourtReservationsQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		Reservation::for_court_on_day(id, query.date, &conn).await?;

	let response: Vec<ReservationResponse> = reservations
		.into_iter()
		.map(|r| r.build_response(&config))
		.collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Cancel a reservation, freeing its time interval
///
/// Profiles may only cancel their own reservations; admins may cancel any,
/// including slot blocks.
#[instrument(skip(pool))]
pub(crate) async fn delete_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path((court_id, reservation_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::get_by_id(reservation_id, &conn).await?;

	if reservation.reservation.court_id != court_id {
		return Err(Error::NotFound("reservation".to_string()));
	}

	if reservation.reservation.profile_id != session.data.profile_id
		&& !session.data.profile_is_admin
	{
		return Err(Error::Forbidden);
	}

	Reservation::cancel(reservation_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Block a slot on a court for maintenance or events
#[instrument(skip(config, pool))]
pub(crate) async fn block_slot(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
	Json(request): Json<BlockSlotRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	let reservation = request
		.into_request(id, session.data.profile_id)
		.block(request.reason.clone(), &config.venue_policy, &conn)
		.await?;

	let response: ReservationResponse = reservation.build_response(&config);

	Ok((StatusCode::CREATED, Json(response)))
}
