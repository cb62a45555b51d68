use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use db::{PaymentStatus, ReservationStatus};
use reservation::{Reservation, ReservationRequest};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator_derive::Validate;

use crate::Config;
use crate::schemas::BuildResponse;
use crate::schemas::profile::ProfileResponse;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:                i32,
	pub court_id:          i32,
	pub court_name:        String,
	pub day:               NaiveDate,
	pub start_time:        NaiveTime,
	pub end_time:          NaiveDateTime,
	pub duration_hours:    i32,
	pub status:            ReservationStatus,
	pub payment_status:    PaymentStatus,
	pub price_cents:       i32,
	pub currency:          String,
	pub payment_reference: Uuid,
	pub blocked_reason:    Option<String>,
	pub profile:           ProfileResponse,
	pub created_at:        NaiveDateTime,
}

impl BuildResponse<ReservationResponse> for Reservation {
	fn build_response(self, config: &Config) -> ReservationResponse {
		let reservation = self.reservation;

		let end_time = reservation.day.and_time(reservation.start_time)
			+ Duration::hours(i64::from(reservation.duration_hours));

		ReservationResponse {
			id: reservation.id,
			court_id: reservation.court_id,
			court_name: self.court.name,
			day: reservation.day,
			start_time: reservation.start_time,
			end_time,
			duration_hours: reservation.duration_hours,
			status: reservation.status,
			payment_status: reservation.payment_status,
			price_cents: reservation.price_cents,
			currency: config.currency.clone(),
			payment_reference: reservation.payment_reference,
			blocked_reason: reservation.blocked_reason,
			profile: self.profile.into(),
			created_at: reservation.created_at,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtReservationsQuery {
	pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub day:            NaiveDate,
	pub start_time:     NaiveTime,
	#[validate(range(min = 1, max = 24))]
	pub duration_hours: i32,
}

impl CreateReservationRequest {
	#[must_use]
	pub fn into_request(
		self,
		court_id: i32,
		profile_id: i32,
	) -> ReservationRequest {
		ReservationRequest {
			court_id,
			profile_id,
			day: self.day,
			start_time: self.start_time,
			duration_hours: self.duration_hours,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlotRequest {
	pub day:            NaiveDate,
	pub start_time:     NaiveTime,
	#[validate(range(min = 1, max = 24))]
	pub duration_hours: i32,
	#[validate(length(min = 1, max = 256))]
	pub reason:         String,
}

impl BlockSlotRequest {
	#[must_use]
	pub fn into_request(
		&self,
		court_id: i32,
		profile_id: i32,
	) -> ReservationRequest {
		ReservationRequest {
			court_id,
			profile_id,
			day: self.day,
			start_time: self.start_time,
			duration_hours: self.duration_hours,
		}
	}
}
