#[macro_use]
extern crate tracing;

use booking::Interval;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{PaymentStatus, ReservationStatus, reservation};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:                i32,
	pub court_id:          i32,
	pub profile_id:        i32,
	pub day:               NaiveDate,
	pub start_time:        NaiveTime,
	pub duration_hours:    i32,
	pub status:            ReservationStatus,
	pub payment_status:    PaymentStatus,
	pub price_cents:       i32,
	pub payment_reference: Uuid,
	pub blocked_reason:    Option<String>,
	pub created_at:        NaiveDateTime,
	pub updated_at:        NaiveDateTime,
}

impl PrimitiveReservation {
	/// The half-open time interval this reservation occupies
	#[must_use]
	pub fn interval(&self) -> Interval {
		Interval::new(self.start_time, self.duration_hours)
	}

	/// Get a [`PrimitiveReservation`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(reservation)
	}

	/// Get the intervals blocking a court on a given day
	///
	/// Only pending and confirmed reservations occupy their interval;
	/// cancelled and completed ones have freed it.
	#[instrument(skip(conn))]
	pub async fn blocking_intervals(
		c_id: i32,
		on_day: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Interval>, Error> {
		let rows: Vec<Self> = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(court_id.eq(c_id))
					.filter(day.eq(on_day))
					.filter(status.eq_any([
						ReservationStatus::Pending,
						ReservationStatus::Confirmed,
					]))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(rows.iter().map(Self::interval).collect())
	}

	/// Get a [`PrimitiveReservation`] by its payment reference
	#[instrument(skip(conn))]
	pub async fn get_by_payment_reference(
		reference: Uuid,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(payment_reference.eq(reference))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(reservation)
	}
}
