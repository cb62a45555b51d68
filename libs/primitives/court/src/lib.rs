#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{BookingError, DbConn, Error};
use db::{SportKind, court};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = court)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveCourt {
	pub id:             i32,
	pub name:           String,
	pub sport:          SportKind,
	pub active:         bool,
	pub in_maintenance: bool,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl PrimitiveCourt {
	/// Whether this court can currently take new reservations
	#[must_use]
	pub fn bookable(&self) -> bool { self.active && !self.in_maintenance }

	/// Reject courts that cannot take new reservations
	pub fn require_bookable(&self) -> Result<(), Error> {
		if self.bookable() {
			Ok(())
		} else {
			Err(BookingError::CourtUnavailable(self.id).into())
		}
	}

	/// Get a [`PrimitiveCourt`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(c_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let court = conn
			.interact(move |conn| {
				use self::court::dsl::*;

				court.find(c_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(court)
	}

	/// Get all courts, optionally restricted to active ones
	#[instrument(skip(conn))]
	pub async fn get_all(
		active_only: bool,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let courts = conn
			.interact(move |conn| {
				use self::court::dsl::*;

				let mut query = court.select(Self::as_select()).into_boxed();

				if active_only {
					query = query.filter(active.eq(true));
				}

				query.order(name.asc()).get_results(conn)
			})
			.await??;

		Ok(courts)
	}
}
