#[macro_use]
extern crate tracing;

use booking::{Interval, VenuePolicy, is_interval_free};
use chrono::{NaiveDate, NaiveTime};
use common::{BookingError, DbConn, Error, PaymentError};
use db::{PaymentStatus, ReservationStatus, court, profile, reservation};
use diesel::pg::Pg;
use diesel::prelude::*;
use primitive_court::PrimitiveCourt;
use primitive_pricing_rule::PrimitivePricingRule;
use primitive_profile::PrimitiveProfile;
use primitive_reservation::PrimitiveReservation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reservation joined with its court and the booking profile
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Reservation {
	pub reservation: PrimitiveReservation,
	pub court:       PrimitiveCourt,
	pub profile:     PrimitiveProfile,
}

/// Filter for reservation list queries
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
	pub day: Option<NaiveDate>,
}

type JoinedReservationData =
	(PrimitiveReservation, PrimitiveCourt, PrimitiveProfile);

impl Reservation {
	fn from_joined(data: JoinedReservationData) -> Self {
		Self { reservation: data.0, court: data.1, profile: data.2 }
	}

	/// Get a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let data = conn
			.interact(move |conn| {
				reservation::table
					.inner_join(court::table)
					.inner_join(profile::table)
					.filter(reservation::id.eq(r_id))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveCourt::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_result(conn)
			})
			.await??;

		Ok(Self::from_joined(data))
	}

	/// Get all the reservations for a court on a given day
	#[instrument(skip(conn))]
	pub async fn for_court_on_day(
		c_id: i32,
		on_day: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let data: Vec<JoinedReservationData> = conn
			.interact(move |conn| {
				reservation::table
					.inner_join(court::table)
					.inner_join(profile::table)
					.filter(reservation::court_id.eq(c_id))
					.filter(reservation::day.eq(on_day))
					.order(reservation::start_time.asc())
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveCourt::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??;

		Ok(data.into_iter().map(Self::from_joined).collect())
	}

	/// Get all the reservations made by a profile
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		filter: ReservationFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let data: Vec<JoinedReservationData> = conn
			.interact(move |conn| {
				let mut query = reservation::table
					.inner_join(court::table)
					.inner_join(profile::table)
					.filter(reservation::profile_id.eq(p_id))
					.into_boxed();

				if let Some(on_day) = filter.day {
					query = query.filter(reservation::day.eq(on_day));
				}

				query
					.order((
						reservation::day.asc(),
						reservation::start_time.asc(),
					))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveCourt::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??;

		Ok(data.into_iter().map(Self::from_joined).collect())
	}

	/// Cancel a reservation, freeing its time interval
	#[instrument(skip(conn))]
	pub async fn cancel(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		conn.interact(move |conn| {
			use self::reservation::dsl::*;

			diesel::update(reservation.find(r_id))
				.set(status.eq(ReservationStatus::Cancelled))
				.execute(conn)
		})
		.await??;

		info!("cancelled reservation {r_id}");

		Self::get_by_id(r_id, conn).await
	}

	/// Apply a successful payment notification from the gateway
	///
	/// Idempotent: re-delivery of an already settled notification returns
	/// the reservation unchanged. The settled amount must match the price
	/// quoted at booking time exactly.
	#[instrument(skip(conn))]
	pub async fn confirm_payment(
		reference: Uuid,
		amount_cents: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let settled = conn
			.interact(move |conn| {
				conn.transaction::<PrimitiveReservation, Error, _>(|conn| {
					use self::reservation::dsl::*;

					let current: PrimitiveReservation = reservation
						.filter(payment_reference.eq(reference))
						.select(PrimitiveReservation::as_select())
						.for_update()
						.get_result(conn)
						.optional()?
						.ok_or(PaymentError::UnknownReference)?;

					if current.payment_status == PaymentStatus::Paid {
						return Ok(current);
					}

					if current.price_cents != amount_cents {
						return Err(PaymentError::AmountMismatch {
							expected: current.price_cents,
							received: amount_cents,
						}
						.into());
					}

					let next_status = match current.status {
						ReservationStatus::Pending => {
							ReservationStatus::Confirmed
						},
						other => other,
					};

					let updated = diesel::update(
						reservation.find(current.id),
					)
					.set((
						payment_status.eq(PaymentStatus::Paid),
						status.eq(next_status),
					))
					.returning(PrimitiveReservation::as_returning())
					.get_result(conn)?;

					Ok(updated)
				})
			})
			.await??;

		info!("confirmed payment for reservation {}", settled.id);

		Self::get_by_id(settled.id, conn).await
	}

	/// Record a failed payment notification from the gateway
	#[instrument(skip(conn))]
	pub async fn fail_payment(
		reference: Uuid,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(
					reservation.filter(payment_reference.eq(reference)),
				)
				.set(payment_status.eq(PaymentStatus::Failed))
				.returning(PrimitiveReservation::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or(PaymentError::UnknownReference)?;

		warn!("payment failed for reservation {}", updated.id);

		Self::get_by_id(updated.id, conn).await
	}
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
struct NewReservation {
	court_id:          i32,
	profile_id:        i32,
	day:               NaiveDate,
	start_time:        NaiveTime,
	duration_hours:    i32,
	status:            ReservationStatus,
	payment_status:    PaymentStatus,
	price_cents:       i32,
	payment_reference: Uuid,
	blocked_reason:    Option<String>,
}

impl NewReservation {
	/// Serialized check-and-insert
	///
	/// Re-reads the blocking intervals for the court and day inside the
	/// transaction and rejects the insert on overlap. The
	/// `reservation_no_overlap` exclusion constraint remains the enforcing
	/// layer for writers racing through the gap; its violation also maps to
	/// [`BookingError::SlotConflict`].
	async fn insert_checked(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveReservation, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<PrimitiveReservation, Error, _>(|conn| {
					use self::reservation::dsl::*;

					let taken: Vec<(NaiveTime, i32)> = reservation
						.filter(court_id.eq(self.court_id))
						.filter(day.eq(self.day))
						.filter(status.eq_any([
							ReservationStatus::Pending,
							ReservationStatus::Confirmed,
						]))
						.select((start_time, duration_hours))
						.for_update()
						.load(conn)?;

					let taken: Vec<Interval> = taken
						.into_iter()
						.map(|(s, d)| Interval::new(s, d))
						.collect();

					let requested = Interval::new(
						self.start_time,
						self.duration_hours,
					);

					if !is_interval_free(requested, &taken) {
						return Err(BookingError::SlotConflict.into());
					}

					let created = diesel::insert_into(reservation)
						.values(self)
						.returning(PrimitiveReservation::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		info!("created reservation {created:?}");

		Ok(created)
	}
}

// The start must fit within opening hours and be one of the grid's candidate
// start times
fn check_grid(
	policy: &VenuePolicy,
	start: NaiveTime,
	duration_hours: i32,
) -> Result<(), BookingError> {
	if !policy.grid.contains(start, duration_hours) {
		return Err(outside_opening_hours(policy));
	}

	if !policy.grid.is_aligned(start) {
		return Err(BookingError::InvalidInput(format!(
			"start time {start} is not on the booking grid"
		)));
	}

	Ok(())
}

fn outside_opening_hours(policy: &VenuePolicy) -> BookingError {
	BookingError::OutsideOpeningHours {
		open:  NaiveTime::from_hms_opt(policy.grid.open_hour, 0, 0)
			.unwrap_or_default(),
		// a close hour of 24 renders as midnight
		close: NaiveTime::from_hms_opt(policy.grid.close_hour % 24, 0, 0)
			.unwrap_or_default(),
	}
}

/// A validated booking request, the input of the booking writer
#[derive(Clone, Copy, Debug)]
pub struct ReservationRequest {
	pub court_id:       i32,
	pub profile_id:     i32,
	pub day:            NaiveDate,
	pub start_time:     NaiveTime,
	pub duration_hours: i32,
}

impl ReservationRequest {
	/// Create a reservation for a customer
	///
	/// Validates the court, the sport's duration catalog, and opening
	/// hours, resolves the price, then performs the serialized
	/// check-and-insert. Fails with a recoverable
	/// [`BookingError::SlotConflict`] when the interval was taken between
	/// slot selection and submission.
	#[instrument(skip(policy, conn))]
	pub async fn book(
		self,
		policy: &VenuePolicy,
		conn: &DbConn,
	) -> Result<Reservation, Error> {
		let court = PrimitiveCourt::get_by_id(self.court_id, conn).await?;
		court.require_bookable()?;

		policy
			.catalog
			.validate(court.sport.slug(), self.duration_hours)?;

		check_grid(policy, self.start_time, self.duration_hours)?;

		let rates =
			PrimitivePricingRule::rate_table(self.court_id, conn).await?;
		let quote = rates
			.quote(self.duration_hours, self.start_time, &policy.peak)
			.ok_or(BookingError::NoPricingAvailable {
				court_id: self.court_id,
				hours:    self.duration_hours,
			})?;

		let new_reservation = NewReservation {
			court_id:          self.court_id,
			profile_id:        self.profile_id,
			day:               self.day,
			start_time:        self.start_time,
			duration_hours:    self.duration_hours,
			status:            ReservationStatus::Pending,
			payment_status:    PaymentStatus::Pending,
			price_cents:       quote.price_cents,
			payment_reference: Uuid::new_v4(),
			blocked_reason:    None,
		};

		let created = new_reservation.insert_checked(conn).await?;

		Reservation::get_by_id(created.id, conn).await
	}

	/// Block a slot for maintenance or events
	///
	/// Privileged variant of the booking writer: same conflict-checking
	/// path, zero price, confirmed and paid immediately, no payment step.
	/// Never overwrites an existing customer reservation.
	#[instrument(skip(policy, conn))]
	pub async fn block(
		self,
		reason: String,
		policy: &VenuePolicy,
		conn: &DbConn,
	) -> Result<Reservation, Error> {
		// Maintenance blocks may target inactive courts, but never an
		// interval outside the daily grid
		check_grid(policy, self.start_time, self.duration_hours)?;

		let new_reservation = NewReservation {
			court_id:          self.court_id,
			profile_id:        self.profile_id,
			day:               self.day,
			start_time:        self.start_time,
			duration_hours:    self.duration_hours,
			status:            ReservationStatus::Confirmed,
			payment_status:    PaymentStatus::Paid,
			price_cents:       0,
			payment_reference: Uuid::new_v4(),
			blocked_reason:    Some(reason),
		};

		let created = new_reservation.insert_checked(conn).await?;

		Reservation::get_by_id(created.id, conn).await
	}
}
