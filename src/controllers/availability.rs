//! Controller for the per-court availability grid

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use booking::{DurationOption, Interval, is_interval_free};
use common::{DbPool, Error};
use primitive_court::PrimitiveCourt;
use primitive_pricing_rule::PrimitivePricingRule;
use primitive_reservation::PrimitiveReservation;
use validator::Validate;

use crate::Config;
use crate::schemas::availability::{
	AvailabilityQuery,
	AvailabilityResponse,
	SlotResponse,
};

/// Get the availability grid for a court on a given day
///
/// Every candidate start time on the daily grid is reported, with a price
/// quote attached to the ones that can still hold the requested duration.
/// The grid is a snapshot; the booking writer re-checks conflicts on insert.
#[instrument(skip(config, pool))]
pub(crate) async fn get_court_availability(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	query.validate()?;

	let court = PrimitiveCourt::get_by_id(id, &conn).await?;
	court.require_bookable()?;

	let policy = &config.venue_policy;
	policy.catalog.validate(court.sport.slug(), query.duration)?;

	let rates = PrimitivePricingRule::rate_table(id, &conn).await?;
	let existing =
		PrimitiveReservation::blocking_intervals(id, query.date, &conn).await?;

	let duration_options = duration_options(policy, &rates, court.sport.slug());

	let slots = policy
		.grid
		.slots()
		.into_iter()
		.map(|start| {
			let available = policy.grid.contains(start, query.duration)
				&& is_interval_free(
					Interval::new(start, query.duration),
					&existing,
				);

			let quote = available
				.then(|| rates.quote(query.duration, start, &policy.peak))
				.flatten();

			SlotResponse { start_time: start, available, quote }
		})
		.collect();

	let response = AvailabilityResponse {
		court_id: id,
		date: query.date,
		duration_hours: query.duration,
		currency: config.currency.clone(),
		duration_options,
		slots,
	};

	Ok((StatusCode::OK, Json(response)))
}

/// The durations a client may request for this court
///
/// Sports with a restricted catalog expose exactly that catalog; all others
/// expose the durations their pricing rules cover.
fn duration_options(
	policy: &booking::VenuePolicy,
	rates: &booking::RateTable,
	sport: &str,
) -> Vec<DurationOption> {
	if let Some(options) = policy.catalog.options_for(sport) {
		return options.to_vec();
	}

	rates
		.durations()
		.map(|hours| DurationOption { hours, label: format!("{hours}h") })
		.collect()
}
