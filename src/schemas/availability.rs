use booking::{DurationOption, Quote};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use super::{de_hhmm, ser_hhmm};

fn default_duration() -> i32 { 1 }

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	pub date:     NaiveDate,
	#[serde(default = "default_duration")]
	#[validate(range(min = 1, max = 24))]
	pub duration: i32,
}

/// One candidate start time on the daily grid
///
/// Booked slots are kept in the response so the UI can render them greyed
/// out; quotes are only attached to bookable ones.
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
	#[serde(serialize_with = "ser_hhmm", deserialize_with = "de_hhmm")]
	pub start_time: NaiveTime,
	pub available:  bool,
	pub quote:      Option<Quote>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub court_id:         i32,
	pub date:             NaiveDate,
	pub duration_hours:   i32,
	pub currency:         String,
	/// The sport's explicit duration catalog, or the durations derived
	/// from the court's pricing rules
	pub duration_options: Vec<DurationOption>,
	pub slots:            Vec<SlotResponse>,
}
