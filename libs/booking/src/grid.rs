use chrono::{NaiveTime, Timelike};
use common::BookingError;
use serde::{Deserialize, Serialize};

/// The fixed daily grid of bookable start times
///
/// A venue opens at `open_hour`, closes at `close_hour`, and offers start
/// times every `step_minutes`. A start time is only part of the grid if a
/// full step still fits before closing, so a trailing partial step is
/// dropped.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SlotGrid {
	pub open_hour:    u32,
	pub close_hour:   u32,
	pub step_minutes: u32,
}

impl SlotGrid {
	/// Build a new [`SlotGrid`]
	///
	/// `close_hour` may be 24 for venues that close at midnight.
	pub fn new(
		open_hour: u32,
		close_hour: u32,
		step_minutes: u32,
	) -> Result<Self, BookingError> {
		if open_hour >= close_hour || close_hour > 24 {
			return Err(BookingError::InvalidInput(format!(
				"invalid opening hours {open_hour}..{close_hour}"
			)));
		}

		if step_minutes == 0 {
			return Err(BookingError::InvalidInput(
				"slot step must be at least one minute".to_string(),
			));
		}

		Ok(Self { open_hour, close_hour, step_minutes })
	}

	/// The minute-of-day the venue opens
	#[must_use]
	pub fn open_minute(&self) -> u32 { self.open_hour * 60 }

	/// The minute-of-day the venue closes
	#[must_use]
	pub fn close_minute(&self) -> u32 { self.close_hour * 60 }

	/// Generate the ordered sequence of candidate start times for one day
	#[must_use]
	pub fn slots(&self) -> Vec<NaiveTime> {
		let mut slots = vec![];
		let mut minute = self.open_minute();

		while minute + self.step_minutes <= self.close_minute() {
			// Unwrap is safe, minute < close_minute <= 1440
			slots.push(
				NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap(),
			);

			minute += self.step_minutes;
		}

		slots
	}

	/// Check whether `start` is one of the grid's candidate start times
	///
	/// A start time can lie within opening hours without being bookable: the
	/// grid only offers starts a whole number of steps past opening.
	#[must_use]
	pub fn is_aligned(&self, start: NaiveTime) -> bool {
		let start_minute = start.hour() * 60 + start.minute();

		start.second() == 0
			&& start_minute >= self.open_minute()
			&& (start_minute - self.open_minute()) % self.step_minutes == 0
	}

	/// Check whether `[start, start + duration_hours)` lies entirely within
	/// opening hours
	#[must_use]
	pub fn contains(&self, start: NaiveTime, duration_hours: i32) -> bool {
		if duration_hours <= 0 {
			return false;
		}

		let start_minute = start.hour() * 60 + start.minute();
		#[allow(clippy::cast_sign_loss)]
		let end_minute = start_minute + (duration_hours as u32) * 60;

		start_minute >= self.open_minute() && end_minute <= self.close_minute()
	}
}
