use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Time-of-day policy selecting between peak and off-peak rates
///
/// A start time is peak when its hour falls in
/// `[peak_from_hour, peak_until_hour)`; everything before and after is
/// off-peak. The boundaries are configuration, not per-call logic.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct PeakPolicy {
	pub peak_from_hour:  u32,
	pub peak_until_hour: u32,
}

impl Default for PeakPolicy {
	fn default() -> Self { Self { peak_from_hour: 9, peak_until_hour: 17 } }
}

impl PeakPolicy {
	/// Whether a booking starting at `start` is billed at the peak rate
	#[must_use]
	pub fn is_peak(&self, start: NaiveTime) -> bool {
		(self.peak_from_hour..self.peak_until_hour).contains(&start.hour())
	}
}
