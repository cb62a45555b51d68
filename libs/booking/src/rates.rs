use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::PeakPolicy;

/// A pricing rule for one duration on one court, in integer cents
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Rate {
	pub duration_hours:       i32,
	pub off_peak_price_cents: i32,
	pub peak_price_cents:     i32,
}

/// A price quote for a concrete (duration, start time) pair
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	pub price_cents: i32,
	pub peak:        bool,
	/// Set when no exact rule matched and the price was extrapolated from
	/// the lowest-duration rule
	pub estimated:   bool,
}

/// The set of pricing rules for a single court
///
/// Durations are unique per court (enforced by the database); the table is
/// kept sorted by duration so the lowest-duration rule doubles as the
/// fallback base rate.
#[derive(Clone, Debug, Default)]
pub struct RateTable {
	rates: Vec<Rate>,
}

impl RateTable {
	#[must_use]
	pub fn new(mut rates: Vec<Rate>) -> Self {
		rates.sort_by_key(|r| r.duration_hours);
		rates.dedup_by_key(|r| r.duration_hours);

		Self { rates }
	}

	#[must_use]
	pub fn is_empty(&self) -> bool { self.rates.is_empty() }

	/// The durations this court has explicit rules for, ascending
	pub fn durations(&self) -> impl Iterator<Item = i32> + '_ {
		self.rates.iter().map(|r| r.duration_hours)
	}

	/// Resolve the price for a requested duration and start time
	///
	/// Uses the exact rule for the duration when one exists; otherwise
	/// extrapolates proportionally from the lowest-duration rule. Returns
	/// `None` when the court has no rules at all, which callers surface as
	/// `NoPricingAvailable`.
	#[must_use]
	pub fn quote(
		&self,
		duration_hours: i32,
		start: NaiveTime,
		policy: &PeakPolicy,
	) -> Option<Quote> {
		if duration_hours <= 0 {
			return None;
		}

		let peak = policy.is_peak(start);
		let pick = |r: &Rate| {
			if peak { r.peak_price_cents } else { r.off_peak_price_cents }
		};

		if let Some(rate) =
			self.rates.iter().find(|r| r.duration_hours == duration_hours)
		{
			return Some(Quote {
				price_cents: pick(rate),
				peak,
				estimated: false,
			});
		}

		let base = self.rates.first()?;

		if base.duration_hours <= 0 {
			return None;
		}

		// Duration-proportional estimate from the lowest-duration rule
		let price_cents = pick(base)
			.checked_mul(duration_hours)?
			.checked_div(base.duration_hours)?;

		Some(Quote { price_cents, peak, estimated: true })
	}
}
