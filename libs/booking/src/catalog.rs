use std::collections::HashMap;

use common::BookingError;
use serde::{Deserialize, Serialize};

/// A single bookable duration for a sport
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct DurationOption {
	pub hours: i32,
	pub label: String,
}

impl DurationOption {
	fn new(hours: i32, label: &str) -> Self {
		Self { hours, label: label.to_string() }
	}
}

/// Data-driven mapping from sport slug to the set of allowed booking
/// durations
///
/// Sports without an entry offer the durations present in their pricing
/// rules; sports with an entry (cricket's half/full day blocks) only accept
/// the listed durations. Adding a sport-specific catalog is a configuration
/// change, never a code change.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DurationCatalog {
	sports: HashMap<String, Vec<DurationOption>>,
}

impl Default for DurationCatalog {
	fn default() -> Self {
		let sports = HashMap::from([(
			"cricket".to_string(),
			vec![
				DurationOption::new(4, "half day"),
				DurationOption::new(8, "full day"),
			],
		)]);

		Self { sports }
	}
}

impl DurationCatalog {
	#[must_use]
	pub fn new(sports: HashMap<String, Vec<DurationOption>>) -> Self {
		Self { sports }
	}

	/// The explicit duration options for a sport, if it has a restricted
	/// catalog
	#[must_use]
	pub fn options_for(&self, sport: &str) -> Option<&[DurationOption]> {
		self.sports.get(sport).map(Vec::as_slice)
	}

	/// Check a requested duration against a sport's catalog
	///
	/// Off-catalog durations are rejected outright rather than remapped to
	/// the nearest entry, so a caller can never be quoted a price for a
	/// different duration than it asked for.
	pub fn validate(
		&self,
		sport: &str,
		duration_hours: i32,
	) -> Result<(), BookingError> {
		if duration_hours <= 0 {
			return Err(BookingError::InvalidInput(format!(
				"duration must be positive, got {duration_hours}"
			)));
		}

		let Some(options) = self.options_for(sport) else {
			return Ok(());
		};

		if options.iter().any(|o| o.hours == duration_hours) {
			Ok(())
		} else {
			Err(BookingError::UnsupportedDuration {
				sport: sport.to_string(),
				hours: duration_hours,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cricket_only_offers_catalog_durations() {
		let catalog = DurationCatalog::default();

		assert!(catalog.validate("cricket", 4).is_ok());
		assert!(catalog.validate("cricket", 8).is_ok());
		assert_eq!(
			catalog.validate("cricket", 2),
			Err(BookingError::UnsupportedDuration {
				sport: "cricket".to_string(),
				hours: 2,
			}),
		);
	}

	#[test]
	fn uncatalogued_sports_accept_any_positive_duration() {
		let catalog = DurationCatalog::default();

		assert!(catalog.validate("tennis", 1).is_ok());
		assert!(catalog.validate("tennis", 3).is_ok());
		assert!(catalog.validate("tennis", 0).is_err());
		assert!(catalog.validate("tennis", -2).is_err());
	}

	#[test]
	fn catalog_is_configuration() {
		let catalog = DurationCatalog::new(HashMap::from([(
			"padel".to_string(),
			vec![DurationOption::new(1, "single session")],
		)]));

		assert!(catalog.validate("padel", 1).is_ok());
		assert!(catalog.validate("padel", 2).is_err());
		// no entry for cricket in this catalog, so nothing is restricted
		assert!(catalog.validate("cricket", 2).is_ok());
	}
}
