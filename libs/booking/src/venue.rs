use serde::{Deserialize, Serialize};

use crate::{DurationCatalog, PeakPolicy, SlotGrid};

/// The venue-wide booking policy: opening hours and slot step, the peak
/// window, and the sport duration catalogs
///
/// Loaded once at startup from configuration and passed explicitly into
/// every booking-core call; there is no ambient policy state.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VenuePolicy {
	pub grid:    SlotGrid,
	pub peak:    PeakPolicy,
	#[serde(default)]
	pub catalog: DurationCatalog,
}

impl Default for VenuePolicy {
	fn default() -> Self {
		Self {
			// 06:00 to 22:00 in hourly steps
			grid:    SlotGrid { open_hour: 6, close_hour: 22, step_minutes: 60 },
			peak:    PeakPolicy::default(),
			catalog: DurationCatalog::default(),
		}
	}
}
