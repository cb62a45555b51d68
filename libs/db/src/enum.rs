use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::SportKind"]
#[serde(rename_all = "lowercase")]
pub enum SportKind {
	Tennis,
	Basketball,
	Cricket,
	Badminton,
	Football,
}

impl SportKind {
	/// The lowercase slug used as the key in sport-keyed configuration
	/// such as the duration catalog
	#[must_use]
	pub fn slug(self) -> &'static str {
		match self {
			Self::Tennis => "tennis",
			Self::Basketball => "basketball",
			Self::Cricket => "cricket",
			Self::Badminton => "badminton",
			Self::Football => "football",
		}
	}
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::ReservationStatus"]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
	#[default]
	Pending,
	Confirmed,
	Completed,
	Cancelled,
}

impl ReservationStatus {
	/// Whether a reservation in this state occupies its time interval
	#[must_use]
	pub fn blocks_interval(self) -> bool {
		matches!(self, Self::Pending | Self::Confirmed)
	}
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::PaymentStatus"]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	#[default]
	Pending,
	Paid,
	Failed,
}
