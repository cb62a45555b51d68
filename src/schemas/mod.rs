use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::Config;

pub mod availability;
pub mod court;
pub mod payment;
pub mod profile;
pub mod reservation;

/// Build a response type from a model, with access to the app [`Config`]
pub trait BuildResponse<R> {
	fn build_response(self, config: &Config) -> R;
}

/// Serialize a [`NaiveTime`] as a bare `HH:MM` slot label
pub(crate) fn ser_hhmm<S>(
	time: &NaiveTime,
	serializer: S,
) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Deserialize a `HH:MM` slot label back into a [`NaiveTime`]
pub(crate) fn de_hhmm<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	NaiveTime::parse_from_str(&raw, "%H:%M")
		.or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
		.map_err(serde::de::Error::custom)
}
