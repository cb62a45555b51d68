use primitive_profile::PrimitiveProfile;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:       i32,
	pub username: String,
	pub admin:    bool,
}

impl From<PrimitiveProfile> for ProfileResponse {
	fn from(value: PrimitiveProfile) -> Self {
		Self { id: value.id, username: value.username, admin: value.admin }
	}
}
