#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::profile;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveProfile {
	pub id:          i32,
	pub external_id: String,
	pub username:    String,
	pub admin:       bool,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

/// Identity-provider claims for a profile
///
/// The provider in front of this service verifies the user and passes these
/// along; they are the only authentication input the backend consumes.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileClaims {
	pub subject:  String,
	pub username: String,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = profile)]
struct InsertableProfile {
	external_id: String,
	username:    String,
}

impl PrimitiveProfile {
	/// Get a [`PrimitiveProfile`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile.find(p_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(profile)
	}

	/// Get or create the profile matching a set of identity-provider claims
	///
	/// The external subject is opaque to this service; the username is
	/// refreshed on every login.
	#[instrument(skip(conn))]
	pub async fn from_claims(
		claims: ProfileClaims,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				let insertable = InsertableProfile {
					external_id: claims.subject,
					username:    claims.username,
				};

				diesel::insert_into(profile)
					.values(&insertable)
					.on_conflict(external_id)
					.do_update()
					.set(username.eq(&insertable.username))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(profile)
	}
}
