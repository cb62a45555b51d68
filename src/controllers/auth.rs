use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use common::{DbPool, Error, RedisConn};
use primitive_profile::PrimitiveProfile;

use crate::schemas::profile::ProfileResponse;
use crate::{Config, Session};

/// Establish a session from the identity-provider claims cookie
///
/// The actual exchange happens in the auth middleware; by the time this
/// handler runs the session exists, so it only reports the profile the
/// caller is now logged in as.
#[instrument(skip(pool))]
pub async fn create_session(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::get_by_id(session.data.profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

/// Log out the current profile, destroying its session
#[instrument(skip(config, redis_connection, jar))]
pub async fn logout_profile(
	State(config): State<Config>,
	State(mut redis_connection): State<RedisConn>,
	jar: PrivateCookieJar,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	Session::delete(session.id, &mut redis_connection).await?;

	let jar = jar
		.remove(Cookie::from(config.access_cookie_name.clone()))
		.remove(Cookie::from(config.claims_cookie_name.clone()));

	Ok((jar, StatusCode::NO_CONTENT))
}
