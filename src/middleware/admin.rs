use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use common::{Error, InternalServerError};
use tower::{Layer, Service};

use crate::AppState;
use crate::session::Session;

/// Middleware layer that rejects requests whose session does not belong to
/// an admin profile
///
/// Must be layered inside an [`AuthLayer`](crate::middleware::AuthLayer) so
/// the session id extension is present.
#[derive(Clone)]
pub struct AdminLayer {
	state: AppState,
}

impl AdminLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AdminLayer {
	type Service = AdminMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AdminMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AdminMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let Some(session_id) = req.extensions().get::<i32>().copied()
			else {
				return Ok(Error::from(
					InternalServerError::SessionWithoutAuthError,
				)
				.into_response());
			};

			let mut r_conn = state.redis_connection;

			let session = match Session::get(session_id, &mut r_conn).await {
				Ok(s) => s,
				Err(e) => return Ok(e.into_response()),
			};

			let is_admin =
				session.is_some_and(|s| s.data.profile_is_admin);

			if !is_admin {
				warn!(
					"non-admin session {} attempted an admin operation",
					session_id
				);

				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
