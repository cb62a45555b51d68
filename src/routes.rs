use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{create_session, logout_profile};
use crate::controllers::availability::get_court_availability;
use crate::controllers::court::{
	create_court,
	delete_court,
	get_all_courts,
	get_court,
	get_court_pricing,
	replace_court_pricing,
	update_court,
};
use crate::controllers::healthcheck;
use crate::controllers::payment::payment_webhook;
use crate::controllers::profile::{
	get_current_profile,
	get_current_profile_reservations,
};
use crate::controllers::reservation::{
	block_slot,
	create_reservation,
	delete_reservation,
	get_reservations_for_court,
};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/courts", court_routes(&state))
		.nest("/payments", payment_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/session", post(create_session))
		.route("/logout", post(logout_profile))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Profile routes
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", get(get_current_profile))
		.route("/me/reservations", get(get_current_profile_reservations))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Court routes with auth protection for booking and admin protection for
/// management
fn court_routes(state: &AppState) -> Router<AppState> {
	let admin = Router::new()
		.route("/", post(create_court))
		.route("/{id}", patch(update_court).delete(delete_court))
		.route("/{id}/pricing", put(replace_court_pricing))
		.route("/{id}/reservations", get(get_reservations_for_court))
		.route("/{id}/blocks", post(block_slot))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()));

	let authenticated = Router::new()
		.route("/{id}/reservations", post(create_reservation))
		.route(
			"/{id}/reservations/{reservation_id}",
			delete(delete_reservation),
		)
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_all_courts))
		.route("/{id}", get(get_court))
		.route("/{id}/pricing", get(get_court_pricing))
		.route("/{id}/availability", get(get_court_availability))
		.merge(authenticated)
		.merge(admin)
}

/// Payment gateway notification routes
fn payment_routes() -> Router<AppState> {
	Router::new().route("/webhook", post(payment_webhook))
}
