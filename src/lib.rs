//! # Courtbook backend library
//!
//! A sports-venue court booking backend: courts, slot availability,
//! peak/off-peak pricing, reservations, and admin slot blocking.

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use common::RedisConn;

mod config;
mod seeder;
mod session;

pub mod controllers;
pub mod middleware;
pub mod routes;
pub mod schemas;

pub use common::{DbConn, DbPool};
pub use config::*;
pub use seeder::*;
pub use session::*;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:           Config,
	pub database_pool:    DbPool,
	pub redis_connection: RedisConn,
	pub cookie_jar_key:   Key,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for RedisConn {
	fn from_ref(input: &AppState) -> Self { input.redis_connection.clone() }
}

impl FromRef<AppState> for Key {
	fn from_ref(input: &AppState) -> Self { input.cookie_jar_key.clone() }
}
