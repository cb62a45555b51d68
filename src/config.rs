use axum_extra::extract::cookie::Key;
use booking::VenuePolicy;
use common::RedisConn;
use deadpool_diesel::postgres::{Manager, Pool};

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub redis_url:    String,

	pub claims_cookie_name:     String,
	pub access_cookie_name:     String,
	pub access_cookie_lifetime: time::Duration,
	pub cookie_jar_secret:      String,

	pub production: bool,

	/// ISO 4217 code quoted to the payment gateway
	pub currency: String,

	pub venue_policy: VenuePolicy,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");

		let claims_cookie_name = Self::get_env_var("CLAIMS_COOKIE_NAME");
		let access_cookie_name = Self::get_env_var("ACCESS_COOKIE_NAME");
		let access_cookie_lifetime = time::Duration::minutes(
			Self::get_env_var("ACCESS_COOKIE_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap(),
		);
		let cookie_jar_secret = Self::get_env_var("COOKIE_JAR_SECRET");

		let production = std::env::var("PRODUCTION")
			.map(|v| v == "true")
			.unwrap_or_default();

		let currency = Self::get_env_var("CURRENCY");

		// The venue policy (opening hours, slot step, peak window, sport
		// duration catalogs) is data, not code; ship defaults and let
		// deployments override them with a JSON file
		let venue_policy = match std::env::var("VENUE_POLICY_FILE") {
			Ok(path) => {
				let raw = std::fs::read_to_string(&path).unwrap_or_else(|_| {
					panic!("COULD NOT READ VENUE POLICY FILE {path}")
				});

				serde_json::from_str(&raw).unwrap_or_else(|e| {
					panic!("COULD NOT PARSE VENUE POLICY FILE {path}: {e}")
				})
			},
			Err(_) => VenuePolicy::default(),
		};

		Self {
			database_url,
			redis_url,
			claims_cookie_name,
			access_cookie_name,
			access_cookie_lifetime,
			cookie_jar_secret,
			production,
			currency,
			venue_policy,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create a managed redis connection for the given config
	///
	/// # Panics
	/// Panics if the redis server is unreachable
	pub async fn create_redis_connection(&self) -> RedisConn {
		let client = redis::Client::open(self.redis_url.as_str()).unwrap();

		client.get_multiplexed_async_connection().await.unwrap()
	}

	/// Derive the private cookie jar key from the configured secret
	///
	/// # Panics
	/// Panics if the secret is shorter than 64 bytes
	#[must_use]
	pub fn cookie_jar_key(&self) -> Key {
		Key::from(self.cookie_jar_secret.as_bytes())
	}
}
