use std::sync::Once;

use axum::http::StatusCode;
use axum_test::TestServer;
use cookie::{Cookie, CookieJar};
use courtbook::{
	AppState,
	Config,
	SeedCourt,
	SeedPricingRule,
	SeedProfile,
	Seeder,
	routes,
};

mod mock_db;
mod mock_redis;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};
use mock_redis::{RedisUrlGuard, RedisUrlLock};

/// Environment defaults so the suite runs with only `DATABASE_URL` and
/// `REDIS_URL` provided
fn env_defaults() {
	static INIT: Once = Once::new();

	INIT.call_once(|| {
		let secret = "0".repeat(64);
		let defaults = [
			("CLAIMS_COOKIE_NAME", "courtbook_claims"),
			("ACCESS_COOKIE_NAME", "courtbook_access_token"),
			("ACCESS_COOKIE_LIFETIME_MINUTES", "30"),
			("COOKIE_JAR_SECRET", secret.as_str()),
			("CURRENCY", "EUR"),
		];

		for (key, value) in defaults {
			if std::env::var(key).is_err() {
				unsafe { std::env::set_var(key, value) };
			}
		}
	});
}

#[allow(dead_code)]
pub struct TestEnv {
	pub app:         TestServer,
	pub config:      Config,
	pub db_guard:    DatabaseGuard,
	pub redis_guard: RedisUrlGuard,
}

impl TestEnv {
	/// Get a test environment with mocked resources for running tests
	///
	/// # Panics
	/// Panics if building a test server fails
	pub async fn new() -> Self {
		env_defaults();

		let config = Config::from_env();

		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		{
			let conn = test_pool.get().await.unwrap();
			let seeder = Seeder::new(&conn);

			seeder
				.populate("seed/profiles.json", async |conn, profiles| {
					for profile in profiles {
						SeedProfile::insert(profile, conn).await?;
					}

					Ok(())
				})
				.await
				.populate("seed/courts.json", async |conn, courts| {
					for court in courts {
						SeedCourt::insert(court, conn).await?;
					}

					Ok(())
				})
				.await
				.populate("seed/pricing_rules.json", async |conn, rules| {
					for rule in rules {
						SeedPricingRule::insert(rule, conn).await?;
					}

					Ok(())
				})
				.await;
		}

		let redis_url_guard = RedisUrlLock::get();
		let redis_connection = redis_url_guard.connect().await;

		let cookie_jar_key = config.cookie_jar_key();

		let state = AppState {
			config: config.clone(),
			database_pool: test_pool,
			redis_connection,
			cookie_jar_key,
		};
		let app = routes::get_app_router(state);

		let test_server =
			TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv {
			app: test_server,
			config,
			db_guard: test_pool_guard,
			redis_guard: redis_url_guard,
		}
	}

	/// Log in as a seeded profile by planting its identity-provider claims
	/// cookie and exchanging it for a session
	///
	/// # Panics
	/// Panics if the exchange fails
	pub async fn login(mut self, subject: &str, username: &str) -> Self {
		let claims = serde_json::json!({
			"subject": subject,
			"username": username,
		});

		let claims_cookie = Cookie::new(
			self.config.claims_cookie_name.clone(),
			claims.to_string(),
		);

		// The claims cookie lives in the private jar, so encrypt it with the
		// same key the server derives from its secret
		let mut jar = CookieJar::new();
		jar.private_mut(&self.config.cookie_jar_key()).add(claims_cookie);

		let encrypted =
			jar.get(&self.config.claims_cookie_name).unwrap().clone();
		self.app.add_cookie(encrypted);

		let response = self.app.post("/auth/session").await;
		assert_eq!(response.status_code(), StatusCode::OK);

		self
	}

	/// Log in as the seeded regular user
	pub async fn login_user(self) -> Self {
		self.login("seed|test", "test").await
	}

	/// Log in as the seeded admin
	pub async fn login_admin(self) -> Self {
		self.login("seed|admin", "frontdesk").await
	}
}
