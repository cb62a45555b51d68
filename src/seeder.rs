//! Database seeding from JSON files

use std::path::PathBuf;

use common::{DbConn, Error};
use db::SportKind;
use diesel::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	#[must_use]
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|_| panic!("COULD NOT READ SEED FILE {filename}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|_| panic!("COULD NOT MAP SEED FILE {filename}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<'s, T, F>(
		&'s self,
		filename: &str,
		loader: F,
	) -> &'s Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		loader(self.connection, records).await.unwrap_or_else(|_| {
			panic!("COULD NOT LOAD RECORDS FOR {filename}")
		});

		info!("seeded database from {filename}");

		self
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedProfile {
	pub external_id: String,
	pub username:    String,
	#[serde(default)]
	pub admin:       bool,
}

#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name = db::profile)]
struct InsertableSeedProfile {
	external_id: String,
	username:    String,
	admin:       bool,
}

impl SeedProfile {
	/// Insert this [`SeedProfile`]
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let insertable = InsertableSeedProfile {
			external_id: self.external_id,
			username:    self.username,
			admin:       self.admin,
		};

		conn.interact(|conn| {
			use db::profile::dsl::*;

			diesel::insert_into(profile)
				.values(insertable.clone())
				.on_conflict(external_id)
				.do_update()
				.set(insertable)
				.execute(conn)
		})
		.await??;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedCourt {
	pub name:   String,
	pub sport:  SportKind,
	#[serde(default = "default_true")]
	pub active: bool,
}

fn default_true() -> bool { true }

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = db::court)]
struct InsertableSeedCourt {
	name:   String,
	sport:  SportKind,
	active: bool,
}

impl SeedCourt {
	/// Insert this [`SeedCourt`]
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let insertable = InsertableSeedCourt {
			name:   self.name,
			sport:  self.sport,
			active: self.active,
		};

		conn.interact(|conn| {
			use db::court::dsl::*;

			diesel::insert_into(court)
				.values(insertable)
				.on_conflict_do_nothing()
				.execute(conn)
		})
		.await??;

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SeedPricingRule {
	pub court_id:             i32,
	pub duration_hours:       i32,
	pub off_peak_price_cents: i32,
	pub peak_price_cents:     i32,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[diesel(table_name = db::pricing_rule)]
struct InsertableSeedPricingRule {
	court_id:             i32,
	duration_hours:       i32,
	off_peak_price_cents: i32,
	peak_price_cents:     i32,
}

impl SeedPricingRule {
	/// Insert this [`SeedPricingRule`]
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let insertable = InsertableSeedPricingRule {
			court_id:             self.court_id,
			duration_hours:       self.duration_hours,
			off_peak_price_cents: self.off_peak_price_cents,
			peak_price_cents:     self.peak_price_cents,
		};

		conn.interact(move |conn| {
			use db::pricing_rule::dsl::*;

			diesel::insert_into(pricing_rule)
				.values(insertable)
				.on_conflict_do_nothing()
				.execute(conn)
		})
		.await??;

		Ok(())
	}
}
