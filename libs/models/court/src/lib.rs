#[macro_use]
extern crate tracing;

use common::{DbConn, Error};
use db::{SportKind, court, pricing_rule};
use diesel::pg::Pg;
use diesel::prelude::*;
use primitive_court::PrimitiveCourt;
use primitive_pricing_rule::PrimitivePricingRule;
use serde::{Deserialize, Serialize};

/// A court together with its pricing rules
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Court {
	pub court:         PrimitiveCourt,
	pub pricing_rules: Vec<PrimitivePricingRule>,
}

impl Court {
	/// Get a [`Court`] with its pricing rules given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(c_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let court = PrimitiveCourt::get_by_id(c_id, conn).await?;
		let pricing_rules =
			PrimitivePricingRule::for_court(c_id, conn).await?;

		Ok(Self { court, pricing_rules })
	}

	/// Delete a [`Court`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(c_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::court::dsl::*;

			diesel::delete(court.find(c_id)).execute(conn)
		})
		.await??;

		info!("deleted court with id {c_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = court)]
#[diesel(check_for_backend(Pg))]
pub struct NewCourt {
	pub name:   String,
	pub sport:  SportKind,
	pub active: bool,
}

impl NewCourt {
	/// Insert this [`NewCourt`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveCourt, Error> {
		let court = conn
			.interact(|conn| {
				use self::court::dsl::*;

				diesel::insert_into(court)
					.values(self)
					.returning(PrimitiveCourt::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created court {court:?}");

		Ok(court)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = court)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourt {
	pub name:           Option<String>,
	pub sport:          Option<SportKind>,
	pub active:         Option<bool>,
	pub in_maintenance: Option<bool>,
}

impl UpdateCourt {
	/// Apply this update to the court with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		c_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveCourt, Error> {
		let court = conn
			.interact(move |conn| {
				use self::court::dsl::*;

				diesel::update(court.find(c_id))
					.set(self)
					.returning(PrimitiveCourt::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(court)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = pricing_rule)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewPricingRule {
	pub court_id:             i32,
	pub duration_hours:       i32,
	pub off_peak_price_cents: i32,
	pub peak_price_cents:     i32,
}

impl NewPricingRule {
	/// Replace the full rule set of a court in one transaction
	///
	/// Duration uniqueness per court is a database constraint; replacing
	/// the whole set keeps the admin surface simple and leaves no window
	/// with a partially updated table.
	#[instrument(skip(conn))]
	pub async fn replace_for_court(
		c_id: i32,
		rules: Vec<Self>,
		conn: &DbConn,
	) -> Result<Vec<PrimitivePricingRule>, Error> {
		let rules = conn
			.interact(move |conn| {
				use self::pricing_rule::dsl::*;

				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					diesel::delete(pricing_rule.filter(court_id.eq(c_id)))
						.execute(conn)?;

					diesel::insert_into(pricing_rule)
						.values(&rules)
						.returning(PrimitivePricingRule::as_returning())
						.get_results(conn)
				})
			})
			.await??;

		info!("replaced pricing rules for court {c_id}");

		Ok(rules)
	}
}
