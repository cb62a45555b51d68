#[macro_use]
extern crate tracing;

use booking::{Rate, RateTable};
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::pricing_rule;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = pricing_rule)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitivePricingRule {
	pub id:                   i32,
	pub court_id:             i32,
	pub duration_hours:       i32,
	pub off_peak_price_cents: i32,
	pub peak_price_cents:     i32,
	pub created_at:           NaiveDateTime,
	pub updated_at:           NaiveDateTime,
}

impl PrimitivePricingRule {
	/// Get all the pricing rules for a court, ascending by duration
	#[instrument(skip(conn))]
	pub async fn for_court(
		c_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let rules = conn
			.interact(move |conn| {
				use self::pricing_rule::dsl::*;

				pricing_rule
					.filter(court_id.eq(c_id))
					.order(duration_hours.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(rules)
	}

	/// Load a court's rules as a [`RateTable`] for the rate resolver
	#[instrument(skip(conn))]
	pub async fn rate_table(
		c_id: i32,
		conn: &DbConn,
	) -> Result<RateTable, Error> {
		let rules = Self::for_court(c_id, conn).await?;

		Ok(RateTable::new(rules.iter().map(Self::rate).collect()))
	}

	fn rate(rule: &Self) -> Rate {
		Rate {
			duration_hours:       rule.duration_hours,
			off_peak_price_cents: rule.off_peak_price_cents,
			peak_price_cents:     rule.peak_price_cents,
		}
	}
}
