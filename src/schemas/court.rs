use chrono::NaiveDateTime;
use court::{Court, NewCourt, NewPricingRule, UpdateCourt};
use db::SportKind;
use primitive_court::PrimitiveCourt;
use primitive_pricing_rule::PrimitivePricingRule;
use serde::{Deserialize, Serialize};
use validator::Validate as _;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
	pub id:             i32,
	pub name:           String,
	pub sport:          SportKind,
	pub active:         bool,
	pub in_maintenance: bool,
	pub created_at:     NaiveDateTime,
}

impl From<PrimitiveCourt> for CourtResponse {
	fn from(value: PrimitiveCourt) -> Self {
		Self {
			id:             value.id,
			name:           value.name,
			sport:          value.sport,
			active:         value.active,
			in_maintenance: value.in_maintenance,
			created_at:     value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtDetailResponse {
	#[serde(flatten)]
	pub court:         CourtResponse,
	pub pricing_rules: Vec<PricingRuleResponse>,
}

impl From<Court> for CourtDetailResponse {
	fn from(value: Court) -> Self {
		Self {
			court:         value.court.into(),
			pricing_rules: value
				.pricing_rules
				.into_iter()
				.map(Into::into)
				.collect(),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
	#[validate(length(min = 1, max = 128))]
	pub name:   String,
	pub sport:  SportKind,
	#[serde(default = "default_active")]
	pub active: bool,
}

fn default_active() -> bool { true }

impl From<CreateCourtRequest> for NewCourt {
	fn from(value: CreateCourtRequest) -> Self {
		Self { name: value.name, sport: value.sport, active: value.active }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourtRequest {
	#[validate(length(min = 1, max = 128))]
	pub name:           Option<String>,
	pub sport:          Option<SportKind>,
	pub active:         Option<bool>,
	pub in_maintenance: Option<bool>,
}

impl From<UpdateCourtRequest> for UpdateCourt {
	fn from(value: UpdateCourtRequest) -> Self {
		Self {
			name:           value.name,
			sport:          value.sport,
			active:         value.active,
			in_maintenance: value.in_maintenance,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleResponse {
	pub duration_hours:       i32,
	pub off_peak_price_cents: i32,
	pub peak_price_cents:     i32,
}

impl From<PrimitivePricingRule> for PricingRuleResponse {
	fn from(value: PrimitivePricingRule) -> Self {
		Self {
			duration_hours:       value.duration_hours,
			off_peak_price_cents: value.off_peak_price_cents,
			peak_price_cents:     value.peak_price_cents,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleEntry {
	#[validate(range(min = 1, max = 24))]
	pub duration_hours:       i32,
	#[validate(range(min = 0))]
	pub off_peak_price_cents: i32,
	#[validate(range(min = 0))]
	pub peak_price_cents:     i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplacePricingRequest {
	#[validate(nested, length(max = 24))]
	pub rules: Vec<PricingRuleEntry>,
}

impl ReplacePricingRequest {
	#[must_use]
	pub fn into_new_rules(self, court_id: i32) -> Vec<NewPricingRule> {
		self.rules
			.into_iter()
			.map(|r| {
				NewPricingRule {
					court_id,
					duration_hours: r.duration_hours,
					off_peak_price_cents: r.off_peak_price_cents,
					peak_price_cents: r.peak_price_cents,
				}
			})
			.collect()
	}
}
