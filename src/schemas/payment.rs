use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator_derive::Validate;

/// The settlement outcome reported by the payment gateway
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
	Paid,
	Failed,
}

/// Asynchronous notification from the external payment gateway
///
/// The reference is the reservation's unique payment reference, which makes
/// re-delivered notifications idempotent.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWebhookRequest {
	pub reference:    Uuid,
	pub outcome:      PaymentOutcome,
	#[validate(range(min = 0))]
	pub amount_cents: i32,
	#[validate(length(min = 3, max = 3))]
	pub currency:     String,
}
