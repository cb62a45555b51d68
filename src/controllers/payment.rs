//! Controller for payment gateway notifications

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error, PaymentError};
use reservation::Reservation;
use validator::Validate;

use crate::Config;
use crate::schemas::BuildResponse;
use crate::schemas::payment::{PaymentOutcome, PaymentWebhookRequest};
use crate::schemas::reservation::ReservationResponse;

/// Apply an asynchronous settlement notification from the payment gateway
///
/// Notifications may be re-delivered; settling an already paid reservation a
/// second time is a no-op. A settled amount or currency that differs from
/// what was quoted at booking time is rejected so the mismatch is surfaced
/// at the gateway instead of silently confirming the reservation.
#[instrument(skip(config, pool))]
pub(crate) async fn payment_webhook(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Json(request): Json<PaymentWebhookRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	request.validate()?;

	if request.currency != config.currency {
		return Err(PaymentError::CurrencyMismatch {
			expected: config.currency.clone(),
			received: request.currency,
		}
		.into());
	}

	let reservation = match request.outcome {
		PaymentOutcome::Paid => {
			Reservation::confirm_payment(
				request.reference,
				request.amount_cents,
				&conn,
			)
			.await?
		},
		PaymentOutcome::Failed => {
			Reservation::fail_payment(request.reference, &conn).await?
		},
	};

	let response: ReservationResponse = reservation.build_response(&config);

	Ok((StatusCode::OK, Json(response)))
}
