//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveTime;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Name of the postgres exclusion constraint guarding the reservation
/// no-overlap invariant
pub const RESERVATION_OVERLAP_CONSTRAINT: &str = "reservation_no_overlap";

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Any error related to computing or persisting a booking
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Some data in the request was missing
	#[error("{0}")]
	MissingRequestData(String),
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to a payment gateway notification
	#[error(transparent)]
	PaymentError(#[from] PaymentError),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 6,
					TokenError::MissingSession => 7,
					TokenError::MissingClaims => 8,
					TokenError::InvalidClaims => 9,
				}
			},
			Self::BookingError(e) => {
				match e {
					BookingError::SlotConflict => 10,
					BookingError::NoPricingAvailable { .. } => 11,
					BookingError::UnsupportedDuration { .. } => 12,
					BookingError::OutsideOpeningHours { .. } => 13,
					BookingError::CourtUnavailable(_) => 14,
					BookingError::InvalidInput(_) => 15,
				}
			},
			Self::PaymentError(e) => {
				match e {
					PaymentError::UnknownReference => 16,
					PaymentError::AmountMismatch { .. } => 17,
					PaymentError::CurrencyMismatch { .. } => 20,
				}
			},
			Self::ValidationError(_) => 18,
			Self::MissingRequestData(_) => 19,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::Infallible(m)
			| Self::NotFound(m)
			| Self::MissingRequestData(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::NoPricingAvailable { court_id, hours } => {
						Some(
							serde_json::json!({
								"courtId": court_id,
								"durationHours": hours,
							})
							.to_string(),
						)
					},
					BookingError::UnsupportedDuration { sport, hours } => {
						Some(
							serde_json::json!({
								"sport": sport,
								"durationHours": hours,
							})
							.to_string(),
						)
					},
					BookingError::OutsideOpeningHours { open, close } => {
						Some(
							serde_json::json!({"open": open, "close": close})
								.to_string(),
						)
					},
					BookingError::CourtUnavailable(c_id) => {
						Some(serde_json::json!({"courtId": c_id}).to_string())
					},
					BookingError::InvalidInput(m) => Some(m.to_owned()),
					BookingError::SlotConflict => None,
				}
			},
			Self::PaymentError(PaymentError::AmountMismatch {
				expected,
				received,
			}) => {
				Some(
					serde_json::json!({
						"expected": expected,
						"received": received,
					})
					.to_string(),
				)
			},
			Self::PaymentError(PaymentError::CurrencyMismatch {
				expected,
				received,
			}) => {
				Some(
					serde_json::json!({
						"expected": expected,
						"received": received,
					})
					.to_string(),
				)
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::BookingError(BookingError::SlotConflict) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(
				TokenError::MissingAccessToken | TokenError::MissingSession,
			) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::TokenError(_) => StatusCode::FORBIDDEN,
			Self::BookingError(BookingError::InvalidInput(_))
			| Self::ValidationError(_)
			| Self::MissingRequestData(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Self::BookingError(_) | Self::PaymentError(_) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to computing availability, resolving a price, or
/// persisting a reservation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
	/// The requested interval overlaps an existing pending or confirmed
	/// reservation
	#[error("this slot was just taken, please choose another")]
	SlotConflict,
	/// No pricing rule and no fallback base rate exist for this court
	#[error("booking temporarily unavailable for this option")]
	NoPricingAvailable { court_id: i32, hours: i32 },
	/// The requested duration is not in the sport's duration catalog
	#[error("duration is not offered for this sport")]
	UnsupportedDuration { sport: String, hours: i32 },
	/// The requested interval does not fit within opening hours
	#[error("the requested time falls outside opening hours")]
	OutsideOpeningHours { open: NaiveTime, close: NaiveTime },
	/// The court is inactive or under maintenance
	#[error("this court is currently unavailable")]
	CourtUnavailable(i32),
	/// The request was rejected before any I/O
	#[error("{0}")]
	InvalidInput(String),
}

/// Any error related to a payment gateway notification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
	/// No reservation matches the order reference in the notification
	#[error("unknown payment reference")]
	UnknownReference,
	/// The settled amount does not match the quoted price
	#[error("settled amount does not match the quoted price")]
	AmountMismatch { expected: i32, received: i32 },
	/// The settled currency does not match the quoted currency
	#[error("settled currency does not match the quoted currency")]
	CurrencyMismatch { expected: String, received: String },
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
	#[error("missing identity claims cookie")]
	MissingClaims,
	#[error("identity claims could not be parsed")]
	InvalidClaims,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error handling some form of I/O
	#[error("I/O error -- {0:?}")]
	IOError(std::io::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map database result errors to application errors.
///
/// The reservation exclusion constraint is the enforcing layer of the
/// no-overlap invariant; a violation means a concurrent writer won the slot
/// and surfaces as a recoverable [`BookingError::SlotConflict`].
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			diesel::result::Error::DatabaseError(kind, info) => {
				if info.constraint_name()
					== Some(RESERVATION_OVERLAP_CONSTRAINT)
				{
					return BookingError::SlotConflict.into();
				}

				match kind {
					DatabaseErrorKind::UniqueViolation => {
						match info.constraint_name() {
							Some(name) => {
								Self::Duplicate(format!(
									"violated unique constraint {name}"
								))
							},
							None => {
								InternalServerError::DatabaseError(err).into()
							},
						}
					},
					DatabaseErrorKind::ForeignKeyViolation => {
						Self::ValidationError(info.message().to_string())
					},
					_ => InternalServerError::DatabaseError(err).into(),
				}
			},
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		InternalServerError::IOError(err).into()
	}
}
