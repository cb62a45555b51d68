use axum::http::StatusCode;
use chrono::NaiveTime;

mod common;

use common::TestEnv;
use courtbook::schemas::availability::AvailabilityResponse;

fn time(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

#[tokio::test(flavor = "multi_thread")]
async fn availability_covers_the_daily_grid() {
	let env = TestEnv::new().await;

	let response =
		env.app.get("/courts/1/availability?date=2025-09-01").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	// hourly grid from 06:00 to 22:00 close
	assert_eq!(body.slots.len(), 16);
	assert_eq!(body.slots[0].start_time, time(6));
	assert_eq!(body.slots[15].start_time, time(21));
	assert!(body.slots.iter().all(|s| s.available));
}

#[tokio::test(flavor = "multi_thread")]
async fn quotes_follow_the_peak_window() {
	let env = TestEnv::new().await;

	let response =
		env.app.get("/courts/1/availability?date=2025-09-01").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	let quote_at = |t: NaiveTime| {
		body.slots
			.iter()
			.find(|s| s.start_time == t)
			.and_then(|s| s.quote)
			.unwrap()
	};

	// peak window is [09:00, 17:00)
	assert_eq!(quote_at(time(7)).price_cents, 1500);
	assert!(!quote_at(time(7)).peak);
	assert_eq!(quote_at(time(10)).price_cents, 2000);
	assert!(quote_at(time(10)).peak);
	assert_eq!(quote_at(time(17)).price_cents, 1500);
}

#[tokio::test(flavor = "multi_thread")]
async fn booked_intervals_are_not_available() {
	let env = TestEnv::new().await.login_user().await;

	let booking = serde_json::json!({
		"day": "2025-09-01",
		"startTime": "14:00:00",
		"durationHours": 2,
	});

	let response =
		env.app.post("/courts/1/reservations").json(&booking).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response =
		env.app.get("/courts/1/availability?date=2025-09-01").await;

	let body = response.json::<AvailabilityResponse>();

	let available_at = |t: NaiveTime| {
		body.slots.iter().find(|s| s.start_time == t).unwrap().available
	};

	assert!(available_at(time(13)));
	assert!(!available_at(time(14)));
	assert!(!available_at(time(15)));
	assert!(available_at(time(16)));

	// other days are unaffected
	let response =
		env.app.get("/courts/1/availability?date=2025-09-02").await;

	let body = response.json::<AvailabilityResponse>();

	assert!(body.slots.iter().all(|s| s.available));
}

#[tokio::test(flavor = "multi_thread")]
async fn longer_durations_shrink_the_grid() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get("/courts/1/availability?date=2025-09-01&duration=2")
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	let slot_at = |t: NaiveTime| {
		body.slots.iter().find(|s| s.start_time == t).unwrap()
	};

	assert!(slot_at(time(20)).available);
	// 21:00 + 2h would run past closing time
	assert!(!slot_at(time(21)).available);
	assert!(slot_at(time(21)).quote.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn cricket_exposes_its_duration_catalog() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get("/courts/4/availability?date=2025-09-01&duration=4")
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	let hours: Vec<i32> =
		body.duration_options.iter().map(|o| o.hours).collect();

	assert_eq!(hours, vec![4, 8]);

	// off-catalog durations are rejected, never remapped
	let response = env
		.app
		.get("/courts/4/availability?date=2025-09-01&duration=2")
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn inactive_courts_have_no_availability() {
	let env = TestEnv::new().await;

	let response =
		env.app.get("/courts/5/availability?date=2025-09-01").await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
