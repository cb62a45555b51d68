use axum::http::StatusCode;

mod common;

use common::TestEnv;
use courtbook::schemas::court::{
	CourtDetailResponse,
	CourtResponse,
	PricingRuleResponse,
};

#[tokio::test(flavor = "multi_thread")]
async fn list_courts() {
	let env = TestEnv::new().await;

	let response = env.app.get("/courts").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Vec<CourtResponse>>().len(), 5);

	let response = env.app.get("/courts?activeOnly=true").await;

	assert_eq!(response.json::<Vec<CourtResponse>>().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_court_with_pricing() {
	let env = TestEnv::new().await;

	let response = env.app.get("/courts/1").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<CourtDetailResponse>();

	assert_eq!(body.court.name, "Tennis Court 1");
	assert_eq!(body.pricing_rules.len(), 2);

	let missing = env.app.get("/courts/999").await;

	assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_court_lifecycle() {
	let env = TestEnv::new().await.login_admin().await;

	let create_req = serde_json::json!({
		"name": "Padel Court 1",
		"sport": "tennis",
	});

	let response = env.app.post("/courts").json(&create_req).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let created = response.json::<CourtResponse>();

	assert!(created.active);
	assert!(!created.in_maintenance);

	let update_req = serde_json::json!({ "inMaintenance": true });

	let response = env
		.app
		.patch(&format!("/courts/{}", created.id))
		.json(&update_req)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<CourtResponse>().in_maintenance);

	let response =
		env.app.delete(&format!("/courts/{}", created.id)).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get(&format!("/courts/{}", created.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn court_management_requires_admin() {
	let env = TestEnv::new().await.login_user().await;

	let create_req = serde_json::json!({
		"name": "Rogue Court",
		"sport": "tennis",
	});

	let response = env.app.post("/courts").json(&create_req).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn maintenance_blocks_bookings() {
	let env = TestEnv::new().await.login_admin().await;

	let update_req = serde_json::json!({ "inMaintenance": true });

	let response =
		env.app.patch("/courts/1").json(&update_req).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let env = env.login_user().await;

	let booking = serde_json::json!({
		"day": "2025-09-01",
		"startTime": "10:00:00",
		"durationHours": 1,
	});

	let response =
		env.app.post("/courts/1/reservations").json(&booking).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn replace_pricing_rules() {
	let env = TestEnv::new().await.login_admin().await;

	let replace_req = serde_json::json!({
		"rules": [
			{
				"durationHours": 1,
				"offPeakPriceCents": 1000,
				"peakPriceCents": 1400,
			},
			{
				"durationHours": 3,
				"offPeakPriceCents": 2700,
				"peakPriceCents": 3900,
			},
		],
	});

	let response =
		env.app.put("/courts/2/pricing").json(&replace_req).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<PricingRuleResponse>>();

	assert_eq!(body.len(), 2);

	let response = env.app.get("/courts/2/pricing").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let rules = response.json::<Vec<PricingRuleResponse>>();
	let durations: Vec<i32> =
		rules.iter().map(|r| r.duration_hours).collect();

	assert_eq!(durations, vec![1, 3]);
}
