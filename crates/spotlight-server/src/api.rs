//! JSON endpoints behind the site's forms and countdown.
//!
//! | Method | Path                         | Success             | Failure |
//! |--------|------------------------------|---------------------|---------|
//! | POST   | `/api/applications/submit`   | 201 `Application`   | 400     |
//! | POST   | `/api/newsletter/subscribe`  | 201 `Subscriber`    | 400     |
//! | GET    | `/api/application/deadline`  | 200 `Deadline`      |         |
//!
//! A known path with another method answers 405; any other `/api/` path
//! answers a 404 JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::{Method, StatusCode};
use spotlight_site::{ApiError, ApplicationSubmission, Deadline, NewsletterSubscription};
use validator::Validate;

use crate::error::Result;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::storage::Storage;

/// Prefix shared by every API path.
pub const API_PREFIX: &str = "/api/";

pub const SUBMIT_APPLICATION: &str = "/api/applications/submit";
pub const SUBSCRIBE_NEWSLETTER: &str = "/api/newsletter/subscribe";
pub const APPLICATION_DEADLINE: &str = "/api/application/deadline";

/// Handler for the `/api/` endpoints.
pub struct ApiHandler {
	storage: Arc<dyn Storage>,
	deadline: Option<DateTime<Utc>>,
}

impl ApiHandler {
	pub fn new(storage: Arc<dyn Storage>) -> Self {
		Self {
			storage,
			deadline: None,
		}
	}

	/// Counts down to `deadline` instead of serving the fixed countdown.
	pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
		self.deadline = deadline;
		self
	}

	pub fn storage(&self) -> &Arc<dyn Storage> {
		&self.storage
	}

	async fn submit_application(&self, request: &Request) -> Result<Response> {
		let submission = match request.json::<ApplicationSubmission>() {
			Ok(submission) if submission.validate().is_ok() => submission,
			_ => {
				tracing::debug!("rejected application submission");
				return Response::json_error(StatusCode::BAD_REQUEST, ApiError::INVALID_APPLICATION);
			}
		};
		let application = self.storage.create_application(submission).await?;
		Response::created().with_json(&application)
	}

	async fn subscribe_newsletter(&self, request: &Request) -> Result<Response> {
		let subscription = match request.json::<NewsletterSubscription>() {
			Ok(subscription) if subscription.validate().is_ok() => subscription,
			_ => {
				tracing::debug!("rejected newsletter subscription");
				return Response::json_error(StatusCode::BAD_REQUEST, ApiError::INVALID_EMAIL);
			}
		};
		let subscriber = self.storage.create_subscriber(subscription.email).await?;
		Response::created().with_json(&subscriber)
	}

	fn application_deadline(&self) -> Result<Response> {
		let countdown = match self.deadline {
			Some(deadline) => Deadline::until(Utc::now(), deadline),
			None => Deadline::MOCK,
		};
		Response::ok().with_json(&countdown)
	}
}

#[async_trait]
impl Handler for ApiHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let (expected, path) = match request.path() {
			SUBMIT_APPLICATION => (Method::POST, SUBMIT_APPLICATION),
			SUBSCRIBE_NEWSLETTER => (Method::POST, SUBSCRIBE_NEWSLETTER),
			APPLICATION_DEADLINE => (Method::GET, APPLICATION_DEADLINE),
			_ => return Response::json_error(StatusCode::NOT_FOUND, "Not found"),
		};
		if request.method != expected {
			return Ok(Response::method_not_allowed(expected.as_str()));
		}

		match path {
			SUBMIT_APPLICATION => self.submit_application(&request).await,
			SUBSCRIBE_NEWSLETTER => self.subscribe_newsletter(&request).await,
			_ => self.application_deadline(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryStorage;
	use bytes::Bytes;
	use chrono::Duration;
	use hyper::{HeaderMap, Version};
	use rstest::*;
	use serde_json::{Value, json};

	fn request(method: Method, path: &str, body: Value) -> Request {
		Request::new(
			method,
			path.parse().unwrap(),
			Version::HTTP_11,
			HeaderMap::new(),
			Bytes::from(body.to_string()),
		)
	}

	fn body(response: &Response) -> Value {
		serde_json::from_slice(&response.body).unwrap()
	}

	#[fixture]
	fn handler() -> ApiHandler {
		ApiHandler::new(Arc::new(MemoryStorage::new()))
	}

	#[fixture]
	fn application() -> Value {
		json!({
			"name": "Ada Founder",
			"email": "ada@example.com",
			"company": "Analytical Ltd",
			"description": "We build engines that compute tables for insurers, navigators and banks.",
			"sector": "Fintech",
			"terms": true
		})
	}

	#[rstest]
	#[tokio::test]
	async fn test_submit_application(handler: ApiHandler, application: Value) {
		let response = handler
			.handle(request(Method::POST, SUBMIT_APPLICATION, application))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::CREATED);
		let stored = body(&response);
		assert_eq!(stored["company"], "Analytical Ltd");
		assert!(stored["id"].is_string());
		assert!(stored["created_at"].is_string());
		assert_eq!(handler.storage().applications().await.unwrap().len(), 1);
	}

	#[rstest]
	#[case::short_description(json!({"description": "Too short"}))]
	#[case::terms_declined(json!({"terms": false}))]
	#[case::bad_email(json!({"email": "not-an-email"}))]
	#[tokio::test]
	async fn test_invalid_application(
		handler: ApiHandler,
		mut application: Value,
		#[case] patch: Value,
	) {
		if let (Some(fields), Value::Object(patch)) = (application.as_object_mut(), patch) {
			fields.extend(patch);
		}
		let response = handler
			.handle(request(Method::POST, SUBMIT_APPLICATION, application))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::BAD_REQUEST);
		assert_eq!(body(&response), json!({"error": "Invalid application data"}));
		assert!(handler.storage().applications().await.unwrap().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_subscribe_newsletter(handler: ApiHandler) {
		let response = handler
			.handle(request(
				Method::POST,
				SUBSCRIBE_NEWSLETTER,
				json!({"email": "fan@example.com"}),
			))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::CREATED);
		assert_eq!(body(&response)["email"], "fan@example.com");
	}

	#[rstest]
	#[case(json!({"email": "fan"}))]
	#[case(json!({}))]
	#[tokio::test]
	async fn test_invalid_subscription(handler: ApiHandler, #[case] payload: Value) {
		let response = handler
			.handle(request(Method::POST, SUBSCRIBE_NEWSLETTER, payload))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::BAD_REQUEST);
		assert_eq!(body(&response), json!({"error": "Invalid email address"}));
	}

	#[rstest]
	#[tokio::test]
	async fn test_mock_deadline(handler: ApiHandler) {
		let response = handler
			.handle(request(Method::GET, APPLICATION_DEADLINE, Value::Null))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(
			body(&response),
			json!({"days": 15, "hours": 8, "minutes": 45, "seconds": 22})
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_configured_deadline(handler: ApiHandler) {
		let deadline = Utc::now() + Duration::days(3) + Duration::hours(2) + Duration::seconds(30);
		let handler = handler.with_deadline(Some(deadline));
		let response = handler
			.handle(request(Method::GET, APPLICATION_DEADLINE, Value::Null))
			.await
			.unwrap();

		let countdown = body(&response);
		assert_eq!(countdown["days"], 3);
		assert_eq!(countdown["hours"], 2);
	}

	#[rstest]
	#[case(Method::GET, SUBMIT_APPLICATION, "POST")]
	#[case(Method::DELETE, SUBSCRIBE_NEWSLETTER, "POST")]
	#[case(Method::POST, APPLICATION_DEADLINE, "GET")]
	#[tokio::test]
	async fn test_wrong_method(
		handler: ApiHandler,
		#[case] method: Method,
		#[case] path: &str,
		#[case] allow: &str,
	) {
		let response = handler
			.handle(request(method, path, Value::Null))
			.await
			.unwrap();
		assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(response.headers["allow"], allow);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_api_path(handler: ApiHandler) {
		let response = handler
			.handle(request(Method::GET, "/api/cast", Value::Null))
			.await
			.unwrap();
		assert_eq!(response.status, StatusCode::NOT_FOUND);
		assert_eq!(body(&response), json!({"error": "Not found"}));
	}
}
