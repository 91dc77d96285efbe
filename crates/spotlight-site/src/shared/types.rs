//! Request and response bodies of the form backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Error body returned with 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
	pub error: String,
}

impl ApiError {
	/// Message for a rejected application.
	pub const INVALID_APPLICATION: &'static str = "Invalid application data";
	/// Message for a rejected newsletter subscription.
	pub const INVALID_EMAIL: &'static str = "Invalid email address";

	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}

fn must_accept_terms(terms: &bool) -> Result<(), ValidationError> {
	if *terms {
		Ok(())
	} else {
		Err(ValidationError::new("terms")
			.with_message("You must agree to the terms and conditions".into()))
	}
}

/// Application form submitted from the Apply page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ApplicationSubmission {
	#[validate(length(min = 2, message = "Name must be at least 2 characters"))]
	pub name: String,

	#[validate(email(message = "Please enter a valid email address"))]
	pub email: String,

	#[validate(length(min = 1, message = "Company name is required"))]
	pub company: String,

	#[validate(length(
		min = 50,
		max = 500,
		message = "Description must be between 50 and 500 characters"
	))]
	pub description: String,

	#[validate(length(min = 1, message = "Please select a business sector"))]
	pub sector: String,

	#[validate(custom(function = "must_accept_terms"))]
	pub terms: bool,
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
	pub id: Uuid,
	#[serde(flatten)]
	pub submission: ApplicationSubmission,
	pub created_at: DateTime<Utc>,
}

/// Newsletter sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewsletterSubscription {
	#[validate(email(message = "Invalid email address"))]
	pub email: String,
}

/// A stored newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
	pub id: Uuid,
	pub email: String,
	pub created_at: DateTime<Utc>,
}

/// Countdown to the application deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
	pub days: u64,
	pub hours: u64,
	pub minutes: u64,
	pub seconds: u64,
}

impl Deadline {
	/// Fixed countdown served when no deadline is configured.
	pub const MOCK: Deadline = Deadline {
		days: 15,
		hours: 8,
		minutes: 45,
		seconds: 22,
	};

	/// Time left from `now` until `deadline`, zero once it has passed.
	pub fn until(now: DateTime<Utc>, deadline: DateTime<Utc>) -> Self {
		let total = u64::try_from((deadline - now).num_seconds()).unwrap_or(0);
		Self {
			days: total / 86_400,
			hours: total % 86_400 / 3_600,
			minutes: total % 3_600 / 60,
			seconds: total % 60,
		}
	}

	/// Returns whether the deadline has passed.
	pub fn is_over(&self) -> bool {
		*self == Self::default()
	}
}
