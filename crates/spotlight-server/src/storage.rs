//! Record storage for form submissions
//!
//! Records live in memory for the lifetime of the process.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use spotlight_site::{Application, ApplicationSubmission, Subscriber};
use uuid::Uuid;

use crate::error::Result;

/// Stores applications and newsletter subscribers.
#[async_trait]
pub trait Storage: Send + Sync {
	/// Stores a validated submission, assigning an id and timestamp.
	async fn create_application(&self, submission: ApplicationSubmission) -> Result<Application>;

	/// Stores a validated newsletter email.
	async fn create_subscriber(&self, email: String) -> Result<Subscriber>;

	async fn applications(&self) -> Result<Vec<Application>>;

	async fn subscribers(&self) -> Result<Vec<Subscriber>>;
}

/// In-memory [`Storage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
	applications: RwLock<Vec<Application>>,
	subscribers: RwLock<Vec<Subscriber>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl Storage for MemoryStorage {
	async fn create_application(&self, submission: ApplicationSubmission) -> Result<Application> {
		let application = Application {
			id: Uuid::new_v4(),
			submission,
			created_at: Utc::now(),
		};
		self.applications.write().push(application.clone());
		tracing::info!(id = %application.id, company = %application.submission.company, "application stored");
		Ok(application)
	}

	async fn create_subscriber(&self, email: String) -> Result<Subscriber> {
		let subscriber = Subscriber {
			id: Uuid::new_v4(),
			email,
			created_at: Utc::now(),
		};
		self.subscribers.write().push(subscriber.clone());
		tracing::info!(id = %subscriber.id, "newsletter subscriber stored");
		Ok(subscriber)
	}

	async fn applications(&self) -> Result<Vec<Application>> {
		Ok(self.applications.read().clone())
	}

	async fn subscribers(&self) -> Result<Vec<Subscriber>> {
		Ok(self.subscribers.read().clone())
	}
}
