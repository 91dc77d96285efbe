//! Types shared between the browser app and the form backend.

pub mod types;

pub use types::{
	ApiError, Application, ApplicationSubmission, Deadline, NewsletterSubscription, Subscriber,
};
