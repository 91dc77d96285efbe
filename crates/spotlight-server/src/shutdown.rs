//! Graceful shutdown
//!
//! A [`ShutdownCoordinator`] broadcasts a single shutdown notice to the accept
//! loop and every connection task, then lets the caller wait until the
//! server has stopped accepting connections or the timeout expires.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, broadcast};

/// Coordinates shutdown between the server loop and its connections.
#[derive(Clone)]
pub struct ShutdownCoordinator {
	sender: broadcast::Sender<()>,
	stopped: Arc<Notify>,
	timeout: Duration,
}

impl ShutdownCoordinator {
	/// Creates a coordinator that waits at most `timeout` for the server to
	/// stop once shutdown starts.
	pub fn new(timeout: Duration) -> Self {
		let (sender, _) = broadcast::channel(1);
		Self {
			sender,
			stopped: Arc::new(Notify::new()),
			timeout,
		}
	}

	/// Receiver resolved once shutdown starts.
	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.sender.subscribe()
	}

	/// Starts shutdown.
	pub fn shutdown(&self) {
		// No receivers simply means nothing is running yet
		let _ = self.sender.send(());
	}

	/// Called by the server once it no longer accepts connections.
	pub fn notify_shutdown_complete(&self) {
		self.stopped.notify_one();
	}

	/// Waits until the server has stopped, at most for the timeout.
	pub async fn wait_for_shutdown(&self) {
		if tokio::time::timeout(self.timeout, self.stopped.notified())
			.await
			.is_err()
		{
			tracing::warn!(timeout = ?self.timeout, "server did not stop before the shutdown timeout");
		}
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}
}

impl std::fmt::Debug for ShutdownCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ShutdownCoordinator")
			.field("receivers", &self.sender.receiver_count())
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "failed to listen for Ctrl-C");
		// Never resolve rather than shutting down on a broken signal handler
		std::future::pending::<()>().await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_subscribers_receive_shutdown() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let mut first = coordinator.subscribe();
		let mut second = coordinator.subscribe();

		coordinator.shutdown();

		assert!(first.recv().await.is_ok());
		assert!(second.recv().await.is_ok());
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_returns_after_completion() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
		coordinator.notify_shutdown_complete();
		// notify_one stores a permit, so a later wait completes immediately
		tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_shutdown())
			.await
			.unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_gives_up_after_timeout() {
		let coordinator = ShutdownCoordinator::new(Duration::from_millis(20));
		tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_shutdown())
			.await
			.unwrap();
	}

	#[rstest]
	fn test_shutdown_without_subscribers() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		coordinator.shutdown();
	}
}
