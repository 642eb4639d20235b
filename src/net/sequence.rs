use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic request counter. A response is applied only while its token is
/// still the latest one issued; anything older is stale.
#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
	latest: Arc<AtomicU64>,
}

impl RequestSequence {
	/// A sequence with no request issued yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new request, superseding every earlier token.
	pub fn issue(&self) -> RequestToken {
		RequestToken(self.latest.fetch_add(1, Ordering::Relaxed) + 1)
	}

	/// Whether `token` is still the latest issued.
	pub fn is_current(&self, token: RequestToken) -> bool {
		self.latest.load(Ordering::Relaxed) == token.0
	}

	/// Hand back a completed request's `outcome` only if `token` is still
	/// current. Stale outcomes are logged and dropped.
	pub fn accept<T>(&self, token: RequestToken, outcome: T) -> Option<T> {
		if self.is_current(token) {
			Some(outcome)
		} else {
			debug!("dropping stale response for {token:?}");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn later_issue_makes_earlier_token_stale() {
		let seq = RequestSequence::new();
		let first = seq.issue();
		assert!(seq.is_current(first));

		let second = seq.clone().issue();
		assert!(second > first);
		assert!(!seq.is_current(first));
		assert!(seq.is_current(second));
	}

	#[test]
	fn accept_passes_only_the_latest_outcome() {
		let seq = RequestSequence::new();
		let first = seq.issue();
		assert_eq!(seq.accept(first, "a"), Some("a"));

		let second = seq.issue();
		assert_eq!(seq.accept(first, "a"), None);
		assert_eq!(seq.accept(second, "b"), Some("b"));
	}
}
