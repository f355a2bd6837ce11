//! Idempotent disposal handles for revocable registrations.

use parking_lot::Mutex;

type DisposeFn = Box<dyn FnOnce() + Send>;

/// Handle that revokes exactly one registration.
///
/// Disposal runs the wrapped closure at most once; a second [`dispose`]
/// call is a no-op. Dropping an undisposed handle keeps the registration
/// alive, so callers that never intend to revoke can simply discard it.
///
/// [`dispose`]: Disposable::dispose
pub struct Disposable {
	action: Mutex<Option<DisposeFn>>,
}

impl Disposable {
	/// Creates a handle running `action` on first disposal.
	pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
		Self {
			action: Mutex::new(Some(Box::new(action))),
		}
	}

	/// Creates an inert handle whose disposal does nothing.
	pub fn noop() -> Self {
		Self {
			action: Mutex::new(None),
		}
	}

	/// Runs the disposal action if it has not run yet.
	pub fn dispose(&self) {
		// Take the action before invoking it so the lock is not held
		// while the action runs (it may re-enter the owning registry).
		let action = self.action.lock().take();
		if let Some(action) = action {
			action();
		}
	}

	/// Returns true once the action has run. Inert handles report true.
	pub fn is_disposed(&self) -> bool {
		self.action.lock().is_none()
	}
}

impl std::fmt::Debug for Disposable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Disposable")
			.field("disposed", &self.is_disposed())
			.finish()
	}
}

/// Group of disposables revoked together.
///
/// Contributors that register many entries collect the handles here and
/// revoke them in one call.
#[derive(Debug, Default)]
pub struct DisposableCollection {
	items: Mutex<Vec<Disposable>>,
}

impl DisposableCollection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a handle to the collection.
	pub fn push(&self, disposable: Disposable) {
		self.items.lock().push(disposable);
	}

	/// Disposes every collected handle in insertion order and empties
	/// the collection.
	pub fn dispose_all(&self) {
		let items = std::mem::take(&mut *self.items.lock());
		for item in &items {
			item.dispose();
		}
	}

	pub fn len(&self) -> usize {
		self.items.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn dispose_runs_action_once() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let handle = Disposable::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});

		assert!(!handle.is_disposed());
		handle.dispose();
		handle.dispose();

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(handle.is_disposed());
	}

	#[test]
	fn noop_handle_is_inert() {
		let handle = Disposable::noop();
		assert!(handle.is_disposed());
		handle.dispose();
		handle.dispose();
	}

	#[test]
	fn drop_does_not_dispose() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		{
			let _handle = Disposable::new(move || {
				counter.fetch_add(1, Ordering::SeqCst);
			});
		}
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn collection_disposes_everything() {
		let calls = Arc::new(AtomicUsize::new(0));
		let collection = DisposableCollection::new();
		for _ in 0..3 {
			let counter = calls.clone();
			collection.push(Disposable::new(move || {
				counter.fetch_add(1, Ordering::SeqCst);
			}));
		}

		assert_eq!(collection.len(), 3);
		collection.dispose_all();
		assert!(collection.is_empty());
		assert_eq!(calls.load(Ordering::SeqCst), 3);

		// Second pass has nothing left to dispose.
		collection.dispose_all();
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}
}
