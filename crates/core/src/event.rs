//! Synchronous change broadcast.
//!
//! [`Emitter`] and [`Event`] are the publish/subscribe pair used to signal
//! registry changes: no payload, synchronous delivery, no ordering
//! guarantee among listeners, no batching. Subscriptions are revoked
//! through [`Disposable`] handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::dispose::Disposable;

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Subscribers {
	next_id: AtomicU64,
	listeners: Mutex<Vec<(u64, Listener)>>,
}

/// Publishing half of the broadcast pair.
pub struct Emitter {
	subscribers: Arc<Subscribers>,
}

impl Emitter {
	/// Creates an emitter with no subscribers.
	pub fn new() -> Self {
		Self {
			subscribers: Arc::new(Subscribers::default()),
		}
	}

	/// Invokes every live listener.
	///
	/// Listeners run outside the subscriber lock, so a listener may
	/// subscribe or dispose while being notified.
	pub fn fire(&self) {
		let snapshot: Vec<Listener> = self
			.subscribers
			.listeners
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();
		for listener in snapshot {
			(*listener)();
		}
	}

	/// Returns the subscribing half.
	pub fn event(&self) -> Event {
		Event {
			subscribers: Arc::clone(&self.subscribers),
		}
	}

	/// Number of live subscriptions.
	pub fn listener_count(&self) -> usize {
		self.subscribers.listeners.lock().len()
	}
}

impl Default for Emitter {
	fn default() -> Self {
		Self::new()
	}
}

/// Subscribing half of the broadcast pair.
#[derive(Clone)]
pub struct Event {
	subscribers: Arc<Subscribers>,
}

impl Event {
	/// Registers `listener` and returns the handle that detaches exactly
	/// this subscription.
	pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Disposable {
		let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
		self.subscribers
			.listeners
			.lock()
			.push((id, Arc::new(listener)));

		let subscribers = Arc::downgrade(&self.subscribers);
		Disposable::new(move || {
			if let Some(subscribers) = subscribers.upgrade() {
				subscribers
					.listeners
					.lock()
					.retain(|(entry_id, _)| *entry_id != id);
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::AtomicUsize;

	use super::*;

	#[test]
	fn fire_reaches_every_listener() {
		let emitter = Emitter::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let first = calls.clone();
		let _a = emitter.event().subscribe(move || {
			first.fetch_add(1, Ordering::SeqCst);
		});
		let second = calls.clone();
		let _b = emitter.event().subscribe(move || {
			second.fetch_add(1, Ordering::SeqCst);
		});

		emitter.fire();
		assert_eq!(calls.load(Ordering::SeqCst), 2);
		assert_eq!(emitter.listener_count(), 2);
	}

	#[test]
	fn fire_without_listeners_is_a_no_op() {
		let emitter = Emitter::new();
		emitter.fire();
	}

	#[test]
	fn disposed_subscription_stops_delivery() {
		let emitter = Emitter::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let counter = calls.clone();
		let subscription = emitter.event().subscribe(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});

		emitter.fire();
		subscription.dispose();
		subscription.dispose();
		emitter.fire();

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(emitter.listener_count(), 0);
	}

	#[test]
	fn dispose_detaches_only_its_own_listener() {
		let emitter = Emitter::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let first = calls.clone();
		let a = emitter.event().subscribe(move || {
			first.fetch_add(1, Ordering::SeqCst);
		});
		let second = calls.clone();
		let _b = emitter.event().subscribe(move || {
			second.fetch_add(10, Ordering::SeqCst);
		});

		a.dispose();
		emitter.fire();

		assert_eq!(calls.load(Ordering::SeqCst), 10);
	}

	#[test]
	fn listener_may_resubscribe_during_fire() {
		let emitter = Emitter::new();
		let event = emitter.event();
		let calls = Arc::new(AtomicUsize::new(0));

		let counter = calls.clone();
		let inner_event = event.clone();
		let _a = event.subscribe(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			// Subscribing mid-fire must not deadlock; the new listener
			// is only reached by the next fire.
			let _ = inner_event.subscribe(|| {});
		});

		emitter.fire();
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(emitter.listener_count(), 2);
	}
}
