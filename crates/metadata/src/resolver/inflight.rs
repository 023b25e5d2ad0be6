//! Per-identity singleflight bookkeeping.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::descriptor::CanonicalDescriptor;
use crate::error::{DependencyError, ResolveError};
use crate::identity::Identity;

pub(super) type Outcome = Result<Arc<CanonicalDescriptor>, ResolveError>;
pub(super) type InFlightMap = Mutex<FxHashMap<Identity, Arc<InFlight>>>;
/// Identity each blocked waiter thread is waiting for.
pub(super) type WaitingMap = Mutex<FxHashMap<ThreadId, Identity>>;

/// A resolution in progress.
pub(super) struct InFlight {
	leader: ThreadId,
	slot: Mutex<Option<Outcome>>,
	ready: Condvar,
}

impl InFlight {
	pub(super) fn new() -> Self {
		Self {
			leader: thread::current().id(),
			slot: Mutex::new(None),
			ready: Condvar::new(),
		}
	}

	/// Returns the thread doing the work.
	pub(super) fn leader(&self) -> ThreadId {
		self.leader
	}

	fn publish(&self, outcome: Outcome) {
		*self.slot.lock() = Some(outcome);
		self.ready.notify_all();
	}

	/// Blocks until the leader publishes, then returns a copy of its outcome.
	pub(super) fn wait(&self) -> Outcome {
		let mut slot = self.slot.lock();
		loop {
			if let Some(outcome) = slot.as_ref() {
				return outcome.clone();
			}
			self.ready.wait(&mut slot);
		}
	}
}

/// Registration of the current thread as a waiter, removed on drop.
pub(super) struct WaitRecord<'a> {
	map: &'a WaitingMap,
	thread: ThreadId,
}

impl<'a> WaitRecord<'a> {
	/// Records that the current thread is about to wait for `identity`.
	///
	/// Callers must hold the in-flight map lock so the record is visible to
	/// the next cycle check.
	pub(super) fn register(map: &'a WaitingMap, identity: Identity) -> Self {
		let thread = thread::current().id();
		map.lock().insert(thread, identity);
		Self { map, thread }
	}
}

impl Drop for WaitRecord<'_> {
	fn drop(&mut self) {
		self.map.lock().remove(&self.thread);
	}
}

/// Returns true if waiting on `flight` would wait, through the chain of
/// blocked leaders, on the current thread.
///
/// Must be called with the in-flight map locked.
pub(super) fn waits_on_current_thread(
	flight: &InFlight,
	inflight: &FxHashMap<Identity, Arc<InFlight>>,
	waiting: &WaitingMap,
) -> bool {
	let current = thread::current().id();
	let waiting = waiting.lock();
	let mut leader = flight.leader();
	// Bounded in case other threads already form a loop.
	for _ in 0..=inflight.len() {
		if leader == current {
			return true;
		}
		let Some(next) = waiting.get(&leader).and_then(|identity| inflight.get(identity)) else {
			return false;
		};
		leader = next.leader();
	}
	false
}

/// Retires a flight on every exit path of the leader.
///
/// If the leader unwinds before [`LeaderGuard::complete`], waiters receive
/// [`DependencyError::ResolutionAborted`] and the identity becomes resolvable again.
pub(super) struct LeaderGuard<'a> {
	map: &'a InFlightMap,
	identity: Identity,
	flight: Arc<InFlight>,
	completed: bool,
}

impl<'a> LeaderGuard<'a> {
	pub(super) fn new(map: &'a InFlightMap, identity: Identity, flight: Arc<InFlight>) -> Self {
		Self {
			map,
			identity,
			flight,
			completed: false,
		}
	}

	/// Hands `outcome` to every waiter and removes the flight.
	pub(super) fn complete(mut self, outcome: Outcome) -> Outcome {
		self.completed = true;
		self.flight.publish(outcome.clone());
		self.retire();
		outcome
	}

	fn retire(&self) {
		self.map.lock().remove(&self.identity);
	}
}

impl Drop for LeaderGuard<'_> {
	fn drop(&mut self) {
		if self.completed {
			return;
		}

		warn!(identity = %self.identity, "resolution leader exited without a result");
		self.flight.publish(Err(DependencyError::ResolutionAborted {
			identity: self.identity.to_string(),
		}
		.into()));
		self.retire();
	}
}
