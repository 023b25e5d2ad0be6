//! The memoizing metadata resolver.
//!
//! # Purpose
//!
//! Turns an [`Identity`] into its [`CanonicalDescriptor`] exactly once per
//! resolver instance, and resolves whole declaration trees through the
//! [`crate::tree`] passes.
//!
//! # Concurrency
//!
//! - **Reads:** cache hits take only a shared read lock.
//! - **Misses:** singleflight. The first caller for an identity becomes the
//!   leader; concurrent callers block until the leader publishes and receive
//!   the same outcome, success or failure.
//! - No lock is held while collaborators run.
//! - **Cycles:** each blocked waiter records the identity it waits for. Before
//!   blocking, a caller follows leader to awaited flight to leader; if the
//!   chain reaches its own thread it fails instead of waiting.
//!
//! # Invariants
//!
//! - At most one resolution computation per identity.
//!   - Enforced in: `MetadataResolver::join_or_lead`; the leader inserts into
//!     the cache before retiring its flight, so a late caller finds one or the other.
//!   - Failure symptom: collaborators called twice for one identity.
//! - Failed resolutions are never cached.
//!   - Enforced in: [`MetadataResolver::resolve`].
//!   - Failure symptom: a transient collaborator error sticks for the process lifetime.
//! - A leader that unwinds never leaves waiters blocked.
//!   - Enforced in: `inflight::LeaderGuard`.
//! - No thread blocks on a flight whose leader waits, directly or through
//!   other leaders, on that thread.
//!   - Enforced in: `MetadataResolver::join_or_lead` via
//!     `inflight::waits_on_current_thread`, checked and registered under the
//!     in-flight lock.
//!   - Failure symptom: two threads whose collaborators resolve each other's
//!     identity hang forever.

mod inflight;

use std::sync::Arc;
use std::thread;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use self::inflight::{InFlight, InFlightMap, LeaderGuard, WaitRecord, WaitingMap, waits_on_current_thread};
use crate::config::{ConfigError, ResolverConfig};
use crate::descriptor::{CanonicalDescriptor, TemplateDescriptor, TypeDescriptor};
use crate::error::{DependencyError, ResolveError, Result};
use crate::hooks::LifecycleHook;
use crate::identity::Identity;
use crate::raw::{ElementMeta, RawDeclarationMetadata};
use crate::services::Services;
use crate::tree::{self, DeclarationEntry};

enum Role<'a> {
	Cached(Arc<CanonicalDescriptor>),
	Waiter(Arc<InFlight>, WaitRecord<'a>),
	Leader(Arc<InFlight>),
}

/// Resolves and caches canonical descriptors.
///
/// The cache lives as long as the resolver and is never evicted.
pub struct MetadataResolver {
	config: ResolverConfig,
	services: Services,
	ambient: Vec<DeclarationEntry>,
	cache: RwLock<FxHashMap<Identity, Arc<CanonicalDescriptor>>>,
	inflight: InFlightMap,
	waiting: WaitingMap,
}

impl MetadataResolver {
	/// Creates a resolver with the default configuration.
	pub fn new(services: Services) -> Self {
		Self::build(services, ResolverConfig::default())
	}

	/// Creates a resolver with an explicit configuration.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Invalid`] if `config` fails [`ResolverConfig::validate`].
	pub fn with_config(services: Services, config: ResolverConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::build(services, config))
	}

	fn build(services: Services, config: ResolverConfig) -> Self {
		Self {
			config,
			services,
			ambient: Vec::new(),
			cache: RwLock::new(FxHashMap::default()),
			inflight: Mutex::new(FxHashMap::default()),
			waiting: Mutex::new(FxHashMap::default()),
		}
	}

	/// Sets declarations prepended to every [`MetadataResolver::resolve_tree`] call.
	pub fn with_ambient(mut self, ambient: impl IntoIterator<Item = DeclarationEntry>) -> Self {
		self.ambient = ambient.into_iter().collect();
		self
	}

	/// Returns the active configuration.
	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}

	/// Returns the cached descriptor for `identity` without resolving it.
	pub fn cached(&self, identity: &Identity) -> Option<Arc<CanonicalDescriptor>> {
		self.cache.read().get(identity).cloned()
	}

	/// Returns the number of memoized descriptors.
	pub fn cache_len(&self) -> usize {
		self.cache.read().len()
	}

	/// Resolves `identity`, computing its descriptor on first use.
	///
	/// Repeated calls return the same [`Arc`]. Concurrent first calls for one
	/// identity share a single computation.
	///
	/// # Errors
	///
	/// - [`ResolveError::MetadataNotFound`] if the annotation store has nothing for `identity`.
	/// - [`ResolveError::Dependency`] if a collaborator fails, if the calling
	///   thread re-enters resolution of an identity it is already resolving, or
	///   if waiting would close a cycle of threads resolving each other's
	///   identities ([`DependencyError::ResolutionCycle`]).
	pub fn resolve(&self, identity: &Identity) -> Result<Arc<CanonicalDescriptor>> {
		if let Some(hit) = self.cached(identity) {
			trace!(identity = %identity, "descriptor cache hit");
			return Ok(hit);
		}

		let flight = match self.join_or_lead(identity)? {
			Role::Cached(hit) => return Ok(hit),
			Role::Waiter(flight, _record) => {
				debug!(identity = %identity, "waiting on in-flight resolution");
				return flight.wait();
			}
			Role::Leader(flight) => flight,
		};

		let guard = LeaderGuard::new(&self.inflight, identity.clone(), flight);
		let outcome = self.compute(identity).map(Arc::new);
		match &outcome {
			Ok(desc) => {
				self.cache.write().insert(identity.clone(), Arc::clone(desc));
				debug!(
					identity = %identity,
					composite = desc.is_composite(),
					hooks = desc.lifecycle_hooks.len(),
					"resolved declaration metadata"
				);
			}
			Err(error) => warn!(identity = %identity, %error, "metadata resolution failed"),
		}
		guard.complete(outcome)
	}

	/// Resolves every element reachable from the declaration tree of `root`.
	///
	/// The resolver's ambient declarations come first, then `ambient_extras`,
	/// then the tree itself. The result holds one descriptor per distinct
	/// identity; its order carries no meaning.
	///
	/// # Errors
	///
	/// - [`ResolveError::InvalidDeclarationEntry`] for the first flattened value
	///   that is not an identity; no descriptor is resolved in that case.
	/// - Any error from [`MetadataResolver::resolve`] or from flattening.
	pub fn resolve_tree(
		&self,
		root: &Identity,
		ambient_extras: Option<&[DeclarationEntry]>,
	) -> Result<Vec<Arc<CanonicalDescriptor>>> {
		let declarations = self.services.trees.declaration_tree(root)?;

		let mut extra = self.ambient.clone();
		if let Some(more) = ambient_extras {
			extra.extend_from_slice(more);
		}

		let flat = tree::flatten(&declarations, Some(extra.as_slice()), self.config.tree_limits())?;
		let elements = tree::validated_elements(flat, root)?;
		let flattened = elements.len();
		let distinct = tree::dedupe(elements);
		debug!(root = %root, flattened, distinct = distinct.len(), "resolving declaration tree");

		distinct.iter().map(|id| self.resolve(id)).collect()
	}

	fn join_or_lead(&self, identity: &Identity) -> Result<Role<'_>> {
		let mut inflight = self.inflight.lock();

		// The previous leader may have finished between the fast path and here.
		if let Some(hit) = self.cached(identity) {
			return Ok(Role::Cached(hit));
		}

		if let Some(flight) = inflight.get(identity) {
			if flight.leader() == thread::current().id() {
				return Err(DependencyError::ReentrantResolution {
					identity: identity.to_string(),
				}
				.into());
			}
			if waits_on_current_thread(flight, &inflight, &self.waiting) {
				warn!(identity = %identity, "refusing to wait on a cycle of in-flight resolutions");
				return Err(DependencyError::ResolutionCycle {
					identity: identity.to_string(),
				}
				.into());
			}
			let record = WaitRecord::register(&self.waiting, identity.clone());
			return Ok(Role::Waiter(Arc::clone(flight), record));
		}

		let flight = Arc::new(InFlight::new());
		inflight.insert(identity.clone(), Arc::clone(&flight));
		Ok(Role::Leader(flight))
	}

	fn compute(&self, identity: &Identity) -> Result<CanonicalDescriptor> {
		let raw = self
			.services
			.annotations
			.raw_metadata(identity)?
			.ok_or_else(|| ResolveError::MetadataNotFound {
				identity: identity.to_string(),
			})?;

		let composite = match &raw {
			RawDeclarationMetadata::Composite {
				change_detection, ..
			} => {
				let view = self.services.views.view_metadata(identity)?;
				Some((TemplateDescriptor::from(view), *change_detection))
			}
			RawDeclarationMetadata::Plain(_) => None,
		};

		let element = raw.element();
		let type_ = TypeDescriptor {
			name: identity.to_string(),
			module_url: self.module_url(identity, element)?,
			runtime: identity.clone(),
		};
		let hooks = self.probe_hooks(identity)?;

		Ok(CanonicalDescriptor::build(element, type_, composite, hooks))
	}

	fn module_url(&self, identity: &Identity, element: &ElementMeta) -> Result<String, DependencyError> {
		match &element.module_id {
			Some(module_id) => Ok(self.config.package_locator(module_id)),
			None => self.services.introspector.import_locator(identity),
		}
	}

	fn probe_hooks(&self, identity: &Identity) -> Result<Vec<LifecycleHook>, DependencyError> {
		let mut hooks = Vec::new();
		for hook in LifecycleHook::ALL {
			if self.services.introspector.implements_hook(identity, hook)? {
				hooks.push(hook);
			}
		}
		Ok(hooks)
	}
}
