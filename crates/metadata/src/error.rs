use thiserror::Error;

/// Errors returned by [`crate::MetadataResolver`].
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
	/// The annotation store holds no metadata for the identity.
	#[error("no declarative metadata found for '{identity}'")]
	MetadataNotFound {
		/// Display form of the identity that was requested.
		identity: String,
	},
	/// A flattened declaration-tree entry is not an element identity.
	#[error("unexpected declaration value '{value}' in the declaration tree of '{declaration}'")]
	InvalidDeclarationEntry {
		/// Display form of the offending value.
		value: String,
		/// Display form of the declaration that owns the tree.
		declaration: String,
	},
	/// A collaborator failed, or forward-reference resolution did not settle.
	#[error(transparent)]
	Dependency(#[from] DependencyError),
}

/// Errors raised by collaborator services and by reference resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
	/// A collaborator service reported a failure.
	#[error("{service}: {message}")]
	Service {
		/// Name of the failing service.
		service: &'static str,
		/// Failure description as reported by the service.
		message: String,
	},
	/// A forward-reference chain did not reach a concrete value.
	#[error("forward reference did not resolve within {depth} steps (cycle?)")]
	ForwardRefCycle {
		/// The configured chain limit that was exceeded.
		depth: usize,
	},
	/// A declaration tree nests deeper than the configured limit.
	#[error("declaration tree nests deeper than {depth} levels")]
	NestingTooDeep {
		/// The configured nesting limit that was exceeded.
		depth: usize,
	},
	/// The thread resolving an identity asked for the same identity again.
	#[error("re-entrant resolution of '{identity}'")]
	ReentrantResolution {
		/// Display form of the identity.
		identity: String,
	},
	/// Waiting for an identity would block on a thread that is itself waiting,
	/// directly or transitively, on the caller.
	#[error("resolution of '{identity}' waits on a cycle of in-flight resolutions")]
	ResolutionCycle {
		/// Display form of the identity the caller asked for.
		identity: String,
	},
	/// The thread resolving an identity exited without publishing a result.
	#[error("resolution of '{identity}' aborted")]
	ResolutionAborted {
		/// Display form of the identity.
		identity: String,
	},
}

impl DependencyError {
	/// Shorthand for [`DependencyError::Service`].
	pub fn service(service: &'static str, message: impl Into<String>) -> Self {
		Self::Service {
			service,
			message: message.into(),
		}
	}
}

/// Result alias for resolver operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
