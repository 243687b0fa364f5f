/// Result of registering a mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Mode was new; entry inserted.
	InsertedNew,
	/// Mode existed with the same resource; nothing changed.
	Unchanged,
	/// Mode existed; replaced with the new resource.
	ReplacedExisting,
}

/// Non-fatal registry error. Discovery collects these instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// An alias names a target mode that is not registered (yet).
	#[error("mode alias '{alias}' points at unregistered mode '{target}'")]
	UnresolvedAlias { alias: String, target: String },

	/// A resource glob could not be compiled.
	#[error("invalid resource pattern {pattern:?}: {reason}")]
	InvalidPattern { pattern: String, reason: String },
}
