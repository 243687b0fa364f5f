//! Lazily built, shareable mode registry.
//!
//! The registry is built on first use and then served from an [`ArcSwapOption`]
//! snapshot. Building is not single-flighted: two callers racing on an empty
//! cache may both run discovery, and whichever stores last wins. This relies
//! on [`ModeRegistry::discover`] being a pure function of the lister output and
//! the configuration; any caching added below it must keep that property.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use filevars_config::Config;

use crate::modes::ModeRegistry;
use crate::resources::ResourceLister;

/// Process-wide registry handle shared by every document.
pub struct SharedModeRegistry {
	lister: Arc<dyn ResourceLister>,
	config: Arc<Config>,
	snap: ArcSwapOption<ModeRegistry>,
}

impl SharedModeRegistry {
	pub fn new(lister: Arc<dyn ResourceLister>, config: Arc<Config>) -> Self {
		Self {
			lister,
			config,
			snap: ArcSwapOption::empty(),
		}
	}

	/// Returns the cached registry, building it first if necessary.
	pub fn ensure_built(&self) -> Arc<ModeRegistry> {
		if let Some(registry) = self.snap.load_full() {
			return registry;
		}
		self.rediscover()
	}

	/// Runs discovery unconditionally and replaces the cached registry.
	pub fn rediscover(&self) -> Arc<ModeRegistry> {
		let discovery = ModeRegistry::discover(self.lister.as_ref(), &self.config);
		let registry = Arc::new(discovery.registry);
		self.snap.store(Some(Arc::clone(&registry)));
		registry
	}

	/// Drops the cached registry; the next [`Self::ensure_built`] rebuilds it.
	pub fn invalidate(&self) {
		self.snap.store(None);
	}

	pub fn is_built(&self) -> bool {
		self.snap.load().is_some()
	}

	pub fn config(&self) -> &Config {
		&self.config
	}
}

impl std::fmt::Debug for SharedModeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SharedModeRegistry")
			.field("config", &self.config)
			.field("built", &self.is_built())
			.finish_non_exhaustive()
	}
}
