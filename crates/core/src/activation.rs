//! Entry point driven by host editor events.

use std::sync::Arc;

use filevars_config::Config;
use filevars_registry::{ResourceLister, SharedModeRegistry};

use crate::error::Result;
use crate::host::{DocumentLines, HostBuffer, SettingsStore};
use crate::locate::{ScanWindow, candidates};
use crate::resolve::{Applied, Resolver};
use crate::tokenize::tokenize;

/// Host events that trigger a pass over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	/// The buffer finished loading from disk.
	Load,
	/// The buffer gained focus.
	Activated,
	/// The buffer was written to disk.
	PostSave,
}

/// What a pass applied, and from which declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	pub declaration: String,
	pub applied: Vec<Applied>,
}

/// File variables support for one host process.
///
/// Holds the shared mode registry, built on the first pass that needs it.
#[derive(Debug)]
pub struct FileVariables {
	registry: SharedModeRegistry,
}

impl FileVariables {
	pub fn new(lister: Arc<dyn ResourceLister>, config: Arc<Config>) -> Self {
		Self {
			registry: SharedModeRegistry::new(lister, config),
		}
	}

	pub fn registry(&self) -> &SharedModeRegistry {
		&self.registry
	}

	pub fn config(&self) -> &Config {
		self.registry.config()
	}

	/// Handles a host event for `buffer`.
	///
	/// Non-applicable buffers are left untouched, as are focus events when
	/// `apply_on_activated` is off.
	pub fn handle<B>(&self, event: Event, buffer: &mut B) -> Result<Option<Resolution>>
	where
		B: HostBuffer + ?Sized,
	{
		if !buffer.is_applicable() {
			tracing::trace!(?event, "ignoring non-applicable buffer");
			return Ok(None);
		}
		if event == Event::Activated && !self.config().apply_on_activated {
			return Ok(None);
		}
		self.apply(buffer)
	}

	/// Scans `buffer` and applies the first declaration with a parseable component.
	///
	/// Declarations without any `key: value` component do not stop the scan.
	pub fn apply<B>(&self, buffer: &mut B) -> Result<Option<Resolution>>
	where
		B: DocumentLines + SettingsStore + ?Sized,
	{
		let config = self.config();
		let declarations: Vec<String> = candidates(&*buffer, ScanWindow::from_config(config)).collect();
		if declarations.is_empty() {
			return Ok(None);
		}

		let registry = self.registry.ensure_built();
		let resolver = Resolver::new(&registry).report_unknown_modes(config.report_unknown_modes);

		for declaration in declarations {
			let pairs = tokenize(&declaration);
			if pairs.is_empty() {
				tracing::debug!(declaration = %declaration, "declaration has no key/value components");
				continue;
			}
			let applied = resolver.resolve(&pairs, buffer).inspect_err(|e| {
				tracing::warn!(declaration = %declaration, error = %e, "malformed file variables declaration");
			})?;
			tracing::debug!(declaration = %declaration, applied = applied.len(), "applied file variables");
			return Ok(Some(Resolution {
				declaration,
				applied,
			}));
		}
		Ok(None)
	}
}
