//! Mode name to syntax resource mapping.
//!
//! Every value stored in a [`ModeRegistry`] is a concrete resource identifier.
//! Aliases are resolved when they are registered, so lookups never chase
//! chains and an alias to an unknown mode is rejected up front.

use filevars_config::{Config, ModeMappings};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::error::{InsertAction, RegistryError};
use crate::resources::{ResourceLister, resource_mode_name};

/// Lowercase mode name to syntax resource identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeRegistry {
	mode_to_syntax: HashMap<String, String>,
}

/// Output of [`ModeRegistry::discover`].
#[derive(Debug, Clone, Default)]
pub struct Discovery {
	pub registry: ModeRegistry,
	/// Non-fatal problems encountered while building the registry.
	pub errors: Vec<RegistryError>,
}

impl ModeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Maps `mode` to `resource`, replacing any previous entry.
	pub fn register(&mut self, mode: &str, resource: impl Into<String>) -> InsertAction {
		let mode = mode.to_lowercase();
		let resource = resource.into();

		match self.mode_to_syntax.get(&mode) {
			Some(existing) if *existing == resource => InsertAction::Unchanged,
			Some(existing) => {
				tracing::debug!(
					mode = %mode,
					previous = %existing,
					resource = %resource,
					"mode registration overrides existing entry"
				);
				self.mode_to_syntax.insert(mode, resource);
				InsertAction::ReplacedExisting
			}
			None => {
				self.mode_to_syntax.insert(mode, resource);
				InsertAction::InsertedNew
			}
		}
	}

	/// Case-insensitive lookup.
	pub fn lookup(&self, mode: &str) -> Option<&str> {
		let hit = match self.mode_to_syntax.get(mode) {
			Some(hit) => Some(hit),
			None => self.mode_to_syntax.get(&mode.to_lowercase()),
		};
		hit.map(String::as_str)
	}

	/// Registers `alias` under the resource `target` currently resolves to.
	pub fn resolve_alias(&mut self, alias: &str, target: &str) -> Result<InsertAction, RegistryError> {
		let Some(resource) = self.lookup(target).map(str::to_string) else {
			return Err(RegistryError::UnresolvedAlias {
				alias: alias.to_string(),
				target: target.to_string(),
			});
		};
		Ok(self.register(alias, resource))
	}

	/// Resolves aliases in order. Unresolved aliases are logged, skipped and returned.
	pub fn resolve_aliases(&mut self, aliases: &ModeMappings) -> Vec<RegistryError> {
		let mut errors = Vec::new();
		for (alias, target) in aliases {
			if let Err(e) = self.resolve_alias(alias, target) {
				tracing::warn!(alias = %alias, target = %target, "unresolved mode alias");
				errors.push(e);
			}
		}
		errors
	}

	/// Registers each resource under its base name, skipping blocklisted identifiers.
	pub fn register_resources<I>(&mut self, resources: I, blocklist: &HashSet<String>)
	where
		I: IntoIterator<Item = String>,
	{
		for resource in resources {
			if blocklist.contains(&resource) {
				tracing::trace!(resource = %resource, "syntax resource blocklisted");
				continue;
			}
			match resource_mode_name(&resource) {
				Some(mode) => {
					self.register(&mode, resource);
				}
				None => tracing::debug!(resource = %resource, "syntax resource has no base name"),
			}
		}
	}

	/// Builds a registry from installed resources and configured aliases.
	///
	/// Resources are registered pattern by pattern in `config.syntax_patterns`
	/// order, then `mode_mappings` and finally `user_mode_mappings` are
	/// resolved. The result depends only on the lister's output and `config`,
	/// so running discovery again yields an identical registry.
	pub fn discover(lister: &dyn ResourceLister, config: &Config) -> Discovery {
		let mut registry = Self::new();
		let mut errors = Vec::new();

		for pattern in &config.syntax_patterns {
			match lister.find_resources(pattern) {
				Ok(resources) => {
					registry.register_resources(resources, &config.syntax_discovery_blocklist)
				}
				Err(e) => {
					tracing::warn!(pattern = %pattern, error = %e, "syntax discovery failed");
					errors.push(e);
				}
			}
		}

		for aliases in config.alias_layers() {
			errors.extend(registry.resolve_aliases(aliases));
		}

		tracing::debug!(modes = registry.len(), errors = errors.len(), "mode registry built");
		Discovery { registry, errors }
	}

	pub fn len(&self) -> usize {
		self.mode_to_syntax.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mode_to_syntax.is_empty()
	}

	/// All `(mode, resource)` pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.mode_to_syntax
			.iter()
			.map(|(mode, resource)| (mode.as_str(), resource.as_str()))
	}
}
