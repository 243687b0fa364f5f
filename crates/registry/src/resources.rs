//! Syntax definition resource discovery.
//!
//! Resources are addressed by string identifiers of the form
//! `Packages/<package>/<file>`, the same shape a host editor stores in a
//! buffer's `syntax` setting.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;

use crate::error::RegistryError;

/// Identifier prefix for filesystem-backed resources.
pub const PACKAGES_PREFIX: &str = "Packages";

/// Enumerates installed resources whose file name matches a glob.
pub trait ResourceLister: Send + Sync {
	/// Returns every resource whose file name matches `pattern`.
	fn find_resources(&self, pattern: &str) -> Result<Vec<String>, RegistryError>;
}

/// Compiles a file-name glob such as `*.sublime-syntax`.
pub fn file_name_matcher(pattern: &str) -> Result<GlobMatcher, RegistryError> {
	Glob::new(pattern)
		.map(|glob| glob.compile_matcher())
		.map_err(|e| RegistryError::InvalidPattern {
			pattern: pattern.to_string(),
			reason: e.to_string(),
		})
}

/// Final path segment of a resource identifier.
pub fn resource_file_name(resource: &str) -> &str {
	resource
		.rsplit(|c: char| c == '/' || c == '\\')
		.next()
		.unwrap_or(resource)
}

/// Lowercase base name of a resource, minus its extension.
///
/// `Packages/C++/C++.sublime-syntax` yields `c++`.
pub fn resource_mode_name(resource: &str) -> Option<String> {
	let file_name = resource_file_name(resource);
	let stem = match file_name.rsplit_once('.') {
		Some((stem, _)) if !stem.is_empty() => stem,
		Some(_) => return None,
		None => file_name,
	};
	(!stem.is_empty()).then(|| stem.to_lowercase())
}

/// A fixed set of resource identifiers.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
	resources: Vec<String>,
}

impl StaticResources {
	pub fn new<I, S>(resources: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			resources: resources.into_iter().map(Into::into).collect(),
		}
	}
}

impl ResourceLister for StaticResources {
	fn find_resources(&self, pattern: &str) -> Result<Vec<String>, RegistryError> {
		let matcher = file_name_matcher(pattern)?;
		Ok(self
			.resources
			.iter()
			.filter(|r| matcher.is_match(resource_file_name(r)))
			.cloned()
			.collect())
	}
}

/// Lists resources below a packages directory on disk.
#[derive(Debug, Clone)]
pub struct FsResourceLister {
	root: PathBuf,
	max_depth: Option<usize>,
}

impl FsResourceLister {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			max_depth: None,
		}
	}

	/// Limits how deep below the root the walk descends.
	pub fn with_max_depth(mut self, depth: usize) -> Self {
		self.max_depth = Some(depth);
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	fn identifier_for(&self, path: &Path) -> Option<String> {
		let relative = path.strip_prefix(&self.root).ok()?;
		let mut id = String::from(PACKAGES_PREFIX);
		for component in relative.components() {
			let Component::Normal(part) = component else {
				continue;
			};
			id.push('/');
			id.push_str(part.to_str()?);
		}
		Some(id)
	}

	fn build_walk(&self) -> WalkBuilder {
		let mut walker = WalkBuilder::new(&self.root);
		walker
			.standard_filters(false)
			.follow_links(true)
			.max_depth(self.max_depth);
		walker
	}
}

impl ResourceLister for FsResourceLister {
	fn find_resources(&self, pattern: &str) -> Result<Vec<String>, RegistryError> {
		let matcher = file_name_matcher(pattern)?;
		let mut found = Vec::new();

		for entry in self.build_walk().build() {
			let entry = match entry {
				Ok(entry) => entry,
				Err(e) => {
					tracing::warn!(root = %self.root.display(), error = %e, "resource walk error");
					continue;
				}
			};
			if !entry.file_type().is_some_and(|ft| ft.is_file()) {
				continue;
			}
			if !matcher.is_match(entry.file_name()) {
				continue;
			}
			match self.identifier_for(entry.path()) {
				Some(id) => found.push(id),
				None => {
					tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 resource path");
				}
			}
		}

		found.sort();
		Ok(found)
	}
}
