//! Configuration for file-variables resolution.
//!
//! Configuration is written in TOML and is loaded in layers: the bundled
//! defaults first, then any number of files on top (typically a package file
//! followed by the user's file).
//!
//! ```toml
//! head_line_count = 5
//! scan_tail = false
//! apply_on_activated = true
//! report_unknown_modes = false
//! syntax_patterns = ["*.sublime-syntax", "*.tmLanguage"]
//! syntax_discovery_blocklist = ["Packages/Legacy/Python.tmLanguage"]
//!
//! [mode_mappings]
//! js = "javascript"
//!
//! [user_mode_mappings]
//! django-html = "html"
//! ```
//!
//! # Merge semantics
//!
//! * Mapping tables merge key by key, the later layer wins.
//! * `syntax_discovery_blocklist` is the union of all layers.
//! * Lists and scalars are replaced by the later layer.

pub mod error;

use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;

pub use error::{ConfigError, Result};

/// Bundled defaults applied by [`Config::with_defaults`].
const BUNDLED_DEFAULTS: &str = include_str!("../assets/defaults.toml");

/// Default number of lines inspected at the head (and tail) of a document.
pub const DEFAULT_HEAD_LINE_COUNT: usize = 5;

/// Default resource globs for syntax definitions, in discovery order.
pub const DEFAULT_SYNTAX_PATTERNS: &[&str] = &["*.sublime-syntax", "*.tmLanguage"];

/// Ordered alias table: mode name to target mode name.
pub type ModeMappings = IndexMap<String, String>;

/// Effective configuration after all layers are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Package-level aliases, resolved first.
	pub mode_mappings: ModeMappings,
	/// User aliases, resolved after [`Config::mode_mappings`] and free to override them.
	pub user_mode_mappings: ModeMappings,
	/// Resource identifiers never registered during discovery.
	pub syntax_discovery_blocklist: FxHashSet<String>,
	/// Globs enumerating syntax definition resources.
	pub syntax_patterns: Vec<String>,
	/// Lines inspected from the start of a document.
	pub head_line_count: usize,
	/// Whether the last `head_line_count - 1` lines are also inspected.
	pub scan_tail: bool,
	/// Whether focus changes re-apply declarations.
	pub apply_on_activated: bool,
	/// Whether unresolved modes are surfaced to the user as status messages.
	pub report_unknown_modes: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			mode_mappings: ModeMappings::default(),
			user_mode_mappings: ModeMappings::default(),
			syntax_discovery_blocklist: FxHashSet::default(),
			syntax_patterns: DEFAULT_SYNTAX_PATTERNS.iter().map(|p| p.to_string()).collect(),
			head_line_count: DEFAULT_HEAD_LINE_COUNT,
			scan_tail: false,
			apply_on_activated: true,
			report_unknown_modes: false,
		}
	}
}

/// A single configuration source. Absent fields leave the base untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
	pub mode_mappings: Option<ModeMappings>,
	pub user_mode_mappings: Option<ModeMappings>,
	pub syntax_discovery_blocklist: Option<Vec<String>>,
	pub syntax_patterns: Option<Vec<String>>,
	pub head_line_count: Option<usize>,
	pub scan_tail: Option<bool>,
	pub apply_on_activated: Option<bool>,
	pub report_unknown_modes: Option<bool>,
}

impl ConfigLayer {
	/// Parse a TOML string into a layer.
	pub fn parse(input: &str) -> Result<Self> {
		let layer: ConfigLayer = toml::from_str(input)?;
		layer.validate()?;
		Ok(layer)
	}

	/// Load a layer from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	fn validate(&self) -> Result<()> {
		if self.head_line_count == Some(0) {
			return Err(ConfigError::InvalidValue {
				field: "head_line_count",
				reason: "must be at least 1".into(),
			});
		}
		Ok(())
	}
}

impl Config {
	/// Built-in settings plus the bundled mode aliases.
	pub fn with_defaults() -> Result<Self> {
		let mut config = Self::default();
		config.merge(ConfigLayer::parse(BUNDLED_DEFAULTS)?);
		Ok(config)
	}

	/// Parse a single TOML layer on top of the built-in settings.
	///
	/// Bundled aliases are not included; use [`Config::with_defaults`] and
	/// [`Config::merge`] for that.
	pub fn parse(input: &str) -> Result<Self> {
		let mut config = Self::default();
		config.merge(ConfigLayer::parse(input)?);
		Ok(config)
	}

	/// Bundled defaults overlaid with each existing file in `paths`, in order.
	///
	/// Missing files are skipped. Unreadable or malformed files are errors.
	pub fn load_layered<I, P>(paths: I) -> Result<Self>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut config = Self::with_defaults()?;
		for path in paths {
			let path = path.as_ref();
			match ConfigLayer::load(path) {
				Ok(layer) => config.merge(layer),
				Err(ConfigError::Io { error, .. }) if error.kind() == ErrorKind::NotFound => {
					tracing::debug!(path = %path.display(), "config layer not found, skipping");
				}
				Err(e) => return Err(e),
			}
		}
		Ok(config)
	}

	/// Merge a layer into this config. Values from `layer` take precedence.
	pub fn merge(&mut self, layer: ConfigLayer) {
		if let Some(mappings) = layer.mode_mappings {
			self.mode_mappings.extend(mappings);
		}
		if let Some(mappings) = layer.user_mode_mappings {
			self.user_mode_mappings.extend(mappings);
		}
		if let Some(blocklist) = layer.syntax_discovery_blocklist {
			self.syntax_discovery_blocklist.extend(blocklist);
		}
		if let Some(patterns) = layer.syntax_patterns {
			self.syntax_patterns = patterns;
		}
		if let Some(count) = layer.head_line_count {
			self.head_line_count = count;
		}
		if let Some(scan_tail) = layer.scan_tail {
			self.scan_tail = scan_tail;
		}
		if let Some(apply) = layer.apply_on_activated {
			self.apply_on_activated = apply;
		}
		if let Some(report) = layer.report_unknown_modes {
			self.report_unknown_modes = report;
		}
	}

	/// Package aliases followed by user aliases, in resolution order.
	pub fn alias_layers(&self) -> [&ModeMappings; 2] {
		[&self.mode_mappings, &self.user_mode_mappings]
	}
}
