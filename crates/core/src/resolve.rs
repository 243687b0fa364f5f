//! Turning parsed pairs into host settings.
//!
//! Dispatch order per pair:
//!
//! 1. host-prefixed keys are coerced and applied verbatim under the bare key,
//!    even when the bare key is one of the recognized names below;
//! 2. `coding` sets the line-ending convention;
//! 3. `indent-tabs-mode` sets `translate_tabs_to_spaces`;
//! 4. `mode` assigns a syntax through the [`ModeRegistry`];
//! 5. `tab-width` sets `tab_size`.
//!
//! Anything else is dropped.

use std::sync::LazyLock;

use filevars_registry::ModeRegistry;
use regex::Regex;

use crate::error::{Error, Result};
use crate::host::SettingsStore;
use crate::tokenize::ParsedPair;
use crate::value::{LineEnding, OptionValue, coerce};

/// Host setting receiving the indentation policy.
pub const TRANSLATE_TABS_TO_SPACES: &str = "translate_tabs_to_spaces";

/// Host setting receiving the tab width.
pub const TAB_SIZE: &str = "tab_size";

static EOL_TYPE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(?:.+-)?(unix|dos|mac)").expect("eol pattern compiles"));

/// Declaration keys with dedicated handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileVariable {
	Coding,
	IndentTabsMode,
	Mode,
	TabWidth,
}

impl FileVariable {
	pub const ALL: [FileVariable; 4] = [
		FileVariable::Coding,
		FileVariable::IndentTabsMode,
		FileVariable::Mode,
		FileVariable::TabWidth,
	];

	pub fn key(self) -> &'static str {
		match self {
			FileVariable::Coding => "coding",
			FileVariable::IndentTabsMode => "indent-tabs-mode",
			FileVariable::Mode => "mode",
			FileVariable::TabWidth => "tab-width",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|var| var.key() == key)
	}
}

/// A setting written to the host by one pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
	Setting { key: String, value: OptionValue },
	LineEndings(LineEnding),
	Syntax(String),
}

/// Line-ending convention named by an Emacs coding system (`utf-8-dos`, `mac`).
pub fn line_ending_for_coding(coding: &str) -> Option<LineEnding> {
	let caps = EOL_TYPE_RE.captures(coding)?;
	LineEnding::from_eol_type(caps.get(1)?.as_str())
}

/// Emacs Lisp truthiness: only `nil` and `()` are false. `0` is true.
pub fn is_lisp_truthy(value: &str) -> bool {
	!matches!(value.trim().to_lowercase().as_str(), "nil" | "()")
}

/// Parses a `tab-width` value as a non-negative integer.
///
/// Negative widths are rejected like any other non-number, so `tab-width: -1`
/// marks the whole declaration as malformed instead of reaching the host.
pub fn parse_tab_width(value: &str) -> Result<u32> {
	value.trim().parse::<u32>().map_err(|source| Error::TabWidth {
		value: value.to_string(),
		source,
	})
}

/// Applies parsed pairs to a settings store.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
	registry: &'a ModeRegistry,
	report_unknown_modes: bool,
}

impl<'a> Resolver<'a> {
	pub fn new(registry: &'a ModeRegistry) -> Self {
		Self {
			registry,
			report_unknown_modes: false,
		}
	}

	/// Also surface unresolved modes through [`SettingsStore::show_status`].
	pub fn report_unknown_modes(mut self, report: bool) -> Self {
		self.report_unknown_modes = report;
		self
	}

	/// Applies every pair in order.
	///
	/// Stops at the first fatal error; settings applied before it stay applied.
	pub fn resolve<S>(&self, pairs: &[ParsedPair], store: &mut S) -> Result<Vec<Applied>>
	where
		S: SettingsStore + ?Sized,
	{
		let mut applied = Vec::with_capacity(pairs.len());
		for pair in pairs {
			if let Some(done) = self.resolve_pair(pair, store)? {
				applied.push(done);
			}
		}
		Ok(applied)
	}

	/// Applies a single pair. `Ok(None)` means the pair was skipped.
	pub fn resolve_pair<S>(&self, pair: &ParsedPair, store: &mut S) -> Result<Option<Applied>>
	where
		S: SettingsStore + ?Sized,
	{
		if pair.is_host_specific {
			return Ok(self.apply_host_setting(pair, store));
		}

		let Some(var) = FileVariable::from_key(&pair.key) else {
			tracing::trace!(key = %pair.key, "ignoring unrecognized file variable");
			return Ok(None);
		};

		let applied = match var {
			FileVariable::Coding => {
				let Some(line_ending) = line_ending_for_coding(&pair.raw_value) else {
					return Ok(None);
				};
				store.set_line_endings(line_ending);
				Applied::LineEndings(line_ending)
			}
			FileVariable::IndentTabsMode => {
				let value = OptionValue::Bool(!is_lisp_truthy(&pair.raw_value));
				store.apply_setting(TRANSLATE_TABS_TO_SPACES, value.clone());
				Applied::Setting {
					key: TRANSLATE_TABS_TO_SPACES.to_string(),
					value,
				}
			}
			FileVariable::Mode => {
				let Some(resource) = self.registry.lookup(&pair.raw_value) else {
					tracing::warn!(mode = %pair.raw_value, "no syntax registered for mode");
					if self.report_unknown_modes {
						store.show_status(&format!("Unknown mode '{}'", pair.raw_value));
					}
					return Ok(None);
				};
				store.assign_syntax(resource);
				Applied::Syntax(resource.to_string())
			}
			FileVariable::TabWidth => {
				let value = OptionValue::Int(i64::from(parse_tab_width(&pair.raw_value)?));
				store.apply_setting(TAB_SIZE, value.clone());
				Applied::Setting {
					key: TAB_SIZE.to_string(),
					value,
				}
			}
		};

		tracing::trace!(key = %pair.key, applied = ?applied, "applied file variable");
		Ok(Some(applied))
	}

	fn apply_host_setting<S>(&self, pair: &ParsedPair, store: &mut S) -> Option<Applied>
	where
		S: SettingsStore + ?Sized,
	{
		match coerce(&pair.raw_value) {
			Ok(value) => {
				tracing::trace!(key = %pair.key, value = %value, "applying host setting");
				store.apply_setting(&pair.key, value.clone());
				Some(Applied::Setting {
					key: pair.key.clone(),
					value,
				})
			}
			Err(e) => {
				tracing::warn!(key = %pair.key, error = %e, "skipping host setting");
				None
			}
		}
	}
}
