//! Splitting a declaration into key/value pairs.

use std::sync::LazyLock;

use regex::Regex;

/// Key prefixes marking a pair as a raw host setting.
pub const HOST_KEY_PREFIXES: &[&str] = &["st-", "sublime-text-", "sublime-", "sublimetext-"];

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
	let prefixes = HOST_KEY_PREFIXES
		.iter()
		.map(|p| regex::escape(p))
		.collect::<Vec<_>>()
		.join("|");
	Regex::new(&format!(r"^\s*({prefixes})?(.+):\s*(.+)\s*")).expect("component pattern compiles")
});

/// One `key: value` component of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPair {
	/// Lowercase, trimmed, host prefix removed.
	pub key: String,
	/// Lowercase, trimmed.
	pub raw_value: String,
	/// Whether the key carried one of [`HOST_KEY_PREFIXES`].
	pub is_host_specific: bool,
}

/// Parses a single component. Malformed components yield `None`.
pub fn parse_component(component: &str) -> Option<ParsedPair> {
	let caps = COMPONENT_RE.captures(component)?;
	let key = caps.get(2)?.as_str().trim();
	let raw_value = caps.get(3)?.as_str().trim();
	if key.is_empty() || raw_value.is_empty() {
		return None;
	}
	Some(ParsedPair {
		key: key.to_string(),
		raw_value: raw_value.to_string(),
		is_host_specific: caps.get(1).is_some(),
	})
}

/// Lowercases a declaration and parses its `;`-separated components in order.
pub fn tokenize(declaration: &str) -> Vec<ParsedPair> {
	declaration
		.to_lowercase()
		.split(';')
		.filter_map(parse_component)
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn pair(key: &str, raw_value: &str, is_host_specific: bool) -> ParsedPair {
		ParsedPair {
			key: key.into(),
			raw_value: raw_value.into(),
			is_host_specific,
		}
	}

	#[test]
	fn test_tokenize_in_order() {
		assert_eq!(
			tokenize("Mode: Python; tab-width: 4 ;indent-tabs-mode:nil"),
			vec![
				pair("mode", "python", false),
				pair("tab-width", "4", false),
				pair("indent-tabs-mode", "nil", false),
			]
		);
	}

	#[rstest]
	#[case("st-tab_size: 2", "tab_size")]
	#[case("sublime-text-word_wrap: true", "word_wrap")]
	#[case("sublime-tab-width: 8", "tab-width")]
	#[case("SublimeText-rulers: 80", "rulers")]
	#[case("  sublime-font_size: 10.5", "font_size")]
	fn test_host_prefixes_stripped(#[case] declaration: &str, #[case] key: &str) {
		let pairs = tokenize(declaration);
		assert_eq!(pairs.len(), 1);
		assert_eq!(pairs[0].key, key);
		assert!(pairs[0].is_host_specific);
	}

	#[rstest]
	#[case("python")]
	#[case("mode:")]
	#[case("mode:   ")]
	#[case(": python")]
	#[case("")]
	fn test_malformed_components_skipped(#[case] component: &str) {
		assert_eq!(parse_component(component), None);
	}

	#[test]
	fn test_malformed_mixed_with_valid() {
		assert_eq!(
			tokenize("c; mode: c; ; tab-width 4"),
			vec![pair("mode", "c", false)]
		);
	}

	#[test]
	fn test_key_takes_up_to_last_colon() {
		assert_eq!(parse_component("a:b: c"), Some(pair("a:b", "c", false)));
	}

	#[test]
	fn test_unprefixed_lookalike_is_not_host_specific() {
		assert_eq!(parse_component("stx-foo: 1"), Some(pair("stx-foo", "1", false)));
	}
}
