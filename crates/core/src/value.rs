//! Typed setting values and the literal coercion used for host-specific keys.

use std::fmt;

use serde_json::Value;

/// The value of a host setting.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Fractional number.
	Float(f64),
	/// String value.
	String(String),
}

impl fmt::Display for OptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionValue::Bool(v) => write!(f, "{v}"),
			OptionValue::Int(v) => write!(f, "{v}"),
			OptionValue::Float(v) => write!(f, "{v}"),
			OptionValue::String(v) => write!(f, "{v:?}"),
		}
	}
}

/// Line-ending convention a buffer is saved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
	Unix,
	Windows,
	/// Classic Mac OS carriage returns.
	Cr,
}

impl LineEnding {
	/// The host's name for this convention.
	pub fn as_str(self) -> &'static str {
		match self {
			LineEnding::Unix => "unix",
			LineEnding::Windows => "windows",
			LineEnding::Cr => "CR",
		}
	}

	/// Maps an Emacs end-of-line type (`unix`, `dos`, `mac`).
	pub fn from_eol_type(eol: &str) -> Option<Self> {
		match eol {
			"unix" => Some(LineEnding::Unix),
			"dos" => Some(LineEnding::Windows),
			"mac" => Some(LineEnding::Cr),
			_ => None,
		}
	}
}

impl fmt::Display for LineEnding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A raw value that is not a boolean, number or quoted string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot coerce '{raw}' to a boolean, number or quoted string")]
pub struct CoerceError {
	pub raw: String,
}

/// Converts a raw declaration value into a typed value.
///
/// Accepts `true`/`false` in any case, JSON numbers, double-quoted JSON
/// strings and single-quoted strings (taken verbatim). Bare words, `null`,
/// arrays and objects are rejected.
pub fn coerce(raw: &str) -> Result<OptionValue, CoerceError> {
	let literal = raw.trim();

	if literal.eq_ignore_ascii_case("true") {
		return Ok(OptionValue::Bool(true));
	}
	if literal.eq_ignore_ascii_case("false") {
		return Ok(OptionValue::Bool(false));
	}
	if let Some(inner) = single_quoted(literal) {
		return Ok(OptionValue::String(inner.to_string()));
	}

	let err = || CoerceError {
		raw: raw.to_string(),
	};
	match serde_json::from_str::<Value>(literal).map_err(|_| err())? {
		Value::Bool(b) => Ok(OptionValue::Bool(b)),
		Value::Number(n) => n
			.as_i64()
			.map(OptionValue::Int)
			.or_else(|| n.as_f64().map(OptionValue::Float))
			.ok_or_else(err),
		Value::String(s) => Ok(OptionValue::String(s)),
		Value::Null | Value::Array(_) | Value::Object(_) => Err(err()),
	}
}

fn single_quoted(literal: &str) -> Option<&str> {
	literal
		.strip_prefix('\'')
		.and_then(|rest| rest.strip_suffix('\''))
}
