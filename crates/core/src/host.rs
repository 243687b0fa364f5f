//! Capabilities the host editor provides to the engine.
//!
//! The engine never owns a document. It reads lines through [`DocumentLines`]
//! and writes results through [`SettingsStore`]; [`HostBuffer`] ties both to
//! the host's notion of whether a view is a real editor buffer.

use std::borrow::Cow;

use ropey::Rope;
use rustc_hash::FxHashMap as HashMap;

use crate::value::{LineEnding, OptionValue};

/// Read access to a document's lines.
pub trait DocumentLines {
	/// Number of lines, including the empty line after a trailing newline.
	fn line_count(&self) -> usize;

	/// Text of line `idx` without its terminator, or `None` past the end.
	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>>;
}

/// Per-document settings the engine writes to.
pub trait SettingsStore {
	/// Sets a generic view setting.
	fn apply_setting(&mut self, key: &str, value: OptionValue);

	fn set_line_endings(&mut self, line_ending: LineEnding);

	/// Assigns a syntax definition by resource identifier.
	fn assign_syntax(&mut self, resource: &str);

	/// Surfaces a short message to the user. Hosts without a status area ignore it.
	fn show_status(&mut self, _message: &str) {}
}

/// A host view the engine can act on.
pub trait HostBuffer: DocumentLines + SettingsStore {
	/// False for widgets, panels, previews and buffers not backed by a file.
	fn is_applicable(&self) -> bool;
}

fn strip_line_ending(line: &str) -> &str {
	line.trim_end_matches(|c: char| c == '\n' || c == '\r')
}

impl DocumentLines for Rope {
	fn line_count(&self) -> usize {
		self.len_lines()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		let line = self.get_line(idx)?;
		Some(match line.as_str() {
			Some(text) => Cow::Borrowed(strip_line_ending(text)),
			None => {
				let mut text = line.to_string();
				let len = strip_line_ending(&text).len();
				text.truncate(len);
				Cow::Owned(text)
			}
		})
	}
}

impl DocumentLines for str {
	fn line_count(&self) -> usize {
		self.split('\n').count()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		self.split('\n')
			.nth(idx)
			.map(|line| Cow::Borrowed(strip_line_ending(line)))
	}
}

impl<S: AsRef<str>> DocumentLines for [S] {
	fn line_count(&self) -> usize {
		self.len()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		self.get(idx)
			.map(|line| Cow::Borrowed(strip_line_ending(line.as_ref())))
	}
}

/// In-memory buffer recording everything the engine applies.
///
/// Useful for hosts that batch settings and for exercising the engine
/// without an editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryBuffer {
	text: Rope,
	settings: HashMap<String, OptionValue>,
	line_ending: Option<LineEnding>,
	syntax: Option<String>,
	status: Vec<String>,
	file_backed: bool,
	widget: bool,
}

impl MemoryBuffer {
	/// A file-backed editor buffer with the given contents.
	pub fn new(text: &str) -> Self {
		Self {
			text: Rope::from_str(text),
			file_backed: true,
			..Self::default()
		}
	}

	/// An unsaved buffer with no file on disk.
	pub fn scratch(text: &str) -> Self {
		Self {
			file_backed: false,
			..Self::new(text)
		}
	}

	/// A non-editor surface such as an input widget or output panel.
	pub fn widget(text: &str) -> Self {
		Self {
			widget: true,
			..Self::new(text)
		}
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	pub fn set_text(&mut self, text: &str) {
		self.text = Rope::from_str(text);
	}

	pub fn setting(&self, key: &str) -> Option<&OptionValue> {
		self.settings.get(key)
	}

	pub fn settings(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
		self.settings.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn line_ending(&self) -> Option<LineEnding> {
		self.line_ending
	}

	pub fn syntax(&self) -> Option<&str> {
		self.syntax.as_deref()
	}

	pub fn status_messages(&self) -> &[String] {
		&self.status
	}

	/// True when nothing has been applied to this buffer.
	pub fn is_untouched(&self) -> bool {
		self.settings.is_empty() && self.line_ending.is_none() && self.syntax.is_none()
	}
}

impl DocumentLines for MemoryBuffer {
	fn line_count(&self) -> usize {
		self.text.line_count()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		self.text.line_text(idx)
	}
}

impl SettingsStore for MemoryBuffer {
	fn apply_setting(&mut self, key: &str, value: OptionValue) {
		self.settings.insert(key.to_string(), value);
	}

	fn set_line_endings(&mut self, line_ending: LineEnding) {
		self.line_ending = Some(line_ending);
	}

	fn assign_syntax(&mut self, resource: &str) {
		self.syntax = Some(resource.to_string());
	}

	fn show_status(&mut self, message: &str) {
		self.status.push(message.to_string());
	}
}

impl HostBuffer for MemoryBuffer {
	fn is_applicable(&self) -> bool {
		self.file_backed && !self.widget
	}
}
