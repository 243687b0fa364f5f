//! Finding the `-*- ... -*-` declaration line.

use std::sync::LazyLock;

use filevars_config::{Config, DEFAULT_HEAD_LINE_COUNT};
use regex::Regex;

use crate::host::DocumentLines;

/// Shortest text between the first `-*-` on a line and the next one.
///
/// Leftmost, not last: `-*- a -*- b -*-` yields `a`. Anchoring on the last
/// marker pair instead would need a greedy `.*` prefix.
static DECLARATION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"-\*-\s*(.+?)\s*-\*-").expect("declaration pattern compiles"));

/// Which lines of a document may carry a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
	/// Lines inspected from the start of the document.
	pub head: usize,
	/// Whether the last `head - 1` lines are inspected after the head.
	pub tail: bool,
}

impl Default for ScanWindow {
	fn default() -> Self {
		Self {
			head: DEFAULT_HEAD_LINE_COUNT,
			tail: false,
		}
	}
}

impl ScanWindow {
	pub fn from_config(config: &Config) -> Self {
		Self {
			head: config.head_line_count,
			tail: config.scan_tail,
		}
	}

	/// Line indices to inspect, head first, then the tail walking backwards.
	///
	/// Tail lines already covered by the head are not repeated.
	pub fn line_indices(&self, line_count: usize) -> Vec<usize> {
		let head_end = self.head.min(line_count);
		let mut indices: Vec<usize> = (0..head_end).collect();
		if self.tail {
			indices.extend(
				(0..self.head.saturating_sub(1))
					.map_while(|back| line_count.checked_sub(back + 1))
					.take_while(|&idx| idx >= head_end),
			);
		}
		indices
	}
}

/// Extracts the declaration from a single line.
pub fn parse_declaration(line: &str) -> Option<&str> {
	DECLARATION_RE
		.captures(line)
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str())
}

/// Every declaration in the scan window, in scan order.
pub fn candidates<'a, D>(doc: &'a D, window: ScanWindow) -> impl Iterator<Item = String> + 'a
where
	D: DocumentLines + ?Sized,
{
	window
		.line_indices(doc.line_count())
		.into_iter()
		.filter_map(move |idx| {
			let line = doc.line_text(idx)?;
			parse_declaration(&line).map(str::to_string)
		})
}

/// The first declaration in the scan window.
pub fn locate<D>(doc: &D, window: ScanWindow) -> Option<String>
where
	D: DocumentLines + ?Sized,
{
	candidates(doc, window).next()
}
