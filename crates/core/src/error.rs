//! Errors that abort processing of a declaration.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	/// `tab-width` is not a non-negative integer; the declaration is treated as corrupt.
	#[error("invalid tab-width '{value}': {source}")]
	TabWidth {
		value: String,
		#[source]
		source: ParseIntError,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
