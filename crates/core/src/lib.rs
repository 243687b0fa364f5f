//! Emacs-style file variables for a host editor.
//!
//! Scans the first lines of a buffer (and optionally its last lines) for a
//! declaration such as
//!
//! ```text
//! # -*- mode: python; tab-width: 4; indent-tabs-mode: nil; coding: utf-8-unix -*-
//! ```
//!
//! and applies what it declares to the buffer.
//!
//! # Architecture
//!
//! * [`locate`]: finding the declaration line in the scan window
//! * [`tokenize`]: splitting a declaration into [`ParsedPair`]s
//! * [`resolve`]: dispatching pairs to host settings
//! * [`value`]: typed values and literal coercion for host-prefixed keys
//! * [`host`]: the capabilities a host editor provides
//! * [`activation`]: the event-driven entry point, [`FileVariables`]
//!
//! Mode names are resolved through [`filevars_registry::ModeRegistry`].

pub mod activation;
pub mod error;
pub mod host;
pub mod locate;
pub mod resolve;
pub mod tokenize;
pub mod value;

pub use activation::{Event, FileVariables, Resolution};
pub use error::{Error, Result};
pub use host::{DocumentLines, HostBuffer, MemoryBuffer, SettingsStore};
pub use locate::{ScanWindow, candidates, locate};
pub use resolve::{Applied, FileVariable, Resolver};
pub use tokenize::{ParsedPair, tokenize};
pub use value::{CoerceError, LineEnding, OptionValue, coerce};
