//! Mode registry for file-variables resolution.
//!
//! Maps Emacs-style mode names (`python`, `django-html`) to syntax definition
//! resources (`Packages/Python/Python.sublime-syntax`).
//!
//! * [`resources`]: resource discovery ([`ResourceLister`], filesystem and static listers)
//! * [`modes`]: the [`ModeRegistry`] and its discovery pass
//! * [`cache`]: [`SharedModeRegistry`], the lazily built process-wide handle

pub mod cache;
pub mod error;
pub mod modes;
pub mod resources;

pub use cache::SharedModeRegistry;
pub use error::{InsertAction, RegistryError};
pub use modes::{Discovery, ModeRegistry};
pub use resources::{FsResourceLister, ResourceLister, StaticResources, resource_mode_name};
