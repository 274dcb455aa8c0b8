//! `wgsl_sync_core` keeps WGSL struct definitions consistent across shader
//! files. One file holds the canonical definitions; every other shader file in
//! a directory that already declares a struct of the same name receives the
//! canonical text verbatim.
//!
//! ## Processing Pipeline
//!
//! ```text
//! types file
//!   → Extractor (finds `struct Name { ... }` blocks, up to the first `}`)
//!   → CanonicalSet (name → block, later duplicates win)
//!   → Directory scan (`*.wgsl` siblings, minus the types file and excludes)
//!   → Synchronizer (replaces every matching block in each target)
//!   → write back, or report in dry-run / check mode
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Optional `wgsl_sync.toml` in the target directory with the
//!   scanned extension and exclude globs.
//! - [`sync`] — Path resolution, candidate discovery, and the per-file and
//!   whole-directory drivers.
//!
//! Struct blocks are matched textually. A body ends at the first closing
//! brace, so structs containing nested braces are cut short.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use wgsl_sync_core::sync::SyncMode;
//! use wgsl_sync_core::sync::SyncOptions;
//! use wgsl_sync_core::sync::sync_directory;
//!
//! let report = sync_directory(&SyncOptions {
//! 	types_file: PathBuf::from("shaders/types.wgsl"),
//! 	mode: SyncMode::DryRun,
//! 	..SyncOptions::default()
//! })
//! .unwrap();
//!
//! for file in report.matched_files() {
//! 	println!("{}: {}", file.path.display(), file.matched.join(", "));
//! }
//! ```

pub use config::*;
pub use error::*;
pub use structs::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod structs;
pub mod sync;
