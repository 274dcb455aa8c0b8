use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SyncError {
	#[error(transparent)]
	#[diagnostic(code(wgsl_sync::io_error))]
	Io(#[from] std::io::Error),

	#[error("types file not found: `{}`", path.display())]
	#[diagnostic(
		code(wgsl_sync::types_file_not_found),
		help("pass the path to the WGSL file holding the canonical struct definitions")
	)]
	TypesFileNotFound { path: PathBuf },

	#[error("failed to read `{}`", path.display())]
	#[diagnostic(code(wgsl_sync::read_file))]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{}`", path.display())]
	#[diagnostic(
		code(wgsl_sync::write_file),
		help("files processed before this one have already been written")
	)]
	WriteFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wgsl_sync::config_parse),
		help("wgsl_sync.toml accepts only `extension` and `exclude` keys")
	)]
	ConfigParse(String),

	#[error("invalid exclude pattern `{pattern}`: {reason}")]
	#[diagnostic(code(wgsl_sync::invalid_glob))]
	InvalidGlob { pattern: String, reason: String },

	#[error("failed to build struct pattern: {0}")]
	#[diagnostic(code(wgsl_sync::invalid_pattern))]
	InvalidPattern(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
