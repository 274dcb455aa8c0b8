use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use serde::Deserialize;

use crate::SyncError;
use crate::SyncResult;

/// Extension scanned when neither the config nor the command line sets one.
pub const DEFAULT_EXTENSION: &str = "wgsl";

/// Supported config file locations in discovery order (highest precedence
/// first), relative to the target directory.
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["wgsl_sync.toml", ".wgsl_sync.toml"];

/// Configuration loaded from a `wgsl_sync.toml` file in the target directory.
///
/// ```toml
/// extension = "wgsl"
/// exclude = ["generated_*.wgsl", "vendor_*.wgsl"]
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
	/// File extension (without the leading dot) of shader sources to scan.
	#[serde(default = "default_extension")]
	pub extension: String,
	/// Glob patterns matched against file names. Matching files are skipped.
	#[serde(default)]
	pub exclude: Vec<String>,
}

fn default_extension() -> String {
	DEFAULT_EXTENSION.to_string()
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			extension: default_extension(),
			exclude: Vec::new(),
		}
	}
}

impl SyncConfig {
	/// Returns the first existing config file in `dir`.
	pub fn resolve_path(dir: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| dir.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file in `dir`.
	/// Returns `None` if there is no config file.
	pub fn load(dir: &Path) -> SyncResult<Option<SyncConfig>> {
		let Some(config_path) = Self::resolve_path(dir) else {
			return Ok(None);
		};

		let content =
			std::fs::read_to_string(&config_path).map_err(|source| SyncError::ReadFile {
				path: config_path.clone(),
				source,
			})?;
		let config: SyncConfig =
			toml::from_str(&content).map_err(|e| SyncError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), ?config, "loaded config");
		Ok(Some(config))
	}

	/// Load the config from `dir`, falling back to defaults.
	pub fn load_or_default(dir: &Path) -> SyncResult<SyncConfig> {
		Ok(Self::load(dir)?.unwrap_or_default())
	}

	/// The glob that selects candidate file names, e.g. `*.wgsl`.
	pub fn source_glob(&self) -> SyncResult<GlobSet> {
		let extension = self.extension.trim_start_matches('.');
		build_glob_set(&[format!("*.{extension}")])
	}

	/// The compiled exclude patterns.
	pub fn exclude_glob(&self) -> SyncResult<GlobSet> {
		build_glob_set(&self.exclude)
	}
}

/// Build a `GlobSet` from a list of glob pattern strings. `*` never crosses a
/// path separator.
fn build_glob_set(patterns: &[String]) -> SyncResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = GlobBuilder::new(pattern)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				SyncError::InvalidGlob {
					pattern: pattern.clone(),
					reason: e.kind().to_string(),
				}
			})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| {
		SyncError::InvalidGlob {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}
