use std::path::Path;
use std::path::PathBuf;

use crate::CanonicalSet;
use crate::SyncConfig;
use crate::SyncError;
use crate::SyncResult;
use crate::Synchronizer;
use crate::extract_structs;

/// How a sync run treats files whose structs were matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
	/// Write rewritten content back to disk.
	#[default]
	Write,
	/// Report what would change without writing.
	DryRun,
	/// Like `DryRun`; callers treat any changed file as a failure.
	Check,
}

impl SyncMode {
	pub fn writes(self) -> bool {
		matches!(self, Self::Write)
	}
}

/// Inputs for a single sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
	/// File holding the canonical struct definitions.
	pub types_file: PathBuf,
	/// Directory to scan. Defaults to the parent of `types_file`.
	pub target_dir: Option<PathBuf>,
	pub mode: SyncMode,
	/// Overrides the extension from the directory config.
	pub extension: Option<String>,
}

/// Absolute paths for a run after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
	pub types_file: PathBuf,
	pub target_dir: PathBuf,
}

/// The outcome of syncing one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
	pub path: PathBuf,
	/// Canonical struct names declared in the file, in canonical order.
	pub matched: Vec<String>,
	/// Content before substitution.
	pub original: String,
	/// Content after substitution.
	pub updated: String,
	/// Whether `updated` was written back to `path`.
	pub written: bool,
}

impl FileOutcome {
	pub fn has_matches(&self) -> bool {
		!self.matched.is_empty()
	}

	/// Whether substitution produced different text.
	pub fn is_changed(&self) -> bool {
		self.original != self.updated
	}
}

/// Everything a full run produced.
#[derive(Debug, Clone)]
pub struct SyncReport {
	pub paths: ResolvedPaths,
	pub canonical: CanonicalSet,
	/// Candidate files in processing order. Empty when the canonical set is
	/// empty or no candidates were found.
	pub files: Vec<FileOutcome>,
}

impl SyncReport {
	/// Files that declared at least one canonical struct.
	pub fn matched_files(&self) -> impl Iterator<Item = &FileOutcome> {
		self.files.iter().filter(|file| file.has_matches())
	}

	/// Files whose content differs from the canonical definitions.
	pub fn changed_files(&self) -> impl Iterator<Item = &FileOutcome> {
		self.files.iter().filter(|file| file.is_changed())
	}

	pub fn is_in_sync(&self) -> bool {
		self.changed_files().next().is_none()
	}
}

/// Make `path` absolute, resolving symlinks when it exists.
pub fn resolve_path(path: &Path) -> PathBuf {
	std::fs::canonicalize(path)
		.or_else(|_| std::path::absolute(path))
		.unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve the types file and the directory to scan.
pub fn resolve_paths(types_file: &Path, target_dir: Option<&Path>) -> ResolvedPaths {
	let types_file = resolve_path(types_file);
	let target_dir = match target_dir {
		Some(dir) => resolve_path(dir),
		None => {
			types_file
				.parent()
				.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
		}
	};

	ResolvedPaths {
		types_file,
		target_dir,
	}
}

/// Read the types file and extract its struct definitions.
pub fn load_canonical(types_file: &Path) -> SyncResult<CanonicalSet> {
	if !types_file.is_file() {
		return Err(SyncError::TypesFileNotFound {
			path: types_file.to_path_buf(),
		});
	}

	let content = read_file(types_file)?;
	Ok(extract_structs(&content))
}

/// List the files in `target_dir` that should receive canonical definitions.
///
/// Files are kept in directory listing order. The types file itself and any
/// file matching an exclude pattern are skipped. A missing directory yields
/// no candidates.
pub fn discover_targets(
	target_dir: &Path,
	types_file: &Path,
	config: &SyncConfig,
) -> SyncResult<Vec<PathBuf>> {
	if !target_dir.is_dir() {
		tracing::debug!(dir = %target_dir.display(), "target directory does not exist");
		return Ok(Vec::new());
	}

	let sources = config.source_glob()?;
	let excluded = config.exclude_glob()?;
	let mut targets = Vec::new();

	for entry in std::fs::read_dir(target_dir)? {
		let entry = entry?;
		let path = entry.path();
		let file_name = entry.file_name();

		if !sources.is_match(&file_name) || !path.is_file() {
			continue;
		}

		if path == types_file {
			tracing::debug!(path = %path.display(), "skipping types file");
			continue;
		}

		if excluded.is_match(&file_name) {
			tracing::debug!(path = %path.display(), "skipping excluded file");
			continue;
		}

		targets.push(path);
	}

	Ok(targets)
}

/// Apply the canonical definitions to one file, writing it back when any
/// struct matched and `mode` allows writes.
pub fn sync_file(
	path: &Path,
	synchronizer: &Synchronizer,
	mode: SyncMode,
) -> SyncResult<FileOutcome> {
	let original = read_file(path)?;
	let substitution = synchronizer.apply(&original);
	let mut written = false;

	if !substitution.matched.is_empty() && mode.writes() {
		std::fs::write(path, &substitution.content).map_err(|source| {
			SyncError::WriteFile {
				path: path.to_path_buf(),
				source,
			}
		})?;
		tracing::info!(path = %path.display(), structs = ?substitution.matched, "wrote file");
		written = true;
	}

	Ok(FileOutcome {
		path: path.to_path_buf(),
		matched: substitution.matched,
		original,
		updated: substitution.content,
		written,
	})
}

/// Progress hooks for [`sync_directory_with`]. Every hook defaults to a no-op.
pub trait SyncObserver {
	/// Called once the types file has been read, including when it declares
	/// no structs.
	fn canonical_loaded(&mut self, _paths: &ResolvedPaths, _canonical: &CanonicalSet) {}

	/// Called with the candidate list, including when it is empty.
	fn targets_found(
		&mut self,
		_paths: &ResolvedPaths,
		_config: &SyncConfig,
		_targets: &[PathBuf],
	) {
	}

	fn file_started(&mut self, _path: &Path) {}

	fn file_finished(&mut self, _outcome: &FileOutcome) {}
}

impl SyncObserver for () {}

/// Run a complete sync: resolve paths, load the canonical set, and process
/// every candidate file in order.
///
/// The first I/O error aborts the run. Files processed before the failure
/// keep their new content.
pub fn sync_directory(options: &SyncOptions) -> SyncResult<SyncReport> {
	sync_directory_with(options, &mut ())
}

/// [`sync_directory`] with progress reported to `observer` as each step
/// finishes.
pub fn sync_directory_with(
	options: &SyncOptions,
	observer: &mut impl SyncObserver,
) -> SyncResult<SyncReport> {
	let paths = resolve_paths(&options.types_file, options.target_dir.as_deref());
	let canonical = load_canonical(&paths.types_file)?;
	observer.canonical_loaded(&paths, &canonical);

	let mut report = SyncReport {
		paths,
		canonical,
		files: Vec::new(),
	};

	if report.canonical.is_empty() {
		return Ok(report);
	}

	let config = load_config(&report.paths.target_dir, options.extension.as_deref())?;
	let targets = discover_targets(
		&report.paths.target_dir,
		&report.paths.types_file,
		&config,
	)?;
	observer.targets_found(&report.paths, &config, &targets);

	if targets.is_empty() {
		return Ok(report);
	}

	let synchronizer = Synchronizer::new(&report.canonical)?;

	for target in targets {
		observer.file_started(&target);
		let outcome = sync_file(&target, &synchronizer, options.mode)?;
		observer.file_finished(&outcome);
		report.files.push(outcome);
	}

	Ok(report)
}

/// Load the directory config and apply an extension override.
pub fn load_config(target_dir: &Path, extension: Option<&str>) -> SyncResult<SyncConfig> {
	let mut config = SyncConfig::load_or_default(target_dir)?;
	if let Some(extension) = extension {
		config.extension = extension.to_string();
	}

	Ok(config)
}

fn read_file(path: &Path) -> SyncResult<String> {
	std::fs::read_to_string(path).map_err(|source| {
		SyncError::ReadFile {
			path: path.to_path_buf(),
			source,
		}
	})
}
