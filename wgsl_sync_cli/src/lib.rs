use std::path::PathBuf;

use clap::Parser;
use wgsl_sync_core::sync::SyncMode;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Sync WGSL struct definitions from a types file to other shader files.",
	long_about = "wgsl-sync copies every struct definition in a canonical types file, verbatim, \
	              into each other shader file in a directory that already declares a struct of \
	              the same name.\n\nStruct bodies end at the first closing brace, so structs \
	              with nested braces are not supported.\n\nExamples:\n  wgsl-sync \
	              shaders/types.wgsl\n  wgsl-sync shaders/types.wgsl --dir shaders/passes \
	              --dry-run\n  wgsl-sync shaders/types.wgsl --check --diff"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct SyncCli {
	/// Path to the types file containing the canonical struct definitions.
	pub types_file: PathBuf,

	/// Directory containing the shader files to update. Defaults to the
	/// directory of the types file.
	#[arg(long)]
	pub dir: Option<PathBuf>,

	/// Show what would be changed without modifying files.
	#[arg(long, default_value_t = false, conflicts_with = "check")]
	pub dry_run: bool,

	/// Exit with a non-zero status if any file is out of sync. Never writes.
	/// Ideal for CI pipelines.
	#[arg(long, default_value_t = false)]
	pub check: bool,

	/// Show a line diff for every file whose content would change.
	#[arg(long, default_value_t = false)]
	pub diff: bool,

	/// File extension of shader sources to scan. Overrides `extension` in
	/// `wgsl_sync.toml`.
	#[arg(long)]
	pub extension: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl SyncCli {
	pub fn mode(&self) -> SyncMode {
		if self.check {
			SyncMode::Check
		} else if self.dry_run {
			SyncMode::DryRun
		} else {
			SyncMode::Write
		}
	}
}
