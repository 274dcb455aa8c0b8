use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;
use wgsl_sync_cli::SyncCli;
use wgsl_sync_core::CanonicalSet;
use wgsl_sync_core::SyncConfig;
use wgsl_sync_core::sync::FileOutcome;
use wgsl_sync_core::sync::ResolvedPaths;
use wgsl_sync_core::sync::SyncMode;
use wgsl_sync_core::sync::SyncObserver;
use wgsl_sync_core::sync::SyncOptions;
use wgsl_sync_core::sync::resolve_paths;
use wgsl_sync_core::sync::sync_directory_with;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SyncCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	match run(&args) {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			match e.downcast::<wgsl_sync_core::SyncError>() {
				Ok(sync_err) => {
					let report: miette::Report = (*sync_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Diagnostics go to stderr so stdout stays a clean progress log.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("wgsl_sync_core=debug,wgsl_sync_cli=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init()
		.ok();
}

/// Run the sync and return whether every file is in sync. Only `--check`
/// can report `false`.
fn run(args: &SyncCli) -> Result<bool, Box<dyn std::error::Error>> {
	let paths = resolve_paths(&args.types_file, args.dir.as_deref());
	let mode = args.mode();
	tracing::debug!(?mode, types_file = %paths.types_file.display(), "starting sync");

	println!("Types file: {}", paths.types_file.display());
	println!("Target directory: {}", paths.target_dir.display());
	match mode {
		SyncMode::DryRun => println!("[DRY RUN MODE - No files will be modified]"),
		SyncMode::Check => println!("[CHECK MODE - No files will be modified]"),
		SyncMode::Write => {}
	}
	println!();

	let options = SyncOptions {
		types_file: args.types_file.clone(),
		target_dir: args.dir.clone(),
		mode,
		extension: args.extension.clone(),
	};
	let mut progress = ConsoleProgress {
		mode,
		show_diff: args.diff,
	};
	let report = sync_directory_with(&options, &mut progress)?;

	let out_of_sync = report.changed_files().count();
	let in_sync = mode != SyncMode::Check || out_of_sync == 0;

	if mode == SyncMode::Check && !report.files.is_empty() {
		if in_sync {
			println!("All files are in sync.");
		} else {
			eprintln!(
				"{} {out_of_sync} file(s) out of sync. Run without `--check` to update them.",
				colored!("error:", red)
			);
		}
	}

	println!("Done!");

	Ok(in_sync)
}

/// Prints the progress log to stdout as the core driver advances.
struct ConsoleProgress {
	mode: SyncMode,
	show_diff: bool,
}

impl SyncObserver for ConsoleProgress {
	fn canonical_loaded(&mut self, paths: &ResolvedPaths, canonical: &CanonicalSet) {
		if canonical.is_empty() {
			println!(
				"No struct definitions found in {}",
				paths.types_file.display()
			);
			return;
		}

		println!(
			"Found {} struct(s) in {}:",
			canonical.len(),
			paths.types_file.display()
		);
		for name in canonical.names() {
			println!("  - {name}");
		}
		println!();
	}

	fn targets_found(&mut self, paths: &ResolvedPaths, config: &SyncConfig, targets: &[PathBuf]) {
		if targets.is_empty() {
			println!(
				"No other .{} files found in {}",
				config.extension.trim_start_matches('.'),
				paths.target_dir.display()
			);
			return;
		}

		println!("Processing {} file(s)...", targets.len());
		println!();
	}

	fn file_started(&mut self, path: &Path) {
		println!("Processing {}...", display_name(path));
	}

	fn file_finished(&mut self, outcome: &FileOutcome) {
		print_outcome(outcome, self.mode, self.show_diff);
		println!();
	}
}

fn print_outcome(outcome: &FileOutcome, mode: SyncMode, show_diff: bool) {
	if !outcome.has_matches() {
		println!("  - No matching structs found");
		return;
	}

	let names = outcome.matched.join(", ");
	let path = outcome.path.display();

	match mode {
		SyncMode::Write => {
			println!("  {} Updated struct(s): {names}", colored!("✓", green));
			println!("  {} Wrote changes to {path}", colored!("✓", green));
		}
		SyncMode::DryRun => {
			println!("  {} Updated struct(s): {names}", colored!("✓", green));
			println!("  [DRY RUN] Would write changes to {path}");
		}
		SyncMode::Check => {
			println!("  Found struct(s): {names}");
			if outcome.is_changed() {
				println!("  {} Out of sync: {path}", colored!("✗", yellow));
			} else {
				println!("  {} Up to date: {path}", colored!("✓", green));
			}
		}
	}

	if show_diff && outcome.is_changed() {
		print_diff(&outcome.original, &outcome.updated);
	}
}

/// Print a line diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}

	if !expected.ends_with('\n') {
		println!();
	}
}

fn display_name(path: &Path) -> String {
	path.file_name()
		.map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
