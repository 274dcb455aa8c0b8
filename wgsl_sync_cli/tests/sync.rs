mod common;

use predicates::prelude::PredicateBooleanExt;
use wgsl_sync_core::AnyEmptyResult;

const TYPES: &str = "struct Vertex {\n    pos: vec3<f32>,\n    normal: vec3<f32>,\n    uv: \
                     vec2<f32>,\n}\n";

#[test]
fn sync_updates_matching_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(
		tmp.path().join("a.wgsl"),
		"struct Vertex {\n    pos: vec2<f32>,\n}\n\n@vertex\nfn main() {}\n",
	)?;
	let b = "struct Light {\n    color: vec3<f32>,\n}\n";
	std::fs::write(tmp.path().join("b.wgsl"), b)?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 1 struct(s)"))
		.stdout(predicates::str::contains("  - Vertex"))
		.stdout(predicates::str::contains("Processing 2 file(s)..."))
		.stdout(predicates::str::contains("Updated struct(s): Vertex"))
		.stdout(predicates::str::contains("Wrote changes to"))
		.stdout(predicates::str::contains("No matching structs found"))
		.stdout(predicates::str::contains("Done!"));

	let a = std::fs::read_to_string(tmp.path().join("a.wgsl"))?;
	assert_eq!(a, format!("{}\n\n@vertex\nfn main() {{}}\n", TYPES.trim_end()));
	assert_eq!(std::fs::read_to_string(tmp.path().join("b.wgsl"))?, b);
	assert_eq!(std::fs::read_to_string(tmp.path().join("types.wgsl"))?, TYPES);

	Ok(())
}

#[test]
fn sync_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	let a = "struct Vertex {\n    pos: vec2<f32>,\n}\n";
	std::fs::write(tmp.path().join("a.wgsl"), a)?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"[DRY RUN MODE - No files will be modified]",
		))
		.stdout(predicates::str::contains("[DRY RUN] Would write changes to"))
		.stdout(predicates::str::contains("Wrote changes").not());

	assert_eq!(std::fs::read_to_string(tmp.path().join("a.wgsl"))?, a);

	Ok(())
}

#[test]
fn sync_missing_types_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let a = "struct Vertex {\n    pos: vec2<f32>,\n}\n";
	std::fs::write(tmp.path().join("a.wgsl"), a)?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("types file not found"))
		.stdout(predicates::str::contains("Done!").not());

	assert_eq!(std::fs::read_to_string(tmp.path().join("a.wgsl"))?, a);

	Ok(())
}

#[test]
fn sync_without_structs_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), "// no structs yet\n")?;
	let a = "struct Vertex {\n    pos: vec2<f32>,\n}\n";
	std::fs::write(tmp.path().join("a.wgsl"), a)?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.success()
		.stdout(predicates::str::contains("No struct definitions found in"))
		.stdout(predicates::str::contains("Done!"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("a.wgsl"))?, a);

	Ok(())
}

#[test]
fn sync_without_other_files_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(tmp.path().join("readme.md"), "struct Vertex { a: f32 }")?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.success()
		.stdout(predicates::str::contains("No other .wgsl files found in"));

	Ok(())
}

#[test]
fn sync_uses_dir_option() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let shaders = tmp.path().join("shaders");
	std::fs::create_dir(&shaders)?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(tmp.path().join("sibling.wgsl"), "struct Vertex { a: f32 }")?;
	std::fs::write(shaders.join("pass.wgsl"), "struct Vertex { a: f32 }")?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.arg("--dir")
		.arg(&shaders)
		.assert()
		.success()
		.stdout(predicates::str::contains("Processing 1 file(s)..."));

	assert_eq!(
		std::fs::read_to_string(shaders.join("pass.wgsl"))?,
		TYPES.trim_end()
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("sibling.wgsl"))?,
		"struct Vertex { a: f32 }"
	);

	Ok(())
}

#[test]
fn sync_respects_config_excludes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(
		tmp.path().join("wgsl_sync.toml"),
		"exclude = [\"vendor_*.wgsl\"]\n",
	)?;
	let vendor = "struct Vertex { a: f32 }";
	std::fs::write(tmp.path().join("vendor_mesh.wgsl"), vendor)?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.success()
		.stdout(predicates::str::contains("No other .wgsl files found in"));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("vendor_mesh.wgsl"))?,
		vendor
	);

	Ok(())
}

#[test]
fn sync_invalid_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(tmp.path().join("wgsl_sync.toml"), "exclude = 3\n")?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn sync_aborts_on_unreadable_target() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("types.wgsl"), TYPES)?;
	std::fs::write(tmp.path().join("bad.wgsl"), b"\xff\xfe\x00\x80")?;

	common::sync_cmd()
		.arg(tmp.path().join("types.wgsl"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to read"))
		.stdout(predicates::str::contains("Processing bad.wgsl..."))
		.stdout(predicates::str::contains("Done!").not());

	assert_eq!(
		std::fs::read(tmp.path().join("bad.wgsl"))?,
		b"\xff\xfe\x00\x80".to_vec()
	);

	Ok(())
}
