use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::Value;

use super::*;
use crate::cli::Cli;

const CATALOG: &str = r#"
[[element]]
name = "Shell"
selector = "app-shell"
module_id = "demo/shell"
hooks = ["OnDestroy", "OnInit"]
declarations = ["Nav", { forward = "Footer" }, "Nav"]
change_detection = "OnPush"

[element.view]
template = "<nav></nav>"
encapsulation = "None"

[[element]]
name = "Nav"
selector = "nav"
module_id = "demo/nav"
outputs = ["navigate: go"]

[[element]]
name = "Footer"
selector = "footer"
module_id = "demo/footer"

[[element]]
name = "Banner"
selector = "banner"
module_id = "demo/banner"

[[element]]
name = "Bad"
declarations = [1]
"#;

struct Fixture {
	_dir: tempfile::TempDir,
	catalog: PathBuf,
	config: PathBuf,
}

fn fixture() -> Fixture {
	let dir = tempfile::tempdir().unwrap();
	let catalog = dir.path().join("catalog.toml");
	let config = dir.path().join("stencil.toml");
	std::fs::write(&catalog, CATALOG).unwrap();
	std::fs::write(&config, "[resolver]\nmodule_suffix = \".js\"\n").unwrap();
	Fixture {
		_dir: dir,
		catalog,
		config,
	}
}

fn exec(args: &[&str]) -> Result<Value> {
	let cli = Cli::try_parse_from(args)?;
	let mut out = Vec::new();
	run(cli.command, &mut out)?;
	Ok(serde_json::from_slice(&out)?)
}

fn names(value: &Value) -> Vec<&str> {
	value
		.as_array()
		.unwrap()
		.iter()
		.map(|d| d["type"]["name"].as_str().unwrap())
		.collect()
}

#[test]
fn resolve_prints_sorted_tree() {
	let fx = fixture();
	let catalog = fx.catalog.to_str().unwrap();

	let value = exec(&["stencil", "resolve", catalog, "Shell"]).unwrap();
	assert_eq!(names(&value), vec!["Footer", "Nav"]);
	assert_eq!(value[1]["outputs"]["navigate"], "go");
	assert_eq!(value[1]["type"]["module_url"], "package:demo/nav");
}

#[test]
fn resolve_with_ambient_and_config() {
	let fx = fixture();
	let catalog = fx.catalog.to_str().unwrap();
	let config = fx.config.to_str().unwrap();

	let value = exec(&[
		"stencil", "resolve", catalog, "Shell", "--ambient", "Banner", "--ambient", "Nav", "--config", config,
	])
	.unwrap();
	assert_eq!(names(&value), vec!["Banner", "Footer", "Nav"]);
	assert_eq!(value[0]["type"]["module_url"], "package:demo/banner.js");
}

#[test]
fn describe_prints_one_descriptor() {
	let fx = fixture();
	let catalog = fx.catalog.to_str().unwrap();

	let value = exec(&["stencil", "describe", catalog, "Shell"]).unwrap();
	assert_eq!(value["selector"], "app-shell");
	assert_eq!(value["is_composite"], true);
	assert_eq!(value["dynamic_loadable"], true);
	assert_eq!(value["change_detection"], "OnPush");
	assert_eq!(value["template"]["encapsulation"], "None");
	assert_eq!(value["lifecycle_hooks"], serde_json::json!(["OnInit", "OnDestroy"]));
}

#[test]
fn unknown_names_are_reported() {
	let fx = fixture();
	let catalog = fx.catalog.to_str().unwrap();

	let err = exec(&["stencil", "describe", catalog, "Nope"]).unwrap_err();
	assert_eq!(err.to_string(), "no element named 'Nope' in catalog");

	let err = exec(&["stencil", "resolve", catalog, "Shell", "--ambient", "Nope"]).unwrap_err();
	assert_eq!(err.to_string(), "no element named 'Nope' in catalog");
}

#[test]
fn invalid_tree_fails() {
	let fx = fixture();
	let catalog = fx.catalog.to_str().unwrap();

	let err = exec(&["stencil", "resolve", catalog, "Bad"]).unwrap_err();
	assert_eq!(
		err.to_string(),
		"unexpected declaration value '1' in the declaration tree of 'Bad'"
	);
}

#[test]
fn missing_catalog_has_context() {
	let err = exec(&["stencil", "describe", "/nonexistent/catalog.toml", "Shell"]).unwrap_err();
	assert_eq!(err.to_string(), "loading catalog /nonexistent/catalog.toml");
}
