//! TOML catalog files.
//!
//! ```toml
//! [[element]]
//! name = "HeroList"
//! selector = "hero-list"
//! module_id = "heroes/hero_list"
//! inputs = ["heroes", "selected: current"]
//! hooks = ["OnInit"]
//! declarations = ["HeroDetail", ["Highlight", { forward = "Tooltip" }]]
//!
//! [element.view]
//! template = "<hero-detail></hero-detail>"
//! ```
//!
//! A table with a `view` is a composite element. Declaration values name
//! other elements; names that match no element are kept as string literals
//! and fail validation when the tree is resolved.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use super::{Catalog, ElementDef};
use crate::hooks::LifecycleHook;
use crate::identity::Identity;
use crate::raw::{ChangeDetectionStrategy, ElementMeta, ViewMetadata};
use crate::tree::{DeclarationEntry, Literal, forward_ref};

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The file could not be read.
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	/// The file is not valid TOML or has unknown keys.
	#[error("invalid catalog: {0}")]
	Parse(#[from] toml::de::Error),
	/// Two tables share a name.
	#[error("element '{0}' is defined more than once")]
	DuplicateElement(String),
	/// A table combines fields inconsistently.
	#[error("element '{element}': {reason}")]
	Invalid { element: String, reason: &'static str },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogFile {
	#[serde(rename = "element")]
	elements: Vec<ElementRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementRecord {
	name: String,
	selector: Option<String>,
	export_as: Option<String>,
	#[serde(default)]
	inputs: Vec<String>,
	#[serde(default)]
	outputs: Vec<String>,
	#[serde(default)]
	host: IndexMap<String, String>,
	module_id: Option<String>,
	locator: Option<String>,
	#[serde(default)]
	hooks: Vec<LifecycleHook>,
	#[serde(default)]
	declarations: Vec<DeclarationValue>,
	view: Option<ViewMetadata>,
	change_detection: Option<ChangeDetectionStrategy>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DeclarationValue {
	Name(String),
	Bool(bool),
	Number(f64),
	List(Vec<DeclarationValue>),
	Forward { forward: String },
}

type NameTable = Arc<IndexMap<String, Identity>>;

fn lookup(names: &NameTable, name: &str) -> DeclarationEntry {
	match names.get(name) {
		Some(id) => DeclarationEntry::Element(id.clone()),
		None => Literal::String(name.to_string()).into(),
	}
}

impl DeclarationValue {
	fn into_entry(self, names: &NameTable) -> DeclarationEntry {
		match self {
			Self::Name(name) => lookup(names, &name),
			Self::Bool(v) => Literal::Bool(v).into(),
			Self::Number(v) => Literal::Number(v).into(),
			Self::List(items) => DeclarationEntry::list(items.into_iter().map(|item| item.into_entry(names))),
			Self::Forward { forward } => {
				let names = Arc::clone(names);
				forward_ref(move || lookup(&names, &forward))
			}
		}
	}
}

impl Catalog {
	/// Parses a catalog document.
	pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
		let file: CatalogFile = toml::from_str(content)?;

		let mut names = IndexMap::with_capacity(file.elements.len());
		let mut identities = Vec::with_capacity(file.elements.len());
		for record in &file.elements {
			let identity = Identity::new(record.name.as_str());
			if names.insert(record.name.clone(), identity.clone()).is_some() {
				return Err(CatalogError::DuplicateElement(record.name.clone()));
			}
			identities.push(identity);
		}
		let names: NameTable = Arc::new(names);

		let mut builder = Catalog::builder();
		for (record, identity) in file.elements.into_iter().zip(identities) {
			let element = ElementMeta {
				selector: record.selector,
				export_as: record.export_as,
				inputs: record.inputs,
				outputs: record.outputs,
				host: record.host,
				module_id: record.module_id,
			};
			let mut def = match (record.view, record.change_detection) {
				(Some(view), strategy) => {
					ElementDef::composite(identity, element, view, strategy.unwrap_or_default())
				}
				(None, Some(_)) => {
					return Err(CatalogError::Invalid {
						element: record.name,
						reason: "change_detection requires a view",
					});
				}
				(None, None) => ElementDef::plain(identity, element),
			};
			def = def
				.with_hooks(record.hooks)
				.with_declarations(record.declarations.into_iter().map(|value| value.into_entry(&names)));
			if let Some(locator) = record.locator {
				def = def.with_locator(locator);
			}
			builder = builder.element(def);
		}
		Ok(builder.build())
	}

	/// Reads and parses a catalog file.
	pub fn load(path: &Path) -> Result<Self, CatalogError> {
		let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&content)
	}
}
