//! In-memory collaborator implementation.
//!
//! A [`Catalog`] holds element definitions registered up front and answers
//! every collaborator role from them. Build one with [`Catalog::builder`] or
//! load one from a TOML catalog file ([`Catalog::from_toml_str`], [`Catalog::load`]).

mod file;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

pub use self::file::CatalogError;
use crate::error::DependencyError;
use crate::hooks::LifecycleHook;
use crate::identity::Identity;
use crate::raw::{ChangeDetectionStrategy, ElementMeta, RawDeclarationMetadata, ViewMetadata};
use crate::services::{AnnotationStore, DeclarationTreeStore, Introspector, ViewResolver};
use crate::tree::DeclarationEntry;

/// Everything the catalog knows about one element.
#[derive(Debug, Clone)]
pub struct ElementDef {
	/// Key the element is registered under.
	pub identity: Identity,
	/// Raw metadata served by the annotation store role.
	pub raw: RawDeclarationMetadata,
	/// View metadata; present exactly for composite elements.
	pub view: Option<ViewMetadata>,
	/// Lifecycle hooks the element implements.
	pub hooks: Vec<LifecycleHook>,
	/// Import locator reported when the element has no module identifier.
	pub locator: Option<String>,
	/// Declaration tree served by the tree store role.
	pub declarations: Vec<DeclarationEntry>,
}

impl ElementDef {
	/// Defines an element without a view.
	pub fn plain(identity: Identity, element: ElementMeta) -> Self {
		Self {
			identity,
			raw: RawDeclarationMetadata::Plain(element),
			view: None,
			hooks: Vec::new(),
			locator: None,
			declarations: Vec::new(),
		}
	}

	/// Defines an element with a view.
	pub fn composite(
		identity: Identity,
		element: ElementMeta,
		view: ViewMetadata,
		change_detection: ChangeDetectionStrategy,
	) -> Self {
		Self {
			identity,
			raw: RawDeclarationMetadata::Composite {
				element,
				change_detection,
			},
			view: Some(view),
			hooks: Vec::new(),
			locator: None,
			declarations: Vec::new(),
		}
	}

	pub fn with_hooks(mut self, hooks: impl IntoIterator<Item = LifecycleHook>) -> Self {
		self.hooks = hooks.into_iter().collect();
		self
	}

	pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
		self.locator = Some(locator.into());
		self
	}

	pub fn with_declarations(mut self, declarations: impl IntoIterator<Item = DeclarationEntry>) -> Self {
		self.declarations = declarations.into_iter().collect();
		self
	}
}

/// Element definitions keyed by identity.
#[derive(Debug, Default)]
pub struct Catalog {
	elements: FxHashMap<Identity, ElementDef>,
	names: IndexMap<String, Identity>,
}

impl Catalog {
	/// Starts an empty catalog.
	pub fn builder() -> CatalogBuilder {
		CatalogBuilder::default()
	}

	/// Looks up an element identity by display name.
	///
	/// When several elements share a name, the first registered wins.
	pub fn identity(&self, name: &str) -> Option<&Identity> {
		self.names.get(name)
	}

	/// Returns the definition registered for `identity`.
	pub fn get(&self, identity: &Identity) -> Option<&ElementDef> {
		self.elements.get(identity)
	}

	/// Iterates identities in registration order.
	pub fn identities(&self) -> impl Iterator<Item = &Identity> {
		self.names.values()
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	fn require(&self, service: &'static str, identity: &Identity) -> Result<&ElementDef, DependencyError> {
		self.elements
			.get(identity)
			.ok_or_else(|| DependencyError::service(service, format!("unknown element '{identity}'")))
	}
}

/// Accumulates element definitions.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	catalog: Catalog,
}

impl CatalogBuilder {
	/// Registers a definition, replacing any earlier one for the same identity.
	pub fn element(mut self, def: ElementDef) -> Self {
		self.catalog
			.names
			.entry(def.identity.name().to_string())
			.or_insert_with(|| def.identity.clone());
		self.catalog.elements.insert(def.identity.clone(), def);
		self
	}

	pub fn build(self) -> Catalog {
		self.catalog
	}
}

impl AnnotationStore for Catalog {
	fn raw_metadata(&self, identity: &Identity) -> Result<Option<RawDeclarationMetadata>, DependencyError> {
		Ok(self.elements.get(identity).map(|def| def.raw.clone()))
	}
}

impl ViewResolver for Catalog {
	fn view_metadata(&self, identity: &Identity) -> Result<ViewMetadata, DependencyError> {
		self.require("views", identity)?
			.view
			.clone()
			.ok_or_else(|| DependencyError::service("views", format!("'{identity}' declares no view")))
	}
}

impl Introspector for Catalog {
	fn implements_hook(&self, identity: &Identity, hook: LifecycleHook) -> Result<bool, DependencyError> {
		Ok(self.require("introspector", identity)?.hooks.contains(&hook))
	}

	fn import_locator(&self, identity: &Identity) -> Result<String, DependencyError> {
		self.require("introspector", identity)?
			.locator
			.clone()
			.ok_or_else(|| DependencyError::service("introspector", format!("no import locator for '{identity}'")))
	}
}

impl DeclarationTreeStore for Catalog {
	fn declaration_tree(&self, identity: &Identity) -> Result<Vec<DeclarationEntry>, DependencyError> {
		Ok(self.require("declaration trees", identity)?.declarations.clone())
	}
}

#[cfg(test)]
mod tests;
