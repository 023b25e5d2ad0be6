//! The canonical, fully resolved descriptor handed to code generators.

use indexmap::IndexMap;
use serde::Serialize;

use crate::hooks::LifecycleHook;
use crate::identity::Identity;
use crate::raw::{ChangeDetectionStrategy, ElementMeta, ViewEncapsulation, ViewMetadata};

/// Names an element's runtime type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
	/// Display name of the identity.
	pub name: String,
	/// Locator of the module defining the element.
	pub module_url: String,
	/// The identity this descriptor was resolved from.
	#[serde(skip)]
	pub runtime: Identity,
}

/// Normalized view metadata of a composite element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
	/// Style scoping mode.
	pub encapsulation: ViewEncapsulation,
	/// Inline template source.
	pub template: Option<String>,
	/// Template location, when not inline.
	pub template_url: Option<String>,
	/// Inline style sheets.
	pub styles: Vec<String>,
	/// Style sheet locations.
	pub style_urls: Vec<String>,
}

impl From<ViewMetadata> for TemplateDescriptor {
	fn from(view: ViewMetadata) -> Self {
		Self {
			encapsulation: view.encapsulation,
			template: view.template,
			template_url: view.template_url,
			styles: view.styles,
			style_urls: view.style_urls,
		}
	}
}

/// Host bindings split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostBindings {
	/// `(event)` keys, keyed by event name.
	pub listeners: IndexMap<String, String>,
	/// `[property]` keys, keyed by property name.
	pub properties: IndexMap<String, String>,
	/// Every other key, verbatim.
	pub attributes: IndexMap<String, String>,
}

impl HostBindings {
	/// Classifies each host key by its bracket style.
	pub fn classify(host: &IndexMap<String, String>) -> Self {
		let mut out = Self::default();
		for (key, value) in host {
			if let Some(event) = key.strip_prefix('(').and_then(|k| k.strip_suffix(')')).filter(|k| !k.is_empty()) {
				out.listeners.insert(event.to_string(), value.clone());
			} else if let Some(prop) = key.strip_prefix('[').and_then(|k| k.strip_suffix(']')).filter(|k| !k.is_empty()) {
				out.properties.insert(prop.to_string(), value.clone());
			} else {
				out.attributes.insert(key.clone(), value.clone());
			}
		}
		out
	}
}

/// Parses binding specs into an ordered `dirProp -> elProp` map.
///
/// `"value"` maps to itself; `"value: ngValue"` maps `value` to `ngValue`.
pub fn parse_bindings(specs: &[String]) -> IndexMap<String, String> {
	specs
		.iter()
		.map(|spec| match spec.split_once(':') {
			Some((dir, el)) => (dir.trim().to_string(), el.trim().to_string()),
			None => (spec.trim().to_string(), spec.trim().to_string()),
		})
		.collect()
}

/// Fully resolved metadata for one identity.
///
/// Immutable once built. The composite flag, the template and the change
/// detection strategy are set together from a single classification, so
/// `is_composite() == template().is_some() == change_detection().is_some()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalDescriptor {
	/// Selector matching the element in templates.
	pub selector: Option<String>,
	/// Name under which templates may reference the element instance.
	pub export_as: Option<String>,
	is_composite: bool,
	/// Always true for descriptors produced by the resolver.
	pub dynamic_loadable: bool,
	#[serde(rename = "type")]
	/// The element's runtime type and defining module.
	pub type_: TypeDescriptor,
	template: Option<TemplateDescriptor>,
	change_detection: Option<ChangeDetectionStrategy>,
	/// Input bindings, `dirProp -> elProp`.
	pub inputs: IndexMap<String, String>,
	/// Output bindings, `dirProp -> elProp`.
	pub outputs: IndexMap<String, String>,
	/// Host bindings exactly as declared.
	pub host: IndexMap<String, String>,
	/// Host bindings split into listeners, properties and attributes.
	pub host_bindings: HostBindings,
	/// Implemented hooks, in [`LifecycleHook::ALL`] order.
	pub lifecycle_hooks: Vec<LifecycleHook>,
}

impl CanonicalDescriptor {
	pub(crate) fn build(
		element: &ElementMeta,
		type_: TypeDescriptor,
		composite: Option<(TemplateDescriptor, ChangeDetectionStrategy)>,
		lifecycle_hooks: Vec<LifecycleHook>,
	) -> Self {
		let (template, change_detection) = match composite {
			Some((template, strategy)) => (Some(template), Some(strategy)),
			None => (None, None),
		};
		Self {
			selector: element.selector.clone(),
			export_as: element.export_as.clone(),
			is_composite: template.is_some(),
			dynamic_loadable: true,
			type_,
			template,
			change_detection,
			inputs: parse_bindings(&element.inputs),
			outputs: parse_bindings(&element.outputs),
			host: element.host.clone(),
			host_bindings: HostBindings::classify(&element.host),
			lifecycle_hooks,
		}
	}

	/// Returns true if the element carries a renderable view.
	pub fn is_composite(&self) -> bool {
		self.is_composite
	}

	/// Returns the template descriptor of a composite element.
	pub fn template(&self) -> Option<&TemplateDescriptor> {
		self.template.as_ref()
	}

	/// Returns the change detection strategy of a composite element.
	pub fn change_detection(&self) -> Option<ChangeDetectionStrategy> {
		self.change_detection
	}

	/// Returns the identity this descriptor was resolved from.
	pub fn identity(&self) -> &Identity {
		&self.type_.runtime
	}
}
