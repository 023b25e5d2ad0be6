//! Raw declarative metadata, as supplied by the annotation store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a composite element's styles are scoped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewEncapsulation {
	/// Styles are rewritten to apply only to the element's view.
	#[default]
	Emulated,
	/// Styles are attached to a native shadow root.
	Native,
	/// Styles apply globally.
	None,
}

/// When change detection runs for a composite element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeDetectionStrategy {
	/// Checked once, then switched to `Checked`.
	CheckOnce,
	/// Skipped until explicitly switched back to `CheckOnce`.
	Checked,
	/// Checked on every pass.
	CheckAlways,
	/// Detached from the change detection tree.
	Detached,
	/// Checked only when an input reference changes.
	OnPush,
	/// The framework default (`CheckAlways`).
	#[default]
	Default,
}

/// Fields shared by every declarative element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMeta {
	/// CSS-style selector matching the element in templates.
	pub selector: Option<String>,
	/// Name under which templates may reference the element instance.
	pub export_as: Option<String>,
	/// Input binding specs: `"dirProp"` or `"dirProp: elProp"`.
	pub inputs: Vec<String>,
	/// Output binding specs, same syntax as inputs.
	pub outputs: Vec<String>,
	/// Host bindings keyed by `(event)`, `[property]` or attribute name.
	pub host: IndexMap<String, String>,
	/// Explicit module identifier; overrides locator introspection.
	pub module_id: Option<String>,
}

/// Raw metadata for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDeclarationMetadata {
	/// An element without a view.
	Plain(ElementMeta),
	/// An element that also declares a renderable view.
	Composite {
		/// Shared element fields.
		element: ElementMeta,
		/// Change detection mode declared alongside the view.
		change_detection: ChangeDetectionStrategy,
	},
}

impl RawDeclarationMetadata {
	/// Returns the shared element fields.
	pub fn element(&self) -> &ElementMeta {
		match self {
			Self::Plain(element) | Self::Composite { element, .. } => element,
		}
	}

	/// Returns true for the composite variant.
	pub fn is_composite(&self) -> bool {
		matches!(self, Self::Composite { .. })
	}
}

/// View metadata of a composite element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewMetadata {
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
