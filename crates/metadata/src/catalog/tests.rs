use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::tree::{FlatEntry, Literal, TreeLimits, flatten};

const HEROES: &str = r#"
[[element]]
name = "HeroList"
selector = "hero-list"
module_id = "heroes/hero_list"
inputs = ["heroes", "selected: current"]
hooks = ["OnInit", "OnDestroy"]
declarations = ["HeroDetail", ["Highlight", { forward = "Tooltip" }], 3, "Missing"]
change_detection = "OnPush"

[element.view]
template = "<hero-detail></hero-detail>"
styles = [".hero { color: red; }"]

[[element]]
name = "HeroDetail"
selector = "hero-detail"
locator = "asset:heroes/lib/detail"

[[element]]
name = "Highlight"
selector = "[highlight]"
host = { "(mouseenter)" = "onEnter()", "[class.on]" = "active", role = "note" }

[[element]]
name = "Tooltip"
selector = "[tooltip]"
export_as = "tip"
"#;

fn heroes() -> Catalog {
	Catalog::from_toml_str(HEROES).unwrap()
}

#[test]
fn loads_elements_in_file_order() {
	let catalog = heroes();
	let names: Vec<&str> = catalog.identities().map(Identity::name).collect();
	assert_eq!(names, vec!["HeroList", "HeroDetail", "Highlight", "Tooltip"]);
	assert_eq!(catalog.len(), 4);
}

#[test]
fn view_makes_an_element_composite() {
	let catalog = heroes();
	let list = catalog.identity("HeroList").unwrap();
	let def = catalog.get(list).unwrap();

	match &def.raw {
		RawDeclarationMetadata::Composite {
			element,
			change_detection,
		} => {
			assert_eq!(*change_detection, ChangeDetectionStrategy::OnPush);
			assert_eq!(element.module_id.as_deref(), Some("heroes/hero_list"));
		}
		other => panic!("expected composite, got {other:?}"),
	}
	let view = catalog.view_metadata(list).unwrap();
	assert_eq!(view.template.as_deref(), Some("<hero-detail></hero-detail>"));
	assert_eq!(view.styles.len(), 1);
}

#[test]
fn declarations_link_by_name() {
	let catalog = heroes();
	let list = catalog.identity("HeroList").unwrap();
	let tree = catalog.declaration_tree(list).unwrap();

	let flat = flatten(&tree, None, TreeLimits::default()).unwrap();
	let rendered: Vec<String> = flat.iter().map(ToString::to_string).collect();
	assert_eq!(rendered, vec!["HeroDetail", "Highlight", "Tooltip", "3", "Missing"]);

	let tooltip = catalog.identity("Tooltip").unwrap();
	assert_eq!(flat[2].as_element(), Some(tooltip));
	assert!(matches!(&flat[4], FlatEntry::Literal(Literal::String(s)) if s == "Missing"));
}

#[test]
fn introspection_answers_from_definitions() {
	let catalog = heroes();
	let list = catalog.identity("HeroList").unwrap();
	let detail = catalog.identity("HeroDetail").unwrap();

	assert!(catalog.implements_hook(list, LifecycleHook::OnInit).unwrap());
	assert!(!catalog.implements_hook(list, LifecycleHook::DoCheck).unwrap());
	assert_eq!(catalog.import_locator(detail).unwrap(), "asset:heroes/lib/detail");
	assert!(catalog.import_locator(list).is_err());
}

#[test]
fn plain_elements_have_no_view() {
	let catalog = heroes();
	let detail = catalog.identity("HeroDetail").unwrap();
	let err = catalog.view_metadata(detail).unwrap_err();
	assert!(matches!(err, DependencyError::Service { service: "views", .. }));
}

#[test]
fn unknown_identities() {
	let catalog = heroes();
	let stranger = Identity::new("HeroList");

	assert_eq!(catalog.raw_metadata(&stranger).unwrap(), None);
	assert!(catalog.declaration_tree(&stranger).is_err());
	assert!(catalog.implements_hook(&stranger, LifecycleHook::OnInit).is_err());
}

#[rstest]
#[case::duplicate(
	"[[element]]\nname = \"A\"\n[[element]]\nname = \"A\"\n",
	"element 'A' is defined more than once"
)]
#[case::strategy_without_view(
	"[[element]]\nname = \"A\"\nchange_detection = \"OnPush\"\n",
	"element 'A': change_detection requires a view"
)]
fn rejects_inconsistent_catalogs(#[case] source: &str, #[case] message: &str) {
	let err = Catalog::from_toml_str(source).unwrap_err();
	assert_eq!(err.to_string(), message);
}

#[test]
fn rejects_unknown_fields() {
	let err = Catalog::from_toml_str("[[element]]\nname = \"A\"\ncolour = \"red\"\n").unwrap_err();
	assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn empty_document_is_an_empty_catalog() {
	assert!(Catalog::from_toml_str("").unwrap().is_empty());
}

#[test]
fn load_reads_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("heroes.toml");
	std::fs::write(&path, HEROES).unwrap();

	assert_eq!(Catalog::load(&path).unwrap().len(), 4);

	let missing = dir.path().join("absent.toml");
	assert!(matches!(Catalog::load(&missing), Err(CatalogError::Io { .. })));
}

#[test]
fn builder_keeps_first_name_and_replaces_same_identity() {
	let a = Identity::new("Twin");
	let b = Identity::new("Twin");
	let catalog = Catalog::builder()
		.element(ElementDef::plain(a.clone(), ElementMeta::default()))
		.element(ElementDef::plain(b.clone(), ElementMeta::default()))
		.element(ElementDef::plain(a.clone(), ElementMeta::default()).with_locator("asset:a"))
		.build();

	assert_eq!(catalog.len(), 2);
	assert_eq!(catalog.identity("Twin"), Some(&a));
	assert_eq!(catalog.import_locator(&a).unwrap(), "asset:a");
	assert!(catalog.import_locator(&b).is_err());
}

#[test]
fn each_record_keeps_its_own_identity() {
	let catalog = heroes();
	let selectors: Vec<(&str, Option<&str>)> = catalog
		.identities()
		.map(|id| {
			let def = catalog.get(id).unwrap();
			assert_eq!(&def.identity, id);
			(id.name(), def.raw.element().selector.as_deref())
		})
		.collect();
	assert_eq!(
		selectors,
		vec![
			("HeroList", Some("hero-list")),
			("HeroDetail", Some("hero-detail")),
			("Highlight", Some("[highlight]")),
			("Tooltip", Some("[tooltip]")),
		]
	);
}
