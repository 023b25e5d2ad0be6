//! Declarative element metadata resolution.
//!
//! # Purpose
//!
//! Given the identity of a declarative UI element, produce its
//! [`CanonicalDescriptor`] by combining raw annotations, view metadata and
//! lifecycle introspection. Given a root element, resolve every element
//! reachable from its declaration tree.
//!
//! # Mental Model
//!
//! - [`Identity`] is the key. Two identities are equal only if they came from
//!   the same [`Identity::new`] call.
//! - Declaration trees are nested sequences of [`DeclarationEntry`] values that
//!   may hide parts behind lazy [`forward_ref`]s. The [`tree`] passes flatten,
//!   validate and dedupe them.
//! - [`MetadataResolver`] owns the descriptor cache and talks to the outside
//!   world only through the four [`services`] traits.
//! - [`Catalog`] is a ready-made collaborator backed by element definitions,
//!   optionally loaded from a TOML file.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use stencil_metadata::{Catalog, MetadataResolver, Services};
//!
//! let catalog = Arc::new(Catalog::from_toml_str(r#"
//! [[element]]
//! name = "App"
//! selector = "app"
//! module_id = "pkg/app"
//! declarations = ["Badge"]
//!
//! [element.view]
//! template = "<badge></badge>"
//!
//! [[element]]
//! name = "Badge"
//! selector = "badge"
//! module_id = "pkg/badge"
//! "#).unwrap());
//!
//! let app = catalog.identity("App").unwrap().clone();
//! let resolver = MetadataResolver::new(Services::from_shared(catalog));
//!
//! let desc = resolver.resolve(&app).unwrap();
//! assert_eq!(desc.type_.module_url, "package:pkg/app");
//! assert_eq!(resolver.resolve_tree(&app, None).unwrap().len(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod identity;
pub mod raw;
pub mod resolver;
pub mod services;
pub mod tree;

pub use catalog::{Catalog, CatalogBuilder, CatalogError, ElementDef};
pub use config::{ConfigError, ResolverConfig};
pub use descriptor::{CanonicalDescriptor, HostBindings, TemplateDescriptor, TypeDescriptor};
pub use error::{DependencyError, ResolveError, Result};
pub use hooks::LifecycleHook;
pub use identity::Identity;
pub use raw::{ChangeDetectionStrategy, ElementMeta, RawDeclarationMetadata, ViewEncapsulation, ViewMetadata};
pub use resolver::MetadataResolver;
pub use services::{AnnotationStore, DeclarationTreeStore, Introspector, Services, ViewResolver};
pub use tree::{DeclarationEntry, FlatEntry, Literal, forward_ref};
